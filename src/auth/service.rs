//! The core account operations. Each one takes the store and signing keys
//! explicitly; logging belongs to the HTTP layer, not here.

use super::dto::{AuthenticatedUser, CreateUserRequest, LoginRequest, UpdateUserRequest};
use super::error::UserError;
use super::jwt::JwtKeys;
use super::password;
use super::repo::UserStore;
use super::repo_types::{NewUser, UserPatch};

/// Registers a new user. Exactly one insert on success, none on any failure
/// path.
pub async fn create_user(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: CreateUserRequest,
) -> Result<AuthenticatedUser, UserError> {
    let input = req.validate()?;

    if store.find_by_email(&input.email).await?.is_some() {
        return Err(UserError::EmailTaken);
    }

    let password_hash = password::hash(&input.password)?;
    let user = store
        .create(NewUser {
            username: input.username,
            email: input.email,
            password_hash,
            image: input.image,
            demo: input.demo,
        })
        .await?;

    let token = keys.sign(&user)?;
    Ok(AuthenticatedUser { user, token })
}

/// Verifies credentials and mints a token. Unknown email and wrong password
/// produce the same error.
pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<AuthenticatedUser, UserError> {
    let input = req.validate()?;

    let Some(user) = store.find_by_email(&input.email).await? else {
        return Err(UserError::InvalidCredentials);
    };

    if !password::verify(&input.password, &user.password_hash)? {
        return Err(UserError::InvalidCredentials);
    }

    let token = keys.sign(&user)?;
    Ok(AuthenticatedUser { user, token })
}

/// Fetches a user by identity with a fresh token on every call.
pub async fn current_user(
    store: &dyn UserStore,
    keys: &JwtKeys,
    id: i64,
) -> Result<AuthenticatedUser, UserError> {
    let Some(user) = store.find_by_id(id).await? else {
        return Err(UserError::NotFound);
    };

    let token = keys.sign(&user)?;
    Ok(AuthenticatedUser { user, token })
}

/// Applies a partial update. A provided password is hashed before it goes
/// anywhere near the store; absent fields are left untouched.
pub async fn update_user(
    store: &dyn UserStore,
    keys: &JwtKeys,
    id: i64,
    req: UpdateUserRequest,
) -> Result<AuthenticatedUser, UserError> {
    let UpdateUserRequest {
        username,
        email,
        password,
        image,
        demo,
    } = req;

    let password_hash = match password.as_deref() {
        Some(plain) => Some(password::hash(plain)?),
        None => None,
    };

    let user = store
        .update(
            id,
            UserPatch {
                username,
                email,
                password_hash,
                image,
                demo,
            },
        )
        .await?;

    let token = keys.sign(&user)?;
    Ok(AuthenticatedUser { user, token })
}
