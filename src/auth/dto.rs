use serde::{Deserialize, Serialize};

use super::repo_types::User;

/// Request body for user registration. Fields arrive optional so a missing
/// field reports "can't be blank" instead of a bare decode failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub demo: Option<bool>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for profile update. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub demo: Option<bool>,
}

/// Validated registration input; produced by `CreateUserRequest::validate`.
#[derive(Debug)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
    pub demo: bool,
}

/// Validated login input.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// User record merged with a freshly minted token. The stored hash rides
/// along but never serializes (see `User`).
#[derive(Debug, Serialize)]
pub struct AuthenticatedUser {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}
