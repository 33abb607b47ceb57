use super::dto::{CreateUserInput, CreateUserRequest, LoginInput, LoginRequest};
use super::error::{FieldErrors, UserError};

const BLANK: &str = "can't be blank";

/// Records `"can't be blank"` for a field that is absent or trims to empty,
/// otherwise yields the value. Every offender is reported, not just the
/// first.
fn required(errors: &mut FieldErrors, name: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(name, BLANK);
            None
        }
    }
}

impl CreateUserRequest {
    /// Runs strictly before any store access; no side effects on failure.
    pub fn validate(self) -> Result<CreateUserInput, UserError> {
        let mut errors = FieldErrors::default();
        let username = required(&mut errors, "username", self.username);
        let email = required(&mut errors, "email", self.email);
        let password = required(&mut errors, "password", self.password);

        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(UserError::Validation(errors));
        };

        Ok(CreateUserInput {
            username,
            email,
            password,
            image: self.image,
            demo: self.demo.unwrap_or(false),
        })
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<LoginInput, UserError> {
        let mut errors = FieldErrors::default();
        let email = required(&mut errors, "email", self.email);
        let password = required(&mut errors, "password", self.password);

        let (Some(email), Some(password)) = (email, password) else {
            return Err(UserError::Validation(errors));
        };

        Ok(LoginInput { email, password })
    }
}
