use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use super::repo::StoreError;

/// Field name to error messages, rendered on the wire as
/// `{"errors": {"<field>": ["<message>", ...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("email has already been taken")]
    EmailTaken,
    // One error for unknown email and wrong password; the response must not
    // reveal which check failed.
    #[error("email or password is invalid")]
    InvalidCredentials,
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UserError::EmailTaken => StatusCode::CONFLICT,
            UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The field-level messages this error renders, if any.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            UserError::Validation(errors) => Some(errors.clone()),
            UserError::EmailTaken => Some(FieldErrors::single("email", "has already been taken")),
            UserError::InvalidCredentials => {
                Some(FieldErrors::single("email or password", "is invalid"))
            }
            UserError::NotFound | UserError::Internal(_) => None,
        }
    }
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => UserError::EmailTaken,
            StoreError::RowNotFound => UserError::NotFound,
            StoreError::Backend(e) => UserError::Internal(e),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: FieldErrors,
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let UserError::Internal(e) = &self {
            error!(error = %e, "internal error");
            return (status, "internal server error").into_response();
        }
        warn!(error = %self, "request rejected");
        match self.field_errors() {
            Some(errors) => (status, Json(ErrorBody { errors })).into_response(),
            None => (status, self.to_string()).into_response(),
        }
    }
}
