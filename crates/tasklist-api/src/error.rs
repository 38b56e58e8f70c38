use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Failures of the auth flows. The `Display` text of the form-level variants
/// is the message shown on the re-rendered login/register form.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingField,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid input")]
    InvalidCharacters,
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Registration failed")]
    StoreWriteFailed(#[source] StoreError),
    /// Same outcome whether the username or the password was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("authentication required")]
    AuthRequired,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Errors reported back to the user on the form they submitted.
    pub fn is_form_error(&self) -> bool {
        !matches!(self, Self::AuthRequired | Self::Store(_))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthRequired => Redirect::to("/login").into_response(),
            Self::Store(e) => e.into_response(),
            other => (StatusCode::BAD_REQUEST, other.to_string()).into_response(),
        }
    }
}

/// Failures of the task routes. Absent and foreign tasks share `NotFound`,
/// so the response never reveals which one it was.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task not found")]
    NotFound,
    #[error("malformed task id")]
    MalformedId,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            Self::MalformedId => (StatusCode::BAD_REQUEST, "Bad Request").into_response(),
            Self::Store(e) => e.into_response(),
        }
    }
}
