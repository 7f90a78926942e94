pub mod admin;
pub mod health;
pub mod login;
pub mod register;
pub mod types;

// common functions for the handlers
use crate::auth::AuthError;
use axum::http::StatusCode;
use regex::Regex;

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Map an auth failure to its HTTP status and client-facing message. Internal
/// failures carry details in the log only, never in the response body.
pub fn error_response(err: &AuthError) -> (StatusCode, String) {
    let status = match err {
        AuthError::InvalidCredentials | AuthError::InvalidBiometrics(_) => StatusCode::UNAUTHORIZED,
        AuthError::InvalidAppId => StatusCode::BAD_REQUEST,
        AuthError::UserAlreadyExists => StatusCode::CONFLICT,
        AuthError::UserNotFound => StatusCode::NOT_FOUND,
        AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, err.to_string())
}
