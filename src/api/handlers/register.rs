use crate::api::handlers::{error_response, valid_email};
use crate::api::handlers::types::{RegisterRequest, RegisterResponse};
use crate::auth::AuthService;
use crate::domain::BiometricSample;
use crate::storage::PgStore;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path= "/v1/auth/register",
    request_body = RegisterRequest,
    responses (
        (status = 201, description = "Registration successful", body = [RegisterResponse], content_type = "application/json"),
        (status = 400, description = "Missing or malformed registration fields"),
        (status = 409, description = "User with the specified email already exists"),
    ),
    tag= "auth"
)]
// axum handler for register
pub async fn register(
    auth: Extension<Arc<AuthService<PgStore>>>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if request.email.is_empty() {
        return (StatusCode::BAD_REQUEST, "email is required".to_string()).into_response();
    }

    if !valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    if request.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "password is required".to_string()).into_response();
    }

    if request.key_press_times.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "key_press_times is required".to_string(),
        )
            .into_response();
    }

    if request.key_press_intervals.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "key_press_intervals is required".to_string(),
        )
            .into_response();
    }

    let sample = BiometricSample {
        press_times: request.key_press_times,
        press_intervals: request.key_press_intervals,
    };

    match auth.register(&request.email, &request.password, &sample).await {
        Ok(user_id) => (StatusCode::CREATED, Json(RegisterResponse { user_id })).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}
