use crate::api::handlers::error_response;
use crate::api::handlers::types::{LoginRequest, LoginResponse};
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
    path= "/v1/auth/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", body = [LoginResponse], content_type = "application/json"),
        (status = 400, description = "Missing login fields or unknown application"),
        (status = 401, description = "Invalid credentials or keystroke mismatch"),
    ),
    tag= "auth"
)]
// axum handler for login
pub async fn login(
    auth: Extension<Arc<AuthService<PgStore>>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if request.email.is_empty() {
        return (StatusCode::BAD_REQUEST, "email is required".to_string()).into_response();
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

    if request.app_id == 0 {
        return (StatusCode::BAD_REQUEST, "app_id is required".to_string()).into_response();
    }

    let sample = BiometricSample {
        press_times: request.key_press_times,
        press_intervals: request.key_press_intervals,
    };

    match auth
        .login(&request.email, &request.password, &sample, request.app_id)
        .await
    {
        Ok(token) => (StatusCode::OK, Json(LoginResponse { token })).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}
