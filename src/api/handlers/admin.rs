use crate::api::handlers::error_response;
use crate::api::handlers::types::IsAdminResponse;
use crate::auth::AuthService;
use crate::storage::PgStore;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path= "/v1/users/{user_id}/admin",
    params(
        ("user_id" = i64, Path, description = "User id to check")
    ),
    responses (
        (status = 200, description = "Admin flag for the user", body = [IsAdminResponse], content_type = "application/json"),
        (status = 400, description = "Missing user id"),
        (status = 404, description = "User not found"),
    ),
    tag= "users"
)]
// axum handler for the admin flag
pub async fn is_admin(
    auth: Extension<Arc<AuthService<PgStore>>>,
    Path(user_id): Path<i64>,
) -> Response {
    if user_id == 0 {
        return (StatusCode::BAD_REQUEST, "user_id is required".to_string()).into_response();
    }

    match auth.is_admin(user_id).await {
        Ok(is_admin) => (
            StatusCode::OK,
            Json(IsAdminResponse { user_id, is_admin }),
        )
            .into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}
