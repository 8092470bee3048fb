use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects the request with 401 unless the configured authenticator recognizes
/// the caller as an administrator. Runs before the body is read.
pub async fn admin_auth_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.auth.is_admin(request.headers()).await {
        tracing::warn!(
            method = %request.method(),
            uri = %request.uri(),
            "Rejected unauthenticated admin request"
        );
        return ApiError::unauthorized("Unauthorized").into_response();
    }

    next.run(request).await
}
