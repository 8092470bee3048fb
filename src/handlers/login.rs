use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, Claims, JwtError};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
}

/// POST /api/login - exchange the configured admin credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let security = &state.config.security;

    let authorized = match (&security.admin_username, &security.admin_password) {
        (Some(username), Some(password)) => {
            request.username.trim() == username.as_str() && request.password == *password
        }
        _ => false,
    };
    if !authorized {
        tracing::warn!(username = %request.username, "Rejected admin login");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let claims = Claims::admin(request.username.trim(), security.jwt_expiry_hours);
    let token = generate_jwt(&claims, &security.jwt_secret).map_err(|e| match e {
        JwtError::InvalidSecret => ApiError::service_unavailable("Token signing is not configured"),
        other => ApiError::internal_server_error(other.to_string()),
    })?;

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: security.jwt_expiry_hours * 3600,
    }))
}
