use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that stamps the HTTP status into the body as `code`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub body: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(body: T) -> Self {
        Self::with_status(body, StatusCode::OK)
    }

    pub fn with_status(body: T, status_code: StatusCode) -> Self {
        Self { body, status_code }
    }

    /// Create a 201 Created response
    pub fn created(body: T) -> Self {
        Self::with_status(body, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code;

        let value = match serde_json::to_value(&self.body) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "code": 500,
                        "error": "INTERNAL_SERVER_ERROR",
                        "message": "Failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        // Object bodies get `code` merged in; anything else is nested under `data`
        let envelope = match value {
            Value::Object(mut map) => {
                map.insert("code".to_string(), json!(status.as_u16()));
                Value::Object(map)
            }
            other => json!({
                "code": status.as_u16(),
                "data": other
            }),
        };

        (status, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn merges_code_into_object_bodies() {
        let response = ApiResponse::created(json!({ "message": "ok" })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!({ "code": 201, "message": "ok" }));
    }

    #[tokio::test]
    async fn nests_non_object_bodies() {
        let response = ApiResponse::success(vec![1, 2]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "code": 200, "data": [1, 2] }));
    }
}
