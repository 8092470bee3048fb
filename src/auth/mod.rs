use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Access level carried by tokens that may create sites.
pub const ADMIN_ACCESS: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub access: String,
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn admin(subject: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: subject.into(),
            access: ADMIN_ACCESS.to_string(),
            jti: Uuid::new_v4(),
            exp,
            iat: now.timestamp(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.access == ADMIN_ACCESS
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

/// Extract the bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

/// Decides whether a request comes from an administrator.
#[async_trait]
pub trait AdminAuthenticator: Send + Sync {
    async fn is_admin(&self, headers: &HeaderMap) -> bool;
}

/// Accepts `Authorization: Bearer <jwt>` tokens signed with the configured secret
/// whose `access` claim is `admin`.
pub struct JwtAdminAuthenticator {
    secret: String,
}

impl JwtAdminAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(security.jwt_secret.clone())
    }
}

#[async_trait]
impl AdminAuthenticator for JwtAdminAuthenticator {
    async fn is_admin(&self, headers: &HeaderMap) -> bool {
        let token = match extract_bearer_token(headers) {
            Ok(token) => token,
            Err(msg) => {
                tracing::debug!("Admin check failed: {}", msg);
                return false;
            }
        };

        match validate_jwt(token, &self.secret) {
            Ok(claims) => claims.is_admin(),
            Err(e) => {
                tracing::debug!("Admin check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn generate_requires_secret() {
        let claims = Claims::admin("admin", 1);
        assert!(matches!(generate_jwt(&claims, ""), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = generate_jwt(&Claims::admin("admin", 1), "secret-a").unwrap();
        assert!(matches!(validate_jwt(&token, "secret-b"), Err(JwtError::InvalidToken(_))));
        assert_eq!(validate_jwt(&token, "secret-a").unwrap().sub, "admin");
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer_token(&bearer("abc")).unwrap(), "abc");
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());

        let mut basic = HeaderMap::new();
        basic.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert!(extract_bearer_token(&basic).is_err());
    }

    #[tokio::test]
    async fn only_admin_tokens_pass() {
        let auth = JwtAdminAuthenticator::new("s3cret");

        let admin = generate_jwt(&Claims::admin("admin", 1), "s3cret").unwrap();
        assert!(auth.is_admin(&bearer(&admin)).await);

        let mut reader = Claims::admin("reader", 1);
        reader.access = "read".to_string();
        let reader = generate_jwt(&reader, "s3cret").unwrap();
        assert!(!auth.is_admin(&bearer(&reader)).await);

        let mut expired = Claims::admin("admin", 1);
        expired.exp = Utc::now().timestamp() - 3600;
        let expired = generate_jwt(&expired, "s3cret").unwrap();
        assert!(!auth.is_admin(&bearer(&expired)).await);

        assert!(!auth.is_admin(&HeaderMap::new()).await);
    }

    #[tokio::test]
    async fn empty_secret_rejects_everything() {
        let token = generate_jwt(&Claims::admin("admin", 1), "s3cret").unwrap();
        assert!(!JwtAdminAuthenticator::new("").is_admin(&bearer(&token)).await);
    }
}
