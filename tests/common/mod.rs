#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use nav_api::auth::{generate_jwt, Claims};
use nav_api::config::AppConfig;
use nav_api::database::{schema, DatabaseManager};
use nav_api::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.api.icon_api = None;
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.admin_username = Some(ADMIN_USERNAME.to_string());
    config.security.admin_password = Some(ADMIN_PASSWORD.to_string());
    config
}

/// App over a fresh in-memory database with the schema applied
pub async fn spawn_app() -> Result<TestApp> {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: AppConfig) -> Result<TestApp> {
    let pool = DatabaseManager::memory().await.context("failed to open in-memory database")?;
    schema::migrate(&pool).await?;
    Ok(TestApp::from_state(AppState::new(pool, config)))
}

/// App whose database has no tables, so every site query fails
pub async fn spawn_app_without_schema() -> Result<TestApp> {
    let pool = DatabaseManager::memory().await?;
    Ok(TestApp::from_state(AppState::new(pool, test_config())))
}

pub fn admin_token() -> String {
    generate_jwt(&Claims::admin("admin", 1), TEST_SECRET).expect("token")
}

impl TestApp {
    pub fn from_state(state: AppState) -> Self {
        let pool = state.pool.clone();
        Self {
            router: nav_api::app(state),
            pool,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body: {:?}", bytes))?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.send(Request::builder().method("GET").uri(uri).body(Body::empty())?).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.post_raw(uri, body.to_string(), token).await
    }

    pub async fn post_raw(&self, uri: &str, body: String, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body))?).await
    }

    pub async fn add_category(&self, name: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO category (catelog) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Insert a site directly, with an explicit creation time for ordering checks
    pub async fn add_site(
        &self,
        name: &str,
        url: &str,
        catelog_id: i64,
        sort_order: i64,
        create_time: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO sites (name, url, catelog_id, sort_order, create_time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(url)
        .bind(catelog_id)
        .bind(sort_order)
        .bind(create_time)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn site_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sites").fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn index_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'sites' AND name LIKE 'idx_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}

pub fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|r| r["name"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
