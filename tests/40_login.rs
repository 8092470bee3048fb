mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_issues_token_accepted_by_create() -> Result<()> {
    let app = common::spawn_app().await?;
    let cat = app.add_category("Dev").await?;

    let (status, body) = app
        .post_json(
            "/api/login",
            &json!({ "username": common::ADMIN_USERNAME, "password": common::ADMIN_PASSWORD }),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["code"], 200);
    assert_eq!(body["expiresIn"], 24 * 7 * 3600);
    let token = body["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let (status, _) = app
        .post_json(
            "/api/config",
            &json!({ "name": "A", "url": "https://a.com", "catelogId": cat }),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_password() -> Result<()> {
    let app = common::spawn_app().await?;

    let (status, body) = app
        .post_json(
            "/api/login",
            &json!({ "username": common::ADMIN_USERNAME, "password": "nope" }),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("token").is_none());
    Ok(())
}

#[tokio::test]
async fn login_disabled_without_configured_credentials() -> Result<()> {
    let mut config = common::test_config();
    config.security.admin_username = None;
    config.security.admin_password = None;
    let app = common::spawn_app_with(config).await?;

    let (status, _) = app
        .post_json("/api/login", &json!({ "username": "", "password": "" }), None)
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
