mod common;

use chrono::Duration;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn get_me(app: &common::TestApp, authorization: Option<String>) -> reqwest::Response {
    let mut request = reqwest::Client::new().get(format!("{}/cms/me", app.address));
    if let Some(authorization) = authorization {
        request = request.header("Authorization", authorization);
    }
    request.send().await.expect("Failed to send request")
}

#[tokio::test]
async fn me_requires_a_credential() {
    let app = common::spawn_app().await;

    let response = get_me(&app, None).await;

    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    let body: Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["status"], "unauthorized");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Missing or malformed credential"));
}

#[tokio::test]
async fn me_rejects_malformed_header() {
    let app = common::spawn_app().await;
    let token = common::create_jwt(common::SECRET, "editor@site.org", Duration::minutes(10));

    for header in [token.clone(), format!("Token {}", token), "Bearer".to_string()] {
        let response = get_me(&app, Some(header)).await;
        assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    }
}

#[tokio::test]
async fn me_rejects_forged_signature() {
    let app = common::spawn_app().await;
    let forged = common::unsigned_token(json!({
        "sub": "1",
        "email": "slidespr@gmail.com",
        "exp": 4_000_000_000_i64,
    }));

    let response = get_me(&app, Some(format!("Bearer {}", forged))).await;

    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    let text = response.text().await.expect("Should read body");
    assert!(
        text.contains("Signature verification failed"),
        "Error body should mention the signature: {}",
        text
    );
}

#[tokio::test]
async fn me_rejects_expired_token() {
    let app = common::spawn_app().await;
    let token = common::create_jwt(common::SECRET, "editor@site.org", Duration::minutes(-5));

    let response = get_me(&app, Some(format!("Bearer {}", token))).await;

    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    let text = response.text().await.expect("Should read body");
    assert!(text.contains("Expired token"), "Error body should mention expiration: {}", text);
}

#[tokio::test]
async fn me_returns_verified_identity() {
    let app = common::spawn_app().await;
    let token = common::create_jwt(common::SECRET, "editor@site.org", Duration::minutes(30));

    let response = get_me(&app, Some(format!("Bearer {}", token))).await;

    assert_eq!(StatusCode::OK, response.status());
    let body: Value = response.json().await.expect("Response should be valid JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["item"]["email"], "editor@site.org");
    assert_eq!(body["item"]["subject"], "1");
}
