mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;
    let unique_id = Uuid::new_v4();

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "email": format!("test-{}@example.com", unique_id),
            "password": "password123",
            "name": "Test User"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert!(body["user"]["id"].as_str().is_some());
    assert_eq!(
        body["user"]["email"].as_str().unwrap(),
        format!("test-{}@example.com", unique_id)
    );
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let unique_id = Uuid::new_v4();
    let email = format!("test-{}@example.com", unique_id);

    let payload = json!({
        "email": email,
        "password": "password123",
        "name": "Test User"
    });

    app.server.post("/api/auth/register").json(&payload).await;

    let response = app.server.post("/api/auth/register").json(&payload).await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "email": "short@example.com",
            "password": "short",
            "name": "Test User"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": auth.email,
            "password": "TestPassword123!"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["id"].as_str().unwrap(), auth.user_id.to_string());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": auth.email,
            "password": "WrongPassword!"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_str().unwrap(), auth.user_id.to_string());
    assert_eq!(body["email"].as_str().unwrap(), auth.email);
}

#[tokio::test]
async fn test_me_without_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", "Bearer not-a-real-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
