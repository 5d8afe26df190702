mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_skill() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/skills")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "Rust",
            "description": "Systems programming",
            "level": 4
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Rust");
    assert_eq!(body["level"].as_i64().unwrap(), 4);
    assert_eq!(body["user_id"].as_str().unwrap(), auth.user_id.to_string());
}

#[tokio::test]
async fn test_create_skill_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/skills")
        .json(&json!({
            "name": "Rust",
            "level": 3
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_skill_level_boundaries() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    // Both boundaries are valid (inclusive range)
    for level in [1i64, 5] {
        let response = app
            .server
            .post("/api/skills")
            .add_header("Authorization", auth.auth_header())
            .json(&json!({
                "name": format!("Skill at level {}", level),
                "level": level
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["level"].as_i64().unwrap(), level);
    }
}

#[tokio::test]
async fn test_create_skill_level_out_of_range() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    for level in [0, 6, -1] {
        let response = app
            .server
            .post("/api/skills")
            .add_header("Authorization", auth.auth_header())
            .json(&json!({
                "name": "Bad level",
                "level": level
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    // Nothing persisted
    let response = app
        .server
        .get("/api/skills")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["total"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn test_create_skill_non_numeric_level() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/api/skills")
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "Rust",
            "level": "expert"
        }))
        .await;

    // Rejected at deserialization, before any repository call
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_list_skills_only_own() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user().await;
    let skill = factory.create_skill(auth1.user_id, 3).await;
    factory.create_skill(auth1.user_id, 2).await;

    let auth2 = factory.create_user().await;
    factory.create_skill(auth2.user_id, 5).await;

    let response = app
        .server
        .get("/api/skills")
        .add_header("Authorization", auth1.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data
        .iter()
        .any(|s| s["id"].as_str().unwrap() == skill.id.to_string()));
    // No other user's skill leaks in
    assert!(data
        .iter()
        .all(|s| s["user_id"].as_str().unwrap() == auth1.user_id.to_string()));
}

#[tokio::test]
async fn test_list_skills_newest_first() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    factory
        .create_skill_with_name(auth.user_id, "First", 1)
        .await;
    factory
        .create_skill_with_name(auth.user_id, "Second", 2)
        .await;

    let response = app
        .server
        .get("/api/skills")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = response.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["name"].as_str().unwrap(), "Second");
    assert_eq!(data[1]["name"].as_str().unwrap(), "First");
}

#[tokio::test]
async fn test_list_skills_offset_pagination() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    factory
        .create_skill_with_name(auth.user_id, "Oldest", 1)
        .await;
    factory
        .create_skill_with_name(auth.user_id, "Middle", 2)
        .await;
    factory
        .create_skill_with_name(auth.user_id, "Newest", 3)
        .await;

    // Offset counts rows, not pages: skip only the newest
    let response = app
        .server
        .get("/api/skills?limit=2&offset=1")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["total"].as_i64().unwrap(), 3);
    assert_eq!(body["offset"].as_i64().unwrap(), 1);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Middle", "Oldest"]);
}

#[tokio::test]
async fn test_get_skill_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let fake_id = Uuid::new_v4();
    let response = app
        .server
        .get(&format!("/api/skills/{}", fake_id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_skill_other_user_indistinguishable_from_missing() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user().await;
    let skill = factory.create_skill(auth1.user_id, 3).await;

    let auth2 = factory.create_user().await;

    // A real id owned by someone else...
    let foreign = app
        .server
        .get(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth2.auth_header())
        .await;

    // ...and an id that does not exist at all
    let missing = app
        .server
        .get(&format!("/api/skills/{}", Uuid::new_v4()))
        .add_header("Authorization", auth2.auth_header())
        .await;

    // The two must be indistinguishable from the caller's perspective
    foreign.assert_status(StatusCode::NOT_FOUND);
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(foreign.text(), missing.text());
}

#[tokio::test]
async fn test_update_skill() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let skill = factory.create_skill(auth.user_id, 2).await;

    let response = app
        .server
        .put(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "name": "Updated Skill",
            "level": 5
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"].as_str().unwrap(), "Updated Skill");
    assert_eq!(body["level"].as_i64().unwrap(), 5);
}

#[tokio::test]
async fn test_update_skill_invalid_level() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let skill = factory.create_skill(auth.user_id, 2).await;

    let response = app
        .server
        .put(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth.auth_header())
        .json(&json!({
            "level": 9
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // Stored level untouched
    let get_response = app
        .server
        .get(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth.auth_header())
        .await;
    let body: serde_json::Value = get_response.json();
    assert_eq!(body["level"].as_i64().unwrap(), 2);
}

#[tokio::test]
async fn test_update_skill_other_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user().await;
    let skill = factory.create_skill(auth1.user_id, 3).await;

    let auth2 = factory.create_user().await;
    let response = app
        .server
        .put(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth2.auth_header())
        .json(&json!({
            "name": "Hijacked"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_skill() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let skill = factory.create_skill(auth.user_id, 3).await;

    let response = app
        .server
        .delete(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let get_response = app
        .server
        .get(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth.auth_header())
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_skill_other_user() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user().await;
    let skill = factory.create_skill(auth1.user_id, 3).await;

    let auth2 = factory.create_user().await;
    let response = app
        .server
        .delete(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth2.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    // Still there for its owner
    let get_response = app
        .server
        .get(&format!("/api/skills/{}", skill.id))
        .add_header("Authorization", auth1.auth_header())
        .await;

    get_response.assert_status(StatusCode::OK);
}
