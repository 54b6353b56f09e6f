mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use common::{get_with_auth, login, login_token, seed_client, spawn_gateway};

#[tokio::test]
async fn login_with_email_issues_sixty_hex_char_token() {
    let gw = spawn_gateway().await;
    seed_client(&gw.storage, 1, "user@example.com", "secret").await;

    let (status, body) = login(&gw.app, "user@example.com", "secret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.len(), 60);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(token, token.to_lowercase());

    let client = &body["data"]["client"];
    assert_eq!(client["id"], 1);
    assert_eq!(client["email"], "user@example.com");
    assert_eq!(client["name"], "Test Client");
}

#[tokio::test]
async fn login_expiry_is_effectively_permanent() {
    let gw = spawn_gateway().await;
    seed_client(&gw.storage, 1, "user@example.com", "secret").await;

    let (_, body) = login(&gw.app, "user@example.com", "secret").await;
    let expires_at: DateTime<Utc> = body["data"]["expires_at"]
        .as_str()
        .unwrap()
        .parse()
        .expect("expires_at was not RFC 3339");
    assert!(expires_at > Utc::now() + Duration::days(365 * 50));
}

#[tokio::test]
async fn login_with_numeric_id_succeeds() {
    let gw = spawn_gateway().await;
    seed_client(&gw.storage, 42, "someone@example.com", "hunter2").await;

    let (status, body) = login(&gw.app, "42", "hunter2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["client"]["id"], 42);
}

#[tokio::test]
async fn wrong_password_and_unknown_identifier_share_one_message() {
    let gw = spawn_gateway().await;
    seed_client(&gw.storage, 1, "user@example.com", "secret").await;

    let (status_a, body_a) = login(&gw.app, "user@example.com", "wrong-password").await;
    let (status_b, body_b) = login(&gw.app, "ghost@example.com", "secret").await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_b, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a["status"], "error");
    // The message must not disclose which part was wrong.
    assert_eq!(body_a["message"], body_b["message"]);
}

#[tokio::test]
async fn non_numeric_identifier_without_at_sign_is_rejected() {
    let gw = spawn_gateway().await;
    seed_client(&gw.storage, 1, "user@example.com", "secret").await;

    // No fallback from id mode to email mode.
    let (status, body) = login(&gw.app, "user", "secret").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn relogin_invalidates_previous_token() {
    let gw = spawn_gateway().await;
    seed_client(&gw.storage, 1, "user@example.com", "secret").await;

    let old_token = login_token(&gw.app, "user@example.com", "secret").await;
    let new_token = login_token(&gw.app, "user@example.com", "secret").await;
    assert_ne!(old_token, new_token);

    let (status, _) = get_with_auth(
        &gw.app,
        "/api/v2/client",
        Some(&format!("Bearer {old_token}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_with_auth(
        &gw.app,
        "/api/v2/client",
        Some(&format!("Bearer {new_token}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_login_body_returns_400_envelope() {
    let gw = spawn_gateway().await;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let resp = gw
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v2/auth/login")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = common::read_json(resp).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn empty_credentials_return_400() {
    let gw = spawn_gateway().await;

    let (status, body) = login(&gw.app, "", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn device_name_is_accepted() {
    let gw = spawn_gateway().await;
    seed_client(&gw.storage, 1, "user@example.com", "secret").await;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let payload = json!({
        "identifier": "user@example.com",
        "password": "secret",
        "device_name": "pixel-9",
    });
    let resp = gw
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v2/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
