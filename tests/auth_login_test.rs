mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use procure_api::auth::Claims;

use common::{body_json, TestApp};

#[tokio::test]
async fn login_returns_a_usable_bearer_token() {
    let app = TestApp::new().await;
    let user_id = app.seed_user("wilai@example.co.th", "s3cr3t-pass").await;

    let response = app
        .request(
            Method::POST,
            "/login",
            Some(json!({
                "email": "wilai@example.co.th",
                "password": "s3cr3t-pass",
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user_id"].as_i64(), Some(user_id as i64));
    let token = body["access_token"].as_str().expect("token in response");

    // The token must open the protected routes.
    let listed = app
        .request(Method::GET, "/pr/prs/", None, Some(token))
        .await;
    assert_eq!(listed.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_unknown_email_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/login",
            Some(json!({
                "email": "nobody@example.co.th",
                "password": "whatever",
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_with_the_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.seed_user("wilai@example.co.th", "s3cr3t-pass").await;

    let response = app
        .request(
            Method::POST,
            "/login",
            Some(json!({
                "email": "wilai@example.co.th",
                "password": "not-the-password",
            })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/pr/prs/", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_tokens_are_rejected_with_a_distinct_message() {
    let app = TestApp::new().await;

    let now = Utc::now();
    let claims = Claims {
        sub: "wilai@example.co.th".to_string(),
        user_id: 1,
        jti: Uuid::new_v4().to_string(),
        iat: (now - Duration::hours(3)).timestamp(),
        exp: (now - Duration::hours(2)).timestamp(),
    };
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(app.state.config.jwt_secret.as_bytes()),
    )
    .expect("encode expired token");

    let response = app
        .request(Method::GET, "/pr/prs/", None, Some(&expired))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Token has expired");
}

#[tokio::test]
async fn requests_without_any_authorization_header_are_rejected() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/pr/prs/", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "No authentication token provided");
}

#[tokio::test]
async fn health_and_login_stay_open_without_credentials() {
    let app = TestApp::new().await;

    let health = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(health.status(), StatusCode::OK);
    let body = body_json(health).await;
    assert_eq!(body["checks"]["database"], "healthy");

    let status = app.request(Method::GET, "/status", None, None).await;
    assert_eq!(status.status(), StatusCode::OK);
}
