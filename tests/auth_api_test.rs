mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use common::{app, post_json, send, FakeSearch, ScriptedChat};

fn me(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/auth/me");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn register_login_and_fetch_profile() {
    let app = app(ScriptedChat::new(vec![]), FakeSearch::empty()).await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            &json!({"username": "aliya", "email": "aliya@example.com", "password": "secret12"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["account"]["username"], "aliya");
    assert!(body["account"].get("password_hash").is_none());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = send(
        &app,
        post_json("/auth/login", &json!({"username": "aliya", "password": "secret12"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, me(Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "aliya@example.com");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = app(ScriptedChat::new(vec![]), FakeSearch::empty()).await;
    let payload = json!({"username": "timur", "email": "timur@example.com", "password": "secret12"});

    let (status, _) = send(&app, post_json("/auth/register", &payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/auth/register", &payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn invalid_registration_payload_is_rejected() {
    let app = app(ScriptedChat::new(vec![]), FakeSearch::empty()).await;

    let (status, _) = send(
        &app,
        post_json(
            "/auth/register",
            &json!({"username": "ab", "email": "not-an-email", "password": "123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app(ScriptedChat::new(vec![]), FakeSearch::empty()).await;
    send(
        &app,
        post_json(
            "/auth/register",
            &json!({"username": "dana", "email": "dana@example.com", "password": "secret12"}),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json("/auth/login", &json!({"username": "dana", "password": "wrong-one"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn profile_requires_a_valid_bearer_token() {
    let app = app(ScriptedChat::new(vec![]), FakeSearch::empty()).await;

    let (status, body) = send(&app, me(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let (status, body) = send(&app, me(Some("not.a.jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}
