use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use yamdb_api::domain::repository::UserRepository as _;
use yamdb_api_schema::outbox_events;

use crate::helpers::{TestApp, api};

#[tokio::test]
async fn should_sign_up_and_exchange_code_for_token() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post(&api("/auth/signup/"))
        .json(&json!({ "username": "alice", "email": "alice@example.com" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "username": "alice", "email": "alice@example.com" }));

    let user = app.users().find_by_username("alice").await.unwrap().unwrap();
    assert!(!user.confirmation_code.is_empty());
    let queued = outbox_events::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(queued, 1);

    let wrong = app
        .server
        .post(&api("/auth/token/"))
        .json(&json!({ "username": "alice", "confirmation_code": "WRONG" }))
        .await;
    wrong.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(wrong.json::<Value>()["kind"], "INVALID_CONFIRMATION_CODE");

    let body = json!({ "username": "alice", "confirmation_code": user.confirmation_code });
    let response = app.server.post(&api("/auth/token/")).json(&body).await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_owned();

    let me = app
        .server
        .get(&api("/users/me/"))
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        )
        .await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["username"], "alice");
    assert_eq!(me.json::<Value>()["role"], "user");

    // The code is single use.
    let reused = app.server.post(&api("/auth/token/")).json(&body).await;
    reused.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_signup_conflicts() {
    let app = TestApp::spawn().await;
    app.server
        .post(&api("/auth/signup/"))
        .json(&json!({ "username": "alice", "email": "alice@example.com" }))
        .await
        .assert_status_ok();

    let mismatch = app
        .server
        .post(&api("/auth/signup/"))
        .json(&json!({ "username": "alice", "email": "other@example.com" }))
        .await;
    mismatch.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.json::<Value>()["kind"], "USERNAME_EMAIL_MISMATCH");

    let taken = app
        .server
        .post(&api("/auth/signup/"))
        .json(&json!({ "username": "bob", "email": "alice@example.com" }))
        .await;
    taken.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(taken.json::<Value>()["kind"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn should_reject_reserved_username_at_signup() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post(&api("/auth/signup/"))
        .json(&json!({ "username": "me", "email": "me@example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["username"].is_array());
}

#[tokio::test]
async fn should_return_not_found_for_token_of_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post(&api("/auth/token/"))
        .json(&json!({ "username": "ghost", "confirmation_code": "ABC" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_tampered_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .get(&api("/users/me/"))
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_answer_health_probes_with_request_id() {
    let app = TestApp::spawn().await;

    let live = app.server.get("/healthz").await;
    live.assert_status_ok();
    assert!(live.headers().contains_key("x-request-id"));

    app.server.get("/readyz").await.assert_status_ok();
}
