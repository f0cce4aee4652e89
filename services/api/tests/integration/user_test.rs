use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use yamdb_api_schema::reviews;
use yamdb_domain::user::UserRole;

use crate::helpers::{TestApp, WithAuth, api};

#[tokio::test]
async fn should_restrict_user_directory_to_admins() {
    let app = TestApp::spawn().await;
    let alice = app.seed_user("alice", UserRole::User).await;
    let moderator = app.seed_user("mod", UserRole::Moderator).await;

    app.server
        .get(&api("/users/"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    for auth in [&alice, &moderator] {
        app.server
            .get(&api("/users/"))
            .auth(auth)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    let admin = app.seed_admin().await;
    let list = app
        .server
        .get(&api("/users/"))
        .auth(&admin)
        .add_query_param("search", "ali")
        .await;
    list.assert_status_ok();
    let body = list.json::<Value>();
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["username"], "alice");
}

#[tokio::test]
async fn should_create_users_as_admin() {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;

    let created = app
        .server
        .post(&api("/users/"))
        .auth(&admin)
        .json(&json!({
            "username": "carol",
            "email": "carol@example.com",
            "role": "moderator",
            "bio": "film buff",
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    created.assert_json(&json!({
        "username": "carol",
        "email": "carol@example.com",
        "first_name": "",
        "last_name": "",
        "bio": "film buff",
        "role": "moderator",
    }));

    let duplicate = app
        .server
        .post(&api("/users/"))
        .auth(&admin)
        .json(&json!({ "username": "carol", "email": "c2@example.com" }))
        .await;
    duplicate.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.json::<Value>()["kind"], "USER_ALREADY_EXISTS");

    let invalid = app
        .server
        .post(&api("/users/"))
        .auth(&admin)
        .json(&json!({ "username": "me", "email": "me@example.com", "role": "root" }))
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
    let fields = &invalid.json::<Value>()["fields"];
    assert!(fields["username"].is_array());
    assert!(fields["role"].is_array());
}

#[tokio::test]
async fn should_get_and_update_user_by_username() {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;
    app.seed_user("alice", UserRole::User).await;

    let promoted = app
        .server
        .patch(&api("/users/alice/"))
        .auth(&admin)
        .json(&json!({ "role": "moderator", "first_name": "Alice" }))
        .await;
    promoted.assert_status_ok();
    let body = promoted.json::<Value>();
    assert_eq!(body["role"], "moderator");
    assert_eq!(body["first_name"], "Alice");

    let fetched = app
        .server
        .get(&api("/users/alice/"))
        .auth(&admin)
        .await
        .json::<Value>();
    assert_eq!(fetched["role"], "moderator");

    let missing = app.server.get(&api("/users/ghost/")).auth(&admin).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_keep_role_and_email_when_user_edits_own_profile() {
    let app = TestApp::spawn().await;
    let alice = app.seed_user("alice", UserRole::User).await;

    let response = app
        .server
        .patch(&api("/users/me/"))
        .auth(&alice)
        .json(&json!({
            "role": "admin",
            "email": "hijack@example.com",
            "bio": "hello",
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["role"], "user");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["bio"], "hello");

    app.server
        .get(&api("/users/me/"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_delete_user_with_their_reviews() {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;
    let alice = app.seed_user("alice", UserRole::User).await;
    let title_id = app
        .create_title(&admin, json!({ "name": "Amelie", "year": 2001 }))
        .await;
    app.create_review(&alice, title_id, 6).await;

    app.server
        .delete(&api("/users/alice/"))
        .auth(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(reviews::Entity::find().count(&app.db).await.unwrap(), 0);
    let me = app.server.get(&api("/users/me/")).auth(&alice).await;
    me.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(me.json::<Value>()["kind"], "UNAUTHORIZED");
}
