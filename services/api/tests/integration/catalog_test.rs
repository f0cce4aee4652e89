use axum::http::StatusCode;
use serde_json::{Value, json};

use yamdb_domain::user::UserRole;

use crate::helpers::{TestApp, WithAuth, api};

#[tokio::test]
async fn should_restrict_catalog_writes_to_admins() {
    let app = TestApp::spawn().await;
    let user = app.seed_user("alice", UserRole::User).await;
    let moderator = app.seed_user("mod", UserRole::Moderator).await;
    let body = json!({ "name": "Film", "slug": "film" });

    app.server
        .post(&api("/categories/"))
        .json(&body)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    for auth in [&user, &moderator] {
        app.server
            .post(&api("/categories/"))
            .auth(auth)
            .json(&body)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    let admin = app.seed_admin().await;
    app.create_category(&admin, "Film", "film").await;

    let list = app.server.get(&api("/categories/")).await;
    list.assert_status_ok();
    list.assert_json(&json!({
        "count": 1,
        "results": [{ "name": "Film", "slug": "film" }],
    }));
}

#[tokio::test]
async fn should_apply_role_changes_to_existing_tokens() {
    let app = TestApp::spawn().await;
    let root = app.seed_admin().await;
    let boss = app.seed_user("boss", UserRole::Admin).await;
    let alice = app.seed_user("alice", UserRole::User).await;

    let demoted = app
        .server
        .patch(&api("/users/boss/"))
        .auth(&root)
        .json(&json!({ "role": "user" }))
        .await;
    demoted.assert_status_ok();
    assert_eq!(demoted.json::<Value>()["role"], "user");

    let response = app
        .server
        .post(&api("/categories/"))
        .auth(&boss)
        .json(&json!({ "name": "Film", "slug": "film" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");

    app.server
        .patch(&api("/users/alice/"))
        .auth(&root)
        .json(&json!({ "role": "admin" }))
        .await
        .assert_status_ok();
    app.create_category(&alice, "Film", "film").await;
}

#[tokio::test]
async fn should_reject_duplicate_and_malformed_slugs() {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;
    app.create_genre(&admin, "Drama", "drama").await;

    let duplicate = app
        .server
        .post(&api("/genres/"))
        .auth(&admin)
        .json(&json!({ "name": "Another drama", "slug": "drama" }))
        .await;
    duplicate.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.json::<Value>()["kind"], "SLUG_ALREADY_EXISTS");

    let malformed = app
        .server
        .post(&api("/genres/"))
        .auth(&admin)
        .json(&json!({ "name": "Sci-Fi", "slug": "sci fi!" }))
        .await;
    malformed.assert_status(StatusCode::BAD_REQUEST);
    assert!(malformed.json::<Value>()["fields"]["slug"].is_array());
}

#[tokio::test]
async fn should_search_and_paginate_by_name() {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;
    app.create_genre(&admin, "Drama", "drama").await;
    app.create_genre(&admin, "Comedy", "comedy").await;
    app.create_genre(&admin, "Documentary", "documentary").await;

    let found = app
        .server
        .get(&api("/genres/"))
        .add_query_param("search", "ram")
        .await
        .json::<Value>();
    assert_eq!(found["count"], 1);
    assert_eq!(found["results"][0]["slug"], "drama");

    let page = app
        .server
        .get(&api("/genres/"))
        .add_query_param("limit", 1)
        .add_query_param("offset", 1)
        .await
        .json::<Value>();
    assert_eq!(page["count"], 3);
    assert_eq!(page["results"].as_array().unwrap().len(), 1);
    assert_eq!(page["results"][0]["slug"], "documentary");

    let beyond = app
        .server
        .get(&api("/genres/"))
        .add_query_param("offset", u64::MAX)
        .await;
    beyond.assert_status_ok();
    let beyond = beyond.json::<Value>();
    assert_eq!(beyond["count"], 3);
    assert!(beyond["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_detach_titles_when_category_is_deleted() {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;
    app.create_category(&admin, "Film", "film").await;
    let title_id = app
        .create_title(
            &admin,
            json!({ "name": "Solaris", "year": 1972, "category": "film" }),
        )
        .await;

    app.server
        .delete(&api("/categories/film/"))
        .auth(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let title = app
        .server
        .get(&api(&format!("/titles/{title_id}/")))
        .await
        .json::<Value>();
    assert_eq!(title["name"], "Solaris");
    assert!(title["category"].is_null());

    let again = app
        .server
        .delete(&api("/categories/film/"))
        .auth(&admin)
        .await;
    again.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(again.json::<Value>()["kind"], "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn should_unlink_genre_from_titles_when_deleted() {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;
    app.create_genre(&admin, "Drama", "drama").await;
    app.create_genre(&admin, "Comedy", "comedy").await;
    let title_id = app
        .create_title(
            &admin,
            json!({ "name": "Amelie", "year": 2001, "genre": ["drama", "comedy"] }),
        )
        .await;

    app.server
        .delete(&api("/genres/drama/"))
        .auth(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let title = app
        .server
        .get(&api(&format!("/titles/{title_id}/")))
        .await
        .json::<Value>();
    assert_eq!(title["genre"], json!([{ "name": "Comedy", "slug": "comedy" }]));
}
