use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};

use yamdb_api_schema::{comments, reviews};
use yamdb_domain::user::UserRole;
use yamdb_testing::auth::MockAuth;

use crate::helpers::{TestApp, WithAuth, api};

async fn seeded_catalog(app: &TestApp) -> MockAuth {
    let admin = app.seed_admin().await;
    app.create_category(&admin, "Film", "film").await;
    app.create_category(&admin, "Book", "book").await;
    app.create_genre(&admin, "Drama", "drama").await;
    app.create_genre(&admin, "Comedy", "comedy").await;
    admin
}

#[tokio::test]
async fn should_create_title_and_return_read_representation() {
    let app = TestApp::spawn().await;
    let admin = seeded_catalog(&app).await;

    let response = app
        .server
        .post(&api("/titles/"))
        .auth(&admin)
        .json(&json!({
            "name": "Amelie",
            "year": 2001,
            "description": "A shy waitress",
            "category": "film",
            "genre": ["drama", "comedy"],
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Amelie");
    assert_eq!(body["year"], 2001);
    assert_eq!(body["description"], "A shy waitress");
    assert!(body["rating"].is_null());
    assert_eq!(body["category"], json!({ "name": "Film", "slug": "film" }));
    assert_eq!(
        body["genre"],
        json!([
            { "name": "Comedy", "slug": "comedy" },
            { "name": "Drama", "slug": "drama" },
        ])
    );
}

#[tokio::test]
async fn should_report_every_invalid_title_field() {
    let app = TestApp::spawn().await;
    let admin = seeded_catalog(&app).await;
    let next_year = Utc::now().year() + 1;

    let response = app
        .server
        .post(&api("/titles/"))
        .auth(&admin)
        .json(&json!({
            "name": "Future",
            "year": next_year,
            "category": "missing",
            "genre": ["drama", "missing"],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let fields = &response.json::<Value>()["fields"];
    assert!(fields["year"].is_array());
    assert!(fields["category"].is_array());
    assert!(fields["genre"].is_array());
    assert!(fields.get("name").is_none());
}

#[tokio::test]
async fn should_filter_titles() {
    let app = TestApp::spawn().await;
    let admin = seeded_catalog(&app).await;
    app.create_title(
        &admin,
        json!({ "name": "Amelie", "year": 2001, "category": "film", "genre": ["comedy"] }),
    )
    .await;
    app.create_title(
        &admin,
        json!({ "name": "Solaris", "year": 1961, "category": "book", "genre": ["drama"] }),
    )
    .await;

    let count = |query: Value| {
        let server = &app.server;
        async move {
            let mut request = server.get(&api("/titles/"));
            for (key, value) in query.as_object().unwrap() {
                request = request.add_query_param(key, value);
            }
            request.await.json::<Value>()["count"].as_u64().unwrap()
        }
    };

    assert_eq!(count(json!({})).await, 2);
    assert_eq!(count(json!({ "genre": "drama" })).await, 1);
    assert_eq!(count(json!({ "category": "film" })).await, 1);
    assert_eq!(count(json!({ "year": 1961 })).await, 1);
    assert_eq!(count(json!({ "name": "sol" })).await, 1);
    assert_eq!(count(json!({ "genre": "missing" })).await, 0);
}

#[tokio::test]
async fn should_list_titles_by_category_then_name() {
    let app = TestApp::spawn().await;
    let admin = seeded_catalog(&app).await;
    for (name, category) in [
        ("Zelig", Some("film")),
        ("Amelie", Some("film")),
        ("Anathem", None),
        ("Solaris", Some("book")),
    ] {
        let mut body = json!({ "name": name, "year": 2001 });
        if let Some(category) = category {
            body["category"] = json!(category);
        }
        app.create_title(&admin, body).await;
    }

    let list = app.server.get(&api("/titles/")).await.json::<Value>();
    let names: Vec<&str> = list["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|title| title["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Solaris", "Amelie", "Zelig", "Anathem"]);
}

#[tokio::test]
async fn should_rate_title_by_truncated_average() {
    let app = TestApp::spawn().await;
    let admin = seeded_catalog(&app).await;
    let title_id = app
        .create_title(&admin, json!({ "name": "Amelie", "year": 2001 }))
        .await;
    let alice = app.seed_user("alice", UserRole::User).await;
    let bob = app.seed_user("bob", UserRole::User).await;

    app.create_review(&alice, title_id, 7).await;
    app.create_review(&bob, title_id, 8).await;

    let title = app
        .server
        .get(&api(&format!("/titles/{title_id}/")))
        .await
        .json::<Value>();
    assert_eq!(title["rating"], 7);
}

#[tokio::test]
async fn should_patch_only_submitted_fields() {
    let app = TestApp::spawn().await;
    let admin = seeded_catalog(&app).await;
    let title_id = app
        .create_title(
            &admin,
            json!({
                "name": "Amelie",
                "year": 2001,
                "description": "A shy waitress",
                "category": "film",
                "genre": ["comedy"],
            }),
        )
        .await;
    let path = api(&format!("/titles/{title_id}/"));

    let cleared = app
        .server
        .patch(&path)
        .auth(&admin)
        .json(&json!({ "description": null, "genre": ["drama"] }))
        .await;
    cleared.assert_status_ok();
    let body = cleared.json::<Value>();
    assert!(body["description"].is_null());
    assert_eq!(body["name"], "Amelie");
    assert_eq!(body["category"]["slug"], "film");
    assert_eq!(body["genre"], json!([{ "name": "Drama", "slug": "drama" }]));

    let detached = app
        .server
        .patch(&path)
        .auth(&admin)
        .json(&json!({ "category": null }))
        .await
        .json::<Value>();
    assert!(detached["category"].is_null());
    assert_eq!(detached["genre"][0]["slug"], "drama");
}

#[tokio::test]
async fn should_delete_title_with_reviews_and_comments() {
    let app = TestApp::spawn().await;
    let admin = seeded_catalog(&app).await;
    let alice = app.seed_user("alice", UserRole::User).await;
    let title_id = app
        .create_title(&admin, json!({ "name": "Amelie", "year": 2001 }))
        .await;
    let review_id = app.create_review(&alice, title_id, 9).await;
    app.server
        .post(&api(&format!(
            "/titles/{title_id}/reviews/{review_id}/comments/"
        )))
        .auth(&alice)
        .json(&json!({ "text": "agreed" }))
        .await
        .assert_status(StatusCode::CREATED);

    app.server
        .delete(&api(&format!("/titles/{title_id}/")))
        .auth(&alice)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&api(&format!("/titles/{title_id}/")))
        .auth(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let missing = app
        .server
        .get(&api(&format!("/titles/{title_id}/")))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["kind"], "TITLE_NOT_FOUND");
    assert_eq!(reviews::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(comments::Entity::find().count(&app.db).await.unwrap(), 0);
}
