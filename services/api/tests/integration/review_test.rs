use axum::http::StatusCode;
use serde_json::{Value, json};

use yamdb_domain::user::UserRole;
use yamdb_testing::auth::MockAuth;

use crate::helpers::{TestApp, WithAuth, api};

struct Fixture {
    app: TestApp,
    admin: MockAuth,
    title_id: i64,
    alice: MockAuth,
    bob: MockAuth,
}

async fn fixture() -> Fixture {
    let app = TestApp::spawn().await;
    let admin = app.seed_admin().await;
    let title_id = app
        .create_title(&admin, json!({ "name": "Amelie", "year": 2001 }))
        .await;
    let alice = app.seed_user("alice", UserRole::User).await;
    let bob = app.seed_user("bob", UserRole::User).await;
    Fixture {
        app,
        admin,
        title_id,
        alice,
        bob,
    }
}

#[tokio::test]
async fn should_create_review_with_author_and_title() {
    let f = fixture().await;

    let response = f
        .app
        .server
        .post(&api(&format!("/titles/{}/reviews/", f.title_id)))
        .auth(&f.alice)
        .json(&json!({ "text": "Lovely", "score": 9 }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["author"], "alice");
    assert_eq!(body["score"], 9);
    assert_eq!(body["title"], f.title_id);
    assert!(body["pub_date"].as_str().unwrap().ends_with('Z'));

    let list = f
        .app
        .server
        .get(&api(&format!("/titles/{}/reviews/", f.title_id)))
        .await
        .json::<Value>();
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn should_allow_one_review_per_title_and_author() {
    let f = fixture().await;
    f.app.create_review(&f.alice, f.title_id, 5).await;

    let second = f
        .app
        .server
        .post(&api(&format!("/titles/{}/reviews/", f.title_id)))
        .auth(&f.alice)
        .json(&json!({ "text": "Changed my mind", "score": 6 }))
        .await;

    second.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(second.json::<Value>()["kind"], "REVIEW_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_scores_outside_range() {
    let f = fixture().await;

    for score in [0, 11] {
        let response = f
            .app
            .server
            .post(&api(&format!("/titles/{}/reviews/", f.title_id)))
            .auth(&f.alice)
            .json(&json!({ "text": "Hmm", "score": score }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["fields"]["score"].is_array());
    }
}

#[tokio::test]
async fn should_require_authentication_to_review() {
    let f = fixture().await;

    f.app
        .server
        .post(&api(&format!("/titles/{}/reviews/", f.title_id)))
        .json(&json!({ "text": "Anonymous", "score": 5 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_limit_edits_to_author_and_moderators() {
    let f = fixture().await;
    let review_id = f.app.create_review(&f.alice, f.title_id, 5).await;
    let path = api(&format!("/titles/{}/reviews/{review_id}/", f.title_id));

    f.app
        .server
        .patch(&path)
        .auth(&f.bob)
        .json(&json!({ "score": 1 }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let own = f
        .app
        .server
        .patch(&path)
        .auth(&f.alice)
        .json(&json!({ "text": "Better on rewatch" }))
        .await;
    own.assert_status_ok();
    assert_eq!(own.json::<Value>()["text"], "Better on rewatch");
    assert_eq!(own.json::<Value>()["score"], 5);

    let moderator = f.app.seed_user("mod", UserRole::Moderator).await;
    let moderated = f
        .app
        .server
        .patch(&path)
        .auth(&moderator)
        .json(&json!({ "score": 6 }))
        .await;
    moderated.assert_status_ok();
    assert_eq!(moderated.json::<Value>()["author"], "alice");

    f.app
        .server
        .delete(&path)
        .auth(&f.alice)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    f.app
        .server
        .get(&path)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_scope_reviews_to_their_title() {
    let f = fixture().await;
    let other_title = f
        .app
        .create_title(&f.admin, json!({ "name": "Solaris", "year": 1972 }))
        .await;
    let review_id = f.app.create_review(&f.alice, f.title_id, 5).await;

    let wrong_title = f
        .app
        .server
        .get(&api(&format!("/titles/{other_title}/reviews/{review_id}/")))
        .await;
    wrong_title.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(wrong_title.json::<Value>()["kind"], "REVIEW_NOT_FOUND");

    let missing_title = f.app.server.get(&api("/titles/9999/reviews/")).await;
    missing_title.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing_title.json::<Value>()["kind"], "TITLE_NOT_FOUND");
}

#[tokio::test]
async fn should_manage_comments_under_review() {
    let f = fixture().await;
    let review_id = f.app.create_review(&f.alice, f.title_id, 8).await;
    let comments = api(&format!(
        "/titles/{}/reviews/{review_id}/comments/",
        f.title_id
    ));

    let created = f
        .app
        .server
        .post(&comments)
        .auth(&f.bob)
        .json(&json!({ "text": "Too generous" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let comment = created.json::<Value>();
    assert_eq!(comment["author"], "bob");
    assert_eq!(comment["review"], review_id);
    let comment_path = format!("{comments}{}/", comment["id"]);

    let list = f.app.server.get(&comments).await.json::<Value>();
    assert_eq!(list["count"], 1);

    f.app
        .server
        .patch(&comment_path)
        .auth(&f.alice)
        .json(&json!({ "text": "edited by someone else" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let blank = f
        .app
        .server
        .patch(&comment_path)
        .auth(&f.bob)
        .json(&json!({ "text": "" }))
        .await;
    blank.assert_status(StatusCode::BAD_REQUEST);
    assert!(blank.json::<Value>()["fields"]["text"].is_array());

    f.app
        .server
        .delete(&comment_path)
        .auth(&f.admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let missing_review = f
        .app
        .server
        .get(&api(&format!(
            "/titles/{}/reviews/9999/comments/",
            f.title_id
        )))
        .await;
    missing_review.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing_review.json::<Value>()["kind"], "REVIEW_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_contributions_from_deleted_account() {
    let f = fixture().await;
    let review_id = f.app.create_review(&f.alice, f.title_id, 7).await;

    f.app
        .server
        .delete(&api("/users/bob/"))
        .auth(&f.admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let review = f
        .app
        .server
        .post(&api(&format!("/titles/{}/reviews/", f.title_id)))
        .auth(&f.bob)
        .json(&json!({ "text": "Still here", "score": 5 }))
        .await;
    review.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(review.json::<Value>()["kind"], "UNAUTHORIZED");

    let comment = f
        .app
        .server
        .post(&api(&format!(
            "/titles/{}/reviews/{review_id}/comments/",
            f.title_id
        )))
        .auth(&f.bob)
        .json(&json!({ "text": "Still here" }))
        .await;
    comment.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(comment.json::<Value>()["kind"], "UNAUTHORIZED");
}
