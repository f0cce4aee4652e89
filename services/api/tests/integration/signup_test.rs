use yamdb_api::error::ApiError;
use yamdb_api::usecase::auth::{ConfirmInput, ConfirmUseCase, SignupInput, SignupUseCase};
use yamdb_auth_types::token::validate_access_token;
use yamdb_domain::user::UserRole;
use yamdb_testing::auth::test_secret;

use crate::helpers::{MockUserRepo, test_user};

fn signup(username: &str, email: &str) -> SignupInput {
    SignupInput {
        username: username.to_owned(),
        email: email.to_owned(),
    }
}

// ── SignupUseCase ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_user_with_code_and_enqueue_email() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let events = repo.events_handle();

    SignupUseCase { repo }
        .execute(signup("alice", "alice@example.com"))
        .await
        .unwrap();

    let users = users.lock().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, UserRole::User);
    assert!(!users[0].confirmation_code.is_empty());

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "confirmation_code_created");
    assert_eq!(events[0].payload["email"], "alice@example.com");
    assert_eq!(events[0].payload["code"], users[0].confirmation_code.as_str());
}

#[tokio::test]
async fn should_resend_fresh_code_to_existing_user() {
    let mut user = test_user("alice");
    user.confirmation_code = "OLDCODE00000".into();
    let repo = MockUserRepo::new(vec![user.clone()]);
    let users = repo.users_handle();
    let events = repo.events_handle();

    SignupUseCase { repo }
        .execute(signup("alice", &user.email))
        .await
        .unwrap();

    let users = users.lock().unwrap();
    assert_eq!(users.len(), 1, "no second account is created");
    assert_ne!(users[0].confirmation_code, "OLDCODE00000");
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_existing_username_with_other_email() {
    let repo = MockUserRepo::new(vec![test_user("alice")]);
    let events = repo.events_handle();

    let result = SignupUseCase { repo }
        .execute(signup("alice", "someone@example.com"))
        .await;

    assert!(
        matches!(result, Err(ApiError::UsernameEmailMismatch)),
        "expected UsernameEmailMismatch, got {result:?}"
    );
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_email_registered_to_other_username() {
    let repo = MockUserRepo::new(vec![test_user("alice")]);

    let result = SignupUseCase { repo }
        .execute(signup("bob", "alice@example.com"))
        .await;

    assert!(
        matches!(result, Err(ApiError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_reserved_username_and_bad_email_together() {
    let result = SignupUseCase {
        repo: MockUserRepo::empty(),
    }
    .execute(signup("me", "not-an-email"))
    .await;

    let Err(ApiError::Validation(fields)) = &result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(fields.contains("username"));
    assert!(fields.contains("email"));
}

// ── ConfirmUseCase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_and_consume_code() {
    let mut user = test_user("alice");
    user.role = UserRole::Moderator;
    user.confirmation_code = "ABCDEF123456".into();
    let repo = MockUserRepo::new(vec![user.clone()]);
    let users = repo.users_handle();

    let token = ConfirmUseCase {
        repo,
        secret: test_secret(),
    }
    .execute(ConfirmInput {
        username: "alice".into(),
        confirmation_code: "ABCDEF123456".into(),
    })
    .await
    .unwrap();

    let info = validate_access_token(&token, &test_secret()).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.role, UserRole::Moderator);

    let users = users.lock().unwrap();
    assert!(users[0].confirmation_code.is_empty());
    assert!(users[0].confirmed_at.is_some());
}

#[tokio::test]
async fn should_reject_code_once_used() {
    let mut user = test_user("alice");
    user.confirmation_code = "ABCDEF123456".into();
    let usecase = ConfirmUseCase {
        repo: MockUserRepo::new(vec![user]),
        secret: test_secret(),
    };
    let input = || ConfirmInput {
        username: "alice".into(),
        confirmation_code: "ABCDEF123456".into(),
    };

    usecase.execute(input()).await.unwrap();
    let result = usecase.execute(input()).await;

    assert!(
        matches!(result, Err(ApiError::InvalidConfirmationCode)),
        "expected InvalidConfirmationCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_or_blank_code() {
    let mut user = test_user("alice");
    user.confirmation_code = "ABCDEF123456".into();
    let usecase = ConfirmUseCase {
        repo: MockUserRepo::new(vec![user]),
        secret: test_secret(),
    };

    for code in ["WRONG0000000", ""] {
        let result = usecase
            .execute(ConfirmInput {
                username: "alice".into(),
                confirmation_code: code.into(),
            })
            .await;
        assert!(
            matches!(result, Err(ApiError::InvalidConfirmationCode)),
            "code {code:?}: expected InvalidConfirmationCode, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_return_not_found_for_unknown_username() {
    let result = ConfirmUseCase {
        repo: MockUserRepo::empty(),
        secret: test_secret(),
    }
    .execute(ConfirmInput {
        username: "ghost".into(),
        confirmation_code: "ABCDEF123456".into(),
    })
    .await;

    assert!(
        matches!(result, Err(ApiError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_blank_username_as_validation_error() {
    let result = ConfirmUseCase {
        repo: MockUserRepo::empty(),
        secret: test_secret(),
    }
    .execute(ConfirmInput {
        username: "  ".into(),
        confirmation_code: "X".into(),
    })
    .await;

    let Err(ApiError::Validation(fields)) = &result else {
        panic!("expected validation error, got {result:?}");
    };
    assert!(fields.contains("username"));
}
