use anyhow::Context as _;
use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use yamdb_auth_types::token::{JwtSecret, issue_access_token};
use yamdb_domain::validation::{self, FieldErrors, Invalid};

use crate::domain::repository::UserRepository;
use crate::domain::types::{CONFIRMATION_CODE_CREATED, CONFIRMATION_CODE_LEN, OutboxEvent, User};
use crate::error::ApiError;

/// Charset for generating confirmation codes (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CONFIRMATION_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

fn confirmation_event(user: &User, code: &str) -> OutboxEvent {
    let id = Uuid::new_v4();
    OutboxEvent {
        id,
        kind: CONFIRMATION_CODE_CREATED.to_owned(),
        recipient_id: user.id,
        payload: json!({
            "email": user.email,
            "username": user.username,
            "code": code,
        }),
        idempotency_key: format!("{CONFIRMATION_CODE_CREATED}:{}:{id}", user.id),
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub username: String,
    pub email: String,
}

pub struct SignupUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SignupUseCase<R> {
    /// Register a new user or resend the code to an existing matching one.
    /// Either way a fresh confirmation code is stored and queued for email.
    pub async fn execute(&self, input: SignupInput) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        errors.check("username", validation::username(&input.username));
        errors.check("email", validation::email(&input.email));
        errors.into_result()?;

        let code = generate_code();
        match self.repo.find_by_username(&input.username).await? {
            Some(user) if user.email != input.email => Err(ApiError::UsernameEmailMismatch),
            Some(user) => {
                let event = confirmation_event(&user, &code);
                self.repo
                    .replace_code_with_outbox(user.id, &code, &event)
                    .await?;
                tracing::info!(user_id = %user.id, "confirmation code resent");
                Ok(())
            }
            None => {
                if self.repo.find_by_email(&input.email).await?.is_some() {
                    return Err(ApiError::EmailTaken);
                }
                let mut user = User::new(input.username, input.email);
                user.confirmation_code = code;
                let event = confirmation_event(&user, &user.confirmation_code);
                self.repo.create_with_outbox(&user, &event).await?;
                tracing::info!(user_id = %user.id, "user signed up");
                Ok(())
            }
        }
    }
}

// ── Confirm (code → token) ───────────────────────────────────────────────────

pub struct ConfirmInput {
    pub username: String,
    pub confirmation_code: String,
}

pub struct ConfirmUseCase<R: UserRepository> {
    pub repo: R,
    pub secret: JwtSecret,
}

impl<R: UserRepository> ConfirmUseCase<R> {
    /// Exchange a confirmation code for a bearer token. Codes are single use.
    pub async fn execute(&self, input: ConfirmInput) -> Result<String, ApiError> {
        if input.username.trim().is_empty() {
            return Err(ApiError::invalid("username", Invalid::Blank));
        }
        let user = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if user.confirmation_code.is_empty() || user.confirmation_code != input.confirmation_code
        {
            return Err(ApiError::InvalidConfirmationCode);
        }

        self.repo.confirm(user.id).await?;
        let (token, _exp) =
            issue_access_token(user.id, user.role, &self.secret).context("sign access token")?;
        tracing::info!(user_id = %user.id, "access token issued");
        Ok(token)
    }
}
