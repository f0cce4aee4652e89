use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use yamdb_domain::policy::Denial;
use yamdb_domain::validation::{FieldErrors, Invalid};

/// API error variants. Every variant renders as `{"kind", "message"}`;
/// validation failures add `"fields"`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid input")]
    Validation(FieldErrors),
    #[error("you have already reviewed this title")]
    ReviewAlreadyExists,
    #[error("a user with that username or email already exists")]
    UserAlreadyExists,
    #[error("an object with that slug already exists")]
    SlugAlreadyExists,
    #[error("email is registered to another user")]
    EmailTaken,
    #[error("username is registered with a different email")]
    UsernameEmailMismatch,
    #[error("title not found")]
    TitleNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("comment not found")]
    CommentNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("genre not found")]
    GenreNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("confirmation code does not match")]
    InvalidConfirmationCode,
    #[error("authentication credentials were not provided")]
    Unauthorized,
    #[error("the account for this token no longer exists")]
    AccountGone,
    #[error("you do not have permission to perform this action")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Shorthand for a validation error on one field.
    pub fn invalid(field: &str, invalid: Invalid) -> Self {
        Self::Validation(FieldErrors::single(field, invalid))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::ReviewAlreadyExists => "REVIEW_ALREADY_EXISTS",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::SlugAlreadyExists => "SLUG_ALREADY_EXISTS",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameEmailMismatch => "USERNAME_EMAIL_MISMATCH",
            Self::TitleNotFound => "TITLE_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::GenreNotFound => "GENRE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidConfirmationCode => "INVALID_CONFIRMATION_CODE",
            Self::Unauthorized | Self::AccountGone => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::ReviewAlreadyExists
            | Self::UserAlreadyExists
            | Self::SlugAlreadyExists
            | Self::EmailTaken
            | Self::UsernameEmailMismatch
            | Self::InvalidConfirmationCode => StatusCode::BAD_REQUEST,
            Self::TitleNotFound
            | Self::ReviewNotFound
            | Self::CommentNotFound
            | Self::CategoryNotFound
            | Self::GenreNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::AccountGone => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<Denial> for ApiError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => Self::Unauthorized,
            Denial::Forbidden => Self::Forbidden,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer records every request; only 500s carry a cause worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(fields) = &self {
            body["fields"] = serde_json::to_value(fields).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
