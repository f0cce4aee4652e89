use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use yamdb_domain::user::UserRole;

/// Registered account.
///
/// `confirmation_code` is empty when no code is outstanding.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub bio: String,
    pub first_name: String,
    pub last_name: String,
    pub confirmation_code: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A fresh account with role `user` and no profile details.
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            email,
            role: UserRole::User,
            bio: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            confirmation_code: String::new(),
            confirmed_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of a user. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub bio: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Which slug-addressed classifier a [`Term`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Category,
    Genre,
}

/// A category or genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Title with its category, genres and review-derived rating.
#[derive(Debug, Clone)]
pub struct Title {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<Term>,
    pub genres: Vec<Term>,
    /// Average review score truncated to an integer; `None` with no reviews.
    pub rating: Option<i32>,
}

/// Title list filters. Every present field must match.
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    pub category: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    /// Substring of the title name.
    pub name: Option<String>,
}

/// Column values for a new title, with relations already resolved to ids.
#[derive(Debug, Clone)]
pub struct NewTitle {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

/// Partial update of a title. `Some(None)` clears an optional column.
#[derive(Debug, Clone, Default)]
pub struct TitleChanges {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<i32>>,
    pub genre_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i32,
    pub title_id: i32,
    pub author_id: Uuid,
    /// Username of the author.
    pub author: String,
    pub text: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i32,
    pub review_id: i32,
    pub author_id: Uuid,
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

/// Message queued for an external relay, written in the same transaction
/// as the state change it announces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    /// User the message is addressed to.
    pub recipient_id: Uuid,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

pub const CONFIRMATION_CODE_CREATED: &str = "confirmation_code_created";

/// Confirmation code length in characters.
pub const CONFIRMATION_CODE_LEN: usize = 12;
