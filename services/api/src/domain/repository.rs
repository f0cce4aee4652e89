#![allow(async_fn_in_trait)]

use uuid::Uuid;

use yamdb_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    Comment, NewTitle, OutboxEvent, Review, Term, Title, TitleChanges, TitleFilter, User,
    UserChanges,
};
use crate::error::ApiError;

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Users ordered by username, optionally filtered by a username substring.
    async fn list(&self, search: Option<&str>, page: PageRequest)
    -> Result<Page<User>, ApiError>;

    /// Insert a user. A taken username or email is `UserAlreadyExists`.
    async fn create(&self, user: &User) -> Result<(), ApiError>;

    /// Insert a user holding a confirmation code and its outbox event atomically.
    async fn create_with_outbox(&self, user: &User, event: &OutboxEvent) -> Result<(), ApiError>;

    /// Replace a user's confirmation code and enqueue its outbox event atomically.
    async fn replace_code_with_outbox(
        &self,
        user_id: Uuid,
        code: &str,
        event: &OutboxEvent,
    ) -> Result<(), ApiError>;

    /// Clear the confirmation code and stamp `confirmed_at`.
    async fn confirm(&self, user_id: Uuid) -> Result<(), ApiError>;

    /// Apply `changes` and return the stored user.
    async fn update(&self, user_id: Uuid, changes: &UserChanges) -> Result<User, ApiError>;

    /// Delete a user with their reviews and comments, and the comments on
    /// those reviews.
    async fn delete(&self, user_id: Uuid) -> Result<(), ApiError>;
}

/// Repository for one slug-addressed classifier (categories or genres).
pub trait TermRepository: Send + Sync {
    /// Terms ordered by name, optionally filtered by a name substring.
    async fn list(&self, search: Option<&str>, page: PageRequest)
    -> Result<Page<Term>, ApiError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Term>, ApiError>;

    /// Insert a term. A taken slug is `SlugAlreadyExists`.
    async fn create(&self, name: &str, slug: &str) -> Result<Term, ApiError>;

    /// Delete by slug, detaching dependent titles. Returns `false` if absent.
    async fn delete(&self, slug: &str) -> Result<bool, ApiError>;
}

pub trait TitleRepository: Send + Sync {
    /// Titles ordered by name.
    async fn list(&self, filter: &TitleFilter, page: PageRequest)
    -> Result<Page<Title>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Title>, ApiError>;

    async fn exists(&self, id: i32) -> Result<bool, ApiError>;

    /// Insert a title with its genre links. Returns the new id.
    async fn create(&self, title: &NewTitle) -> Result<i32, ApiError>;

    /// Returns `false` if the title does not exist.
    async fn update(&self, id: i32, changes: &TitleChanges) -> Result<bool, ApiError>;

    /// Delete a title with its reviews, their comments and its genre links.
    /// Returns `false` if absent.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

pub trait ReviewRepository: Send + Sync {
    /// Reviews of a title ordered by (score, pub_date).
    async fn list(&self, title_id: i32, page: PageRequest) -> Result<Page<Review>, ApiError>;

    /// A review, only if it belongs to `title_id`.
    async fn find(&self, title_id: i32, review_id: i32) -> Result<Option<Review>, ApiError>;

    async fn exists_by_author(&self, title_id: i32, author_id: Uuid) -> Result<bool, ApiError>;

    /// Insert a review. A second review by the same author is
    /// `ReviewAlreadyExists`.
    async fn create(
        &self,
        title_id: i32,
        author_id: Uuid,
        text: &str,
        score: i16,
    ) -> Result<i32, ApiError>;

    async fn update(
        &self,
        review_id: i32,
        text: Option<&str>,
        score: Option<i16>,
    ) -> Result<(), ApiError>;

    /// Delete a review and its comments.
    async fn delete(&self, review_id: i32) -> Result<(), ApiError>;
}

pub trait CommentRepository: Send + Sync {
    /// Comments on a review ordered by pub_date.
    async fn list(&self, review_id: i32, page: PageRequest) -> Result<Page<Comment>, ApiError>;

    /// A comment, only if it belongs to `review_id`.
    async fn find(&self, review_id: i32, comment_id: i32) -> Result<Option<Comment>, ApiError>;

    async fn create(&self, review_id: i32, author_id: Uuid, text: &str) -> Result<i32, ApiError>;

    async fn update(&self, comment_id: i32, text: &str) -> Result<(), ApiError>;

    async fn delete(&self, comment_id: i32) -> Result<(), ApiError>;
}
