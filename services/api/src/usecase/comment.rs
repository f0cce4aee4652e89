use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Access, Requester, Target, authorize};
use yamdb_domain::validation;

use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::domain::types::{Comment, Review};
use crate::error::ApiError;

/// The review, provided it belongs to `title_id`.
async fn ensure_review<R: ReviewRepository>(
    reviews: &R,
    title_id: i32,
    review_id: i32,
) -> Result<Review, ApiError> {
    reviews
        .find(title_id, review_id)
        .await?
        .ok_or(ApiError::ReviewNotFound)
}

pub struct ListCommentsUseCase<R: ReviewRepository, C: CommentRepository> {
    pub reviews: R,
    pub comments: C,
}

impl<R: ReviewRepository, C: CommentRepository> ListCommentsUseCase<R, C> {
    pub async fn execute(
        &self,
        title_id: i32,
        review_id: i32,
        page: PageRequest,
    ) -> Result<Page<Comment>, ApiError> {
        let review = ensure_review(&self.reviews, title_id, review_id).await?;
        self.comments.list(review.id, page).await
    }
}

pub struct GetCommentUseCase<R: ReviewRepository, C: CommentRepository> {
    pub reviews: R,
    pub comments: C,
}

impl<R: ReviewRepository, C: CommentRepository> GetCommentUseCase<R, C> {
    pub async fn execute(
        &self,
        title_id: i32,
        review_id: i32,
        comment_id: i32,
    ) -> Result<Comment, ApiError> {
        let review = ensure_review(&self.reviews, title_id, review_id).await?;
        self.comments
            .find(review.id, comment_id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }
}

pub struct CreateCommentUseCase<R: ReviewRepository, C: CommentRepository> {
    pub reviews: R,
    pub comments: C,
}

impl<R: ReviewRepository, C: CommentRepository> CreateCommentUseCase<R, C> {
    pub async fn execute(
        &self,
        requester: Requester,
        title_id: i32,
        review_id: i32,
        text: String,
    ) -> Result<Comment, ApiError> {
        authorize(Some(&requester), Access::Write, Target::Contribution)?;
        let review = ensure_review(&self.reviews, title_id, review_id).await?;
        validation::text(&text).map_err(|invalid| ApiError::invalid("text", invalid))?;

        let id = self
            .comments
            .create(review.id, requester.user_id, &text)
            .await?;
        self.comments
            .find(review.id, id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }
}

pub struct UpdateCommentUseCase<R: ReviewRepository, C: CommentRepository> {
    pub reviews: R,
    pub comments: C,
}

impl<R: ReviewRepository, C: CommentRepository> UpdateCommentUseCase<R, C> {
    /// `text: None` leaves the comment unchanged.
    pub async fn execute(
        &self,
        requester: Requester,
        title_id: i32,
        review_id: i32,
        comment_id: i32,
        text: Option<String>,
    ) -> Result<Comment, ApiError> {
        let review = ensure_review(&self.reviews, title_id, review_id).await?;
        let comment = self
            .comments
            .find(review.id, comment_id)
            .await?
            .ok_or(ApiError::CommentNotFound)?;
        authorize(
            Some(&requester),
            Access::Write,
            Target::OwnedBy(comment.author_id),
        )?;
        let Some(text) = text else {
            return Ok(comment);
        };
        validation::text(&text).map_err(|invalid| ApiError::invalid("text", invalid))?;

        self.comments.update(comment.id, &text).await?;
        self.comments
            .find(review.id, comment.id)
            .await?
            .ok_or(ApiError::CommentNotFound)
    }
}

pub struct DeleteCommentUseCase<R: ReviewRepository, C: CommentRepository> {
    pub reviews: R,
    pub comments: C,
}

impl<R: ReviewRepository, C: CommentRepository> DeleteCommentUseCase<R, C> {
    pub async fn execute(
        &self,
        requester: Requester,
        title_id: i32,
        review_id: i32,
        comment_id: i32,
    ) -> Result<(), ApiError> {
        let review = ensure_review(&self.reviews, title_id, review_id).await?;
        let comment = self
            .comments
            .find(review.id, comment_id)
            .await?
            .ok_or(ApiError::CommentNotFound)?;
        authorize(
            Some(&requester),
            Access::Write,
            Target::OwnedBy(comment.author_id),
        )?;
        self.comments.delete(comment.id).await
    }
}
