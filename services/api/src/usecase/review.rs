use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Access, Requester, Target, authorize};
use yamdb_domain::validation::{self, FieldErrors, Invalid};

use crate::domain::repository::{ReviewRepository, TitleRepository};
use crate::domain::types::Review;
use crate::error::ApiError;

/// Validate a wire score and narrow it to the stored width.
fn checked_score(value: i64) -> Result<i16, Invalid> {
    validation::score(value)?;
    i16::try_from(value).map_err(|_| Invalid::ScoreOutOfRange)
}

async fn ensure_title<T: TitleRepository>(titles: &T, title_id: i32) -> Result<(), ApiError> {
    if titles.exists(title_id).await? {
        Ok(())
    } else {
        Err(ApiError::TitleNotFound)
    }
}

pub struct ListReviewsUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> ListReviewsUseCase<T, R> {
    pub async fn execute(&self, title_id: i32, page: PageRequest) -> Result<Page<Review>, ApiError> {
        ensure_title(&self.titles, title_id).await?;
        self.reviews.list(title_id, page).await
    }
}

pub struct GetReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> GetReviewUseCase<T, R> {
    pub async fn execute(&self, title_id: i32, review_id: i32) -> Result<Review, ApiError> {
        ensure_title(&self.titles, title_id).await?;
        self.reviews
            .find(title_id, review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }
}

// ── CreateReview ─────────────────────────────────────────────────────────────

pub struct CreateReviewInput {
    pub text: String,
    pub score: i64,
}

pub struct CreateReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> CreateReviewUseCase<T, R> {
    pub async fn execute(
        &self,
        requester: Requester,
        title_id: i32,
        input: CreateReviewInput,
    ) -> Result<Review, ApiError> {
        authorize(Some(&requester), Access::Write, Target::Contribution)?;
        ensure_title(&self.titles, title_id).await?;

        let mut errors = FieldErrors::new();
        errors.check("text", validation::text(&input.text));
        let score = checked_score(input.score);
        if let Err(invalid) = &score {
            errors.add("score", invalid.clone());
        }
        errors.into_result()?;
        let score = score.map_err(|invalid| ApiError::invalid("score", invalid))?;

        // A concurrent duplicate still fails on the unique index.
        if self
            .reviews
            .exists_by_author(title_id, requester.user_id)
            .await?
        {
            return Err(ApiError::ReviewAlreadyExists);
        }
        let id = self
            .reviews
            .create(title_id, requester.user_id, &input.text, score)
            .await?;
        self.reviews
            .find(title_id, id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }
}

// ── UpdateReview / DeleteReview ──────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateReviewInput {
    pub text: Option<String>,
    pub score: Option<i64>,
}

pub struct UpdateReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> UpdateReviewUseCase<T, R> {
    pub async fn execute(
        &self,
        requester: Requester,
        title_id: i32,
        review_id: i32,
        input: UpdateReviewInput,
    ) -> Result<Review, ApiError> {
        ensure_title(&self.titles, title_id).await?;
        let review = self
            .reviews
            .find(title_id, review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)?;
        authorize(
            Some(&requester),
            Access::Write,
            Target::OwnedBy(review.author_id),
        )?;

        let mut errors = FieldErrors::new();
        if let Some(text) = &input.text {
            errors.check("text", validation::text(text));
        }
        let score = match input.score {
            Some(value) => match checked_score(value) {
                Ok(score) => Some(score),
                Err(invalid) => {
                    errors.add("score", invalid);
                    None
                }
            },
            None => None,
        };
        errors.into_result()?;

        self.reviews
            .update(review.id, input.text.as_deref(), score)
            .await?;
        self.reviews
            .find(title_id, review.id)
            .await?
            .ok_or(ApiError::ReviewNotFound)
    }
}

pub struct DeleteReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> DeleteReviewUseCase<T, R> {
    /// Deletes the review and its comments.
    pub async fn execute(
        &self,
        requester: Requester,
        title_id: i32,
        review_id: i32,
    ) -> Result<(), ApiError> {
        ensure_title(&self.titles, title_id).await?;
        let review = self
            .reviews
            .find(title_id, review_id)
            .await?
            .ok_or(ApiError::ReviewNotFound)?;
        authorize(
            Some(&requester),
            Access::Write,
            Target::OwnedBy(review.author_id),
        )?;
        self.reviews.delete(review.id).await?;
        tracing::info!(review_id = review.id, title_id, "review deleted");
        Ok(())
    }
}
