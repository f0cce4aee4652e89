use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::Page;

use super::{Caller, ListQuery};
use crate::domain::types::Review;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase,
    ListReviewsUseCase, UpdateReviewInput, UpdateReviewUseCase,
};

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i32,
    pub text: String,
    /// Author's username.
    pub author: String,
    pub score: i16,
    #[serde(serialize_with = "yamdb_core::serde::to_rfc3339_ms")]
    pub pub_date: chrono::DateTime<chrono::Utc>,
    /// Id of the reviewed title.
    pub title: i32,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            text: review.text,
            author: review.author,
            score: review.score,
            pub_date: review.pub_date,
            title: review.title_id,
        }
    }
}

// ── GET /titles/{title_id}/reviews/ ──────────────────────────────────────────

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(title_id): Path<i32>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<ReviewResponse>>, ApiError> {
    let usecase = ListReviewsUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let reviews = usecase.execute(title_id, query.page()).await?;
    Ok(Json(reviews.map(ReviewResponse::from)))
}

// ── POST /titles/{title_id}/reviews/ ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
    pub score: i64,
}

pub async fn create_review(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(title_id): Path<i32>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let usecase = CreateReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase
        .execute(
            requester,
            title_id,
            CreateReviewInput {
                text: body.text,
                score: body.score,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── /titles/{title_id}/reviews/{review_id}/ ──────────────────────────────────

pub async fn get_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(i32, i32)>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = GetReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase.execute(title_id, review_id).await?;
    Ok(Json(review.into()))
}

#[derive(Deserialize)]
pub struct UpdateReviewRequest {
    pub text: Option<String>,
    pub score: Option<i64>,
}

pub async fn update_review(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(i32, i32)>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = UpdateReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase
        .execute(
            requester,
            title_id,
            review_id,
            UpdateReviewInput {
                text: body.text,
                score: body.score,
            },
        )
        .await?;
    Ok(Json(review.into()))
}

pub async fn delete_review(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    usecase
        .execute(requester, title_id, review_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
