use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::Page;

use super::{Caller, ListQuery};
use crate::domain::types::Comment;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::comment::{
    CreateCommentUseCase, DeleteCommentUseCase, GetCommentUseCase, ListCommentsUseCase,
    UpdateCommentUseCase,
};

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i32,
    pub text: String,
    pub author: String,
    #[serde(serialize_with = "yamdb_core::serde::to_rfc3339_ms")]
    pub pub_date: chrono::DateTime<chrono::Utc>,
    pub review: i32,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author: comment.author,
            pub_date: comment.pub_date,
            review: comment.review_id,
        }
    }
}

// ── /titles/{title_id}/reviews/{review_id}/comments/ ─────────────────────────

pub async fn list_comments(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(i32, i32)>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<CommentResponse>>, ApiError> {
    let usecase = ListCommentsUseCase {
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comments = usecase.execute(title_id, review_id, query.page()).await?;
    Ok(Json(comments.map(CommentResponse::from)))
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

pub async fn create_comment(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(i32, i32)>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let usecase = CreateCommentUseCase {
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase
        .execute(requester, title_id, review_id, body.text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── /titles/{title_id}/reviews/{review_id}/comments/{comment_id}/ ────────────

pub async fn get_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(i32, i32, i32)>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = GetCommentUseCase {
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase.execute(title_id, review_id, comment_id).await?;
    Ok(Json(comment.into()))
}

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub text: Option<String>,
}

pub async fn update_comment(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(i32, i32, i32)>,
    Json(body): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = UpdateCommentUseCase {
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase
        .execute(
            requester,
            title_id,
            review_id,
            comment_id,
            body.text,
        )
        .await?;
    Ok(Json(comment.into()))
}

pub async fn delete_comment(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(i32, i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCommentUseCase {
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    usecase
        .execute(requester, title_id, review_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
