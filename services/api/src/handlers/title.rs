use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Access, Target};

use super::catalog::TermResponse;
use super::{Caller, double_option, require};
use crate::domain::types::{Title, TitleFilter};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::title::{
    CreateTitleInput, CreateTitleUseCase, DeleteTitleUseCase, GetTitleUseCase, ListTitlesUseCase,
    UpdateTitleInput, UpdateTitleUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub id: i32,
    pub name: String,
    pub year: i32,
    /// `null` until the title has at least one review.
    pub rating: Option<i32>,
    pub description: Option<String>,
    pub genre: Vec<TermResponse>,
    pub category: Option<TermResponse>,
}

impl From<Title> for TitleResponse {
    fn from(title: Title) -> Self {
        Self {
            id: title.id,
            name: title.name,
            year: title.year,
            rating: title.rating,
            description: title.description,
            genre: title.genres.into_iter().map(TermResponse::from).collect(),
            category: title.category.map(TermResponse::from),
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

/// Filters are exact slug matches for `category`/`genre`, an exact `year`
/// and a substring match on `name`.
#[derive(Debug, Default, Deserialize)]
pub struct TitleListQuery {
    pub category: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub name: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

// ── GET /titles/ ─────────────────────────────────────────────────────────────

pub async fn list_titles(
    State(state): State<AppState>,
    Query(query): Query<TitleListQuery>,
) -> Result<Json<Page<TitleResponse>>, ApiError> {
    let page = PageRequest::new(query.limit, query.offset);
    let filter = TitleFilter {
        category: query.category,
        genre: query.genre,
        year: query.year,
        name: query.name,
    };
    let usecase = ListTitlesUseCase {
        titles: state.title_repo(),
    };
    let titles = usecase.execute(filter, page).await?;
    Ok(Json(titles.map(TitleResponse::from)))
}

// ── POST /titles/ ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTitleRequest {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

pub async fn create_title(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateTitleRequest>,
) -> Result<(StatusCode, Json<TitleResponse>), ApiError> {
    require(&requester, Access::Write, Target::Catalog)?;
    let usecase = CreateTitleUseCase {
        titles: state.title_repo(),
        categories: state.category_repo(),
        genres: state.genre_repo(),
    };
    let title = usecase
        .execute(CreateTitleInput {
            name: body.name,
            year: body.year,
            description: body.description,
            category: body.category,
            genre: body.genre,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(title.into())))
}

// ── GET /titles/{title_id}/ ──────────────────────────────────────────────────

pub async fn get_title(
    State(state): State<AppState>,
    Path(title_id): Path<i32>,
) -> Result<Json<TitleResponse>, ApiError> {
    let usecase = GetTitleUseCase {
        titles: state.title_repo(),
    };
    let title = usecase.execute(title_id).await?;
    Ok(Json(title.into()))
}

// ── PATCH /titles/{title_id}/ ────────────────────────────────────────────────

/// `description` and `category` accept `null` to clear the stored value.
#[derive(Deserialize)]
pub struct UpdateTitleRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    pub genre: Option<Vec<String>>,
}

pub async fn update_title(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(title_id): Path<i32>,
    Json(body): Json<UpdateTitleRequest>,
) -> Result<Json<TitleResponse>, ApiError> {
    require(&requester, Access::Write, Target::Catalog)?;
    let usecase = UpdateTitleUseCase {
        titles: state.title_repo(),
        categories: state.category_repo(),
        genres: state.genre_repo(),
    };
    let title = usecase
        .execute(
            title_id,
            UpdateTitleInput {
                name: body.name,
                year: body.year,
                description: body.description,
                category: body.category,
                genre: body.genre,
            },
        )
        .await?;
    Ok(Json(title.into()))
}

// ── DELETE /titles/{title_id}/ ───────────────────────────────────────────────

pub async fn delete_title(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(title_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require(&requester, Access::Write, Target::Catalog)?;
    let usecase = DeleteTitleUseCase {
        titles: state.title_repo(),
    };
    usecase.execute(title_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
