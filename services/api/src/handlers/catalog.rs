use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::Page;
use yamdb_domain::policy::{Access, Requester, Target};

use super::{Caller, ListQuery, require};
use crate::domain::repository::TermRepository;
use crate::domain::types::{Term, TermKind};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateTermInput, CreateTermUseCase, DeleteTermUseCase, ListTermsUseCase,
};

#[derive(Debug, Serialize)]
pub struct TermResponse {
    pub name: String,
    pub slug: String,
}

impl From<Term> for TermResponse {
    fn from(term: Term) -> Self {
        Self {
            name: term.name,
            slug: term.slug,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateTermRequest {
    pub name: String,
    pub slug: String,
}

async fn list_terms<R: TermRepository>(
    repo: R,
    query: ListQuery,
) -> Result<Json<Page<TermResponse>>, ApiError> {
    let page = query.page();
    let usecase = ListTermsUseCase { repo };
    let terms = usecase.execute(query.search, page).await?;
    Ok(Json(terms.map(TermResponse::from)))
}

async fn create_term<R: TermRepository>(
    requester: Requester,
    repo: R,
    body: CreateTermRequest,
) -> Result<(StatusCode, Json<TermResponse>), ApiError> {
    require(&requester, Access::Write, Target::Catalog)?;
    let usecase = CreateTermUseCase { repo };
    let term = usecase
        .execute(CreateTermInput {
            name: body.name,
            slug: body.slug,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(term.into())))
}

async fn delete_term<R: TermRepository>(
    requester: Requester,
    repo: R,
    kind: TermKind,
    slug: &str,
) -> Result<StatusCode, ApiError> {
    require(&requester, Access::Write, Target::Catalog)?;
    let usecase = DeleteTermUseCase { repo, kind };
    usecase.execute(slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── /categories/ ─────────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TermResponse>>, ApiError> {
    list_terms(state.category_repo(), query).await
}

pub async fn create_category(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateTermRequest>,
) -> Result<(StatusCode, Json<TermResponse>), ApiError> {
    create_term(requester, state.category_repo(), body).await
}

pub async fn delete_category(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_term(requester, state.category_repo(), TermKind::Category, &slug).await
}

// ── /genres/ ─────────────────────────────────────────────────────────────────

pub async fn list_genres(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TermResponse>>, ApiError> {
    list_terms(state.genre_repo(), query).await
}

pub async fn create_genre(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateTermRequest>,
) -> Result<(StatusCode, Json<TermResponse>), ApiError> {
    create_term(requester, state.genre_repo(), body).await
}

pub async fn delete_genre(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_term(requester, state.genre_repo(), TermKind::Genre, &slug).await
}
