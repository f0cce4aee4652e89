use chrono::{Datelike, Utc};

use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::validation::{self, FieldErrors, Invalid};

use crate::domain::repository::{TermRepository, TitleRepository};
use crate::domain::types::{NewTitle, Title, TitleChanges, TitleFilter};
use crate::error::ApiError;

fn current_year() -> i32 {
    Utc::now().year()
}

/// Look up each slug, recording unknown ones under `field`.
async fn resolve_slugs<R: TermRepository>(
    repo: &R,
    field: &str,
    slugs: &[String],
    errors: &mut FieldErrors,
) -> Result<Vec<i32>, ApiError> {
    let mut ids = Vec::with_capacity(slugs.len());
    for slug in slugs {
        match repo.find_by_slug(slug).await? {
            Some(term) if !ids.contains(&term.id) => ids.push(term.id),
            Some(_) => {}
            None => errors.add(field, Invalid::UnknownSlug(slug.clone())),
        }
    }
    Ok(ids)
}

// ── ListTitles / GetTitle ────────────────────────────────────────────────────

pub struct ListTitlesUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> ListTitlesUseCase<T> {
    pub async fn execute(
        &self,
        filter: TitleFilter,
        page: PageRequest,
    ) -> Result<Page<Title>, ApiError> {
        self.titles.list(&filter, page).await
    }
}

pub struct GetTitleUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> GetTitleUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<Title, ApiError> {
        self.titles
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TitleNotFound)
    }
}

// ── CreateTitle ──────────────────────────────────────────────────────────────

pub struct CreateTitleInput {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// Genre slugs.
    pub genre: Vec<String>,
}

pub struct CreateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TermRepository,
    G: TermRepository,
{
    pub titles: T,
    pub categories: C,
    pub genres: G,
}

impl<T, C, G> CreateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TermRepository,
    G: TermRepository,
{
    pub async fn execute(&self, input: CreateTitleInput) -> Result<Title, ApiError> {
        let mut errors = FieldErrors::new();
        errors.check("name", validation::name(&input.name));
        errors.check("year", validation::year(input.year, current_year()));
        let category_id = match &input.category {
            Some(slug) => resolve_slugs(
                &self.categories,
                "category",
                std::slice::from_ref(slug),
                &mut errors,
            )
            .await?
            .first()
            .copied(),
            None => None,
        };
        let genre_ids = resolve_slugs(&self.genres, "genre", &input.genre, &mut errors).await?;
        errors.into_result()?;

        let id = self
            .titles
            .create(&NewTitle {
                name: input.name,
                year: input.year,
                description: input.description,
                category_id,
                genre_ids,
            })
            .await?;
        tracing::info!(title_id = id, "title created");
        self.titles
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TitleNotFound)
    }
}

// ── UpdateTitle ──────────────────────────────────────────────────────────────

/// Partial title update. `Some(None)` clears `description` or `category`.
#[derive(Default)]
pub struct UpdateTitleInput {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub genre: Option<Vec<String>>,
}

pub struct UpdateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TermRepository,
    G: TermRepository,
{
    pub titles: T,
    pub categories: C,
    pub genres: G,
}

impl<T, C, G> UpdateTitleUseCase<T, C, G>
where
    T: TitleRepository,
    C: TermRepository,
    G: TermRepository,
{
    pub async fn execute(&self, id: i32, input: UpdateTitleInput) -> Result<Title, ApiError> {
        if !self.titles.exists(id).await? {
            return Err(ApiError::TitleNotFound);
        }

        let mut errors = FieldErrors::new();
        if let Some(name) = &input.name {
            errors.check("name", validation::name(name));
        }
        if let Some(year) = input.year {
            errors.check("year", validation::year(year, current_year()));
        }
        let category_id = match &input.category {
            Some(Some(slug)) => Some(
                resolve_slugs(
                    &self.categories,
                    "category",
                    std::slice::from_ref(slug),
                    &mut errors,
                )
                .await?
                .first()
                .copied(),
            ),
            Some(None) => Some(None),
            None => None,
        };
        let genre_ids = match &input.genre {
            Some(slugs) => Some(resolve_slugs(&self.genres, "genre", slugs, &mut errors).await?),
            None => None,
        };
        errors.into_result()?;

        let changes = TitleChanges {
            name: input.name,
            year: input.year,
            description: input.description,
            category_id,
            genre_ids,
        };
        if !self.titles.update(id, &changes).await? {
            return Err(ApiError::TitleNotFound);
        }
        self.titles
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TitleNotFound)
    }
}

// ── DeleteTitle ──────────────────────────────────────────────────────────────

pub struct DeleteTitleUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> DeleteTitleUseCase<T> {
    /// Deletes the title together with its reviews and their comments.
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        if !self.titles.delete(id).await? {
            return Err(ApiError::TitleNotFound);
        }
        tracing::info!(title_id = id, "title deleted");
        Ok(())
    }
}
