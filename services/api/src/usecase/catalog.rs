//! Categories and genres: list, create and delete by slug.

use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::validation::{self, FieldErrors};

use crate::domain::repository::TermRepository;
use crate::domain::types::{Term, TermKind};
use crate::error::ApiError;

fn not_found(kind: TermKind) -> ApiError {
    match kind {
        TermKind::Category => ApiError::CategoryNotFound,
        TermKind::Genre => ApiError::GenreNotFound,
    }
}

pub struct ListTermsUseCase<R: TermRepository> {
    pub repo: R,
}

impl<R: TermRepository> ListTermsUseCase<R> {
    pub async fn execute(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Page<Term>, ApiError> {
        self.repo.list(search.as_deref(), page).await
    }
}

pub struct CreateTermInput {
    pub name: String,
    pub slug: String,
}

pub struct CreateTermUseCase<R: TermRepository> {
    pub repo: R,
}

impl<R: TermRepository> CreateTermUseCase<R> {
    pub async fn execute(&self, input: CreateTermInput) -> Result<Term, ApiError> {
        let mut errors = FieldErrors::new();
        errors.check("name", validation::name(&input.name));
        errors.check("slug", validation::slug(&input.slug));
        errors.into_result()?;
        self.repo.create(&input.name, &input.slug).await
    }
}

pub struct DeleteTermUseCase<R: TermRepository> {
    pub repo: R,
    pub kind: TermKind,
}

impl<R: TermRepository> DeleteTermUseCase<R> {
    pub async fn execute(&self, slug: &str) -> Result<(), ApiError> {
        if !self.repo.delete(slug).await? {
            return Err(not_found(self.kind));
        }
        tracing::info!(kind = ?self.kind, slug, "term deleted");
        Ok(())
    }
}
