use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, Value,
    sea_query::Expr,
};

use yamdb_api_schema::{categories, genres, title_genres, titles};
use yamdb_domain::pagination::{Page, PageRequest};

use super::conflict_or_internal;
use crate::domain::repository::TermRepository;
use crate::domain::types::Term;
use crate::error::ApiError;

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl TermRepository for DbCategoryRepository {
    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Term>, ApiError> {
        let PageRequest { limit, offset } = page.clamped();
        let mut query = categories::Entity::find();
        if let Some(search) = search {
            query = query.filter(categories::Column::Name.contains(search));
        }
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count categories")?;
        let models = query
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list categories")?;
        Ok(Page::new(
            count,
            models.into_iter().map(category_to_term).collect(),
        ))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Term>, ApiError> {
        let model = categories::Entity::find()
            .filter(categories::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .context("find category by slug")?;
        Ok(model.map(category_to_term))
    }

    async fn create(&self, name: &str, slug: &str) -> Result<Term, ApiError> {
        let model = categories::ActiveModel {
            name: Set(name.to_owned()),
            slug: Set(slug.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_internal(e, ApiError::SlugAlreadyExists, "create category"))?;
        Ok(category_to_term(model))
    }

    async fn delete(&self, slug: &str) -> Result<bool, ApiError> {
        let txn = self.db.begin().await.context("begin delete category")?;

        let Some(category) = categories::Entity::find()
            .filter(categories::Column::Slug.eq(slug))
            .one(&txn)
            .await
            .context("find category for delete")?
        else {
            return Ok(false);
        };
        titles::Entity::update_many()
            .col_expr(titles::Column::CategoryId, Expr::value(Value::Int(None)))
            .filter(titles::Column::CategoryId.eq(category.id))
            .exec(&txn)
            .await
            .context("detach titles from category")?;
        categories::Entity::delete_by_id(category.id)
            .exec(&txn)
            .await
            .context("delete category")?;

        txn.commit().await.context("commit delete category")?;
        Ok(true)
    }
}

pub(super) fn category_to_term(model: categories::Model) -> Term {
    Term {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Genre repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGenreRepository {
    pub db: DatabaseConnection,
}

impl TermRepository for DbGenreRepository {
    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Term>, ApiError> {
        let PageRequest { limit, offset } = page.clamped();
        let mut query = genres::Entity::find();
        if let Some(search) = search {
            query = query.filter(genres::Column::Name.contains(search));
        }
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count genres")?;
        let models = query
            .order_by_asc(genres::Column::Name)
            .order_by_asc(genres::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list genres")?;
        Ok(Page::new(
            count,
            models.into_iter().map(genre_to_term).collect(),
        ))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Term>, ApiError> {
        let model = genres::Entity::find()
            .filter(genres::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .context("find genre by slug")?;
        Ok(model.map(genre_to_term))
    }

    async fn create(&self, name: &str, slug: &str) -> Result<Term, ApiError> {
        let model = genres::ActiveModel {
            name: Set(name.to_owned()),
            slug: Set(slug.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_internal(e, ApiError::SlugAlreadyExists, "create genre"))?;
        Ok(genre_to_term(model))
    }

    async fn delete(&self, slug: &str) -> Result<bool, ApiError> {
        let txn = self.db.begin().await.context("begin delete genre")?;

        let Some(genre) = genres::Entity::find()
            .filter(genres::Column::Slug.eq(slug))
            .one(&txn)
            .await
            .context("find genre for delete")?
        else {
            return Ok(false);
        };
        title_genres::Entity::delete_many()
            .filter(title_genres::Column::GenreId.eq(genre.id))
            .exec(&txn)
            .await
            .context("unlink genre from titles")?;
        genres::Entity::delete_by_id(genre.id)
            .exec(&txn)
            .await
            .context("delete genre")?;

        txn.commit().await.context("commit delete genre")?;
        Ok(true)
    }
}

pub(super) fn genre_to_term(model: genres::Model) -> Term {
    Term {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}
