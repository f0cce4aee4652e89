use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel as _, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait, TransactionTrait, sea_query::Expr,
};

use yamdb_api_schema::{categories, comments, genres, reviews, title_genres, titles};
use yamdb_domain::pagination::{Page, PageRequest};

use super::terms::{category_to_term, genre_to_term};
use crate::domain::repository::TitleRepository;
use crate::domain::types::{NewTitle, Term, Title, TitleChanges, TitleFilter};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbTitleRepository {
    pub db: DatabaseConnection,
}

impl TitleRepository for DbTitleRepository {
    async fn list(
        &self,
        filter: &TitleFilter,
        page: PageRequest,
    ) -> Result<Page<Title>, ApiError> {
        let PageRequest { limit, offset } = page.clamped();
        let mut query = titles::Entity::find();

        if let Some(slug) = &filter.category {
            let category = categories::Entity::find()
                .filter(categories::Column::Slug.eq(slug.as_str()))
                .one(&self.db)
                .await
                .context("find category for title filter")?;
            let Some(category) = category else {
                return Ok(Page::new(0, Vec::new()));
            };
            query = query.filter(titles::Column::CategoryId.eq(category.id));
        }
        if let Some(slug) = &filter.genre {
            let genre = genres::Entity::find()
                .filter(genres::Column::Slug.eq(slug.as_str()))
                .one(&self.db)
                .await
                .context("find genre for title filter")?;
            let Some(genre) = genre else {
                return Ok(Page::new(0, Vec::new()));
            };
            let linked = title_genres::Entity::find()
                .select_only()
                .column(title_genres::Column::TitleId)
                .filter(title_genres::Column::GenreId.eq(genre.id))
                .into_query();
            query = query.filter(titles::Column::Id.in_subquery(linked));
        }
        if let Some(year) = filter.year {
            query = query.filter(titles::Column::Year.eq(year));
        }
        if let Some(name) = &filter.name {
            query = query.filter(titles::Column::Name.contains(name.as_str()));
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count titles")?;
        // By category name, uncategorised last, then by title name.
        let models = query
            .join(JoinType::LeftJoin, titles::Relation::Category.def())
            .order_by_asc(Expr::col((categories::Entity, categories::Column::Name)).is_null())
            .order_by_asc(categories::Column::Name)
            .order_by_asc(titles::Column::Name)
            .order_by_asc(titles::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list titles")?;
        Ok(Page::new(count, self.hydrate(models).await?))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Title>, ApiError> {
        let Some(model) = titles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find title by id")?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    async fn exists(&self, id: i32) -> Result<bool, ApiError> {
        let count = titles::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .context("check title exists")?;
        Ok(count > 0)
    }

    async fn create(&self, title: &NewTitle) -> Result<i32, ApiError> {
        let txn = self.db.begin().await.context("begin create title")?;

        let model = titles::ActiveModel {
            name: Set(title.name.clone()),
            year: Set(title.year),
            description: Set(title.description.clone()),
            category_id: Set(title.category_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("create title")?;
        link_genres(&txn, model.id, &title.genre_ids).await?;

        txn.commit().await.context("commit create title")?;
        Ok(model.id)
    }

    async fn update(&self, id: i32, changes: &TitleChanges) -> Result<bool, ApiError> {
        let txn = self.db.begin().await.context("begin update title")?;

        let Some(model) = titles::Entity::find_by_id(id)
            .one(&txn)
            .await
            .context("find title for update")?
        else {
            return Ok(false);
        };
        let mut am = model.into_active_model();
        if let Some(name) = &changes.name {
            am.name = Set(name.clone());
        }
        if let Some(year) = changes.year {
            am.year = Set(year);
        }
        if let Some(description) = &changes.description {
            am.description = Set(description.clone());
        }
        if let Some(category_id) = changes.category_id {
            am.category_id = Set(category_id);
        }
        if am.is_changed() {
            am.update(&txn).await.context("update title")?;
        }
        if let Some(genre_ids) = &changes.genre_ids {
            title_genres::Entity::delete_many()
                .filter(title_genres::Column::TitleId.eq(id))
                .exec(&txn)
                .await
                .context("unlink title genres")?;
            link_genres(&txn, id, genre_ids).await?;
        }

        txn.commit().await.context("commit update title")?;
        Ok(true)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let txn = self.db.begin().await.context("begin delete title")?;

        let exists = titles::Entity::find_by_id(id)
            .count(&txn)
            .await
            .context("find title for delete")?
            > 0;
        if !exists {
            return Ok(false);
        }
        let review_ids = reviews::Entity::find()
            .select_only()
            .column(reviews::Column::Id)
            .filter(reviews::Column::TitleId.eq(id))
            .into_query();
        comments::Entity::delete_many()
            .filter(comments::Column::ReviewId.in_subquery(review_ids))
            .exec(&txn)
            .await
            .context("delete comments of title")?;
        reviews::Entity::delete_many()
            .filter(reviews::Column::TitleId.eq(id))
            .exec(&txn)
            .await
            .context("delete reviews of title")?;
        title_genres::Entity::delete_many()
            .filter(title_genres::Column::TitleId.eq(id))
            .exec(&txn)
            .await
            .context("unlink title genres")?;
        titles::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete title")?;

        txn.commit().await.context("commit delete title")?;
        Ok(true)
    }
}

impl DbTitleRepository {
    /// Attach category, genres and rating to each title, keeping order.
    async fn hydrate(&self, models: Vec<titles::Model>) -> Result<Vec<Title>, ApiError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let category_ids: Vec<i32> = models.iter().filter_map(|m| m.category_id).collect();

        let mut category_by_id: HashMap<i32, Term> = HashMap::new();
        if !category_ids.is_empty() {
            category_by_id = categories::Entity::find()
                .filter(categories::Column::Id.is_in(category_ids))
                .all(&self.db)
                .await
                .context("load title categories")?
                .into_iter()
                .map(|m| (m.id, category_to_term(m)))
                .collect();
        }

        let links = title_genres::Entity::find()
            .find_also_related(genres::Entity)
            .filter(title_genres::Column::TitleId.is_in(ids.clone()))
            .order_by_asc(genres::Column::Name)
            .all(&self.db)
            .await
            .context("load title genres")?;
        let mut genres_by_title: HashMap<i32, Vec<Term>> = HashMap::new();
        for (link, genre) in links {
            if let Some(genre) = genre {
                genres_by_title
                    .entry(link.title_id)
                    .or_default()
                    .push(genre_to_term(genre));
            }
        }

        let totals: Vec<(i32, i64, i64)> = reviews::Entity::find()
            .select_only()
            .column(reviews::Column::TitleId)
            .column_as(Expr::col(reviews::Column::Score).sum(), "total")
            .column_as(Expr::col(reviews::Column::Id).count(), "reviews")
            .filter(reviews::Column::TitleId.is_in(ids))
            .group_by(reviews::Column::TitleId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("load title ratings")?;
        let ratings: HashMap<i32, Option<i32>> = totals
            .into_iter()
            .map(|(title_id, total, count)| (title_id, truncated_average(total, count)))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| Title {
                id: m.id,
                category: m.category_id.and_then(|id| category_by_id.get(&id).cloned()),
                genres: genres_by_title.remove(&m.id).unwrap_or_default(),
                rating: ratings.get(&m.id).copied().flatten(),
                name: m.name,
                year: m.year,
                description: m.description,
            })
            .collect())
    }
}

async fn link_genres(
    txn: &DatabaseTransaction,
    title_id: i32,
    genre_ids: &[i32],
) -> Result<(), ApiError> {
    if genre_ids.is_empty() {
        return Ok(());
    }
    let links = genre_ids.iter().map(|&genre_id| title_genres::ActiveModel {
        title_id: Set(title_id),
        genre_id: Set(genre_id),
    });
    title_genres::Entity::insert_many(links)
        .exec_without_returning(txn)
        .await
        .context("link title genres")?;
    Ok(())
}

/// Mean score truncated toward zero; `None` when there are no reviews.
fn truncated_average(total: i64, count: i64) -> Option<i32> {
    if count == 0 {
        return None;
    }
    i32::try_from(total / count).ok()
}
