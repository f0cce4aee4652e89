use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use yamdb_api_schema::{comments, reviews, users};
use yamdb_domain::pagination::{Page, PageRequest};

use super::conflict_or_internal;
use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::domain::types::{Comment, Review};
use crate::error::ApiError;

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn list(&self, title_id: i32, page: PageRequest) -> Result<Page<Review>, ApiError> {
        let PageRequest { limit, offset } = page.clamped();
        let query = reviews::Entity::find().filter(reviews::Column::TitleId.eq(title_id));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count reviews")?;
        let rows = query
            .find_also_related(users::Entity)
            .order_by_asc(reviews::Column::Score)
            .order_by_asc(reviews::Column::PubDate)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list reviews")?;
        Ok(Page::new(
            count,
            rows.into_iter().map(review_from_row).collect(),
        ))
    }

    async fn find(&self, title_id: i32, review_id: i32) -> Result<Option<Review>, ApiError> {
        let row = reviews::Entity::find_by_id(review_id)
            .filter(reviews::Column::TitleId.eq(title_id))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find review")?;
        Ok(row.map(review_from_row))
    }

    async fn exists_by_author(&self, title_id: i32, author_id: Uuid) -> Result<bool, ApiError> {
        let count = reviews::Entity::find()
            .filter(reviews::Column::TitleId.eq(title_id))
            .filter(reviews::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("check review exists for author")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        title_id: i32,
        author_id: Uuid,
        text: &str,
        score: i16,
    ) -> Result<i32, ApiError> {
        let model = reviews::ActiveModel {
            title_id: Set(title_id),
            author_id: Set(author_id),
            text: Set(text.to_owned()),
            score: Set(score),
            pub_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_internal(e, ApiError::ReviewAlreadyExists, "create review"))?;
        Ok(model.id)
    }

    async fn update(
        &self,
        review_id: i32,
        text: Option<&str>,
        score: Option<i16>,
    ) -> Result<(), ApiError> {
        if text.is_none() && score.is_none() {
            return Ok(());
        }
        let mut am = reviews::ActiveModel {
            id: Set(review_id),
            ..Default::default()
        };
        if let Some(text) = text {
            am.text = Set(text.to_owned());
        }
        if let Some(score) = score {
            am.score = Set(score);
        }
        am.update(&self.db).await.context("update review")?;
        Ok(())
    }

    async fn delete(&self, review_id: i32) -> Result<(), ApiError> {
        let txn = self.db.begin().await.context("begin delete review")?;
        comments::Entity::delete_many()
            .filter(comments::Column::ReviewId.eq(review_id))
            .exec(&txn)
            .await
            .context("delete comments of review")?;
        reviews::Entity::delete_by_id(review_id)
            .exec(&txn)
            .await
            .context("delete review")?;
        txn.commit().await.context("commit delete review")?;
        Ok(())
    }
}

fn review_from_row((model, author): (reviews::Model, Option<users::Model>)) -> Review {
    Review {
        id: model.id,
        title_id: model.title_id,
        author_id: model.author_id,
        author: author.map(|u| u.username).unwrap_or_default(),
        text: model.text,
        score: model.score,
        pub_date: model.pub_date,
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn list(&self, review_id: i32, page: PageRequest) -> Result<Page<Comment>, ApiError> {
        let PageRequest { limit, offset } = page.clamped();
        let query = comments::Entity::find().filter(comments::Column::ReviewId.eq(review_id));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count comments")?;
        let rows = query
            .find_also_related(users::Entity)
            .order_by_asc(comments::Column::PubDate)
            .order_by_asc(comments::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list comments")?;
        Ok(Page::new(
            count,
            rows.into_iter().map(comment_from_row).collect(),
        ))
    }

    async fn find(&self, review_id: i32, comment_id: i32) -> Result<Option<Comment>, ApiError> {
        let row = comments::Entity::find_by_id(comment_id)
            .filter(comments::Column::ReviewId.eq(review_id))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find comment")?;
        Ok(row.map(comment_from_row))
    }

    async fn create(&self, review_id: i32, author_id: Uuid, text: &str) -> Result<i32, ApiError> {
        let model = comments::ActiveModel {
            review_id: Set(review_id),
            author_id: Set(author_id),
            text: Set(text.to_owned()),
            pub_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create comment")?;
        Ok(model.id)
    }

    async fn update(&self, comment_id: i32, text: &str) -> Result<(), ApiError> {
        comments::ActiveModel {
            id: Set(comment_id),
            text: Set(text.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update comment")?;
        Ok(())
    }

    async fn delete(&self, comment_id: i32) -> Result<(), ApiError> {
        comments::Entity::delete_by_id(comment_id)
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(())
    }
}

fn comment_from_row((model, author): (comments::Model, Option<users::Model>)) -> Comment {
    Comment {
        id: model.id,
        review_id: model.review_id,
        author_id: model.author_id,
        author: author.map(|u| u.username).unwrap_or_default(),
        text: model.text,
        pub_date: model.pub_date,
    }
}
