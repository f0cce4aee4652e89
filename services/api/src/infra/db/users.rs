use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    TransactionTrait,
};
use uuid::Uuid;

use yamdb_api_schema::{comments, reviews, users};
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::user::UserRole;

use super::{conflict_or_internal, insert_outbox_event, txn_conflict_or_internal};
use crate::domain::repository::UserRepository;
use crate::domain::types::{OutboxEvent, User, UserChanges};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        let PageRequest { limit, offset } = page.clamped();
        let mut query = users::Entity::find();
        if let Some(search) = search {
            query = query.filter(users::Column::Username.contains(search));
        }
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = query
            .order_by_asc(users::Column::Username)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page::new(
            count,
            models.into_iter().map(user_from_model).collect(),
        ))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        user_to_active_model(user)
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_internal(e, ApiError::UserAlreadyExists, "create user"))?;
        Ok(())
    }

    async fn create_with_outbox(&self, user: &User, event: &OutboxEvent) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let user = user.clone();
                let event = event.clone();
                Box::pin(async move {
                    user_to_active_model(&user).insert(txn).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| {
                txn_conflict_or_internal(e, ApiError::UserAlreadyExists, "create user with outbox")
            })
    }

    async fn replace_code_with_outbox(
        &self,
        user_id: Uuid,
        code: &str,
        event: &OutboxEvent,
    ) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let code = code.to_owned();
                let event = event.clone();
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user_id),
                        confirmation_code: Set(code),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("replace confirmation code with outbox")?;
        Ok(())
    }

    async fn confirm(&self, user_id: Uuid) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user_id),
            confirmation_code: Set(String::new()),
            confirmed_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("confirm user")?;
        Ok(())
    }

    async fn update(&self, user_id: Uuid, changes: &UserChanges) -> Result<User, ApiError> {
        let model = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find user for update")?
            .ok_or(ApiError::UserNotFound)?;
        let mut am = model.clone().into_active_model();
        if let Some(username) = &changes.username {
            am.username = Set(username.clone());
        }
        if let Some(email) = &changes.email {
            am.email = Set(email.clone());
        }
        if let Some(role) = changes.role {
            am.role = Set(i16::from(role.as_u8()));
        }
        if let Some(bio) = &changes.bio {
            am.bio = Set(bio.clone());
        }
        if let Some(first_name) = &changes.first_name {
            am.first_name = Set(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            am.last_name = Set(last_name.clone());
        }
        if !am.is_changed() {
            return Ok(user_from_model(model));
        }
        let updated = am
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_internal(e, ApiError::UserAlreadyExists, "update user"))?;
        Ok(user_from_model(updated))
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), ApiError> {
        let txn = self.db.begin().await.context("begin delete user")?;

        let review_ids = reviews::Entity::find()
            .select_only()
            .column(reviews::Column::Id)
            .filter(reviews::Column::AuthorId.eq(user_id))
            .into_query();
        comments::Entity::delete_many()
            .filter(
                comments::Column::AuthorId
                    .eq(user_id)
                    .or(comments::Column::ReviewId.in_subquery(review_ids)),
            )
            .exec(&txn)
            .await
            .context("delete comments of deleted user")?;
        reviews::Entity::delete_many()
            .filter(reviews::Column::AuthorId.eq(user_id))
            .exec(&txn)
            .await
            .context("delete reviews of deleted user")?;
        users::Entity::delete_by_id(user_id)
            .exec(&txn)
            .await
            .context("delete user")?;

        txn.commit().await.context("commit delete user")?;
        Ok(())
    }
}

fn user_to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        username: Set(user.username.clone()),
        email: Set(user.email.clone()),
        role: Set(i16::from(user.role.as_u8())),
        bio: Set(user.bio.clone()),
        first_name: Set(user.first_name.clone()),
        last_name: Set(user.last_name.clone()),
        confirmation_code: Set(user.confirmation_code.clone()),
        confirmed_at: Set(user.confirmed_at),
        created_at: Set(user.created_at),
    }
}

fn user_from_model(model: users::Model) -> User {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .unwrap_or_default();
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        role,
        bio: model.bio,
        first_name: model.first_name,
        last_name: model.last_name,
        confirmation_code: model.confirmation_code,
        confirmed_at: model.confirmed_at,
        created_at: model.created_at,
    }
}
