//! sea-orm implementations of the repository traits.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DbErr, SqlErr, TransactionError,
};

use yamdb_api_schema::outbox_events;

use crate::domain::types::OutboxEvent;
use crate::error::ApiError;

mod reviews;
mod terms;
mod titles;
mod users;

pub use reviews::{DbCommentRepository, DbReviewRepository};
pub use terms::{DbCategoryRepository, DbGenreRepository};
pub use titles::DbTitleRepository;
pub use users::DbUserRepository;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map a unique-constraint violation to `conflict`; anything else is internal.
fn conflict_or_internal(err: DbErr, conflict: ApiError, context: &'static str) -> ApiError {
    if is_unique_violation(&err) {
        conflict
    } else {
        ApiError::Internal(anyhow::Error::new(err).context(context))
    }
}

fn txn_conflict_or_internal(
    err: TransactionError<DbErr>,
    conflict: ApiError,
    context: &'static str,
) -> ApiError {
    match err {
        TransactionError::Transaction(err) => conflict_or_internal(err, conflict, context),
        TransactionError::Connection(err) => {
            ApiError::Internal(anyhow::Error::new(err).context(context))
        }
    }
}

async fn insert_outbox_event<C: ConnectionTrait>(
    conn: &C,
    event: &OutboxEvent,
) -> Result<(), DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        recipient_id: Set(event.recipient_id),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        created_at: Set(now),
        deliver_after: Set(now),
        delivered_at: Set(None),
    }
    .insert(conn)
    .await?;
    Ok(())
}
