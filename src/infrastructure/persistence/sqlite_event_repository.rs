//! SQLite implementation of the redirect event log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::entities::{NewRedirectEvent, RedirectEvent};
use crate::domain::repositories::RedirectEventRepository;
use crate::error::AppError;

/// SQLite repository for the append-only redirect event log.
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RedirectEventRow {
    id: i64,
    code: String,
    user_id: Option<String>,
    occurred_at: DateTime<Utc>,
}

impl From<RedirectEventRow> for RedirectEvent {
    fn from(row: RedirectEventRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            user_id: row.user_id,
            occurred_at: row.occurred_at,
        }
    }
}

#[async_trait]
impl RedirectEventRepository for SqliteEventRepository {
    async fn record(&self, event: NewRedirectEvent) -> Result<RedirectEvent, AppError> {
        let occurred_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO redirect_events (code, user_id, occurred_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&event.code)
        .bind(&event.user_id)
        .bind(occurred_at)
        .execute(&self.pool)
        .await?;

        Ok(RedirectEvent {
            id: result.last_insert_rowid(),
            code: event.code,
            user_id: event.user_id,
            occurred_at,
        })
    }

    async fn list_since(&self, since: DateTime<Utc>) -> Result<Vec<RedirectEvent>, AppError> {
        let rows = sqlx::query_as::<_, RedirectEventRow>(
            r#"
            SELECT id, code, user_id, occurred_at
            FROM redirect_events
            WHERE occurred_at >= ?1
            ORDER BY occurred_at DESC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
