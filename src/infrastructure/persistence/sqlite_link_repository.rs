//! SQLite implementation of the short-link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::{AppError, map_insert_error};

/// SQLite repository for short link storage and retrieval.
///
/// The `code` column carries a UNIQUE constraint; a conflicting insert
/// surfaces as [`AppError::DuplicateCode`] for the caller's retry loop.
pub struct SqliteLinkRepository {
    pool: SqlitePool,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    code: String,
    item: String,
    user_id: Option<String>,
    target_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            item: row.item,
            user_id: row.user_id,
            target_url: row.target_url,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ShortLinkRepository for SqliteLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO short_links (code, item, user_id, target_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.item)
        .bind(&new_link.user_id)
        .bind(&new_link.target_url)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &new_link.code))?;

        Ok(ShortLink {
            id: result.last_insert_rowid(),
            code: new_link.code,
            item: new_link.item,
            user_id: new_link.user_id,
            target_url: new_link.target_url,
            created_at,
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, code, item, user_id, target_url, created_at
            FROM short_links
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
