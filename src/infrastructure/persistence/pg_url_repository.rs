//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    ClickEvent, CodeDeriver, OwnedUrl, RecordedClick, ShortUrl, UrlMetaDetails,
};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::base62::CODE_WIDTH;

/// PostgreSQL repository for short URLs and the click ledger.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(
        &self,
        owner_id: i64,
        original_url: &str,
        derive_code: CodeDeriver,
    ) -> Result<ShortUrl, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar("INSERT INTO url (original_url) VALUES ($1) RETURNING id")
            .bind(original_url)
            .fetch_one(&mut *tx)
            .await?;

        // BIGSERIAL starts at 1
        let code = derive_code(id.unsigned_abs());
        if code.len() > CODE_WIDTH {
            tracing::warn!(id, code = %code, "Short code exceeds nominal width");
        }

        let url = sqlx::query_as::<_, ShortUrl>(
            r#"
            UPDATE url
            SET short_url = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, short_url, original_url, created_at, updated_at
            "#,
        )
        .bind(&code)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO url_meta (url_id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(url)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, short_url, original_url, created_at, updated_at
            FROM url
            WHERE short_url = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn delete_owned(&self, owner_id: i64, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM url u
            USING url_meta m
            WHERE m.url_id = u.id AND u.short_url = $1 AND m.user_id = $2
            "#,
        )
        .bind(code)
        .bind(owner_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM url WHERE short_url = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_meta(
        &self,
        owner_id: i64,
        url_id: i64,
    ) -> Result<Option<UrlMetaDetails>, AppError> {
        let meta = sqlx::query_as::<_, UrlMetaDetails>(
            r#"
            SELECT m.id, m.url_id, m.user_id, m.last_clicked_time, m.created_at, m.updated_at,
                   u.short_url, u.original_url
            FROM url_meta m
            JOIN url u ON u.id = m.url_id
            WHERE m.url_id = $1 AND m.user_id = $2 AND u.short_url IS NOT NULL
            "#,
        )
        .bind(url_id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(meta)
    }

    async fn list_clicks(&self, url_id: i64) -> Result<Vec<ClickEvent>, AppError> {
        let clicks = sqlx::query_as::<_, ClickEvent>(
            r#"
            SELECT id, url_id, clicked_time, created_at, updated_at
            FROM url_click_history
            WHERE url_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(url_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<OwnedUrl>, AppError> {
        let urls = sqlx::query_as::<_, OwnedUrl>(
            r#"
            SELECT u.id, u.short_url, u.original_url, m.last_clicked_time, u.created_at, u.updated_at
            FROM url u
            JOIN url_meta m ON m.url_id = u.id
            WHERE m.user_id = $1 AND u.short_url IS NOT NULL
            ORDER BY u.id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(urls)
    }

    async fn record_click(&self, code: &str) -> Result<Option<RecordedClick>, AppError> {
        let mut tx = self.pool.begin().await?;

        // KEY SHARE keeps a concurrent delete from removing the row mid-click.
        let row: Option<(i64, String)> = sqlx::query_as(
            "SELECT id, original_url FROM url WHERE short_url = $1 FOR KEY SHARE",
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((url_id, original_url)) = row else {
            return Ok(None);
        };

        let clicked_time: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO url_click_history (url_id) VALUES ($1) RETURNING clicked_time",
        )
        .bind(url_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE url_meta
            SET last_clicked_time = GREATEST(last_clicked_time, $2), updated_at = NOW()
            WHERE url_id = $1
            "#,
        )
        .bind(url_id)
        .bind(clicked_time)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(RecordedClick {
            url_id,
            original_url,
            clicked_time,
        }))
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
