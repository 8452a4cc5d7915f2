//! Short URL, its metadata row and the click ledger.

use chrono::{DateTime, Utc};

/// A shortened URL.
///
/// `code` is derived from `id` (see [`crate::utils::base62::short_code`]) and
/// never changes once the creating transaction commits.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    #[sqlx(rename = "short_url")]
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-URL metadata, one row per [`ShortUrl`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UrlMeta {
    pub id: i64,
    pub url_id: i64,
    pub user_id: Option<i64>,
    pub last_clicked_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// [`UrlMeta`] together with the URL it describes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UrlMetaDetails {
    #[sqlx(flatten)]
    pub meta: UrlMeta,
    #[sqlx(rename = "short_url")]
    pub code: String,
    pub original_url: String,
}

/// One successful redirect. Rows are never updated after insert.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClickEvent {
    pub id: i64,
    pub url_id: i64,
    pub clicked_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A [`ShortUrl`] joined with its owner-facing metadata.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OwnedUrl {
    pub id: i64,
    #[sqlx(rename = "short_url")]
    pub code: String,
    pub original_url: String,
    pub last_clicked_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a recorded redirect.
#[derive(Debug, Clone)]
pub struct RecordedClick {
    pub url_id: i64,
    pub original_url: String,
    pub clicked_time: DateTime<Utc>,
}

/// Derives a short code from a freshly assigned row id.
pub type CodeDeriver = fn(u64) -> String;
