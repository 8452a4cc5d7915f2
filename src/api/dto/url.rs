//! DTOs for the short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{ClickEvent, OwnedUrl, ShortUrl, UrlMetaDetails};

/// Request to create a short URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    /// Absolute `http`/`https` destination.
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

/// A newly created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUrlResponse {
    pub pk: i64,
    pub short_url: String,
    pub original_url: String,
    /// Fully qualified short link.
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreatedUrlResponse {
    pub fn new(url: ShortUrl, link: String) -> Self {
        Self {
            pk: url.id,
            short_url: url.code,
            original_url: url.original_url,
            link,
            created_at: url.created_at,
            updated_at: url.updated_at,
        }
    }
}

/// Public view of a short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub short_url: String,
    pub original_url: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlResponse {
    pub fn new(url: ShortUrl, link: String) -> Self {
        Self {
            short_url: url.code,
            original_url: url.original_url,
            link,
            created_at: url.created_at,
            updated_at: url.updated_at,
        }
    }
}

/// Owner view of a URL's metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMetaResponse {
    pub pk: i64,
    pub url_id: i64,
    pub short_url: String,
    pub original_url: String,
    pub last_clicked_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlMetaDetails> for UrlMetaResponse {
    fn from(details: UrlMetaDetails) -> Self {
        Self {
            pk: details.meta.id,
            url_id: details.meta.url_id,
            short_url: details.code,
            original_url: details.original_url,
            last_clicked_time: details.meta.last_clicked_time,
            created_at: details.meta.created_at,
            updated_at: details.meta.updated_at,
        }
    }
}

/// One click in a URL's history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickItem {
    pub pk: i64,
    pub clicked_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClickEvent> for ClickItem {
    fn from(click: ClickEvent) -> Self {
        Self {
            pk: click.id,
            clicked_time: click.clicked_time,
            created_at: click.created_at,
            updated_at: click.updated_at,
        }
    }
}

/// A URL in the owner's listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedUrlItem {
    pub pk: i64,
    pub short_url: String,
    pub original_url: String,
    pub last_clicked_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OwnedUrl> for OwnedUrlItem {
    fn from(url: OwnedUrl) -> Self {
        Self {
            pk: url.id,
            short_url: url.code,
            original_url: url.original_url,
            last_clicked_time: url.last_clicked_time,
            created_at: url.created_at,
            updated_at: url.updated_at,
        }
    }
}

/// A list of items with its length.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    pub fn from_items<E: Into<T>>(items: Vec<E>, count: usize) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            count,
        }
    }
}

/// Generic acknowledgement body.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_uses_camel_case() {
        let req: CreateUrlRequest =
            serde_json::from_value(json!({ "originalUrl": "https://example.com/a" })).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_relative_url() {
        let req: CreateUrlRequest =
            serde_json::from_value(json!({ "originalUrl": "www.google.com" })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_owned_item_serializes_null_last_click() {
        let now = Utc::now();
        let item = OwnedUrlItem::from(OwnedUrl {
            id: 1,
            code: "000001".to_string(),
            original_url: "https://example.com".to_string(),
            last_clicked_time: None,
            created_at: now,
            updated_at: now,
        });

        let value = serde_json::to_value(ListResponse::<OwnedUrlItem>::from_items(vec![item], 1))
            .unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["shortUrl"], "000001");
        assert!(value["items"][0]["lastClickedTime"].is_null());
    }
}
