//! S3-compatible object storage.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, error, info};

use super::service::{ObjectStorage, StorageError, StorageResult, check_key, join_url};

/// Connection settings for an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: Option<String>,
    /// Base URL for public object links. Defaults to the virtual-hosted bucket URL.
    pub public_url: Option<String>,
}

/// Object storage backed by an S3 bucket.
///
/// Credentials come from the standard AWS provider chain.
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3Storage {
    /// Loads AWS configuration and builds a client for `settings.bucket`.
    pub async fn connect(settings: S3Settings) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        let public_base = match (&settings.public_url, &settings.endpoint) {
            (Some(url), _) => url.clone(),
            (None, Some(endpoint)) => join_url(endpoint, &settings.bucket),
            (None, None) => format!(
                "https://{}.s3.{}.amazonaws.com",
                settings.bucket, settings.region
            ),
        };

        info!(bucket = %settings.bucket, region = %settings.region, "S3 storage configured");

        Self {
            client,
            bucket: settings.bucket,
            public_base,
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<String> {
        check_key(key)?;
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                error!(key, error = ?e, "S3 put_object failed");
                StorageError::Backend(e.to_string())
            })?;

        debug!(key, size, "Uploaded object to S3");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        check_key(key)?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                error!(key, error = ?e, "S3 delete_object failed");
                StorageError::Backend(e.to_string())
            })?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base, key)
    }

    async fn health_check(&self) -> bool {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
    }
}
