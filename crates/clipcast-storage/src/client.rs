//! S3 client for publishing rendered assets.

use std::path::Path;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

const DEFAULT_REGION: &str = "us-east-1";

/// Static credentials for S3-compatible stores.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Configuration for the storage client.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Destination bucket.
    pub bucket: String,
    /// Bucket region.
    pub region: String,
    /// Custom endpoint for S3-compatible stores; implies path-style
    /// addressing.
    pub endpoint_url: Option<String>,
    /// Static credentials; the ambient provider chain is used when absent.
    pub credentials: Option<StaticCredentials>,
}

impl StorageConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| StorageError::config_error("S3_BUCKET not set"))?;

        let credentials = match (
            std::env::var("S3_ACCESS_KEY_ID"),
            std::env::var("S3_SECRET_ACCESS_KEY"),
        ) {
            (Ok(access_key_id), Ok(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        Ok(Self {
            bucket,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
            credentials,
        })
    }
}

/// S3 storage client.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    bucket: String,
}

impl StorageClient {
    /// Create a new storage client.
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        let builder = match &config.credentials {
            Some(credentials) => Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .credentials_provider(Credentials::new(
                    credentials.access_key_id.clone(),
                    credentials.secret_access_key.clone(),
                    None,
                    None,
                    "clipcast",
                )),
            None => {
                let base = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .load()
                    .await;
                Builder::from(&base)
            }
        };

        let builder = match &config.endpoint_url {
            Some(endpoint) => builder.endpoint_url(endpoint.clone()).force_path_style(true),
            None => builder,
        };

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket,
        })
    }

    /// Create a client from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        Self::new(StorageConfig::from_env()?).await
    }

    /// The destination bucket.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload a local file to the bucket.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        key: &str,
        content_type: &str,
    ) -> StorageResult<()> {
        let path = path.as_ref();
        debug!("Uploading {} to key {}", path.display(), key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        info!("Uploaded {} to s3://{}/{}", path.display(), self.bucket, key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serial_test::serial;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> StorageConfig {
        StorageConfig {
            bucket: "promo-clips".to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: Some(server.uri()),
            credentials: Some(StaticCredentials {
                access_key_id: "test-access".to_string(),
                secret_access_key: "test-secret".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_upload_file_puts_object_under_key() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/promo-clips/final_video.mp4"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("render.mp4");
        tokio::fs::write(&file, b"mp4 bytes").await.unwrap();

        let client = StorageClient::new(test_config(&server)).await.unwrap();
        client
            .upload_file(&file, "final_video.mp4", "video/mp4")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_missing_file_fails() {
        let server = MockServer::start().await;
        let client = StorageClient::new(test_config(&server)).await.unwrap();

        let err = client
            .upload_file("/nonexistent/render.mp4", "final_video.mp4", "video/mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("S3_BUCKET", "promo-clips");
        std::env::remove_var("AWS_REGION");
        std::env::remove_var("S3_ENDPOINT_URL");
        std::env::remove_var("S3_ACCESS_KEY_ID");
        std::env::remove_var("S3_SECRET_ACCESS_KEY");

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.bucket, "promo-clips");
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(config.endpoint_url.is_none());
        assert!(config.credentials.is_none());

        std::env::remove_var("S3_BUCKET");
    }

    #[test]
    #[serial]
    fn test_config_requires_bucket() {
        std::env::remove_var("S3_BUCKET");
        let err = StorageConfig::from_env().unwrap_err();
        assert!(matches!(err, StorageError::ConfigError(_)));
    }
}
