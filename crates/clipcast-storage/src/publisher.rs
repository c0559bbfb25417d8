//! Asset publishing: fetch a rendered asset and deliver it to storage.

use std::time::Duration;

use tracing::info;

use clipcast_models::DeliveryReceipt;

use crate::client::StorageClient;
use crate::download::download_to_file;
use crate::error::{StorageError, StorageResult};

/// Name of the staged asset inside the scratch directory.
const STAGED_FILE_NAME: &str = "render.mp4";

/// Downloads a rendered asset and publishes it to the bucket.
///
/// The asset is staged in a scratch directory that is removed when the
/// publish completes or fails; nothing persists locally between
/// invocations.
#[derive(Clone)]
pub struct AssetPublisher {
    http: reqwest::Client,
    storage: StorageClient,
}

impl AssetPublisher {
    /// Create a publisher over the given storage client.
    pub fn new(storage: StorageClient) -> StorageResult<Self> {
        // No total request timeout: a large asset download may outlast
        // any fixed deadline. The connect timeout still bounds dead hosts.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("clipcast-storage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StorageError::config_error(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, storage })
    }

    /// Fetch `asset_url` into a scratch file and upload it under `key`.
    pub async fn publish(&self, asset_url: &str, key: &str) -> StorageResult<DeliveryReceipt> {
        let scratch = tempfile::tempdir()?;
        let staged = scratch.path().join(STAGED_FILE_NAME);

        let bytes = download_to_file(&self.http, asset_url, &staged).await?;
        self.storage.upload_file(&staged, key, "video/mp4").await?;

        let receipt = DeliveryReceipt {
            bucket: self.storage.bucket().to_string(),
            key: key.to_string(),
            bytes,
        };
        info!("Published asset to {}", receipt.uri());
        Ok(receipt)
    }
}
