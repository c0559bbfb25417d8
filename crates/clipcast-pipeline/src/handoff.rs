//! Delivery boundary for finished renders.
//!
//! The pipeline's responsibility ends at handing a non-empty asset URL
//! across this boundary; key naming and transfer mechanics live behind it.

use async_trait::async_trait;

use clipcast_models::DeliveryReceipt;
use clipcast_storage::{AssetPublisher, StorageError, StorageResult};

/// Delivery boundary used by the pipeline.
#[async_trait]
pub trait ResultHandoff: Send + Sync {
    /// Deliver the asset at `asset_url` to its storage destination.
    async fn deliver(&self, asset_url: &str) -> StorageResult<DeliveryReceipt>;
}

/// Storage-backed delivery: download the asset and publish it under the
/// configured object key.
pub struct StorageHandoff {
    publisher: AssetPublisher,
    object_key: String,
}

impl StorageHandoff {
    /// Create a handoff publishing under `object_key`.
    pub fn new(publisher: AssetPublisher, object_key: impl Into<String>) -> Self {
        Self {
            publisher,
            object_key: object_key.into(),
        }
    }
}

#[async_trait]
impl ResultHandoff for StorageHandoff {
    async fn deliver(&self, asset_url: &str) -> StorageResult<DeliveryReceipt> {
        if asset_url.is_empty() {
            return Err(StorageError::download_failed("asset URL is empty"));
        }
        self.publisher.publish(asset_url, &self.object_key).await
    }
}
