//! Asset delivery for rendered videos.
//!
//! This crate provides:
//! - `StorageClient` - S3 (or S3-compatible) object upload
//! - `download_to_file` - streaming HTTP download of a rendered asset
//! - `AssetPublisher` - download-then-upload glue producing a
//!   `DeliveryReceipt`

pub mod client;
pub mod download;
pub mod error;
pub mod publisher;

pub use client::{StaticCredentials, StorageClient, StorageConfig};
pub use download::download_to_file;
pub use error::{StorageError, StorageResult};
pub use publisher::AssetPublisher;
