//! Streaming HTTP download of rendered assets.

use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::error::{StorageError, StorageResult};

/// Download `url` to `path`, streaming chunks to disk.
///
/// Returns the number of bytes written. A non-success response or an
/// empty body is a download failure; a zero-byte asset must never reach
/// the bucket.
pub async fn download_to_file(
    http: &reqwest::Client,
    url: &str,
    path: impl AsRef<Path>,
) -> StorageResult<u64> {
    let path = path.as_ref();
    let url = Url::parse(url)
        .map_err(|e| StorageError::download_failed(format!("invalid asset URL '{url}': {e}")))?;

    debug!("Downloading {} to {}", url, path.display());

    let response = http
        .get(url.clone())
        .send()
        .await
        .map_err(|e| StorageError::download_failed(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(StorageError::download_failed(format!(
            "service returned {} for {}",
            response.status(),
            url
        )));
    }

    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| StorageError::download_failed(format!("stream failed: {e}")))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    if written == 0 {
        return Err(StorageError::download_failed(format!(
            "downloaded asset from {url} is empty"
        )));
    }

    info!("Downloaded {} bytes from {}", written, url);
    Ok(written)
}
