//! Caption error types.

use thiserror::Error;

/// Result type for caption operations.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Errors that can occur while generating a caption.
#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("Caption request failed: {0}")]
    RequestFailed(String),

    #[error("Caption API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Caption response contained no message content")]
    MissingContent,

    #[error("Caption API returned an empty completion")]
    EmptyCompletion,

    #[error("Failed to configure caption client: {0}")]
    ConfigError(String),
}

impl CaptionError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
