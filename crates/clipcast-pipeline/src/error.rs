//! Pipeline error types.

use thiserror::Error;

/// Result type for pipeline assembly.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors raised while assembling a pipeline.
///
/// Stage failures during a run never surface here; `Pipeline::run` folds
/// them into the invocation outcome.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Caption error: {0}")]
    Caption(#[from] clipcast_caption::CaptionError),

    #[error("Render error: {0}")]
    Render(#[from] clipcast_render::RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] clipcast_storage::StorageError),
}

impl PipelineError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
