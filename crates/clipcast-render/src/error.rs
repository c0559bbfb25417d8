//! Render error types.

use thiserror::Error;

/// Result type for render service operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while submitting or polling a render.
///
/// `PollQuery` and `PollTimeout` are distinct on purpose: the first means
/// a status query itself failed, the second means every query worked but
/// the render never reached a terminal state within the budget.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid render modifications: {0}")]
    InvalidModifications(String),

    #[error("Render submission failed: {0}")]
    Submission(String),

    #[error("Render submission response contained no job id")]
    MissingJobId,

    #[error("Render status query failed: {0}")]
    PollQuery(String),

    #[error("Render still pending after {attempts} status queries")]
    PollTimeout { attempts: u32 },

    #[error("Render did not complete: service reported '{status}'")]
    RenderFailed { status: String },

    #[error("Render succeeded but no asset URL was reported")]
    MissingAssetUrl,

    #[error("Failed to configure render client: {0}")]
    ConfigError(String),
}

impl RenderError {
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    pub fn poll_query(msg: impl Into<String>) -> Self {
        Self::PollQuery(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
