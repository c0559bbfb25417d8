//! Pipeline outcome types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stage of the pipeline a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Caption text generation.
    Generate,
    /// Render job submission.
    Submit,
    /// Render status polling.
    Poll,
    /// Asset download and upload.
    Handoff,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Submit => "submit",
            Self::Poll => "poll",
            Self::Handoff => "handoff",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Proof of delivery for a published asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Destination bucket.
    pub bucket: String,
    /// Object key within the bucket.
    pub key: String,
    /// Size of the published object in bytes.
    pub bytes: u64,
}

impl DeliveryReceipt {
    /// Canonical `s3://` location of the published object.
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

/// Terminal result of one pipeline invocation.
///
/// Every invocation ends in exactly one of these; stage errors are folded
/// in rather than raised past the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// The rendered asset was published to storage.
    Success {
        /// URL the render service served the asset from.
        asset_url: String,
        /// Where the asset was published.
        delivery: DeliveryReceipt,
    },
    /// A stage failed; nothing after it was attempted.
    Failure {
        /// Stage the failure is attributed to.
        stage: PipelineStage,
        /// Human-readable failure description.
        reason: String,
    },
}

impl PipelineOutcome {
    pub fn success(asset_url: impl Into<String>, delivery: DeliveryReceipt) -> Self {
        Self::Success {
            asset_url: asset_url.into(),
            delivery,
        }
    }

    pub fn failure(stage: PipelineStage, reason: impl Into<String>) -> Self {
        Self::Failure {
            stage,
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Status-plus-body surface reported back to the invoker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl From<&PipelineOutcome> for InvocationResponse {
    fn from(outcome: &PipelineOutcome) -> Self {
        match outcome {
            PipelineOutcome::Success { delivery, .. } => Self {
                status_code: 200,
                body: format!(
                    "Video successfully processed and uploaded to {}",
                    delivery.uri()
                ),
            },
            PipelineOutcome::Failure { stage, reason } => Self {
                status_code: 500,
                body: format!("Pipeline failed at {stage} stage: {reason}"),
            },
        }
    }
}
