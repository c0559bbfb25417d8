//! Render status classification.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classified state of a render job.
///
/// The render service vocabulary is wider than what the pipeline acts on,
/// so every reported status collapses into one of three states. Unknown
/// or missing statuses stay `Pending` so the poll loop keeps waiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    /// Not terminal; the job is still being worked on.
    Pending,
    /// Terminal success, with the asset URL if the service reported one.
    Succeeded { asset_url: Option<String> },
    /// Terminal failure, carrying the status string the service reported.
    Failed { reason: String },
}

impl RenderStatus {
    /// Classify a raw status report.
    ///
    /// Pure: the same inputs always classify the same way. An empty asset
    /// URL is treated as absent.
    pub fn classify(status: Option<&str>, url: Option<&str>) -> Self {
        match status.unwrap_or("") {
            "finished" | "succeeded" => Self::Succeeded {
                asset_url: url.filter(|u| !u.is_empty()).map(str::to_owned),
            },
            s @ ("failed" | "cancelled") => Self::Failed {
                reason: s.to_string(),
            },
            _ => Self::Pending,
        }
    }

    /// Whether this state ends the poll loop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One observation of a job's status during polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollAttempt {
    /// 1-based attempt number.
    pub number: u32,
    /// When the status was observed.
    pub at: DateTime<Utc>,
    /// What the render service reported.
    pub observed: RenderStatus,
}

impl PollAttempt {
    pub fn new(number: u32, observed: RenderStatus) -> Self {
        Self {
            number,
            at: Utc::now(),
            observed,
        }
    }
}
