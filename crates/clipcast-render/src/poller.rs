//! Bounded render status polling.

use std::time::Duration;

use tracing::{info, warn};

use clipcast_models::{PollAttempt, RenderJobId, RenderStatus};

use crate::client::RenderClient;
use crate::error::{RenderError, RenderResult};

/// Drives a submitted render to a terminal state.
///
/// Each poll loop owns its attempt budget; a job is polled by at most one
/// loop within an invocation. Unknown status strings leave the render
/// pending, so service vocabulary can grow without breaking the loop.
#[derive(Clone)]
pub struct StatusPoller {
    client: RenderClient,
    interval: Duration,
    max_attempts: u32,
}

impl StatusPoller {
    /// Create a poller with the given wait interval and attempt budget.
    pub fn new(client: RenderClient, interval: Duration, max_attempts: u32) -> Self {
        Self {
            client,
            interval,
            max_attempts,
        }
    }

    /// Poll until the render succeeds, fails, or the budget runs out.
    ///
    /// Attempts are numbered from 1 and `max_attempts` is inclusive, so a
    /// budget of 3 issues at most 3 status queries. A failed query aborts
    /// the loop immediately; only a pending report consumes an attempt
    /// and waits. No wait follows the final attempt.
    ///
    /// Returns the asset URL reported with the terminal success.
    pub async fn poll(&self, job_id: &RenderJobId) -> RenderResult<String> {
        for number in 1..=self.max_attempts {
            let observed = self.client.fetch_status(job_id).await?;
            let attempt = PollAttempt::new(number, observed);

            info!(
                job_id = %job_id,
                attempt = attempt.number,
                max_attempts = self.max_attempts,
                status = attempt.observed.as_str(),
                "Render status"
            );

            match attempt.observed {
                RenderStatus::Succeeded {
                    asset_url: Some(url),
                } => {
                    info!(job_id = %job_id, attempts = number, "Render finished");
                    return Ok(url);
                }
                RenderStatus::Succeeded { asset_url: None } => {
                    return Err(RenderError::MissingAssetUrl);
                }
                RenderStatus::Failed { reason } => {
                    warn!(job_id = %job_id, attempts = number, status = %reason, "Render failed");
                    return Err(RenderError::RenderFailed { status: reason });
                }
                RenderStatus::Pending => {
                    if number < self.max_attempts {
                        tokio::time::sleep(self.interval).await;
                    }
                }
            }
        }

        warn!(
            job_id = %job_id,
            attempts = self.max_attempts,
            "Poll budget exhausted"
        );
        Err(RenderError::PollTimeout {
            attempts: self.max_attempts,
        })
    }
}
