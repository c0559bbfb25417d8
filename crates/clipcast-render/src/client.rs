//! Render service HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use clipcast_models::{RenderJob, RenderJobId, RenderStatus};

use crate::error::{RenderError, RenderResult};
use crate::types::{RenderStatusResponse, SubmitRenderRequest, SubmitRenderResponse};

/// Default public endpoint of the render service.
pub const DEFAULT_BASE_URL: &str = "https://api.creatomate.com";

/// Configuration for the render service client.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bearer token for the render service.
    pub api_key: String,
    /// Base URL of the render service API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
}

impl RenderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> RenderResult<Self> {
        let api_key = std::env::var("CREATOMATE_API_KEY")
            .map_err(|_| RenderError::config_error("CREATOMATE_API_KEY not set"))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("RENDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

/// Client for the render service.
#[derive(Clone)]
pub struct RenderClient {
    http: Client,
    config: RenderConfig,
}

impl RenderClient {
    /// Create a new render client.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("clipcast-render/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RenderError::config_error(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> RenderResult<Self> {
        Self::new(RenderConfig::from_env()?)
    }

    fn renders_url(&self) -> String {
        format!("{}/v1/renders", self.config.base_url)
    }

    fn render_url(&self, id: &RenderJobId) -> String {
        format!("{}/v1/renders/{}", self.config.base_url, id)
    }

    /// Submit a template render.
    ///
    /// One attempt only; a rejected or malformed submission is never
    /// retried. The acknowledged job id comes from the first descriptor
    /// of the response, whichever shape it arrives in.
    pub async fn submit(
        &self,
        template_id: &str,
        modifications: HashMap<String, String>,
    ) -> RenderResult<RenderJob> {
        if template_id.is_empty() {
            return Err(RenderError::InvalidModifications(
                "template id is empty".to_string(),
            ));
        }
        if modifications.keys().any(|key| key.is_empty()) {
            return Err(RenderError::InvalidModifications(
                "modification keys must be non-empty".to_string(),
            ));
        }

        let body = SubmitRenderRequest {
            template_id,
            modifications: &modifications,
        };

        debug!(
            template_id = %template_id,
            modifications = modifications.len(),
            "Submitting render"
        );

        let response = self
            .http
            .post(self.renders_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RenderError::submission(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RenderError::submission(format!(
                "service returned {status}: {body}"
            )));
        }

        let submitted: SubmitRenderResponse = response
            .json()
            .await
            .map_err(|e| RenderError::submission(format!("invalid response body: {e}")))?;

        let id = submitted
            .into_descriptor()
            .and_then(|descriptor| descriptor.id)
            .filter(|id| !id.is_empty())
            .ok_or(RenderError::MissingJobId)?;

        info!(job_id = %id, "Render submitted");

        Ok(RenderJob {
            id: RenderJobId::new(id),
            modifications,
        })
    }

    /// Query the current status of a render job.
    ///
    /// A transport failure or non-success response here is fatal to the
    /// poll loop, not a reason to keep waiting.
    pub async fn fetch_status(&self, id: &RenderJobId) -> RenderResult<RenderStatus> {
        let response = self
            .http
            .get(self.render_url(id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| RenderError::poll_query(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RenderError::poll_query(format!(
                "service returned {status}: {body}"
            )));
        }

        let report: RenderStatusResponse = response
            .json()
            .await
            .map_err(|e| RenderError::poll_query(format!("invalid response body: {e}")))?;

        Ok(RenderStatus::classify(
            report.status.as_deref(),
            report.url.as_deref(),
        ))
    }
}
