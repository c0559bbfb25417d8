//! Pipeline orchestration.

use std::fmt;
use std::sync::Arc;

use tracing::{error, info};

use clipcast_caption::{CaptionClient, CaptionSource};
use clipcast_models::{PipelineOutcome, PipelineStage};
use clipcast_render::{RenderClient, StatusPoller};
use clipcast_storage::{AssetPublisher, StorageClient};

use crate::config::{PipelineConfig, TemplateSpec};
use crate::error::PipelineResult;
use crate::handoff::{ResultHandoff, StorageHandoff};

/// One-shot promo-video pipeline.
///
/// Stages run strictly in order: caption, submit, poll, deliver. The
/// first failure wins; later stages are not attempted and the failure is
/// folded into the returned outcome rather than raised. The submitted
/// job is polled by exactly one loop within the invocation.
pub struct Pipeline {
    caption: Arc<dyn CaptionSource>,
    render: RenderClient,
    poller: StatusPoller,
    handoff: Arc<dyn ResultHandoff>,
    template: TemplateSpec,
    prompt: String,
}

impl Pipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        caption: Arc<dyn CaptionSource>,
        render: RenderClient,
        poller: StatusPoller,
        handoff: Arc<dyn ResultHandoff>,
        template: TemplateSpec,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            caption,
            render,
            poller,
            handoff,
            template,
            prompt: prompt.into(),
        }
    }

    /// Build the production pipeline from configuration.
    pub async fn from_config(config: PipelineConfig) -> PipelineResult<Self> {
        let caption = CaptionClient::new(config.caption)?;
        let render = RenderClient::new(config.render)?;
        let poller = StatusPoller::new(
            render.clone(),
            config.poll_interval,
            config.max_poll_attempts,
        );
        let storage = StorageClient::new(config.storage).await?;
        let handoff = StorageHandoff::new(AssetPublisher::new(storage)?, config.object_key);

        Ok(Self::new(
            Arc::new(caption),
            render,
            poller,
            Arc::new(handoff),
            config.template,
            config.prompt,
        ))
    }

    /// Run the pipeline to completion or first failure.
    ///
    /// Never returns an error; every stage failure is mapped to a
    /// `PipelineOutcome::Failure` naming the stage it happened in.
    pub async fn run(&self) -> PipelineOutcome {
        info!(template_id = %self.template.template_id, "Starting render pipeline");

        let caption = match self.caption.generate(&self.prompt).await {
            Ok(text) => text,
            Err(e) => return Self::fail(PipelineStage::Generate, e),
        };

        let modifications = self.template.modifications(&caption);
        let job = match self
            .render
            .submit(&self.template.template_id, modifications)
            .await
        {
            Ok(job) => job,
            Err(e) => return Self::fail(PipelineStage::Submit, e),
        };

        let asset_url = match self.poller.poll(&job.id).await {
            Ok(url) => url,
            Err(e) => return Self::fail(PipelineStage::Poll, e),
        };

        match self.handoff.deliver(&asset_url).await {
            Ok(delivery) => {
                info!(location = %delivery.uri(), "Pipeline complete");
                PipelineOutcome::success(asset_url, delivery)
            }
            Err(e) => Self::fail(PipelineStage::Handoff, e),
        }
    }

    fn fail(stage: PipelineStage, err: impl fmt::Display) -> PipelineOutcome {
        error!(stage = %stage, "Pipeline stage failed: {}", err);
        PipelineOutcome::failure(stage, err.to_string())
    }
}
