//! Invocation configuration.

use std::collections::HashMap;
use std::time::Duration;

use clipcast_caption::CaptionConfig;
use clipcast_render::RenderConfig;
use clipcast_storage::StorageConfig;

use crate::error::{PipelineError, PipelineResult};

/// Default prompt sent to the caption service.
pub const DEFAULT_PROMPT: &str =
    "Generate a creative social media post caption for a promotional video.";

/// Default tagline rendered under the caption, with inline size markup
/// understood by the render service.
pub const DEFAULT_TAGLINE: &str = "Create & Automate\n[size 150%]Video[/size]";

/// Default object key the published asset is stored under.
pub const DEFAULT_OBJECT_KEY: &str = "final_video.mp4";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 20;

/// Template parameters for the promo render.
#[derive(Debug, Clone)]
pub struct TemplateSpec {
    /// Render service template.
    pub template_id: String,
    /// Source video the template wraps.
    pub video_source: String,
    /// Static tagline text.
    pub tagline: String,
}

impl TemplateSpec {
    /// Build the modification map with the generated caption embedded.
    ///
    /// Element names follow the promo template: the source video slot,
    /// the caption slot, and the tagline slot.
    pub fn modifications(&self, caption: &str) -> HashMap<String, String> {
        HashMap::from([
            ("Video.source".to_string(), self.video_source.clone()),
            ("Text-1.text".to_string(), caption.to_string()),
            ("Text-2.text".to_string(), self.tagline.clone()),
        ])
    }
}

/// Configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Caption service settings.
    pub caption: CaptionConfig,
    /// Render service settings.
    pub render: RenderConfig,
    /// Storage settings.
    pub storage: StorageConfig,
    /// Template parameters.
    pub template: TemplateSpec,
    /// Prompt sent to the caption service.
    pub prompt: String,
    /// Object key the published asset is stored under.
    pub object_key: String,
    /// Wait between status queries.
    pub poll_interval: Duration,
    /// Status query budget, counted from 1 inclusive.
    pub max_poll_attempts: u32,
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let template = TemplateSpec {
            template_id: std::env::var("RENDER_TEMPLATE_ID")
                .map_err(|_| PipelineError::config_error("RENDER_TEMPLATE_ID not set"))?,
            video_source: std::env::var("RENDER_VIDEO_SOURCE")
                .map_err(|_| PipelineError::config_error("RENDER_VIDEO_SOURCE not set"))?,
            tagline: std::env::var("RENDER_TAGLINE")
                .unwrap_or_else(|_| DEFAULT_TAGLINE.to_string()),
        };

        Ok(Self {
            caption: CaptionConfig::from_env()?,
            render: RenderConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            template,
            prompt: std::env::var("CAPTION_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_string()),
            object_key: std::env::var("S3_OBJECT_KEY")
                .unwrap_or_else(|_| DEFAULT_OBJECT_KEY.to_string()),
            poll_interval: Duration::from_secs(
                std::env::var("POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
            ),
            max_poll_attempts: std::env::var("POLL_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_POLL_MAX_ATTEMPTS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serial_test::serial;

    fn set_required_env() {
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::set_var("CREATOMATE_API_KEY", "cm-test");
        std::env::set_var("S3_BUCKET", "promo-clips");
        std::env::set_var("RENDER_TEMPLATE_ID", "tpl-1");
        std::env::set_var("RENDER_VIDEO_SOURCE", "https://cdn/source.mp4");
    }

    fn clear_env() {
        for name in [
            "OPENAI_API_KEY",
            "CREATOMATE_API_KEY",
            "S3_BUCKET",
            "RENDER_TEMPLATE_ID",
            "RENDER_VIDEO_SOURCE",
            "RENDER_TAGLINE",
            "CAPTION_PROMPT",
            "S3_OBJECT_KEY",
            "POLL_INTERVAL_SECS",
            "POLL_MAX_ATTEMPTS",
        ] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_applies_defaults() {
        clear_env();
        set_required_env();

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.template.template_id, "tpl-1");
        assert_eq!(config.template.tagline, DEFAULT_TAGLINE);
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert_eq!(config.object_key, DEFAULT_OBJECT_KEY);
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.max_poll_attempts, 20);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_reads_poll_budget() {
        clear_env();
        set_required_env();
        std::env::set_var("POLL_INTERVAL_SECS", "1");
        std::env::set_var("POLL_MAX_ATTEMPTS", "3");

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.max_poll_attempts, 3);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_template_id() {
        clear_env();
        set_required_env();
        std::env::remove_var("RENDER_TEMPLATE_ID");

        let err = PipelineConfig::from_env().unwrap_err();
        assert!(matches!(err, PipelineError::ConfigError(_)));

        clear_env();
    }

    #[test]
    fn test_modifications_embed_caption() {
        let template = TemplateSpec {
            template_id: "tpl-1".to_string(),
            video_source: "https://cdn/source.mp4".to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
        };

        let modifications = template.modifications("Dream big");
        assert_eq!(
            modifications.get("Video.source").map(String::as_str),
            Some("https://cdn/source.mp4")
        );
        assert_eq!(
            modifications.get("Text-1.text").map(String::as_str),
            Some("Dream big")
        );
        assert_eq!(
            modifications.get("Text-2.text").map(String::as_str),
            Some(DEFAULT_TAGLINE)
        );
    }
}
