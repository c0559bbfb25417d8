//! Chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CaptionError, CaptionResult};

/// Default public endpoint of the completions API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// System prompt framing every caption request.
const SYSTEM_PROMPT: &str = "Write me a 5 word inspiring quote";

/// Configuration for the caption client.
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    /// Bearer token for the completions API.
    pub api_key: String,
    /// Completion model to use.
    pub model: String,
    /// Base URL of the completions API.
    pub base_url: String,
}

impl CaptionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> CaptionResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CaptionError::config_error("OPENAI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Text-generation boundary used by the pipeline.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Generate a short caption for the given prompt.
    async fn generate(&self, prompt: &str) -> CaptionResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions API.
#[derive(Clone)]
pub struct CaptionClient {
    http: Client,
    config: CaptionConfig,
}

impl CaptionClient {
    /// Create a new caption client.
    pub fn new(config: CaptionConfig) -> CaptionResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("clipcast-caption/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CaptionError::config_error(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> CaptionResult<Self> {
        Self::new(CaptionConfig::from_env()?)
    }

    /// Generate a caption for the given prompt.
    ///
    /// Returns the first choice's message content, trimmed. An empty
    /// completion is an error rather than an empty caption.
    pub async fn generate(&self, prompt: &str) -> CaptionResult<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
        };

        debug!(model = %self.config.model, "Requesting caption");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CaptionError::request_failed(format!("completions request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CaptionError::Api { status, body });
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            CaptionError::request_failed(format!("invalid completions response: {e}"))
        })?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or(CaptionError::MissingContent)?;

        let caption = content.trim();
        if caption.is_empty() {
            return Err(CaptionError::EmptyCompletion);
        }

        info!(caption_len = caption.len(), "Caption generated");
        Ok(caption.to_string())
    }
}

#[async_trait]
impl CaptionSource for CaptionClient {
    async fn generate(&self, prompt: &str) -> CaptionResult<String> {
        CaptionClient::generate(self, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> CaptionClient {
        CaptionClient::new(CaptionConfig {
            api_key: "test-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: server.uri(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({ "model": "gpt-3.5-turbo" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "  Dream big, render bigger.\n" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let caption = test_client(&server)
            .generate("Caption a promo video.")
            .await
            .unwrap();
        assert_eq!(caption, "Dream big, render bigger.");
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .generate("Caption a promo video.")
            .await
            .unwrap_err();
        match err {
            CaptionError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .generate("Caption a promo video.")
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::MissingContent));
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [ { "message": { "role": "assistant", "content": "   \n" } } ]
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .generate("Caption a promo video.")
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::EmptyCompletion));
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::remove_var("OPENAI_MODEL");
        std::env::remove_var("OPENAI_BASE_URL");

        let config = CaptionConfig::from_env().unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        std::env::remove_var("OPENAI_API_KEY");
    }

    #[test]
    #[serial]
    fn test_config_requires_api_key() {
        std::env::remove_var("OPENAI_API_KEY");
        let err = CaptionConfig::from_env().unwrap_err();
        assert!(matches!(err, CaptionError::ConfigError(_)));
    }
}
