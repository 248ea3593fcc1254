use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use crate::models::chat::{GenerateRequest, GenerationReply, DEFAULT_CONTENT_TYPE};
use crate::models::errors::{GatewayError, GenerationError};
use crate::services::cloudwatch_services::MetricsEmitter;
use crate::utilities::logging::log_error;
use crate::utilities::requests::require_non_empty;

/// Interface
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerationReply, GenerationError>;
}

/// HTTP client for an Ollama-style `/api/generate` endpoint.
pub struct OllamaClient {
    http: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http, url: url.into(), model: model.into() })
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationReply, GenerationError> {
        let payload = GenerateRequest { model: &self.model, prompt };

        let res = self.http
            .post(&self.url)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        let content_type = res.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Status { status: status.as_u16(), body });
        }

        Ok(GenerationReply { status: status.as_u16(), content_type, body })
    }
}

/// Echo and text-generation relay. Provider faults are logged and reduced to
/// `UpstreamEmpty` / `UpstreamUnavailable`; nothing is retried.
#[derive(Clone)]
pub struct ChatRelay {
    generator: Arc<dyn GenerationClient>,
    metrics: MetricsEmitter,
}

impl ChatRelay {
    pub fn new(generator: Arc<dyn GenerationClient>, metrics: MetricsEmitter) -> Self {
        Self { generator, metrics }
    }

    /// The message is echoed verbatim, without escaping.
    pub fn echo(&self, message: Option<String>) -> Result<String, GatewayError> {
        let message = require_message(message)?;
        Ok(format!("Echo: {}", message))
    }

    pub async fn generate(&self, message: Option<String>) -> Result<GenerationReply, GatewayError> {
        let message = require_message(message)?;

        match self.generator.generate(&message).await {
            Ok(reply) if reply.body.is_empty() => {
                log_error("LlmEmptyResponse", "LLM service returned an empty body");
                Err(GatewayError::UpstreamEmpty)
            }
            Ok(reply) => Ok(reply),
            Err(e) => {
                log_error("LlmUnavailable", &e.to_string());
                self.metrics.count("LlmUnavailable").await;
                Err(GatewayError::UpstreamUnavailable)
            }
        }
    }
}

fn require_message(message: Option<String>) -> Result<String, GatewayError> {
    require_non_empty(message, || GatewayError::required_field("message"))
}
