//! Completion client: the single point of entry for hosted LLM calls.
//!
//! No other module talks to a provider API directly. Callers depend on the
//! `CompletionService` trait so the provider can be swapped at start-up
//! without touching the form-handling code.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::{CompletionProvider, Config};

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicCompletionClient;
pub use openai::OpenAiCompletionClient;

/// Token budget for every completion request.
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Completion response contained no text")]
    EmptyContent,
}

/// Turns a prompt into free-form text. Implementations return the provider's
/// text verbatim: no trimming, truncation checks, or schema validation.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Builds the configured provider client.
pub fn build_completion_service(
    config: &Config,
) -> Result<Arc<dyn CompletionService>, CompletionError> {
    let http = http_client(config.request_timeout)?;
    let service: Arc<dyn CompletionService> = match config.provider {
        CompletionProvider::OpenAi => Arc::new(OpenAiCompletionClient::new(
            http,
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.clone(),
        )),
        CompletionProvider::Anthropic => Arc::new(AnthropicCompletionClient::new(
            http,
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.clone(),
        )),
    };
    Ok(service)
}

fn http_client(timeout: Option<Duration>) -> Result<Client, CompletionError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Reads a failed response body, preferring the provider's `error.message` field.
async fn api_error(response: reqwest::Response) -> CompletionError {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    CompletionError::Api { status, message }
}
