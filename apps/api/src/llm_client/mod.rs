/// LLM Client: the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call a model backend directly.
/// Every backend implements `TextGenerator`; which one runs is configuration.
///
/// Calls are single-shot: no retry, no backoff, no client timeout. Callers
/// own the fallback behaviour.
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::LlmConfig;

pub mod huggingface;
pub mod ollama;
pub mod openai;
pub mod prompts;

pub use huggingface::HuggingFaceGenerator;
pub use ollama::OllamaGenerator;
pub use openai::OpenAiGenerator;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Backend reported an error: {0}")]
    Backend(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A text-generation backend. Implementations send one request and return
/// the raw generated text; they never interpret it.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError>;

    /// Short label for logs, e.g. `ollama:llama3.1`.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    HuggingFace,
    OpenAi,
}

impl Provider {
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Provider::Ollama => "http://127.0.0.1:11434",
            Provider::HuggingFace => "https://api-inference.huggingface.co/models",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Ollama => "llama3.1",
            Provider::HuggingFace => "google/flan-t5-base",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }
}

impl FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Provider::Ollama),
            "huggingface" | "hf" => Ok(Provider::HuggingFace),
            "openai" => Ok(Provider::OpenAi),
            other => anyhow::bail!(
                "LLM_PROVIDER must be one of ollama, huggingface, openai (got '{other}')"
            ),
        }
    }
}

/// Builds the configured backend.
pub fn build_generator(config: &LlmConfig) -> Arc<dyn TextGenerator> {
    let client = Client::new();
    let api_key = config.api_key.clone().unwrap_or_default();

    match config.provider {
        Provider::Ollama => Arc::new(OllamaGenerator::new(
            client,
            &config.endpoint,
            &config.model,
        )),
        Provider::HuggingFace => Arc::new(HuggingFaceGenerator::new(
            client,
            &config.endpoint,
            &config.model,
            api_key,
        )),
        Provider::OpenAi => Arc::new(OpenAiGenerator::new(
            client,
            &config.endpoint,
            &config.model,
            api_key,
        )),
    }
}

/// Turns a non-2xx response into `LlmError::Api`, keeping the body for logs.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}
