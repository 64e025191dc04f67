//! Local Ollama daemon backend (`/api/generate`).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ensure_success, LlmError, TextGenerator};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    error: Option<String>,
}

pub struct OllamaGenerator {
    client: Client,
    url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(client: Client, endpoint: &str, model: &str) -> Self {
        Self {
            client,
            url: format!("{}/api/generate", endpoint.trim_end_matches('/')),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        // The generate endpoint has no system slot in its minimal form; prepend it.
        let body = GenerateRequest {
            model: &self.model,
            prompt: format!("{system}\n\n{prompt}"),
            stream: false,
            format: "json",
        };

        debug!(model = %self.model, "Sending request to Ollama");

        let response = self.client.post(&self.url).json(&body).send().await?;
        let parsed: GenerateResponse = ensure_success(response).await?.json().await?;

        if let Some(error) = parsed.error {
            return Err(LlmError::Backend(error));
        }
        parsed.response.ok_or(LlmError::EmptyContent)
    }

    fn describe(&self) -> String {
        format!("ollama:{}", self.model)
    }
}
