//! Hugging Face Inference API backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ensure_success, LlmError, TextGenerator};

const MAX_LENGTH: u32 = 500;
const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: Option<String>,
}

/// Errors come back as `{"error": "..."}` with a 200 on some deployments.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Generated(Vec<GeneratedText>),
    Error { error: String },
}

pub struct HuggingFaceGenerator {
    client: Client,
    url: String,
    model: String,
    api_key: String,
}

impl HuggingFaceGenerator {
    pub fn new(client: Client, endpoint: &str, model: &str, api_key: String) -> Self {
        Self {
            client,
            url: format!("{}/{}", endpoint.trim_end_matches('/'), model),
            model: model.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let body = InferenceRequest {
            inputs: format!("{system}\n\n{prompt}"),
            parameters: InferenceParameters {
                max_length: MAX_LENGTH,
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        match ensure_success(response).await?.json().await? {
            InferenceResponse::Generated(items) => items
                .into_iter()
                .next()
                .and_then(|g| g.generated_text)
                .ok_or(LlmError::EmptyContent),
            InferenceResponse::Error { error } => Err(LlmError::Backend(error)),
        }
    }

    fn describe(&self) -> String {
        format!("huggingface:{}", self.model)
    }
}
