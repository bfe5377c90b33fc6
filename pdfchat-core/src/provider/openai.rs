//! OpenAI-compatible provider implementation.
//!
//! Talks to the `/chat/completions` and `/embeddings` endpoints of any
//! OpenAI-compatible server using bearer authentication.

use super::types::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// OpenAI-compatible HTTP API provider.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new provider for the given endpoint and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn post_json(&self, url: &str, body: &impl Serialize) -> Result<String> {
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api(format!("{status}: {text}")));
        }
        Ok(text)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = OpenAiChatRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %request.model, "sending chat completion request");
        let text = self.post_json(&url, &body).await?;
        let parsed: OpenAiChatResponse = serde_json::from_str(&text)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Api("response contained no choices".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str], model: &str) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/embeddings", self.base_url);
        let body = EmbeddingRequest {
            model,
            input: texts,
        };

        debug!(model = %model, inputs = texts.len(), "sending embedding request");
        let text = self.post_json(&url, &body).await?;
        let parsed: EmbeddingResponse = serde_json::from_str(&text)?;

        extract_embeddings(parsed, texts.len())
    }
}

/// Orders the response entries by their `index` field and checks that the
/// provider returned exactly one vector per input.
fn extract_embeddings(mut response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    response.data.sort_by_key(|entry| entry.index);
    if response.data.len() != expected {
        return Err(ProviderError::Api(format!(
            "provider returned {} embeddings for {} inputs",
            response.data.len(),
            expected
        )));
    }
    Ok(response.data.into_iter().map(|entry| entry.embedding).collect())
}

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    max_tokens: usize,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Deserialize)]
struct EmbeddingEntry {
    index: usize,
    embedding: Vec<f32>,
}
