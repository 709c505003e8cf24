use super::{Embedder, EmbeddingError};
use crate::config::constants::{models, urls};
use crate::llm::error_display;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Largest number of inputs sent in one request.
const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

/// Hosted embeddings through an OpenAI-compatible `/embeddings` endpoint.
pub struct OpenAIEmbedder {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAIEmbedder {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::embeddings::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::OPENAI_API_BASE.to_string(),
            model,
        }
    }

    pub fn from_config(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let mut embedder = match model {
            Some(model) => Self::with_model(api_key, model),
            None => Self::new(api_key),
        };
        if let Some(base) = base_url {
            embedder.base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = timeout {
            if let Ok(client) = HttpClient::builder().timeout(timeout).build() {
                embedder.http_client = client;
            }
        }
        embedder
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let url = format!("{}/embeddings", self.base_url);
        let body = json!({
            "model": self.model,
            "input": texts,
        });

        debug!(inputs = texts.len(), model = %self.model, "requesting embeddings");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                EmbeddingError::Network(error_display::format_llm_error(
                    "OpenAI embeddings",
                    &format!("Network error: {e}"),
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => EmbeddingError::Authentication(error_text),
                429 => EmbeddingError::RateLimit,
                _ => EmbeddingError::Provider(error_display::format_llm_error(
                    "OpenAI embeddings",
                    &format!("HTTP {status}: {error_text}"),
                )),
            });
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        order_embeddings(parsed.data, texts.len())
    }
}

/// Place each returned vector at its input position.
fn order_embeddings(
    data: Vec<EmbeddingData>,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if data.len() != expected {
        return Err(EmbeddingError::InvalidResponse(format!(
            "expected {expected} embeddings, got {}",
            data.len()
        )));
    }

    let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];
    for item in data {
        let slot = slots.get_mut(item.index).ok_or_else(|| {
            EmbeddingError::InvalidResponse(format!("embedding index {} out of range", item.index))
        })?;
        *slot = Some(item.embedding);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.ok_or_else(|| {
                EmbeddingError::InvalidResponse(format!("missing embedding for input {idx}"))
            })
        })
        .collect()
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    fn name(&self) -> &str {
        "openai"
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_BATCH_SIZE) {
            vectors.extend(self.request_batch(chunk).await?);
        }
        Ok(vectors)
    }
}
