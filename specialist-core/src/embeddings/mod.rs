//! Text embeddings for agent routing
//!
//! Persona descriptions and routing prompts are mapped into a shared vector
//! space by an [`Embedder`]. Two backends exist:
//!
//! - [`TfIdfEmbedder`]: local, offline vectors learned from the persona
//!   descriptions themselves. No network, no key, deterministic.
//! - [`OpenAIEmbedder`]: dense vectors from a hosted `/embeddings` endpoint.
//!
//! Similarity between vectors is always plain cosine similarity.

pub mod openai;
pub mod tfidf;

pub use openai::OpenAIEmbedder;
pub use tfidf::TfIdfEmbedder;

use crate::config::constants::models;
use crate::config::core::{AgentConfig, EmbeddingBackend, SelectionConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),
    #[error("Embedder '{0}' has not been prepared with a corpus")]
    NotPrepared(String),
}

/// Maps text to fixed-size vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Backend name for logs and listings
    fn name(&self) -> &str;

    /// Learn from the corpus that queries will be compared against.
    ///
    /// Called once with the persona descriptions before any other call.
    /// Backends with a fixed vector space ignore it.
    async fn prepare(&mut self, _corpus: &[String]) -> Result<(), EmbeddingError> {
        Ok(())
    }

    /// Embed many texts; output order matches input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed one text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("empty embedding batch".to_string()))
    }
}

/// Compute the cosine similarity between two vectors.
///
/// Returns 0.0 for vectors of different length, empty vectors, and vectors
/// with zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}

/// Build the embedder selected in the configuration.
///
/// The hosted backend shares the completion API's base URL and key.
pub fn create_embedder(
    selection: &SelectionConfig,
    agent: &AgentConfig,
    api_key: Option<String>,
) -> Result<Box<dyn Embedder>, EmbeddingError> {
    match selection.backend {
        EmbeddingBackend::Tfidf => Ok(Box::new(TfIdfEmbedder::new())),
        EmbeddingBackend::Openai => {
            let api_key = api_key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
                EmbeddingError::Authentication(format!(
                    "the openai embedding backend needs an API key (set {})",
                    agent.api_key_env
                ))
            })?;
            let model = selection.embedding_model.as_str();
            if !models::embeddings::SUPPORTED_MODELS.contains(&model) {
                warn!(model, "unknown embedding model; sending it as-is");
            }
            Ok(Box::new(OpenAIEmbedder::from_config(
                api_key,
                Some(selection.embedding_model.clone()),
                Some(agent.base_url.clone()),
                Some(Duration::from_secs(agent.request_timeout_seconds)),
            )))
        }
    }
}
