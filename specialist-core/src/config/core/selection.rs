use crate::config::constants::{defaults, models};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where persona and prompt embeddings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local TF-IDF vectors learned from the persona descriptions
    #[default]
    Tfidf,
    /// Hosted embeddings endpoint on the configured API
    Openai,
}

impl EmbeddingBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tfidf => "tfidf",
            Self::Openai => "openai",
        }
    }
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" | "local" => Ok(Self::Tfidf),
            "openai" | "remote" => Ok(Self::Openai),
            other => Err(format!(
                "unknown embedding backend '{other}' (expected 'tfidf' or 'openai')"
            )),
        }
    }
}

/// Agent selection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub backend: EmbeddingBackend,

    /// Embedding model for the hosted backend
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Number of candidate agents offered for a prompt
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Candidates scoring below this cosine similarity are dropped
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            embedding_model: default_embedding_model(),
            top_n: default_top_n(),
            min_similarity: default_min_similarity(),
        }
    }
}

fn default_embedding_model() -> String {
    models::embeddings::DEFAULT_MODEL.to_string()
}
fn default_top_n() -> usize {
    defaults::DEFAULT_TOP_N
}
fn default_min_similarity() -> f32 {
    defaults::DEFAULT_MIN_SIMILARITY
}
