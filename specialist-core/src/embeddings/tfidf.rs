//! Local TF-IDF embedder
//!
//! The vocabulary is learned once from the persona corpus and then frozen.
//! Documents and queries go through the same key-term extraction, so stop
//! words never take part and inflected forms share a dimension. Query terms
//! that never occur in the corpus carry no signal and are ignored.

use super::{Embedder, EmbeddingError};
use crate::keyphrase;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
struct Vocabulary {
    token_to_idx: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vocabulary {
    fn build(corpus: &[String]) -> Self {
        let num_docs = corpus.len().max(1) as f32;
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let unique: HashSet<String> = keyphrase::key_terms(doc).into_iter().collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        // Sorted so that dimensions are stable across runs.
        let mut entries: Vec<(String, usize)> = doc_freq.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut token_to_idx = HashMap::with_capacity(entries.len());
        let mut idf = Vec::with_capacity(entries.len());
        for (idx, (token, freq)) in entries.into_iter().enumerate() {
            token_to_idx.insert(token, idx);
            // Smoothed IDF keeps terms present in every document above zero.
            idf.push(((1.0 + num_docs) / (1.0 + freq as f32)).ln() + 1.0);
        }

        Self { token_to_idx, idf }
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut weights = vec![0.0f32; self.idf.len()];
        let terms = keyphrase::key_terms(text);
        if terms.is_empty() {
            return weights;
        }

        let total = terms.len() as f32;
        for term in &terms {
            if let Some(&idx) = self.token_to_idx.get(term) {
                weights[idx] += 1.0 / total;
            }
        }

        for (weight, idf) in weights.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        let magnitude = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for weight in &mut weights {
                *weight /= magnitude;
            }
        }

        weights
    }
}

/// Offline embedder backed by a TF-IDF vocabulary.
#[derive(Debug, Clone, Default)]
pub struct TfIdfEmbedder {
    vocabulary: Option<Vocabulary>,
}

impl TfIdfEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an embedder whose vocabulary is learned from `corpus`.
    pub fn from_corpus(corpus: &[String]) -> Self {
        Self {
            vocabulary: Some(Vocabulary::build(corpus)),
        }
    }

    /// Number of dimensions, 0 before the vocabulary exists.
    pub fn dimension(&self) -> usize {
        self.vocabulary.as_ref().map_or(0, |vocab| vocab.idf.len())
    }

    pub fn is_ready(&self) -> bool {
        self.vocabulary.is_some()
    }
}

#[async_trait]
impl Embedder for TfIdfEmbedder {
    fn name(&self) -> &str {
        "tfidf"
    }

    async fn prepare(&mut self, corpus: &[String]) -> Result<(), EmbeddingError> {
        if self.vocabulary.is_none() {
            let vocabulary = Vocabulary::build(corpus);
            debug!(
                documents = corpus.len(),
                terms = vocabulary.idf.len(),
                "built tf-idf vocabulary"
            );
            self.vocabulary = Some(vocabulary);
        }
        Ok(())
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let vocabulary = self
            .vocabulary
            .as_ref()
            .ok_or_else(|| EmbeddingError::NotPrepared(self.name().to_string()))?;
        Ok(texts.iter().map(|text| vocabulary.vector(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::cosine_similarity;

    fn corpus() -> Vec<String> {
        vec![
            "Only answer questions about 3D printing materials and processes.".to_string(),
            "Only discuss database design, maintenance, and optimization.".to_string(),
            "Only answer questions about network design and protocols.".to_string(),
        ]
    }

    #[tokio::test]
    async fn embedding_before_prepare_fails() {
        let embedder = TfIdfEmbedder::new();
        let result = embedder.embed("database").await;
        assert!(matches!(result, Err(EmbeddingError::NotPrepared(_))));
    }

    #[tokio::test]
    async fn vectors_are_normalised_and_aligned() -> Result<(), EmbeddingError> {
        let mut embedder = TfIdfEmbedder::new();
        embedder.prepare(&corpus()).await?;
        assert!(embedder.is_ready());

        let vectors = embedder.embed_batch(&corpus()).await?;
        assert_eq!(vectors.len(), 3);
        for vector in &vectors {
            assert_eq!(vector.len(), embedder.dimension());
            let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
        Ok(())
    }

    #[tokio::test]
    async fn query_is_closest_to_matching_document() -> Result<(), EmbeddingError> {
        let corpus = corpus();
        let embedder = TfIdfEmbedder::from_corpus(&corpus);
        let documents = embedder.embed_batch(&corpus).await?;
        let query = embedder.embed("optimizing my databases").await?;

        let scores: Vec<f32> = documents
            .iter()
            .map(|doc| cosine_similarity(&query, doc))
            .collect();
        assert!(scores[1] > scores[0]);
        assert!(scores[1] > scores[2]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_terms_give_zero_vector() -> Result<(), EmbeddingError> {
        let embedder = TfIdfEmbedder::from_corpus(&corpus());
        let vector = embedder.embed("quantum chromodynamics").await?;
        assert!(vector.iter().all(|v| *v == 0.0));
        Ok(())
    }
}
