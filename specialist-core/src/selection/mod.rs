//! Agent selection
//!
//! Persona instructions are embedded once when the selector is built. A
//! routing prompt is reduced to its key terms, embedded into the same space
//! and compared to every persona by cosine similarity. Results are ordered
//! by score; equal scores keep catalog order.

use crate::config::constants::{defaults, messages};
use crate::embeddings::{Embedder, EmbeddingError, cosine_similarity};
use crate::keyphrase;
use crate::personas::{Persona, PersonaCatalog};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("{}", messages::EMPTY_PROMPT)]
    EmptyPrompt,
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error("embedder returned {got} persona vectors for {expected} personas")]
    CorpusMismatch { expected: usize, got: usize },
}

/// A persona scored against a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentMatch {
    pub name: &'static str,
    pub score: f32,
}

/// How many agents a prompt matched, and what the caller should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// Nothing matched; ask the user to elaborate.
    None,
    /// Exactly one agent; select it directly.
    Single(AgentMatch),
    /// Several agents; the user picks one.
    Multiple(Vec<AgentMatch>),
}

impl Suggestion {
    pub fn from_matches(mut matches: Vec<AgentMatch>) -> Self {
        match matches.len() {
            0 => Suggestion::None,
            1 => match matches.pop() {
                Some(only) => Suggestion::Single(only),
                None => Suggestion::None,
            },
            _ => Suggestion::Multiple(matches),
        }
    }

    pub fn matches(&self) -> Vec<AgentMatch> {
        match self {
            Suggestion::None => Vec::new(),
            Suggestion::Single(only) => vec![only.clone()],
            Suggestion::Multiple(many) => many.clone(),
        }
    }
}

/// Routes prompts to personas.
pub struct AgentSelector {
    catalog: PersonaCatalog,
    embedder: Box<dyn Embedder>,
    persona_embeddings: Vec<Vec<f32>>,
    min_similarity: f32,
}

impl AgentSelector {
    /// Embed every persona instruction with `embedder`.
    pub async fn new(
        catalog: PersonaCatalog,
        mut embedder: Box<dyn Embedder>,
    ) -> Result<Self, SelectionError> {
        let corpus = catalog.instructions();
        embedder.prepare(&corpus).await?;
        let persona_embeddings = embedder.embed_batch(&corpus).await?;

        if persona_embeddings.len() != catalog.len() {
            return Err(SelectionError::CorpusMismatch {
                expected: catalog.len(),
                got: persona_embeddings.len(),
            });
        }

        info!(
            backend = embedder.name(),
            personas = catalog.len(),
            "persona embeddings ready"
        );

        Ok(Self {
            catalog,
            embedder,
            persona_embeddings,
            min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
        })
    }

    /// Drop candidates scoring below `threshold` in [`best_agents`](Self::best_agents).
    pub fn with_min_similarity(mut self, threshold: f32) -> Self {
        self.min_similarity = threshold;
        self
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    pub fn backend(&self) -> &str {
        self.embedder.name()
    }

    pub fn persona(&self, name: &str) -> Option<&'static Persona> {
        self.catalog.get(name)
    }

    /// Score every persona against `prompt`, best first.
    pub async fn rank(&self, prompt: &str) -> Result<Vec<AgentMatch>, SelectionError> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::EmptyPrompt);
        }

        let key_terms = keyphrase::extract_key_terms(trimmed);
        let query = if key_terms.is_empty() {
            trimmed
        } else {
            key_terms.as_str()
        };
        debug!(key_terms = %key_terms, "embedding routing prompt");

        let query_embedding = self.embedder.embed(query).await?;

        let mut matches: Vec<AgentMatch> = self
            .catalog
            .iter()
            .zip(&self.persona_embeddings)
            .map(|(persona, embedding)| AgentMatch {
                name: persona.name,
                score: cosine_similarity(&query_embedding, embedding),
            })
            .collect();

        // Stable sort: ties stay in catalog order.
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(matches)
    }

    /// The `top_n` best personas that reach the similarity threshold.
    pub async fn best_agents(
        &self,
        prompt: &str,
        top_n: usize,
    ) -> Result<Vec<AgentMatch>, SelectionError> {
        let ranked = self.rank(prompt).await?;
        let best: Vec<AgentMatch> = ranked
            .into_iter()
            .take(top_n)
            .filter(|candidate| candidate.score >= self.min_similarity)
            .collect();

        debug!(
            candidates = best.len(),
            top = best.first().map(|m| m.name).unwrap_or("-"),
            "ranked personas"
        );
        Ok(best)
    }

    /// [`best_agents`](Self::best_agents) classified into a [`Suggestion`].
    pub async fn suggest(&self, prompt: &str, top_n: usize) -> Result<Suggestion, SelectionError> {
        Ok(Suggestion::from_matches(self.best_agents(prompt, top_n).await?))
    }
}
