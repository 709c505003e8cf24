//! # specialist-core
//!
//! Building blocks of the `specialist` chat front-end: a catalog of
//! specialist personas, prompt routing by embedding similarity, streaming
//! chat completions and persisted chat history.
//!
//! ## Architecture Overview
//!
//! - `personas/`: the built-in persona table.
//! - `keyphrase`: reduces prompts to their key terms before embedding.
//! - `embeddings/`: the [`Embedder`] trait with local TF-IDF and hosted
//!   OpenAI backends.
//! - `selection/`: ranks personas against a prompt.
//! - `llm/`: chat completion providers and streaming.
//! - `session/`: conversation state, from opening prompt to chat turns.
//! - `history`: JSON chat history on disk.
//! - `config/`: `specialist.toml` loading and API key resolution.
//! - `ui/`: terminal output helpers.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use specialist_core::{
//!     AgentSelector, ChatHistory, ChatSession, Outcome, PersonaCatalog, TfIdfEmbedder,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let selector =
//!     AgentSelector::new(PersonaCatalog::builtin(), Box::new(TfIdfEmbedder::new())).await?;
//! let mut session = ChatSession::new(ChatHistory::default());
//!
//! match session.save_prompt(&selector, "My 3D prints keep warping", 3).await? {
//!     Outcome::Selected(agent) => println!("routed to {}", agent.name),
//!     Outcome::NeedsChoice(candidates) => {
//!         session.choose_agent(candidates[0].name, false)?;
//!     }
//!     Outcome::NoMatch => println!("please elaborate"),
//! }
//!
//! let request = session.build_request("Which bed temperature for PETG?", "gpt-3.5-turbo", false)?;
//! assert!(request.system_prompt.is_some());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod embeddings;
pub mod history;
pub mod keyphrase;
pub mod llm;
pub mod personas;
pub mod selection;
pub mod session;
pub mod ui;

pub use config::{ConfigManager, SpecialistConfig};
pub use embeddings::{Embedder, EmbeddingError, OpenAIEmbedder, TfIdfEmbedder, create_embedder};
pub use history::{ChatHistory, HistoryStore};
pub use llm::{LLMError, LLMProvider, LLMRequest, LLMStreamEvent, Message, MessageRole};
pub use personas::{Persona, PersonaCatalog};
pub use selection::{AgentMatch, AgentSelector, SelectionError, Suggestion};
pub use session::{ChatSession, Outcome, SessionError};
