//! # LLM Integration Layer
//!
//! Chat completions against an OpenAI-compatible API. Persona instructions
//! travel as the system prompt; replies are normally consumed as an
//! [`LLMStream`] so the terminal can show text while it arrives.
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use specialist_core::config::AgentConfig;
//! use specialist_core::llm::{LLMRequest, LLMStreamEvent, Message, create_provider};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let agent = AgentConfig::default();
//! let provider = create_provider(&agent, std::env::var("OPENAI_API_KEY")?)?;
//! let request = LLMRequest::new(
//!     agent.default_model.clone(),
//!     Some("Only discuss database design.".to_string()),
//!     vec![Message::user("When should I denormalize?".to_string())],
//! );
//!
//! let mut stream = provider.stream(request).await?;
//! while let Some(event) = stream.next().await {
//!     if let LLMStreamEvent::Token { delta } = event? {
//!         print!("{delta}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error_display;
pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::{LLMFactory, ProviderConfig, create_provider};
pub use provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, LLMStream, LLMStreamEvent,
    Message, MessageRole, Usage,
};
pub use providers::OpenAIProvider;
