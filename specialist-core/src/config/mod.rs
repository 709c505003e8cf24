//! Specialist Configuration Module
//!
//! Loads `specialist.toml` and exposes the typed sections the rest of the
//! crate reads: completion backend, agent selection, request context,
//! history persistence and terminal presentation.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use core::{
    AgentConfig, ContextConfig, EmbeddingBackend, HistoryConfig, SelectionConfig, UiConfig,
};
pub use loader::{ConfigManager, SpecialistConfig};
