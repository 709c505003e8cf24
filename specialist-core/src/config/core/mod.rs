pub mod agent;
pub mod context;
pub mod history;
pub mod selection;
pub mod ui;

pub use agent::AgentConfig;
pub use context::ContextConfig;
pub use history::HistoryConfig;
pub use selection::{EmbeddingBackend, SelectionConfig};
pub use ui::UiConfig;
