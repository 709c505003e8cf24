use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chat history persistence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// History file; defaults to ~/.specialist/chat_history.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}
