use serde::{Deserialize, Serialize};

/// What goes into each completion request besides the persona instruction
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContextConfig {
    /// Send earlier turns of the conversation along with the new prompt
    #[serde(default)]
    pub include_history: bool,
}
