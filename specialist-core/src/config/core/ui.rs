use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};

/// Terminal presentation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Print similarity scores next to suggested agents
    #[serde(default)]
    pub show_scores: bool,

    /// Marker drawn after the text while a reply is streaming
    #[serde(default = "default_stream_cursor")]
    pub stream_cursor: String,

    /// Render stored assistant replies as markdown
    #[serde(default = "default_render_markdown")]
    pub render_markdown: bool,

    /// Assistant greeting that opens every routed conversation
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_scores: false,
            stream_cursor: default_stream_cursor(),
            render_markdown: default_render_markdown(),
            greeting: default_greeting(),
        }
    }
}

fn default_stream_cursor() -> String {
    defaults::DEFAULT_STREAM_CURSOR.to_string()
}
fn default_render_markdown() -> bool {
    true
}
fn default_greeting() -> String {
    defaults::DEFAULT_GREETING.to_string()
}
