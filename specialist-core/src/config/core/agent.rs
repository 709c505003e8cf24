use crate::config::constants::{defaults, urls};
use serde::{Deserialize, Serialize};

/// Completion backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Completion provider (openai or any OpenAI-compatible endpoint)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model used for chat completions
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API key stored in the config file; the environment always wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the chat completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature forwarded to the API when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Completion token limit forwarded to the API when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_model: default_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
            base_url: default_base_url(),
            temperature: None,
            max_tokens: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_provider() -> String {
    defaults::DEFAULT_PROVIDER.to_string()
}
fn default_model() -> String {
    defaults::DEFAULT_MODEL.to_string()
}
fn default_api_key_env() -> String {
    defaults::DEFAULT_API_KEY_ENV.to_string()
}
fn default_base_url() -> String {
    urls::OPENAI_API_BASE.to_string()
}
fn default_request_timeout() -> u64 {
    defaults::DEFAULT_REQUEST_TIMEOUT_SECS
}
