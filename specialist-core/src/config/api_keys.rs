//! API key retrieval from the environment, `.env` files, and configuration.
//!
//! Environment variables always win over values stored in `specialist.toml`
//! so that keys do not have to live in files checked into a workspace.

use crate::config::core::AgentConfig;
use anyhow::{Result, anyhow};
use std::env;
use tracing::{debug, warn};

/// Load environment variables from a `.env` file in the current directory
/// or any of its parents. A missing file is not an error.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment variables");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            warn!("failed to load .env file: {e}");
            Ok(())
        }
    }
}

/// Resolve a key from `env_var`, falling back to `config_value`.
pub fn get_api_key_with_fallback(env_var: &str, config_value: Option<&str>) -> Result<String> {
    if let Ok(key) = env::var(env_var) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }

    if let Some(key) = config_value {
        if !key.trim().is_empty() {
            return Ok(key.to_string());
        }
    }

    Err(anyhow!(
        "No API key found. Set the {env_var} environment variable (or add it to a .env file) or set agent.api_key in specialist.toml"
    ))
}

/// API key for the configured completion provider.
pub fn get_api_key(agent: &AgentConfig) -> Result<String> {
    get_api_key_with_fallback(&agent.api_key_env, agent.api_key.as_deref())
}
