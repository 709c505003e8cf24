//! On-disk chat history
//!
//! A single JSON document holds the visible conversation and the agent that
//! was active when it was written. Writes go to a sibling temp file first
//! and are renamed into place, so a crash never leaves half a file behind.

use crate::config::constants::paths;
use crate::config::loader::ConfigManager;
use crate::llm::provider::Message;
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChatHistory {
    pub fn new(messages: Vec<Message>, agent: Option<String>) -> Self {
        Self {
            messages,
            agent,
            updated_at: Some(Utc::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$SPECIALIST_HISTORY_FILE`, else `~/.specialist/chat_history.json`.
    pub fn default_location() -> Result<Self> {
        if let Some(custom) = env_override() {
            return Ok(Self::new(custom));
        }

        let home = ConfigManager::get_home_dir()
            .ok_or_else(|| anyhow!("could not determine the home directory for chat history"))?;
        Ok(Self::new(
            home.join(paths::DOT_DIR_NAME)
                .join(paths::HISTORY_FILE_NAME),
        ))
    }

    /// `$SPECIALIST_HISTORY_FILE` first, then the configured path, then
    /// the default location.
    pub fn from_config(path: Option<&Path>) -> Result<Self> {
        if let Some(custom) = env_override() {
            return Ok(Self::new(custom));
        }
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_location(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means no history yet.
    pub fn load(&self) -> Result<ChatHistory> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no chat history yet");
                return Ok(ChatHistory::default());
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read chat history: {}", self.path.display())
                });
            }
        };

        if data.trim().is_empty() {
            return Ok(ChatHistory::default());
        }

        let history: ChatHistory = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse chat history: {}", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            messages = history.messages.len(),
            "loaded chat history"
        );
        Ok(history)
    }

    pub fn save(&self, history: &ChatHistory) -> Result<()> {
        let payload = serde_json::to_string_pretty(history)
            .context("failed to serialize chat history")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create history directory: {}", parent.display())
                })?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, payload).with_context(|| {
            format!("failed to write chat history: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!("failed to replace chat history: {}", self.path.display())
        })?;

        debug!(
            path = %self.path.display(),
            messages = history.messages.len(),
            "saved chat history"
        );
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.save(&ChatHistory::new(Vec::new(), None))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| paths::HISTORY_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn env_override() -> Option<PathBuf> {
    env::var_os(paths::HISTORY_FILE_ENV)
        .filter(|custom| !custom.is_empty())
        .map(PathBuf::from)
}
