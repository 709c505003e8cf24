use crate::config::constants::paths;
use crate::config::core::{AgentConfig, ContextConfig, HistoryConfig, SelectionConfig, UiConfig};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure for Specialist
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpecialistConfig {
    /// Completion backend settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Agent routing settings
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Request context settings
    #[serde(default)]
    pub context: ContextConfig,

    /// History persistence
    #[serde(default)]
    pub history: HistoryConfig,

    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl SpecialistConfig {
    /// Write a default `specialist.toml` into `workspace`.
    ///
    /// Returns the names of the files that were created; an existing file is
    /// left alone unless `force` is set.
    pub fn bootstrap_project<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Vec<String>> {
        let workspace = workspace.as_ref();
        let mut created_files = Vec::new();

        let config_path = workspace.join(paths::CONFIG_FILE_NAME);
        if !config_path.exists() || force {
            Self::create_sample_config(&config_path)?;
            created_files.push(paths::CONFIG_FILE_NAME.to_string());
        }

        Ok(created_files)
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = toml::to_string_pretty(&SpecialistConfig::default())
            .context("Failed to serialize default configuration")?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }

    /// Reject values that would make routing or requests meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.selection.top_n == 0 {
            bail!("selection.top_n must be at least 1");
        }
        if !(-1.0..=1.0).contains(&self.selection.min_similarity) {
            bail!(
                "selection.min_similarity must be within [-1.0, 1.0], got {}",
                self.selection.min_similarity
            );
        }
        if self.agent.default_model.trim().is_empty() {
            bail!("agent.default_model cannot be empty");
        }
        if self.agent.base_url.trim().is_empty() {
            bail!("agent.base_url cannot be empty");
        }
        if let Some(temperature) = self.agent.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                bail!("agent.temperature must be within [0.0, 2.0], got {temperature}");
            }
        }
        Ok(())
    }
}

/// Configuration manager for loading and validating configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: SpecialistConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Get the user's home directory path
    pub(crate) fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(userprofile));
        }

        dirs::home_dir()
    }

    /// Candidate config files for a workspace, highest priority first.
    pub fn candidate_paths(workspace: &Path) -> Vec<PathBuf> {
        let mut candidates = vec![
            workspace.join(paths::CONFIG_FILE_NAME),
            workspace
                .join(paths::DOT_DIR_NAME)
                .join(paths::CONFIG_FILE_NAME),
        ];
        if let Some(home_dir) = Self::get_home_dir() {
            candidates.push(
                home_dir
                    .join(paths::DOT_DIR_NAME)
                    .join(paths::CONFIG_FILE_NAME),
            );
        }
        candidates
    }

    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        for candidate in Self::candidate_paths(workspace) {
            if candidate.exists() {
                return Self::load_from_file(&candidate);
            }
        }

        debug!(workspace = %workspace.display(), "no config file found, using defaults");
        Ok(Self {
            config: SpecialistConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SpecialistConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &SpecialistConfig {
        &self.config
    }

    /// Mutable access for command-line overrides
    pub fn config_mut(&mut self) -> &mut SpecialistConfig {
        &mut self.config
    }

    pub fn into_config(self) -> SpecialistConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
