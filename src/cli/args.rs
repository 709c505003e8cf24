//! CLI argument parsing and configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for specialist
#[derive(Parser, Debug)]
#[command(
    name = "specialist",
    version,
    about = "Chat with the specialist persona that best matches your opening prompt"
)]
pub struct Cli {
    /// Configuration file path (defaults to specialist.toml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Chat completion model, overriding agent.default_model
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Workspace root directory; defaults to current directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat (default)
    Chat {
        /// Opening prompt used to pick the agent
        #[arg(long)]
        prompt: Option<String>,

        /// Skip routing and talk to this agent
        #[arg(long)]
        agent: Option<String>,

        /// Continue the stored conversation with its agent
        #[arg(long)]
        resume: bool,
    },

    /// Single prompt; routes it, streams one answer and leaves history alone
    Ask {
        /// Skip routing and ask this agent
        #[arg(long)]
        agent: Option<String>,

        /// The prompt to send
        prompt: Vec<String>,
    },

    /// List the specialist agents, or rank them against a query
    Agents {
        /// Rank agents against this text
        #[arg(long)]
        query: Option<String>,

        /// Number of ranked agents to show
        #[arg(long)]
        top: Option<usize>,
    },

    /// Print or clear the stored conversation
    History {
        /// Remove the stored conversation
        #[arg(long)]
        clear: bool,
    },

    /// Write a default specialist.toml into the workspace
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Chat {
            prompt: None,
            agent: None,
            resume: false,
        }
    }
}
