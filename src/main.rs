//! Specialist - route an opening prompt to the best specialist persona and
//! chat with it in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use specialist_core::ConfigManager;
use specialist_core::config::api_keys;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{ChatOptions, Cli, Commands};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level);
    api_keys::load_dotenv()?;

    let workspace = match args.workspace.clone() {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current dir")?,
    };

    let command = args.command.unwrap_or_default();
    if let Commands::Init { force } = command {
        return cli::handle_init_command(&workspace, force);
    }

    let mut manager = match &args.config {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load_from_workspace(&workspace)?,
    };
    if let Some(path) = manager.config_path() {
        debug!(path = %path.display(), "using configuration file");
    }
    if let Some(model) = args.model {
        manager.config_mut().agent.default_model = model;
    }
    let config = manager.into_config();

    match command {
        Commands::Chat {
            prompt,
            agent,
            resume,
        } => {
            let options = ChatOptions {
                prompt,
                agent,
                resume,
            };
            cli::handle_chat_command(&config, options).await
        }
        Commands::Ask { agent, prompt } => {
            cli::handle_ask_command(&config, agent.as_deref(), &prompt.join(" ")).await
        }
        Commands::Agents { query, top } => {
            cli::handle_agents_command(&config, query.as_deref(), top).await
        }
        Commands::History { clear } => cli::handle_history_command(&config, clear),
        Commands::Init { force } => cli::handle_init_command(&workspace, force),
    }
}
