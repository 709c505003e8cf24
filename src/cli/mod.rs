//! Command-line interface module
//!
//! Argument parsing lives in [`args`]; every subcommand has its own handler
//! module. The helpers below are shared by the handlers that talk to the
//! model or route prompts.

pub mod agents;
pub mod args;
pub mod ask;
pub mod chat;
pub mod history;
pub mod init;

pub use agents::handle_agents_command;
pub use args::*;
pub use ask::handle_ask_command;
pub use chat::{ChatOptions, handle_chat_command};
pub use history::handle_history_command;
pub use init::handle_init_command;

use anyhow::{Context, Result};
use specialist_core::config::api_keys;
use specialist_core::llm::{LLMProvider, LLMRequest, create_provider};
use specialist_core::ui::{Spinner, StreamedReply, TerminalStreamer};
use specialist_core::{AgentSelector, HistoryStore, PersonaCatalog, SpecialistConfig, create_embedder};
use tracing::{debug, warn};

/// Embed the persona catalog with the configured backend.
pub(crate) async fn build_selector(
    config: &SpecialistConfig,
    api_key: Option<String>,
) -> Result<AgentSelector> {
    let spinner = Spinner::new("Preparing specialist agents...");
    let embedder = create_embedder(&config.selection, &config.agent, api_key)
        .context("failed to create the embedding backend")?;
    let selector = match AgentSelector::new(PersonaCatalog::builtin(), embedder).await {
        Ok(selector) => selector,
        Err(err) => {
            spinner.finish_with_error("Could not prepare the specialist agents");
            return Err(err).context("failed to embed the persona catalog");
        }
    };
    spinner.finish_and_clear();

    Ok(selector.with_min_similarity(config.selection.min_similarity))
}

/// API key and provider for chat completions.
pub(crate) fn build_provider(config: &SpecialistConfig) -> Result<(String, Box<dyn LLMProvider>)> {
    let api_key = api_keys::get_api_key(&config.agent)?;
    let provider = create_provider(&config.agent, api_key.clone())
        .context("failed to initialize the completion provider")?;
    let model = config.agent.default_model.as_str();
    if !provider.supported_models().iter().any(|known| known == model) {
        warn!(
            model,
            provider = provider.name(),
            "model is not in the known model list; sending it as-is"
        );
    }
    debug!(provider = provider.name(), model, "provider ready");
    Ok((api_key, provider))
}

/// History store when persistence is enabled.
pub(crate) fn history_store(config: &SpecialistConfig) -> Result<Option<HistoryStore>> {
    if !config.history.enabled {
        return Ok(None);
    }
    HistoryStore::from_config(config.history.path.as_deref()).map(Some)
}

/// Send `request` and stream the reply to stdout behind `prefix`.
pub(crate) async fn stream_reply(
    provider: &dyn LLMProvider,
    request: LLMRequest,
    config: &SpecialistConfig,
    prefix: &str,
) -> Result<StreamedReply> {
    let spinner = Spinner::new("Thinking...");
    let stream = match provider.stream(request).await {
        Ok(stream) => stream,
        Err(err) => {
            spinner.finish_and_clear();
            return Err(err.into());
        }
    };

    let streamer =
        TerminalStreamer::new(Some(config.ui.stream_cursor.clone())).with_prefix(prefix);
    Ok(streamer.stream_response(stream, Some(spinner)).await)
}

/// Completion request with the configured sampling options applied.
pub(crate) fn apply_sampling(mut request: LLMRequest, config: &SpecialistConfig) -> LLMRequest {
    request.temperature = config.agent.temperature;
    request.max_tokens = config.agent.max_tokens;
    request
}
