use super::{apply_sampling, build_provider, build_selector, stream_reply};
use anyhow::{Context, Result, anyhow, bail};
use console::style;
use specialist_core::config::constants::{avatars, messages};
use specialist_core::{ChatHistory, ChatSession, Outcome, SpecialistConfig};

/// Handle the ask command - route one prompt and stream a single answer
pub async fn handle_ask_command(
    config: &SpecialistConfig,
    agent: Option<&str>,
    prompt: &str,
) -> Result<()> {
    if prompt.trim().is_empty() {
        bail!("No prompt provided. Use: specialist ask \"Your question here\"");
    }

    let (api_key, provider) = build_provider(config)?;
    let mut session = ChatSession::new(ChatHistory::default());

    match agent {
        Some(name) => {
            session
                .choose_agent(name, true)
                .with_context(|| format!("cannot ask '{name}'"))?;
        }
        None => {
            let selector = build_selector(config, Some(api_key)).await?;
            match session.save_prompt(&selector, prompt, 1).await? {
                Outcome::NoMatch => bail!(messages::NO_AGENT_FOUND),
                Outcome::Selected(_) => {}
                Outcome::NeedsChoice(candidates) => {
                    let best = candidates
                        .first()
                        .ok_or_else(|| anyhow!(messages::NO_AGENT_FOUND))?;
                    session.choose_agent(best.name, false)?;
                }
            }
        }
    }

    let persona = session
        .selected_agent()
        .ok_or_else(|| anyhow!(messages::NOT_READY))?;
    eprintln!("{} {}", style("Agent:").green().bold(), style(persona.name).green());

    let request = session.build_request(prompt, &config.agent.default_model, false)?;
    let request = apply_sampling(request, config);
    let prefix = format!("{} ", avatars::ASSISTANT);
    let reply = stream_reply(provider.as_ref(), request, config, &prefix).await?;

    reply
        .into_result()
        .map(|_| ())
        .map_err(|(_, err)| anyhow!(err).context("the answer was cut short"))
}
