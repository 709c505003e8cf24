//! Interactive questions asked while routing

use crate::config::constants::messages;
use crate::selection::AgentMatch;
use anyhow::Result;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;

/// Menu label for a suggested agent.
pub fn format_choice(candidate: &AgentMatch, show_score: bool) -> String {
    if show_score {
        format!("{} ({:.3})", candidate.name, candidate.score)
    } else {
        candidate.name.to_string()
    }
}

/// Let the user pick one of several suggested agents.
///
/// The best match is preselected; `None` means the menu was dismissed.
pub fn select_agent(candidates: &[AgentMatch], show_scores: bool) -> Result<Option<&'static str>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    let items: Vec<String> = candidates
        .iter()
        .map(|candidate| format_choice(candidate, show_scores))
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(messages::MULTIPLE_AGENTS)
        .default(0)
        .items(&items)
        .interact_opt()?;

    Ok(selection.and_then(|index| candidates.get(index).map(|candidate| candidate.name)))
}
