use super::build_selector;
use anyhow::Result;
use console::style;
use specialist_core::config::api_keys;
use specialist_core::config::constants::messages;
use specialist_core::config::core::EmbeddingBackend;
use specialist_core::{PersonaCatalog, SpecialistConfig};

/// Handle the agents command - list the catalog or rank it against a query
pub async fn handle_agents_command(
    config: &SpecialistConfig,
    query: Option<&str>,
    top: Option<usize>,
) -> Result<()> {
    let Some(query) = query else {
        let catalog = PersonaCatalog::builtin();
        println!(
            "{}",
            style(format!("{} specialist agents", catalog.len())).blue().bold()
        );
        for persona in catalog.iter() {
            println!("  {}", persona.name);
        }
        return Ok(());
    };

    let api_key = match config.selection.backend {
        EmbeddingBackend::Openai => Some(api_keys::get_api_key(&config.agent)?),
        EmbeddingBackend::Tfidf => None,
    };
    let selector = build_selector(config, api_key).await?;
    let top = top.unwrap_or(config.selection.top_n).max(1);
    let ranked = selector.best_agents(query, top).await?;

    if ranked.is_empty() {
        println!("{}", style(messages::NO_AGENT_FOUND).yellow());
        return Ok(());
    }

    println!(
        "{}",
        style(format!("Best agents ({} backend)", selector.backend()))
            .blue()
            .bold()
    );
    for (rank, candidate) in ranked.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {}",
            rank + 1,
            candidate.name,
            style(format!("{:.3}", candidate.score)).dim()
        );
    }
    Ok(())
}
