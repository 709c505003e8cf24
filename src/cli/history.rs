use super::history_store;
use anyhow::Result;
use console::style;
use specialist_core::SpecialistConfig;
use specialist_core::ui;

/// Handle the history command - print or clear the stored conversation
pub fn handle_history_command(config: &SpecialistConfig, clear: bool) -> Result<()> {
    let Some(store) = history_store(config)? else {
        println!("{}", style("History is disabled (history.enabled = false)").yellow());
        return Ok(());
    };

    if clear {
        store.clear()?;
        println!(
            "{} {}",
            style("Cleared").green(),
            store.path().display()
        );
        return Ok(());
    }

    let history = store.load()?;
    if history.is_empty() {
        println!("{}", style("No stored conversation").dim());
        return Ok(());
    }

    if let Some(agent) = history.agent.as_deref() {
        println!("{} {}", style("Agent:").green().bold(), agent);
    }
    if let Some(updated_at) = history.updated_at {
        println!(
            "{}",
            style(format!("Last updated {}", updated_at.format("%Y-%m-%d %H:%M UTC"))).dim()
        );
    }
    ui::print_transcript(&history.messages, config.ui.render_markdown);
    Ok(())
}
