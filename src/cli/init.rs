use anyhow::{Context, Result};
use console::style;
use specialist_core::SpecialistConfig;
use specialist_core::config::constants::paths;
use std::path::Path;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool) -> Result<()> {
    println!("{}", style("Initialize specialist configuration").blue().bold());
    println!("Workspace: {}", workspace.display());

    let created = SpecialistConfig::bootstrap_project(workspace, force)
        .with_context(|| "failed to initialize configuration files")?;

    if created.is_empty() {
        println!(
            "{} already exists; use --force to overwrite it",
            paths::CONFIG_FILE_NAME
        );
    } else {
        for file in created {
            println!("{} {}", style("Created").green(), file);
        }
    }
    Ok(())
}
