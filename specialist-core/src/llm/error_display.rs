//! LLM error display utilities
//!
//! Errors surfaced by providers carry the provider name so that a failing
//! embeddings call and a failing completion call read differently.

use console::style;

/// Get a styled error message
pub fn style_llm_error(message: &str) -> String {
    style(message).red().to_string()
}

/// Get a styled warning message
pub fn style_llm_warning(message: &str) -> String {
    style(message).yellow().to_string()
}

/// Get a styled provider name
pub fn style_provider_name(provider: &str) -> String {
    let lowered = provider.to_lowercase();
    if lowered.starts_with("openai") {
        style(provider).yellow().bold().to_string()
    } else {
        style(provider).cyan().to_string()
    }
}

/// Format an LLM error for display
pub fn format_llm_error(provider: &str, error: &str) -> String {
    format!(
        "{} {}",
        style_provider_name(provider),
        style_llm_error(error)
    )
}

/// Format an LLM warning for display
pub fn format_llm_warning(provider: &str, warning: &str) -> String {
    format!(
        "{} {}",
        style_provider_name(provider),
        style_llm_warning(warning)
    )
}
