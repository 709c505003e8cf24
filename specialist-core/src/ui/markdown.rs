//! Markdown rendering for finished assistant replies

use super::terminal;
use termimad::MadSkin;

/// Render `text` for the terminal.
///
/// Piped output gets the raw markdown back so that redirected transcripts
/// stay readable.
pub fn render_markdown(text: &str) -> String {
    if terminal::is_piped_output() {
        return text.to_string();
    }
    render_with_width(text, terminal::get_terminal_width())
}

/// Render with the default skin at a fixed width.
pub fn render_with_width(text: &str, width: usize) -> String {
    let skin = MadSkin::default();
    skin.text(text, Some(width.max(20))).to_string()
}
