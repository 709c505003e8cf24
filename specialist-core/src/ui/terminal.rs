//! Terminal utilities and helpers

use is_terminal::IsTerminal;
use std::io::Write;

/// Get the terminal width, fallback to 80 if unable to determine
pub fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(80)
}

/// Flush stdout to ensure output is displayed immediately
pub fn flush_stdout() {
    std::io::stdout().flush().ok();
}

/// Read one trimmed line from stdin; `None` once stdin is closed.
pub fn read_line() -> std::io::Result<Option<String>> {
    let mut buffer = String::new();
    let read = std::io::stdin().read_line(&mut buffer)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

/// Check if output is being piped (not a terminal)
pub fn is_piped_output() -> bool {
    !std::io::stdout().is_terminal()
}

/// Check if input is being piped (not a terminal)
pub fn is_piped_input() -> bool {
    !std::io::stdin().is_terminal()
}

/// Whether interactive widgets (selection menus) can be shown.
pub fn is_interactive() -> bool {
    !is_piped_input() && std::io::stderr().is_terminal()
}
