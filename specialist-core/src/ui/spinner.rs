//! Loading spinner utilities for terminal UI using indicatif crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// A wrapper around indicatif's ProgressBar for easy spinner management
///
/// The bar draws to stderr and stays hidden when stderr is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.tick();

        Self { pb }
    }

    /// Update the spinner message
    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finish the spinner with a success message
    pub fn finish_with_message(&self, message: &str) {
        self.pb.finish_with_message(message.to_string());
    }

    /// Finish the spinner and clear the line
    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    /// Finish the spinner with an error message
    pub fn finish_with_error(&self, message: &str) {
        self.pb.abandon_with_message(format!("✦ {message}"));
    }

    pub fn is_finished(&self) -> bool {
        self.pb.is_finished()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

/// Start a spinner for a long-running step
pub fn start_loading_spinner(message: &str) -> Spinner {
    Spinner::new(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_finishes_cleanly() {
        let spinner = start_loading_spinner("Embedding personas");
        spinner.set_message("Almost there");
        assert!(!spinner.is_finished());
        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }

    #[test]
    fn failed_spinner_is_finished() {
        let spinner = Spinner::new("Preparing specialist agents...");
        spinner.finish_with_error("Could not prepare the specialist agents");
        assert!(spinner.is_finished());
    }

    #[test]
    fn dropping_clears_the_spinner() {
        let spinner = Spinner::new("Waiting for the model");
        drop(spinner);
    }
}
