//! Terminal presentation helpers for the chat front-end.

pub mod markdown;
pub mod prompt;
pub mod slash;
pub mod spinner;
pub mod streaming;
pub mod terminal;
pub mod transcript;

pub use markdown::render_markdown;
pub use spinner::{Spinner, start_loading_spinner};
pub use streaming::{StreamedReply, TerminalStreamer};
pub use transcript::{format_message, print_transcript};
