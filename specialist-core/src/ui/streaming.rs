//! Terminal streaming of completion tokens
//!
//! Tokens are written as they arrive, followed by a cursor marker that is
//! erased before the next token. The marker is only drawn on a terminal.

use super::spinner::Spinner;
use super::terminal;
use crate::llm::provider::{FinishReason, LLMError, LLMStream, LLMStreamEvent, Usage};
use console::measure_text_width;
use futures::StreamExt;
use std::io::{self, Write};
use tracing::{debug, warn};

/// What a streamed reply produced, including a failure part-way through.
#[derive(Debug, Default)]
pub struct StreamedReply {
    pub content: String,
    pub finish_reason: Option<FinishReason>,
    pub usage: Option<Usage>,
    pub error: Option<LLMError>,
}

impl StreamedReply {
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.finish_reason.is_some()
    }

    /// Split into the text and the error, if any.
    pub fn into_result(self) -> Result<String, (String, LLMError)> {
        match self.error {
            Some(error) => Err((self.content, error)),
            None => Ok(self.content),
        }
    }
}

/// Terminal streamer for displaying streaming tokens
pub struct TerminalStreamer {
    cursor: Option<String>,
    prefix: Option<String>,
}

impl Default for TerminalStreamer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TerminalStreamer {
    /// `cursor` is only drawn when stdout is a terminal.
    pub fn new(cursor: Option<String>) -> Self {
        let cursor = cursor.filter(|marker| !marker.is_empty() && !terminal::is_piped_output());
        Self {
            cursor,
            prefix: None,
        }
    }

    /// Text written once the reply starts, after the spinner is gone.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Stream to stdout, clearing `spinner` when the first token arrives.
    pub async fn stream_response(&self, stream: LLMStream, spinner: Option<Spinner>) -> StreamedReply {
        let mut stdout = io::stdout();
        self.stream_to(stream, spinner, &mut stdout).await
    }

    pub async fn stream_to<W: Write>(
        &self,
        mut stream: LLMStream,
        mut spinner: Option<Spinner>,
        out: &mut W,
    ) -> StreamedReply {
        let mut reply = StreamedReply::default();
        let mut cursor_shown = false;
        let mut started = false;

        while let Some(event) = stream.next().await {
            self.begin(out, &mut spinner, &mut started);
            match event {
                Ok(LLMStreamEvent::Token { delta }) => {
                    reply.content.push_str(&delta);

                    if let Err(err) = self.write_token(out, &delta, &mut cursor_shown) {
                        warn!("failed to write streamed token: {err}");
                    }
                }
                Ok(LLMStreamEvent::Completed { response }) => {
                    reply.finish_reason = Some(response.finish_reason);
                    reply.usage = response.usage;
                    if reply.content.is_empty() {
                        if let Some(content) = response.content {
                            out.write_all(content.as_bytes()).ok();
                            reply.content = content;
                        }
                    }
                    break;
                }
                Err(err) => {
                    reply.error = Some(err);
                    break;
                }
            }
        }

        self.begin(out, &mut spinner, &mut started);
        self.erase_cursor(out, &mut cursor_shown).ok();
        writeln!(out).ok();
        out.flush().ok();

        debug!(
            chars = reply.content.len(),
            complete = reply.is_complete(),
            "stream finished"
        );
        reply
    }

    fn begin<W: Write>(&self, out: &mut W, spinner: &mut Option<Spinner>, started: &mut bool) {
        if *started {
            return;
        }
        *started = true;
        if let Some(spinner) = spinner.take() {
            spinner.finish_and_clear();
        }
        if let Some(prefix) = &self.prefix {
            out.write_all(prefix.as_bytes()).ok();
        }
    }

    fn write_token<W: Write>(&self, out: &mut W, delta: &str, shown: &mut bool) -> io::Result<()> {
        self.erase_cursor(out, shown)?;
        out.write_all(delta.as_bytes())?;
        self.draw_cursor(out, shown)?;
        out.flush()
    }

    fn draw_cursor<W: Write>(&self, out: &mut W, shown: &mut bool) -> io::Result<()> {
        if let Some(cursor) = &self.cursor {
            out.write_all(cursor.as_bytes())?;
            *shown = true;
        }
        Ok(())
    }

    fn erase_cursor<W: Write>(&self, out: &mut W, shown: &mut bool) -> io::Result<()> {
        if let (Some(cursor), true) = (&self.cursor, *shown) {
            let width = measure_text_width(cursor);
            let back = "\u{8}".repeat(width);
            write!(out, "{back}{}{back}", " ".repeat(width))?;
            *shown = false;
        }
        Ok(())
    }
}
