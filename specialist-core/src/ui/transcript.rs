//! Printing stored conversations

use super::markdown;
use crate::config::constants::avatars;
use crate::llm::provider::{Message, MessageRole};
use console::style;

pub fn avatar(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => avatars::USER,
        MessageRole::Assistant | MessageRole::System => avatars::ASSISTANT,
    }
}

/// One transcript entry: avatar, then the text. Assistant text is rendered
/// as markdown when `render_markdown` is set.
pub fn format_message(message: &Message, render_markdown: bool) -> String {
    let body = match message.role {
        MessageRole::User => style(message.content.as_str()).bold().to_string(),
        MessageRole::Assistant if render_markdown => {
            markdown::render_markdown(&message.content)
                .trim_end()
                .to_string()
        }
        _ => message.content.clone(),
    };
    format!("{} {body}", avatar(message.role))
}

/// Print every user and assistant message in order.
pub fn print_transcript(messages: &[Message], render_markdown: bool) {
    for message in messages
        .iter()
        .filter(|message| message.role != MessageRole::System)
    {
        println!("{}", format_message(message, render_markdown));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_their_avatar() {
        let user = format_message(&Message::user("Is PLA food safe?".to_string()), false);
        let bot = format_message(&Message::assistant("Mostly not.".to_string()), false);

        assert!(user.starts_with("👤 "));
        assert!(user.contains("Is PLA food safe?"));
        assert_eq!(bot, "🤖 Mostly not.");
    }

    #[test]
    fn system_role_uses_assistant_avatar() {
        assert_eq!(avatar(MessageRole::System), avatars::ASSISTANT);
    }
}
