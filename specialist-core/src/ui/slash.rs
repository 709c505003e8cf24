use once_cell::sync::Lazy;

/// Metadata describing a slash command supported by the chat interface.
#[derive(Clone, Copy, Debug)]
pub struct SlashCommandInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Collection of slash command definitions in the order they should be displayed.
pub static SLASH_COMMANDS: Lazy<Vec<SlashCommandInfo>> = Lazy::new(|| {
    vec![
        SlashCommandInfo {
            name: "prompt",
            description: "Save a new opening prompt and route it (usage: /prompt <text>)",
        },
        SlashCommandInfo {
            name: "agent",
            description: "Show the active agent, or switch to one (usage: /agent [name])",
        },
        SlashCommandInfo {
            name: "agents",
            description: "List every specialist agent",
        },
        SlashCommandInfo {
            name: "new",
            description: "Start a new conversation",
        },
        SlashCommandInfo {
            name: "history",
            description: "Print the conversation so far",
        },
        SlashCommandInfo {
            name: "help",
            description: "Show slash command help",
        },
        SlashCommandInfo {
            name: "exit",
            description: "Exit the session",
        },
    ]
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Prompt(String),
    Agent(Option<String>),
    Agents,
    New,
    History,
    Help,
    Exit,
}

/// Parse a line of chat input.
///
/// Returns `None` when the line is not a slash command, and `Some(Err(..))`
/// with a message for unknown commands or missing arguments.
pub fn parse(input: &str) -> Option<Result<SlashCommand, String>> {
    let rest = input.trim().strip_prefix('/')?;
    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "prompt" if argument.is_empty() => Err("usage: /prompt <text>".to_string()),
        "prompt" => Ok(SlashCommand::Prompt(argument.to_string())),
        "agent" if argument.is_empty() => Ok(SlashCommand::Agent(None)),
        "agent" => Ok(SlashCommand::Agent(Some(argument.to_string()))),
        "agents" => Ok(SlashCommand::Agents),
        "new" | "clear" => Ok(SlashCommand::New),
        "history" => Ok(SlashCommand::History),
        "help" | "?" => Ok(SlashCommand::Help),
        "exit" | "quit" => Ok(SlashCommand::Exit),
        other => {
            let known: Vec<String> = suggestions_for(other)
                .iter()
                .map(|info| format!("/{}", info.name))
                .collect();
            Err(format!(
                "unknown command '/{other}'. Try: {}",
                known.join(", ")
            ))
        }
    };
    Some(command)
}

/// Returns slash command metadata that match the provided prefix (case insensitive).
pub fn suggestions_for(prefix: &str) -> Vec<&'static SlashCommandInfo> {
    if prefix.is_empty() {
        return SLASH_COMMANDS.iter().collect();
    }
    let query = prefix.to_ascii_lowercase();
    let mut matches: Vec<&SlashCommandInfo> = SLASH_COMMANDS
        .iter()
        .filter(|info| info.name.starts_with(&query))
        .collect();
    if matches.is_empty() {
        SLASH_COMMANDS.iter().collect()
    } else {
        matches.sort_by(|a, b| a.name.cmp(b.name));
        matches
    }
}
