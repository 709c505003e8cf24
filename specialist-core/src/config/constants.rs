/// Model ID constants
pub mod models {
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
        pub const SUPPORTED_MODELS: &[&str] = &[
            "gpt-3.5-turbo",
            "gpt-4o",
            "gpt-4o-mini",
            "gpt-4.1",
            "gpt-4.1-mini",
            "gpt-5",
            "gpt-5-mini",
        ];
    }

    /// Embedding models used by the hosted selection backend
    pub mod embeddings {
        pub const DEFAULT_MODEL: &str = "text-embedding-3-small";
        pub const SUPPORTED_MODELS: &[&str] = &[
            "text-embedding-3-small",
            "text-embedding-3-large",
            "text-embedding-ada-002",
        ];
    }
}

/// Default configuration values
pub mod defaults {
    use super::models;

    pub const DEFAULT_PROVIDER: &str = "openai";
    pub const DEFAULT_MODEL: &str = models::openai::DEFAULT_MODEL;
    pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
    pub const DEFAULT_TOP_N: usize = 3;
    pub const DEFAULT_MIN_SIMILARITY: f32 = 0.0;
    pub const DEFAULT_EMBEDDING_BACKEND: &str = "tfidf";
    pub const DEFAULT_GREETING: &str = "How can I assist you today?";
    pub const DEFAULT_STREAM_CURSOR: &str = "|";
}

/// Files and directories owned by the application
pub mod paths {
    pub const CONFIG_FILE_NAME: &str = "specialist.toml";
    pub const DOT_DIR_NAME: &str = ".specialist";
    pub const HISTORY_FILE_NAME: &str = "chat_history.json";
    pub const HISTORY_FILE_ENV: &str = "SPECIALIST_HISTORY_FILE";
}

/// Avatars shown in front of transcript lines
pub mod avatars {
    pub const USER: &str = "👤";
    pub const ASSISTANT: &str = "🤖";
}

/// User-facing routing messages
pub mod messages {
    pub const EMPTY_PROMPT: &str = "Please enter a valid prompt before saving.";
    pub const NO_AGENT_FOUND: &str = "No suitable agent found. Please elaborate on your prompt.";
    pub const MULTIPLE_AGENTS: &str = "Multiple agents found. Please select the agent:";
    pub const NOT_READY: &str =
        "Please enter an opening prompt and save it to start the chat.";
}

/// Message role constants to avoid hardcoding strings
pub mod message_roles {
    pub const SYSTEM: &str = "system";
    pub const USER: &str = "user";
    pub const ASSISTANT: &str = "assistant";
}

/// URL constants for API endpoints
pub mod urls {
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
}
