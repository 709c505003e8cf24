//! Provider abstraction for chat completions
//!
//! A request is a system prompt (the persona instruction) plus the
//! conversation turns. Providers either return a whole [`LLMResponse`] or a
//! stream of [`LLMStreamEvent`]s that ends with exactly one
//! [`LLMStreamEvent::Completed`].

use crate::config::constants::message_roles;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Universal LLM request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub stream: bool,
}

impl LLMRequest {
    /// Streaming request with no sampling overrides.
    pub fn new(model: impl Into<String>, system_prompt: Option<String>, messages: Vec<Message>) -> Self {
        Self {
            messages,
            system_prompt,
            model: model.into(),
            max_tokens: None,
            temperature: None,
            stream: true,
        }
    }
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: String) -> Self {
        Self {
            role: MessageRole::User,
            content,
        }
    }

    pub fn assistant(content: String) -> Self {
        Self {
            role: MessageRole::Assistant,
            content,
        }
    }

    pub fn system(content: String) -> Self {
        Self {
            role: MessageRole::System,
            content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Role string on the OpenAI wire format
    pub fn as_openai_str(&self) -> &'static str {
        match self {
            MessageRole::System => message_roles::SYSTEM,
            MessageRole::User => message_roles::USER,
            MessageRole::Assistant => message_roles::ASSISTANT,
        }
    }
}

/// Universal LLM response
#[derive(Debug, Clone, Default)]
pub struct LLMResponse {
    pub content: Option<String>,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

impl LLMResponse {
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FinishReason {
    #[default]
    Stop,
    Length,
    ContentFilter,
    Error(String),
}

impl FinishReason {
    pub fn from_openai(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            other => FinishReason::Error(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum LLMStreamEvent {
    Token { delta: String },
    Completed { response: LLMResponse },
}

pub type LLMStream = Pin<Box<dyn Stream<Item = Result<LLMStreamEvent, LLMError>> + Send>>;

/// Universal LLM provider trait
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Whether `stream` delivers incremental tokens
    fn supports_streaming(&self) -> bool {
        false
    }

    /// Generate completion
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    /// Stream completion; the default wraps `generate` in a single-token stream.
    async fn stream(&self, request: LLMRequest) -> Result<LLMStream, LLMError> {
        let response = self.generate(request).await?;
        let events = vec![
            Ok(LLMStreamEvent::Token {
                delta: response.text().to_string(),
            }),
            Ok(LLMStreamEvent::Completed { response }),
        ];
        Ok(Box::pin(futures::stream::iter(events)))
    }

    /// Get supported models
    fn supported_models(&self) -> Vec<String>;

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    struct EchoProvider;

    #[async_trait]
    impl LLMProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
            let content = request
                .messages
                .last()
                .map(|message| message.content.clone());
            Ok(LLMResponse {
                content,
                ..LLMResponse::default()
            })
        }

        fn supported_models(&self) -> Vec<String> {
            vec!["echo".to_string()]
        }

        fn validate_request(&self, _request: &LLMRequest) -> Result<(), LLMError> {
            Ok(())
        }
    }

    #[test]
    fn roles_serialize_lowercase() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&Message::assistant("hi".to_string()))?;
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        let parsed: Message = serde_json::from_str(r#"{"role":"user","content":"x"}"#)?;
        assert_eq!(parsed.role, MessageRole::User);
        Ok(())
    }

    #[test]
    fn finish_reasons_map_from_wire() {
        assert_eq!(FinishReason::from_openai("stop"), FinishReason::Stop);
        assert_eq!(FinishReason::from_openai("length"), FinishReason::Length);
        assert_eq!(
            FinishReason::from_openai("tool_calls"),
            FinishReason::Error("tool_calls".to_string())
        );
    }

    #[tokio::test]
    async fn default_stream_wraps_generate() -> Result<(), LLMError> {
        let request = LLMRequest::new("echo", None, vec![Message::user("ping".to_string())]);
        let mut stream = EchoProvider.stream(request).await?;

        let mut tokens = String::new();
        let mut completed = None;
        while let Some(event) = stream.next().await {
            match event? {
                LLMStreamEvent::Token { delta } => tokens.push_str(&delta),
                LLMStreamEvent::Completed { response } => completed = Some(response),
            }
        }
        assert_eq!(tokens, "ping");
        assert_eq!(completed.map(|r| r.text().to_string()), Some("ping".to_string()));
        Ok(())
    }
}
