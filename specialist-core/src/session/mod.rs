//! Conversation state
//!
//! A session starts locked: the user has to save an opening prompt, which is
//! routed to a persona, before any completion request can be built. Saving a
//! prompt always restarts the visible conversation with the greeting.

use crate::config::constants::{defaults, messages};
use crate::history::ChatHistory;
use crate::llm::provider::{LLMRequest, Message, MessageRole};
use crate::personas::{Persona, PersonaCatalog};
use crate::selection::{AgentMatch, AgentSelector, SelectionError, Suggestion};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{}", messages::EMPTY_PROMPT)]
    EmptyPrompt,
    #[error("{}", messages::NOT_READY)]
    NotReady,
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
    #[error("'{0}' is not one of the suggested agents")]
    NotSuggested(String),
    #[error(transparent)]
    Selection(SelectionError),
}

impl From<SelectionError> for SessionError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::EmptyPrompt => SessionError::EmptyPrompt,
            other => SessionError::Selection(other),
        }
    }
}

/// Result of saving an opening prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No persona qualified; the session stays locked.
    NoMatch,
    /// Exactly one persona qualified and is now active.
    Selected(AgentMatch),
    /// The caller must pick one with [`ChatSession::choose_agent`].
    NeedsChoice(Vec<AgentMatch>),
}

impl Outcome {
    /// User-facing notice for outcomes that need one.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Outcome::NoMatch => Some(messages::NO_AGENT_FOUND),
            Outcome::NeedsChoice(_) => Some(messages::MULTIPLE_AGENTS),
            Outcome::Selected(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    catalog: PersonaCatalog,
    greeting: String,
    messages: Vec<Message>,
    selected_agent: Option<&'static Persona>,
    opening_prompt: Option<String>,
    suggestions: Vec<AgentMatch>,
    prompt_saved: bool,
    access_granted: bool,
}

impl ChatSession {
    /// Start from stored messages; routing has to happen again.
    pub fn new(history: ChatHistory) -> Self {
        Self {
            catalog: PersonaCatalog::builtin(),
            greeting: defaults::DEFAULT_GREETING.to_string(),
            messages: history.messages,
            selected_agent: None,
            opening_prompt: None,
            suggestions: Vec::new(),
            prompt_saved: false,
            access_granted: false,
        }
    }

    /// Start from stored messages and reactivate the stored agent if it
    /// still exists in the catalog.
    pub fn resume(history: ChatHistory) -> Self {
        let agent = history.agent.clone();
        let mut session = Self::new(history);
        if let Some(persona) = agent.as_deref().and_then(|name| session.catalog.get(name)) {
            info!(agent = persona.name, "resumed conversation");
            session.activate(persona);
        }
        session
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Route `prompt` and restart the conversation with the greeting.
    pub async fn save_prompt(
        &mut self,
        selector: &AgentSelector,
        prompt: &str,
        top_n: usize,
    ) -> Result<Outcome, SessionError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }

        let suggestion = selector.suggest(prompt, top_n).await?;

        self.messages = vec![Message::assistant(self.greeting.clone())];
        self.opening_prompt = Some(prompt.to_string());
        self.prompt_saved = true;
        self.selected_agent = None;
        self.access_granted = false;
        self.suggestions = suggestion.matches();

        let outcome = match suggestion {
            Suggestion::None => Outcome::NoMatch,
            Suggestion::Single(only) => {
                let persona = self
                    .catalog
                    .get(only.name)
                    .ok_or_else(|| SessionError::UnknownAgent(only.name.to_string()))?;
                self.activate(persona);
                Outcome::Selected(only)
            }
            Suggestion::Multiple(many) => Outcome::NeedsChoice(many),
        };

        debug!(
            suggestions = self.suggestions.len(),
            access = self.access_granted,
            "saved opening prompt"
        );
        Ok(outcome)
    }

    /// Pick the active persona.
    ///
    /// Without `allow_any` the name has to be among the current suggestions.
    pub fn choose_agent(
        &mut self,
        name: &str,
        allow_any: bool,
    ) -> Result<&'static Persona, SessionError> {
        let persona = self
            .catalog
            .get(name)
            .ok_or_else(|| SessionError::UnknownAgent(name.trim().to_string()))?;

        if !allow_any
            && !self
                .suggestions
                .iter()
                .any(|candidate| candidate.name == persona.name)
        {
            return Err(SessionError::NotSuggested(persona.name.to_string()));
        }

        if !self.prompt_saved {
            self.messages = vec![Message::assistant(self.greeting.clone())];
        }
        self.activate(persona);
        info!(agent = persona.name, "agent selected");
        Ok(persona)
    }

    fn activate(&mut self, persona: &'static Persona) {
        self.selected_agent = Some(persona);
        self.prompt_saved = true;
        self.access_granted = true;
    }

    /// Forget messages, routing and the active persona.
    pub fn new_conversation(&mut self) {
        self.messages.clear();
        self.selected_agent = None;
        self.opening_prompt = None;
        self.suggestions.clear();
        self.prompt_saved = false;
        self.access_granted = false;
    }

    pub fn can_chat(&self) -> bool {
        self.prompt_saved && self.access_granted && self.selected_agent.is_some()
    }

    /// Completion request for `prompt`. Call before [`record_turn`](Self::record_turn).
    ///
    /// The persona instruction is the system prompt. Earlier turns are only
    /// sent with `include_history`; the greeting is never sent.
    pub fn build_request(
        &self,
        prompt: &str,
        model: &str,
        include_history: bool,
    ) -> Result<LLMRequest, SessionError> {
        let persona = match self.selected_agent {
            Some(persona) if self.can_chat() => persona,
            _ => return Err(SessionError::NotReady),
        };
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }

        let mut turns = Vec::new();
        if include_history {
            let start = usize::from(
                self.messages.first().is_some_and(|first| {
                    first.role == MessageRole::Assistant && first.content == self.greeting
                }),
            );
            turns.extend(self.messages.iter().skip(start).cloned());
        }
        turns.push(Message::user(prompt.to_string()));

        Ok(LLMRequest::new(
            model,
            Some(persona.instruction.to_string()),
            turns,
        ))
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content.into()));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content.into()));
    }

    /// Store a finished exchange. A blank reply stores nothing, so a failed
    /// request never leaves an unanswered user turn behind.
    pub fn record_turn(&mut self, prompt: &str, reply: &str) -> bool {
        if reply.trim().is_empty() {
            return false;
        }
        self.push_user(prompt.trim());
        self.push_assistant(reply);
        true
    }

    pub fn to_history(&self) -> ChatHistory {
        ChatHistory::new(
            self.messages.clone(),
            self.selected_agent.map(|persona| persona.name.to_string()),
        )
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn selected_agent(&self) -> Option<&'static Persona> {
        self.selected_agent
    }

    pub fn suggestions(&self) -> &[AgentMatch] {
        &self.suggestions
    }

    pub fn opening_prompt(&self) -> Option<&str> {
        self.opening_prompt.as_deref()
    }

    pub fn prompt_saved(&self) -> bool {
        self.prompt_saved
    }

    pub fn access_granted(&self) -> bool {
        self.access_granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::TfIdfEmbedder;

    async fn selector(min_similarity: f32) -> Result<AgentSelector, SessionError> {
        Ok(
            AgentSelector::new(PersonaCatalog::builtin(), Box::new(TfIdfEmbedder::new()))
                .await?
                .with_min_similarity(min_similarity),
        )
    }

    fn stored() -> ChatHistory {
        ChatHistory::new(
            vec![
                Message::assistant(defaults::DEFAULT_GREETING.to_string()),
                Message::user("earlier question".to_string()),
            ],
            Some("Database Administrator".to_string()),
        )
    }

    #[test]
    fn fresh_session_is_locked() {
        let session = ChatSession::new(stored());
        assert_eq!(session.messages().len(), 2);
        assert!(!session.can_chat());
        assert!(matches!(
            session.build_request("hi", "gpt-3.5-turbo", false),
            Err(SessionError::NotReady)
        ));
    }

    #[test]
    fn resume_restores_known_agent() {
        let session = ChatSession::resume(stored());
        assert!(session.can_chat());
        assert_eq!(
            session.selected_agent().map(|p| p.name),
            Some("Database Administrator")
        );

        let mut unknown = stored();
        unknown.agent = Some("Astronaut".to_string());
        assert!(!ChatSession::resume(unknown).can_chat());
    }

    #[tokio::test]
    async fn blank_prompt_changes_nothing() -> Result<(), SessionError> {
        let selector = selector(0.0).await?;
        let mut session = ChatSession::new(stored());
        let result = session.save_prompt(&selector, "  ", 3).await;

        assert!(matches!(result, Err(SessionError::EmptyPrompt)));
        assert_eq!(session.messages().len(), 2);
        assert!(!session.prompt_saved());
        Ok(())
    }

    #[tokio::test]
    async fn several_matches_need_a_choice() -> Result<(), SessionError> {
        let selector = selector(0.0).await?;
        let mut session = ChatSession::new(stored());
        let outcome = session
            .save_prompt(&selector, "My 3D printed parts keep warping", 3)
            .await?;

        let Outcome::NeedsChoice(matches) = &outcome else {
            panic!("expected a choice, got {outcome:?}");
        };
        assert_eq!(matches.len(), 3);
        assert_eq!(outcome.notice(), Some(messages::MULTIPLE_AGENTS));
        assert_eq!(
            session.messages(),
            &[Message::assistant(defaults::DEFAULT_GREETING.to_string())]
        );
        assert!(session.prompt_saved());
        assert!(!session.can_chat());

        assert!(matches!(
            session.choose_agent("Web Developer", false),
            Err(SessionError::NotSuggested(_))
        ));
        let chosen = session.choose_agent("3d printing technician", false)?;
        assert_eq!(chosen.name, "3D Printing Technician");
        assert!(session.can_chat());
        Ok(())
    }

    #[tokio::test]
    async fn single_match_is_selected_automatically() -> Result<(), SessionError> {
        let selector = selector(0.05).await?;
        let mut session = ChatSession::new(ChatHistory::default());
        let outcome = session
            .save_prompt(&selector, "database index tuning", 1)
            .await?;

        assert!(matches!(
            outcome,
            Outcome::Selected(AgentMatch { name: "Database Administrator", .. })
        ));
        assert!(session.can_chat());
        assert_eq!(session.opening_prompt(), Some("database index tuning"));
        Ok(())
    }

    #[tokio::test]
    async fn no_match_revokes_access() -> Result<(), SessionError> {
        let selector = selector(0.05).await?;
        let mut session = ChatSession::resume(stored());
        assert!(session.can_chat());

        let outcome = session
            .save_prompt(&selector, "quantum chromodynamics", 3)
            .await?;
        assert_eq!(outcome, Outcome::NoMatch);
        assert_eq!(outcome.notice(), Some(messages::NO_AGENT_FOUND));
        assert!(session.prompt_saved());
        assert!(!session.access_granted());
        assert!(session.selected_agent().is_none());
        Ok(())
    }

    #[test]
    fn request_carries_instruction_and_prompt() -> Result<(), SessionError> {
        let mut session = ChatSession::new(ChatHistory::default());
        session.choose_agent("Web Developer", true)?;
        session.push_user("first");
        session.push_assistant("first answer");

        let request = session.build_request("second", "gpt-4o-mini", false)?;
        assert_eq!(request.model, "gpt-4o-mini");
        assert!(request.stream);
        assert!(
            request
                .system_prompt
                .as_deref()
                .is_some_and(|prompt| prompt.starts_with("You are a web development expert"))
        );
        assert_eq!(request.messages, vec![Message::user("second".to_string())]);

        let with_history = session.build_request("second", "gpt-4o-mini", true)?;
        let contents: Vec<&str> = with_history
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "first answer", "second"]);
        Ok(())
    }

    #[test]
    fn unanswered_turns_are_not_recorded() -> Result<(), SessionError> {
        let mut session = ChatSession::new(ChatHistory::default());
        session.choose_agent("Doctor", true)?;
        assert!(session.record_turn("first", "first answer"));
        assert!(!session.record_turn("second", ""));
        assert!(!session.record_turn("second", "  \n"));

        let request = session.build_request("second", "gpt-3.5-turbo", true)?;
        let roles: Vec<MessageRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(session.messages().len(), 2);
        Ok(())
    }

    #[test]
    fn new_conversation_resets_everything() -> Result<(), SessionError> {
        let mut session = ChatSession::resume(stored());
        session.new_conversation();

        assert!(session.messages().is_empty());
        assert!(session.selected_agent().is_none());
        assert!(!session.prompt_saved());
        assert!(!session.can_chat());
        assert_eq!(session.to_history().agent, None);
        Ok(())
    }

    #[test]
    fn history_snapshot_names_the_agent() -> Result<(), SessionError> {
        let mut session = ChatSession::new(ChatHistory::default()).with_greeting("Hi!");
        session.choose_agent("Telephonist", true)?;
        session.push_user("How do IVR menus work?");

        let snapshot = session.to_history();
        assert_eq!(snapshot.agent.as_deref(), Some("Telephonist"));
        assert_eq!(snapshot.messages[0], Message::assistant("Hi!".to_string()));
        assert_eq!(snapshot.messages.len(), 2);
        assert!(snapshot.updated_at.is_some());
        Ok(())
    }
}
