mod common;

use common::{MockServer, delta_chunk, finish_chunk, json_response, sse_response};
use specialist_core::config::AgentConfig;
use specialist_core::llm::{MessageRole, create_provider};
use specialist_core::ui::TerminalStreamer;
use specialist_core::{
    AgentSelector, ChatHistory, ChatSession, HistoryStore, Outcome, PersonaCatalog,
    TfIdfEmbedder,
};

async fn local_selector() -> anyhow::Result<AgentSelector> {
    Ok(AgentSelector::new(PersonaCatalog::builtin(), Box::new(TfIdfEmbedder::new())).await?)
}

#[tokio::test]
async fn routed_turn_is_streamed_and_persisted() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let store = HistoryStore::new(temp.path().join("chat_history.json"));
    let selector = local_selector().await?;

    let mut session = ChatSession::new(store.load()?);
    let outcome = session
        .save_prompt(&selector, "My database indexes are slow", 3)
        .await?;
    let Outcome::NeedsChoice(candidates) = &outcome else {
        anyhow::bail!("expected several candidates, got {outcome:?}");
    };
    assert_eq!(candidates[0].name, "Database Administrator");
    session.choose_agent(candidates[0].name, false)?;
    store.save(&session.to_history())?;

    let first = delta_chunk("Add a composite ");
    let second = delta_chunk("index.");
    let last = finish_chunk("stop");
    let server = MockServer::start(vec![sse_response(&[&first, &second, &last, "[DONE]"])]).await?;
    let agent = AgentConfig {
        base_url: server.base_url.clone(),
        ..AgentConfig::default()
    };
    let provider = create_provider(&agent, "sk-test".to_string())?;

    let prompt = "Which index helps a range query?";
    let request = session.build_request(prompt, &agent.default_model, false)?;

    let stream = provider.stream(request).await?;
    let mut out = Vec::new();
    let reply = TerminalStreamer::new(None)
        .stream_to(stream, None, &mut out)
        .await;
    assert!(reply.is_complete());
    assert!(session.record_turn(prompt, &reply.content));
    store.save(&session.to_history())?;

    let requests = server.finish().await?;
    let body = requests[0].json();
    let messages = body["messages"]
        .as_array()
        .cloned()
        .unwrap_or_default();
    assert_eq!(messages.len(), 2);
    assert!(
        messages[0]["content"]
            .as_str()
            .is_some_and(|content| content.starts_with("You are a database management specialist"))
    );
    assert_eq!(messages[1]["content"], prompt);

    let reloaded = store.load()?;
    assert_eq!(reloaded.agent.as_deref(), Some("Database Administrator"));
    let roles: Vec<MessageRole> = reloaded.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::Assistant, MessageRole::User, MessageRole::Assistant]
    );
    assert_eq!(reloaded.messages[2].content, "Add a composite index.");

    let resumed = ChatSession::resume(reloaded);
    assert!(resumed.can_chat());
    Ok(())
}

#[tokio::test]
async fn rejected_request_leaves_history_untouched() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let store = HistoryStore::new(temp.path().join("chat_history.json"));

    let mut session = ChatSession::new(ChatHistory::default());
    session.choose_agent("Doctor", true)?;
    store.save(&session.to_history())?;

    let server = MockServer::start(vec![json_response(
        401,
        r#"{"error":{"message":"Incorrect API key provided"}}"#,
    )])
    .await?;
    let agent = AgentConfig {
        base_url: server.base_url.clone(),
        ..AgentConfig::default()
    };
    let provider = create_provider(&agent, "sk-bad".to_string())?;

    let prompt = "Is a headache after running normal?";
    let request = session.build_request(prompt, &agent.default_model, true)?;
    assert!(provider.stream(request).await.is_err());
    assert!(!session.record_turn(prompt, ""));
    server.finish().await?;

    let next = session.build_request("Still there?", &agent.default_model, true)?;
    assert_eq!(next.messages.len(), 1);
    let stored = store.load()?;
    assert_eq!(stored.messages, session.messages());
    assert!(stored.messages.iter().all(|m| m.role != MessageRole::User));
    Ok(())
}

#[tokio::test]
async fn new_conversation_clears_persisted_history() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let store = HistoryStore::new(temp.path().join("chat_history.json"));

    let mut session = ChatSession::new(ChatHistory::default());
    session.choose_agent("IT Trainer", true)?;
    session.push_user("How do I plan a workshop?");
    store.save(&session.to_history())?;

    session.new_conversation();
    store.save(&session.to_history())?;

    let reloaded = store.load()?;
    assert!(reloaded.is_empty());
    assert!(reloaded.agent.is_none());
    assert!(!ChatSession::resume(reloaded).can_chat());
    Ok(())
}
