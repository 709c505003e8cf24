use super::{apply_sampling, build_provider, build_selector, history_store, stream_reply};
use anyhow::{Context, Result};
use console::style;
use specialist_core::config::constants::{avatars, messages};
use specialist_core::llm::LLMProvider;
use specialist_core::ui::slash::{self, SLASH_COMMANDS, SlashCommand};
use specialist_core::ui::{self, prompt, terminal};
use specialist_core::{
    AgentSelector, ChatHistory, ChatSession, HistoryStore, Outcome, SessionError,
    SpecialistConfig,
};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub prompt: Option<String>,
    pub agent: Option<String>,
    pub resume: bool,
}

struct ChatContext<'a> {
    config: &'a SpecialistConfig,
    provider: Box<dyn LLMProvider>,
    selector: AgentSelector,
    store: Option<HistoryStore>,
}

impl ChatContext<'_> {
    fn persist(&self, session: &ChatSession) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&session.to_history()) {
                warn!("failed to save chat history: {err:#}");
                eprintln!("{}", style(format!("Could not save history: {err:#}")).yellow());
            }
        }
    }
}

/// Handle the chat command - interactive conversation with a routed agent
pub async fn handle_chat_command(config: &SpecialistConfig, options: ChatOptions) -> Result<()> {
    let store = history_store(config)?;
    let history = match &store {
        Some(store) => store.load().unwrap_or_else(|err| {
            warn!("ignoring unreadable chat history: {err:#}");
            eprintln!(
                "{}",
                style(format!("Starting fresh, history could not be read: {err:#}")).yellow()
            );
            ChatHistory::default()
        }),
        None => ChatHistory::default(),
    };

    let (api_key, provider) = build_provider(config)?;
    let selector = build_selector(config, Some(api_key)).await?;

    let session = if options.resume {
        ChatSession::resume(history)
    } else {
        ChatSession::new(history)
    };
    let mut session = session.with_greeting(config.ui.greeting.clone());

    println!("{}", style("Specialist chat").blue().bold());
    println!("Model: {}", config.agent.default_model);
    println!("Routing: {}", selector.backend());
    println!("Type /help for commands\n");

    ui::print_transcript(session.messages(), config.ui.render_markdown);

    let ctx = ChatContext {
        config,
        provider,
        selector,
        store,
    };

    if let Some(agent) = options.agent.as_deref() {
        let persona = session
            .choose_agent(agent, true)
            .with_context(|| format!("cannot start a chat with '{agent}'"))?;
        announce_agent(persona.name);
        ctx.persist(&session);
    }

    if let Some(opening) = options.prompt.as_deref() {
        route_prompt(&ctx, &mut session, opening).await?;
    }

    if let Some(persona) = session.selected_agent() {
        if options.resume && options.agent.is_none() && options.prompt.is_none() {
            announce_agent(persona.name);
        }
    }

    loop {
        let ready = session.can_chat();
        if !ready {
            println!("{}", style(messages::NOT_READY).dim());
        }
        let label = if ready { avatars::USER } else { "Opening prompt" };
        print!("{} ", style(format!("{label}>")).cyan().bold());
        terminal::flush_stdout();

        let Some(input) = terminal::read_line().context("failed to read input")? else {
            println!();
            break;
        };
        if input.is_empty() {
            continue;
        }

        if let Some(command) = slash::parse(&input) {
            match command {
                Ok(SlashCommand::Exit) => break,
                Ok(command) => run_slash_command(&ctx, &mut session, command).await?,
                Err(message) => println!("{}", style(message).yellow()),
            }
            continue;
        }

        if ready {
            chat_turn(&ctx, &mut session, &input).await?;
        } else {
            route_prompt(&ctx, &mut session, &input).await?;
        }
    }

    Ok(())
}

async fn run_slash_command(
    ctx: &ChatContext<'_>,
    session: &mut ChatSession,
    command: SlashCommand,
) -> Result<()> {
    match command {
        SlashCommand::Prompt(text) => route_prompt(ctx, session, &text).await?,
        SlashCommand::Agent(None) => match session.selected_agent() {
            Some(persona) => {
                println!("{}", style(persona.name).green().bold());
                println!("{}", style(persona.instruction).dim());
            }
            None => println!("{}", style("No agent selected").yellow()),
        },
        SlashCommand::Agent(Some(name)) => match session.choose_agent(&name, true) {
            Ok(persona) => {
                announce_agent(persona.name);
                ctx.persist(session);
            }
            Err(err) => println!("{}", style(err).yellow()),
        },
        SlashCommand::Agents => {
            for persona in ctx.selector.catalog().iter() {
                println!("  {}", persona.name);
            }
        }
        SlashCommand::New => {
            session.new_conversation();
            ctx.persist(session);
            println!("{}", style("Started a new conversation").green());
        }
        SlashCommand::History => {
            if session.messages().is_empty() {
                println!("{}", style("No messages yet").dim());
            } else {
                ui::print_transcript(session.messages(), ctx.config.ui.render_markdown);
            }
        }
        SlashCommand::Help => {
            for info in SLASH_COMMANDS.iter() {
                println!("  /{:<8} {}", info.name, style(info.description).dim());
            }
        }
        SlashCommand::Exit => {}
    }
    Ok(())
}

/// Save `text` as the opening prompt and settle on an agent.
async fn route_prompt(ctx: &ChatContext<'_>, session: &mut ChatSession, text: &str) -> Result<()> {
    let outcome = match session
        .save_prompt(&ctx.selector, text, ctx.config.selection.top_n)
        .await
    {
        Ok(outcome) => outcome,
        Err(SessionError::EmptyPrompt) => {
            println!("{}", style(messages::EMPTY_PROMPT).yellow());
            return Ok(());
        }
        Err(err) => return Err(err).context("failed to route the opening prompt"),
    };

    match outcome {
        Outcome::NoMatch => println!("{}", style(messages::NO_AGENT_FOUND).yellow()),
        Outcome::Selected(agent) => announce_agent(agent.name),
        Outcome::NeedsChoice(candidates) => {
            let chosen = if terminal::is_interactive() {
                prompt::select_agent(&candidates, ctx.config.ui.show_scores)?
            } else {
                println!("{}", messages::MULTIPLE_AGENTS);
                for candidate in &candidates {
                    println!("  {}", prompt::format_choice(candidate, ctx.config.ui.show_scores));
                }
                candidates.first().map(|candidate| candidate.name)
            };

            match chosen {
                Some(name) => {
                    let persona = session.choose_agent(name, false)?;
                    announce_agent(persona.name);
                }
                None => println!("{}", style("No agent selected").yellow()),
            }
        }
    }

    if session.can_chat() {
        ui::print_transcript(session.messages(), ctx.config.ui.render_markdown);
    }
    ctx.persist(session);
    Ok(())
}

async fn chat_turn(ctx: &ChatContext<'_>, session: &mut ChatSession, input: &str) -> Result<()> {
    let request = session.build_request(
        input,
        &ctx.config.agent.default_model,
        ctx.config.context.include_history,
    )?;
    let request = apply_sampling(request, ctx.config);

    let prefix = format!("{} ", avatars::ASSISTANT);
    let reply = match stream_reply(ctx.provider.as_ref(), request, ctx.config, &prefix).await {
        Ok(reply) => reply,
        Err(err) => {
            eprintln!("{}", style(format!("Request failed: {err:#}")).red());
            return Ok(());
        }
    };

    let content = match reply.into_result() {
        Ok(content) => content,
        Err((partial, err)) => {
            eprintln!("{}", style(format!("Stream interrupted: {err}")).red());
            partial
        }
    };
    if session.record_turn(input, &content) {
        ctx.persist(session);
    } else {
        warn!("empty reply; the prompt was not saved");
    }
    Ok(())
}

fn announce_agent(name: &str) {
    println!("{} {}", style("Agent:").green().bold(), style(name).green());
}
