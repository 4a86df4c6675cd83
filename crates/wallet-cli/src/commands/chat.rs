//! Savings coach chat commands

use anyhow::{Context, Result};
use wallet_core::coach::{CoachBackend, CoachClient};
use wallet_core::context::SpendingContext;
use wallet_core::db::Database;
use wallet_core::models::ChatRole;
use wallet_core::prompts::{PersonaId, PromptLibrary};

use super::load_settings;

fn persona_emoji(id: PersonaId) -> &'static str {
    match id {
        PersonaId::Catty => "🐱",
        PersonaId::FutureMe => "🕰️",
    }
}

fn parse_persona(raw: &str) -> Result<PersonaId> {
    raw.parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Use one of: catty, future_me")
}

pub async fn cmd_chat(db: &Database, persona: &str, message: &str) -> Result<()> {
    let persona = parse_persona(persona)?;

    let client = CoachClient::from_env().context(
        "Coach not configured. Set WALLET_COMPLETION_HOST to an OpenAI-compatible \
         server, or WALLET_COACH_BACKEND=mock to try it offline.",
    )?;

    let today = chrono::Local::now().date_naive();
    let settings = load_settings(today).await?;
    let config = settings.goal_config();
    let transactions = db.list_transactions(None, None)?;

    let context = SpendingContext::assemble(&transactions, &config, today);
    let mut vars = context.to_template_vars();
    vars.insert("user_message", message.to_string());

    let mut library = PromptLibrary::new();
    let prompt = library.get(persona)?;
    let (system, user) = prompt.render_messages(&vars);

    db.insert_message(ChatRole::User, persona.as_str(), message)?;

    println!("💬 You: {}", message);
    let reply = client.complete(system.as_deref(), &user).await?;
    db.insert_message(ChatRole::Coach, persona.as_str(), &reply)?;

    println!("{} {}", persona_emoji(persona), reply);

    Ok(())
}

pub fn cmd_chat_history(db: &Database, persona: &str) -> Result<()> {
    let persona = parse_persona(persona)?;
    let messages = db.list_messages(persona.as_str(), Some(50))?;

    if messages.is_empty() {
        println!("📭 No conversation with {} yet.", persona.as_str());
        return Ok(());
    }

    println!("💬 Conversation with {}", persona.as_str());
    println!("   ─────────────────────────────");
    for message in &messages {
        let speaker = match message.role {
            ChatRole::User => "You".to_string(),
            ChatRole::Coach => persona_emoji(persona).to_string(),
        };
        println!("   {}: {}", speaker, message.text);
    }

    Ok(())
}

pub fn cmd_chat_clear(db: &Database, persona: &str) -> Result<()> {
    let persona = parse_persona(persona)?;
    let deleted = db.clear_messages(persona.as_str())?;
    println!(
        "🗑️  Forgot {} message(s) from the {} conversation.",
        deleted,
        persona.as_str()
    );
    Ok(())
}
