//! ChattyWallet CLI - Local-first spending tracker
//!
//! Usage:
//!   wallet init                    Initialize database
//!   wallet add "coffee" 4.50       Record an expense
//!   wallet tracker                 Show the goal calendar
//!   wallet chat "can I buy this?"  Ask the savings coach

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            description,
            amount,
            date,
            time,
            income,
            category,
            mood,
            notes,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                &description,
                amount,
                date.as_deref(),
                time.as_deref(),
                income,
                category.as_deref(),
                mood.as_deref(),
                notes.as_deref(),
            )
        }
        Commands::List { kind, limit, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, kind.as_deref(), limit, json)
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Tracker { month } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_tracker(&db, month.as_deref()).await
        }
        Commands::Monthly { breakdown } => {
            let db = commands::open_db(&cli.db)?;
            match breakdown {
                Some(ref month) => commands::cmd_monthly_breakdown(&db, month),
                None => commands::cmd_monthly(&db),
            }
        }
        Commands::Moods => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_moods(&db)
        }
        Commands::Goal { action } => match action {
            None => commands::cmd_goal_show(&cli.db).await,
            Some(GoalAction::Set {
                target,
                period,
                start,
            }) => commands::cmd_goal_set(target, &period, start.as_deref()).await,
            Some(GoalAction::Migrate) => commands::cmd_goal_migrate().await,
        },
        Commands::Chat {
            message,
            persona,
            history,
            clear,
        } => {
            let db = commands::open_db(&cli.db)?;
            if clear {
                commands::cmd_chat_clear(&db, &persona)
            } else if history {
                commands::cmd_chat_history(&db, &persona)
            } else {
                match message {
                    Some(ref message) => commands::cmd_chat(&db, &persona, message).await,
                    None => anyhow::bail!(
                        "Nothing to say. Pass a message, or use --history / --clear."
                    ),
                }
            }
        }
        Commands::Export { output } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, &output)
        }
        Commands::Status => commands::cmd_status(&cli.db).await,
    }
}
