//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `settings_store` / `load_settings` - Goal settings access
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database and configuration status

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use wallet_core::db::Database;
use wallet_core::prompts::default_prompts_dir;
use wallet_core::settings::{LocalSettingsStore, SettingsStore, UserSettings};

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Local settings store, falling back to the working directory when no
/// platform data dir exists
pub fn settings_store() -> LocalSettingsStore {
    LocalSettingsStore::default_path()
        .unwrap_or_else(|| LocalSettingsStore::new("wallet-settings.toml"))
}

/// Load settings, defaulting to a fresh goal starting today
pub async fn load_settings(today: NaiveDate) -> Result<UserSettings> {
    let store = settings_store();
    Ok(store
        .load()
        .await?
        .unwrap_or_else(|| UserSettings::default_for(today)))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let _ = db.conn()?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: wallet add \"coffee\" 4.50");
    println!("  2. Set a goal: wallet goal set 500 --period month");
    println!("  3. Check the calendar: wallet tracker");

    Ok(())
}

pub async fn cmd_status(db_path: &Path) -> Result<()> {
    println!("📋 ChattyWallet Status");
    println!("   ─────────────────────────────");

    let db = open_db(db_path)?;
    println!("   Database: {}", db.path());
    println!("   Ledger entries: {}", db.transaction_count()?);

    let today = chrono::Local::now().date_naive();
    let store = settings_store();
    match store.load().await? {
        Some(settings) => {
            println!(
                "   Goal: ${:.2} over {} from {}",
                settings.target,
                settings.period.label(),
                settings.start_date
            );
            println!("   Settings file: {}", store.path().display());
        }
        None => {
            let defaults = UserSettings::default_for(today);
            println!(
                "   Goal: not set (defaults to ${:.2} over {})",
                defaults.target,
                defaults.period.label()
            );
        }
    }

    match std::env::var("WALLET_COMPLETION_HOST") {
        Ok(host) => println!("   Coach: completion backend at {}", host),
        Err(_) => {
            if std::env::var("WALLET_COACH_BACKEND").as_deref() == Ok("mock") {
                println!("   Coach: mock backend");
            } else {
                println!("   Coach: not configured (set WALLET_COMPLETION_HOST)");
            }
        }
    }

    if let Some(dir) = default_prompts_dir() {
        println!("   Prompt overrides: {}", dir.display());
    }

    Ok(())
}
