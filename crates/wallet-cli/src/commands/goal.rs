//! Goal commands: show progress, set, migrate settings

use std::path::Path;

use anyhow::{Context, Result};
use wallet_core::analytics::goal_progress;
use wallet_core::context::SpendingStatus;
use wallet_core::models::GoalPeriod;
use wallet_core::settings::{migrate_settings, RemoteSettingsStore, SettingsStore, UserSettings};

use super::{load_settings, open_db, settings_store};

pub async fn cmd_goal_show(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;
    let today = chrono::Local::now().date_naive();
    let settings = load_settings(today).await?;
    let config = settings.goal_config();

    let transactions = db.list_transactions(None, None)?;
    let progress = goal_progress(&transactions, &config);

    let status = SpendingStatus::from_percentage(progress.spending_percentage);
    let status_emoji = match status {
        SpendingStatus::Good => "🟢",
        SpendingStatus::Warning => "🟡",
        SpendingStatus::Critical => "🔴",
    };

    println!("🎯 Spending Goal");
    println!("   ─────────────────────────────");
    println!("   Target: ${:.2} over {}", progress.target, config.period.label());
    println!("   Window: {} to {}", progress.start_date, progress.end_date);
    println!("   Daily goal: ${:.2}", progress.daily_goal);
    println!();
    println!(
        "   {} Spent ${:.2} ({}% of target, {})",
        status_emoji,
        progress.total_expenses,
        progress.spending_percentage,
        status.as_str()
    );
    println!("   Saved so far: ${:.2}", progress.saved);

    Ok(())
}

pub async fn cmd_goal_set(target: f64, period: &str, start: Option<&str>) -> Result<()> {
    anyhow::ensure!(target > 0.0, "Target must be positive");

    let period: GoalPeriod = period
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Use one of: week, 2weeks, 3weeks, month")?;

    let today = chrono::Local::now().date_naive();
    let start_date = match start {
        Some(raw) => chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .context("Invalid --start date format (use YYYY-MM-DD)")?,
        None => today,
    };

    let store = settings_store();
    let mut settings = store
        .load()
        .await?
        .unwrap_or_else(|| UserSettings::default_for(today));
    settings.target = target;
    settings.period = period;
    settings.start_date = start_date;
    store.save(&settings).await?;

    println!(
        "🎯 Goal set: ${:.2} over {} starting {}",
        target,
        period.label(),
        start_date
    );
    println!("   Saved to {}", store.path().display());

    Ok(())
}

pub async fn cmd_goal_migrate() -> Result<()> {
    let remote = RemoteSettingsStore::from_env().context(
        "Remote backend not configured. Set WALLET_BACKEND_URL and WALLET_USER_ID \
         (and WALLET_BACKEND_TOKEN if required).",
    )?;

    let local = settings_store();
    if migrate_settings(&local, &remote).await? {
        println!("☁️  Local settings pushed to the remote backend.");
    } else {
        println!("☁️  Nothing to migrate (remote already has settings, or no local file).");
    }

    Ok(())
}
