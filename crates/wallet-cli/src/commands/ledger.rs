//! Ledger commands: add, list, delete

use anyhow::{Context, Result};
use wallet_core::dates::parse_flexible_date;
use wallet_core::db::Database;
use wallet_core::models::{Mood, NewTransaction, TransactionKind};

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    db: &Database,
    description: &str,
    amount: f64,
    date: Option<&str>,
    time: Option<&str>,
    income: bool,
    category: Option<&str>,
    mood: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();

    let date = date
        .map(|d| d.to_string())
        .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());

    let mood: Option<Mood> = mood
        .map(|m| m.parse())
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Use one of: happy, neutral, sad")?;

    let kind = if income {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let tx = NewTransaction {
        date: date.clone(),
        time: time.map(|t| t.to_string()),
        description: description.to_string(),
        amount,
        kind,
        category: category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| wallet_core::analytics::UNCATEGORIZED.to_string()),
        mood,
        notes: notes.map(|n| n.to_string()),
    };

    let id = db.insert_transaction(&tx)?;

    let symbol = match kind {
        TransactionKind::Expense => "💸",
        TransactionKind::Income => "💰",
    };
    println!("{} Recorded #{}: {} ${:.2} on {}", symbol, id, description, amount.abs(), date);

    if parse_flexible_date(&date, today).is_none() {
        println!(
            "⚠️  Could not understand the date \"{}\"; this entry will count toward totals \
             but not toward the tracker calendar.",
            date
        );
    }

    Ok(())
}

pub fn cmd_list(db: &Database, kind: Option<&str>, limit: i64, json: bool) -> Result<()> {
    let kind: Option<TransactionKind> = kind
        .map(|k| k.parse())
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Use one of: expense, income")?;

    let transactions = db.list_transactions(kind, Some(limit))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    if transactions.is_empty() {
        println!("📭 No entries yet. Record one with: wallet add \"coffee\" 4.50");
        return Ok(());
    }

    println!("🧾 Ledger ({} newest entries)", transactions.len());
    println!("   ──────────────────────────────────────────────");
    for tx in &transactions {
        let sign = if tx.is_expense() { "-" } else { "+" };
        let mood = tx.mood.map(|m| m.emoji()).unwrap_or("  ");
        println!(
            "   #{:<4} {:<12} {}{:>9.2}  {} {:<14} {}",
            tx.id,
            tx.date,
            sign,
            tx.magnitude(),
            mood,
            tx.category,
            tx.description
        );
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    let tx = db.get_transaction(id)?;
    db.delete_transaction(id)?;
    println!(
        "🗑️  Deleted #{}: {} ${:.2} ({})",
        id,
        tx.description,
        tx.magnitude(),
        tx.date
    );
    Ok(())
}
