//! Reporting commands: monthly totals, category breakdown, mood stats

use anyhow::{Context, Result};
use wallet_core::analytics::{category_breakdown, monthly_totals, mood_stats};
use wallet_core::db::Database;

pub fn cmd_monthly(db: &Database) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let transactions = db.list_transactions(None, None)?;
    let summaries = monthly_totals(&transactions, today);

    if summaries.is_empty() {
        println!("📭 No dated expenses yet.");
        return Ok(());
    }

    println!("📊 Monthly Expenses");
    println!("   ─────────────────────────────");
    for summary in &summaries {
        println!("   {}  ${:>10.2}", summary.key(), summary.total);
    }
    println!();
    println!("   Tip: wallet monthly --breakdown {}", summaries[0].key());

    Ok(())
}

pub fn cmd_monthly_breakdown(db: &Database, month: &str) -> Result<()> {
    let (year, month_num) = month
        .split_once('-')
        .context("Month must look like YYYY-MM")?;
    let year: i32 = year.parse().context("Invalid year")?;
    let month_num: u32 = month_num.parse().context("Invalid month")?;

    let today = chrono::Local::now().date_naive();
    let transactions = db.list_transactions(None, None)?;
    let (total, slices) = category_breakdown(&transactions, today, year, month_num);

    if slices.is_empty() {
        println!("📭 No expenses recorded for {}.", month);
        return Ok(());
    }

    println!("📊 {} by Category (${:.2} total)", month, total);
    println!("   ─────────────────────────────");
    for slice in &slices {
        let bar_len = (slice.percentage / 5.0).round() as usize;
        println!(
            "   {:<14} ${:>9.2}  {:>5.1}%  {}",
            slice.category,
            slice.amount,
            slice.percentage,
            "█".repeat(bar_len)
        );
    }

    Ok(())
}

pub fn cmd_moods(db: &Database) -> Result<()> {
    let transactions = db.list_transactions(None, None)?;
    let stats = mood_stats(&transactions);

    let tagged: usize = stats.iter().map(|s| s.count).sum();
    if tagged == 0 {
        println!("📭 No mood-tagged expenses yet. Try: wallet add \"snack\" 3 --mood happy");
        return Ok(());
    }

    println!("🎭 Spending by Mood ({} tagged expenses)", tagged);
    println!("   ─────────────────────────────");
    for s in &stats {
        println!(
            "   {} {:<8} {:>3} purchases ({:>3}%)  ${:>9.2} ({:>3}%)",
            s.mood.emoji(),
            s.mood.label(),
            s.count,
            s.count_percentage,
            s.total,
            s.amount_percentage
        );
    }

    Ok(())
}
