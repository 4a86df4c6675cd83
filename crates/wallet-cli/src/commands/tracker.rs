//! Goal tracker calendar command

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use wallet_core::db::Database;
use wallet_core::models::DayStatus;
use wallet_core::tracker::classify_month;

use super::load_settings;

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let (year, month) = raw
        .split_once('-')
        .context("Month must look like YYYY-MM")?;
    let year: i32 = year.parse().context("Invalid year")?;
    let month: u32 = month.parse().context("Invalid month")?;
    anyhow::ensure!((1..=12).contains(&month), "Month must be 1-12");
    Ok((year, month))
}

fn status_cell(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Good => "🟢",
        DayStatus::Exceeded => "🔴",
        DayStatus::Future => "··",
        DayStatus::Inactive => "  ",
    }
}

pub async fn cmd_tracker(db: &Database, month: Option<&str>) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => (today.year(), today.month()),
    };

    let settings = load_settings(today).await?;
    let config = settings.goal_config();
    let transactions = db.list_transactions(None, None)?;

    let view = classify_month(&transactions, &config, today, year, month)?;

    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month));

    println!("📅 {}", title);
    println!(
        "   Goal: ${:.2} over {} (daily goal ${:.2})",
        config.target,
        config.period.label(),
        view.daily_goal
    );
    println!(
        "   Window: {} to {}",
        config.start_date,
        config.end_date()
    );
    println!();
    println!("   Su Mo Tu We Th Fr Sa");

    let mut row: Vec<&str> = vec!["  "; view.first_weekday as usize];
    for day in 1..=view.statuses.len() as u32 {
        if let Some(status) = view.status_for_day(day) {
            row.push(status_cell(status));
        }
        if row.len() == 7 {
            println!("   {}", row.join(" "));
            row.clear();
        }
    }
    if !row.is_empty() {
        println!("   {}", row.join(" "));
    }

    println!();
    println!("   🟢 on goal   🔴 over goal   ·· upcoming");
    if view.streak > 0 {
        println!("🔥 Streak: {} day(s) at or under the daily goal", view.streak);
    } else {
        println!("🔥 Streak: 0 days. Today is a fine day to start one.");
    }

    // Days with recorded spending, for a quick sanity check
    let mut spent: Vec<(&String, &f64)> = view.day_spend.iter().collect();
    spent.sort_by(|a, b| a.0.cmp(b.0));
    if !spent.is_empty() {
        println!();
        println!("   Spending this month:");
        for (day, amount) in spent {
            println!("   {}  ${:.2}", day, amount);
        }
    }

    Ok(())
}
