//! Ledger aggregations behind the analytics and mood views
//!
//! Same execution model as [`crate::tracker`]: single pass over an
//! in-memory slice, pure in (transactions, today), no I/O.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::dates::parse_flexible_date;
use crate::models::{
    CategorySlice, GoalConfig, GoalProgress, MonthSummary, MoodStats, Transaction,
};
use crate::tracker::daily_goal;

/// Category label fallback for untagged expenses
pub const UNCATEGORIZED: &str = "other";

/// Headline numbers for the goal window
///
/// Totals intentionally cover the whole ledger, not just dated records:
/// a transaction whose date fails to parse still spends real money.
pub fn goal_progress(transactions: &[Transaction], config: &GoalConfig) -> GoalProgress {
    let total_expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.magnitude())
        .sum();

    let saved = (config.target - total_expenses).max(0.0);
    let spending_percentage = if config.target > 0.0 {
        (total_expenses / config.target * 100.0).round() as u32
    } else {
        0
    };

    GoalProgress {
        target: config.target,
        total_expenses,
        saved,
        spending_percentage,
        daily_goal: daily_goal(config),
        start_date: config.start_date,
        end_date: config.end_date(),
    }
}

/// Expense totals per month, newest first
pub fn monthly_totals(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthSummary> {
    let mut buckets: HashMap<(i32, u32), f64> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        if let Some(date) = parse_flexible_date(&tx.date, today) {
            *buckets.entry((date.year(), date.month())).or_insert(0.0) += tx.magnitude();
        }
    }

    let mut summaries: Vec<MonthSummary> = buckets
        .into_iter()
        .map(|((year, month), total)| MonthSummary { year, month, total })
        .collect();
    summaries.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    summaries
}

/// Per-category expense breakdown for one month, largest first
///
/// Returns the month total alongside the slices; percentages are shares of
/// that total. An empty category label falls back to [`UNCATEGORIZED`].
pub fn category_breakdown(
    transactions: &[Transaction],
    today: NaiveDate,
    year: i32,
    month: u32,
) -> (f64, Vec<CategorySlice>) {
    let mut buckets: HashMap<String, f64> = HashMap::new();
    let mut total = 0.0;

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let Some(date) = parse_flexible_date(&tx.date, today) else {
            continue;
        };
        if date.year() != year || date.month() != month {
            continue;
        }
        let category = if tx.category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            tx.category.trim().to_lowercase()
        };
        *buckets.entry(category).or_insert(0.0) += tx.magnitude();
        total += tx.magnitude();
    }

    let mut slices: Vec<CategorySlice> = buckets
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            category,
            amount,
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect();
    slices.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    (total, slices)
}

/// Mood correlation over mood-tagged expenses
///
/// Always returns all three buckets in fixed order (happy, neutral, sad);
/// expenses without a mood are excluded entirely.
pub fn mood_stats(transactions: &[Transaction]) -> Vec<MoodStats> {
    let tagged: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_expense() && t.mood.is_some())
        .collect();

    let total_count = tagged.len();
    let total_amount: f64 = tagged.iter().map(|t| t.magnitude()).sum();

    crate::models::Mood::all()
        .iter()
        .map(|&mood| {
            let in_bucket: Vec<&&Transaction> =
                tagged.iter().filter(|t| t.mood == Some(mood)).collect();
            let count = in_bucket.len();
            let total: f64 = in_bucket.iter().map(|t| t.magnitude()).sum();
            MoodStats {
                mood,
                count,
                total,
                count_percentage: if total_count > 0 {
                    (count as f64 / total_count as f64 * 100.0).round() as u32
                } else {
                    0
                },
                amount_percentage: if total_amount > 0.0 {
                    (total / total_amount * 100.0).round() as u32
                } else {
                    0
                },
            }
        })
        .collect()
}
