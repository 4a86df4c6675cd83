//! Spending context assembler
//!
//! Gathers the transaction-derived statistics a coach persona may
//! interpolate into its prompt: balances, weekly/monthly totals, category
//! and mood maps, purchase counts, and a recent-transaction snippet.
//!
//! Numbers land in the prompt as strings via [`SpendingContext::to_template_vars`];
//! map-shaped values are rendered as pretty JSON the way the hosted client
//! did, so persona templates can drop them in verbatim.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::dates::{date_key, parse_flexible_date};
use crate::models::{GoalConfig, Transaction};
use crate::tracker::{daily_goal, expenses_by_day};

/// Coarse budget health word used by the personas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingStatus {
    Good,
    Warning,
    Critical,
}

impl SpendingStatus {
    /// <=60% of target is good, <=80% warning, above critical
    pub fn from_percentage(pct: u32) -> Self {
        if pct <= 60 {
            Self::Good
        } else if pct <= 80 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Trimmed transaction shape serialized into prompts
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSnippet {
    pub date: String,
    pub time: Option<String>,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

impl From<&Transaction> for TransactionSnippet {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date.clone(),
            time: tx.time.clone(),
            description: tx.description.clone(),
            amount: tx.amount,
            category: tx.category.clone(),
            mood: tx.mood.map(|m| m.as_str().to_string()),
            notes: tx.notes.clone(),
        }
    }
}

/// Everything a persona prompt can reference about the ledger
#[derive(Debug, Clone)]
pub struct SpendingContext {
    pub balance: f64,
    pub total_expenses: f64,
    pub total_incomes: f64,
    pub expenses_by_category: HashMap<String, f64>,
    pub expenses_by_mood: HashMap<String, f64>,
    /// Purchase counts by lowercased description, whole ledger
    pub item_counts: HashMap<String, u32>,
    /// Last seven days including today
    pub week_total: f64,
    pub week_by_category: HashMap<String, f64>,
    /// Calendar month of `today`
    pub month_total: f64,
    pub month_by_category: HashMap<String, f64>,
    pub month_item_counts: HashMap<String, u32>,
    pub goal_period_total: f64,
    pub avg_daily_spending: f64,
    pub days_with_spending: usize,
    pub spending_percentage: u32,
    pub saved: f64,
    pub daily_goal: f64,
    pub target: f64,
    pub period_label: String,
    pub goal_start: String,
    pub goal_end: String,
    pub status: SpendingStatus,
    /// Up to ten most recent current-month expenses
    pub recent: Vec<TransactionSnippet>,
}

impl SpendingContext {
    /// Assemble from the full ledger, the goal config, and today's date
    pub fn assemble(transactions: &[Transaction], config: &GoalConfig, today: NaiveDate) -> Self {
        let expenses: Vec<&Transaction> =
            transactions.iter().filter(|t| t.is_expense()).collect();

        let total_expenses: f64 = expenses.iter().map(|t| t.magnitude()).sum();
        let total_incomes: f64 = transactions
            .iter()
            .filter(|t| !t.is_expense())
            .map(|t| t.magnitude())
            .sum();
        let balance = total_incomes - total_expenses;

        let mut expenses_by_category = HashMap::new();
        let mut expenses_by_mood = HashMap::new();
        let mut item_counts = HashMap::new();
        for tx in &expenses {
            *expenses_by_category
                .entry(category_of(tx))
                .or_insert(0.0) += tx.magnitude();
            if let Some(mood) = tx.mood {
                *expenses_by_mood
                    .entry(mood.as_str().to_string())
                    .or_insert(0.0) += tx.magnitude();
            }
            *item_counts.entry(item_of(tx)).or_insert(0) += 1;
        }

        let week_start = today - Duration::days(6);
        let mut week_total = 0.0;
        let mut week_by_category = HashMap::new();
        let mut month_total = 0.0;
        let mut month_by_category = HashMap::new();
        let mut month_item_counts = HashMap::new();
        let mut recent_dated: Vec<(NaiveDate, TransactionSnippet)> = Vec::new();

        for tx in &expenses {
            let Some(date) = parse_flexible_date(&tx.date, today) else {
                continue;
            };
            if date >= week_start && date <= today {
                week_total += tx.magnitude();
                *week_by_category.entry(category_of(tx)).or_insert(0.0) += tx.magnitude();
            }
            if date.year() == today.year() && date.month() == today.month() {
                month_total += tx.magnitude();
                *month_by_category.entry(category_of(tx)).or_insert(0.0) += tx.magnitude();
                *month_item_counts.entry(item_of(tx)).or_insert(0) += 1;
                recent_dated.push((date, TransactionSnippet::from(*tx)));
            }
        }

        recent_dated.sort_by(|a, b| b.0.cmp(&a.0));
        let recent: Vec<TransactionSnippet> =
            recent_dated.into_iter().take(10).map(|(_, s)| s).collect();

        let day_buckets = expenses_by_day(transactions, today);
        let goal_end = config.end_date();
        let mut goal_period_total = 0.0;
        let mut days_with_spending = 0;
        let mut cursor = config.start_date;
        while cursor <= goal_end {
            if let Some(spend) = day_buckets.get(&date_key(cursor)) {
                goal_period_total += spend;
                days_with_spending += 1;
            }
            cursor += Duration::days(1);
        }
        let avg_daily_spending = if days_with_spending > 0 {
            goal_period_total / days_with_spending as f64
        } else {
            0.0
        };

        let spending_percentage = if config.target > 0.0 {
            (total_expenses / config.target * 100.0).round() as u32
        } else {
            0
        };

        Self {
            balance,
            total_expenses,
            total_incomes,
            expenses_by_category,
            expenses_by_mood,
            item_counts,
            week_total,
            week_by_category,
            month_total,
            month_by_category,
            month_item_counts,
            goal_period_total,
            avg_daily_spending,
            days_with_spending,
            spending_percentage,
            saved: (config.target - total_expenses).max(0.0),
            daily_goal: daily_goal(config),
            target: config.target,
            period_label: config.period.label().to_string(),
            goal_start: date_key(config.start_date),
            goal_end: date_key(goal_end),
            status: SpendingStatus::from_percentage(spending_percentage),
            recent,
        }
    }

    /// Flatten into template variables for prompt rendering
    pub fn to_template_vars(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();

        vars.insert("balance", format!("{:.2}", self.balance));
        vars.insert("total_expenses", format!("{:.2}", self.total_expenses));
        vars.insert("total_incomes", format!("{:.2}", self.total_incomes));
        vars.insert("week_total", format!("{:.2}", self.week_total));
        vars.insert("month_total", format!("{:.2}", self.month_total));
        vars.insert("goal_period_total", format!("{:.2}", self.goal_period_total));
        vars.insert(
            "avg_daily_spending",
            format!("{:.2}", self.avg_daily_spending),
        );
        vars.insert("saved", format!("{:.2}", self.saved));
        vars.insert("daily_goal", format!("{:.0}", self.daily_goal));
        vars.insert("target", format!("{:.0}", self.target));
        vars.insert(
            "spending_percentage",
            self.spending_percentage.to_string(),
        );
        vars.insert("period_label", self.period_label.clone());
        vars.insert("goal_start", self.goal_start.clone());
        vars.insert("goal_end", self.goal_end.clone());
        vars.insert("status", self.status.as_str().to_string());

        vars.insert("expenses_by_category", to_json(&self.expenses_by_category));
        vars.insert("expenses_by_mood", to_json(&self.expenses_by_mood));
        vars.insert("week_by_category", to_json(&self.week_by_category));
        vars.insert("month_by_category", to_json(&self.month_by_category));
        vars.insert("month_item_counts", to_json(&self.month_item_counts));
        vars.insert("recent_transactions", to_json(&self.recent));

        vars
    }
}

fn category_of(tx: &Transaction) -> String {
    let category = tx.category.trim();
    if category.is_empty() {
        crate::analytics::UNCATEGORIZED.to_string()
    } else {
        category.to_lowercase()
    }
}

fn item_of(tx: &Transaction) -> String {
    tx.description.trim().to_lowercase()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
