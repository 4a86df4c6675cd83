//! Goal tracker: day-status classification over a displayed month
//!
//! Pure functions over an in-memory transaction slice. Every invocation is
//! a function of (transactions, goal config, today, displayed month) with
//! no hidden state, so re-running on any input change is free.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::dates::{date_key, days_in_month, parse_flexible_date};
use crate::error::{Error, Result};
use crate::models::{DayStatus, GoalConfig, Transaction};

/// Per-day budget threshold: `round(target / N)`
///
/// Degenerate configurations (non-positive target) collapse to a zero
/// threshold instead of an error; any positive spend on an in-window day
/// then classifies as exceeded.
pub fn daily_goal(config: &GoalConfig) -> f64 {
    let days = config.period.days();
    if days <= 0 || config.target <= 0.0 {
        return 0.0;
    }
    (config.target / days as f64).round()
}

/// Sum expense magnitudes per calendar day, keyed `YYYY-MM-DD`
///
/// Dates the flexible grammar cannot parse are silently skipped; those
/// records still count toward undated aggregates elsewhere.
pub fn expenses_by_day(transactions: &[Transaction], today: NaiveDate) -> HashMap<String, f64> {
    let mut buckets: HashMap<String, f64> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        if let Some(date) = parse_flexible_date(&tx.date, today) {
            *buckets.entry(date_key(date)).or_insert(0.0) += tx.magnitude();
        }
    }
    buckets
}

/// Classify a single calendar day
pub fn classify_day(
    day: NaiveDate,
    day_spend: f64,
    config: &GoalConfig,
    daily_goal: f64,
    today: NaiveDate,
) -> DayStatus {
    if !config.contains(day) {
        DayStatus::Inactive
    } else if day > today {
        DayStatus::Future
    } else if day_spend > daily_goal {
        DayStatus::Exceeded
    } else {
        DayStatus::Good
    }
}

/// Consecutive days ending today that stayed at or under the daily goal
///
/// Walks backward one day at a time while still inside
/// `[goal start, today]`; the first exceeding day stops the count and is
/// not included.
pub fn goal_streak(
    spend_by_day: &HashMap<String, f64>,
    config: &GoalConfig,
    daily_goal: f64,
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    while cursor >= config.start_date {
        let spend = spend_by_day.get(&date_key(cursor)).copied().unwrap_or(0.0);
        if spend <= daily_goal {
            streak += 1;
        } else {
            break;
        }
        cursor -= Duration::days(1);
    }
    streak
}

/// Tracker view of one displayed month
#[derive(Debug, Clone)]
pub struct TrackerMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    pub daily_goal: f64,
    /// Status per day of the month, index 0 = day 1
    pub statuses: Vec<DayStatus>,
    /// Expense total per day of the month, keyed `YYYY-MM-DD`
    pub day_spend: HashMap<String, f64>,
    /// Current goal streak, counted back from today
    pub streak: u32,
    /// Weekday of the 1st, 0 = Sunday (calendar grid alignment)
    pub first_weekday: u32,
}

impl TrackerMonth {
    pub fn status_for_day(&self, day: u32) -> Option<DayStatus> {
        self.statuses.get(day as usize - 1).copied()
    }
}

/// Build the tracker view for a displayed `(year, month)`
pub fn classify_month(
    transactions: &[Transaction],
    config: &GoalConfig,
    today: NaiveDate,
    year: i32,
    month: u32,
) -> Result<TrackerMonth> {
    let day_count = days_in_month(year, month)
        .ok_or_else(|| Error::InvalidData(format!("invalid month: {}-{}", year, month)))?;

    let goal = daily_goal(config);
    let all_buckets = expenses_by_day(transactions, today);

    let mut statuses = Vec::with_capacity(day_count as usize);
    let mut day_spend = HashMap::new();
    for day in 1..=day_count {
        // day_count came from days_in_month, so from_ymd_opt cannot fail here
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| Error::InvalidData(format!("invalid day: {}-{}-{}", year, month, day)))?;
        let key = date_key(date);
        let spend = all_buckets.get(&key).copied().unwrap_or(0.0);
        if spend > 0.0 {
            day_spend.insert(key, spend);
        }
        statuses.push(classify_day(date, spend, config, goal, today));
    }

    let streak = goal_streak(&all_buckets, config, goal, today);
    let first_weekday = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);

    Ok(TrackerMonth {
        year,
        month,
        daily_goal: goal,
        statuses,
        day_spend,
        streak,
        first_weekday,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalPeriod, TransactionKind};
    use chrono::Utc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(date: &str, amount: f64) -> Transaction {
        tx(date, amount, TransactionKind::Expense)
    }

    fn tx(date: &str, amount: f64, kind: TransactionKind) -> Transaction {
        Transaction {
            id: 0,
            date: date.to_string(),
            time: None,
            description: "test".to_string(),
            amount,
            kind,
            category: "other".to_string(),
            mood: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn weekly_goal(start: NaiveDate, target: f64) -> GoalConfig {
        GoalConfig {
            target,
            period: GoalPeriod::Week,
            start_date: start,
        }
    }

    #[test]
    fn daily_goal_is_rounded() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        assert_eq!(daily_goal(&config), 100.0);

        let config = weekly_goal(ymd(2024, 11, 1), 1000.0);
        // 1000 / 7 = 142.857..., rounds to 143
        assert_eq!(daily_goal(&config), 143.0);
    }

    #[test]
    fn daily_goal_zero_for_nonpositive_target() {
        let config = weekly_goal(ymd(2024, 11, 1), 0.0);
        assert_eq!(daily_goal(&config), 0.0);
        let config = weekly_goal(ymd(2024, 11, 1), -50.0);
        assert_eq!(daily_goal(&config), 0.0);
    }

    #[test]
    fn within_budget_day_is_good() {
        // target=700, week => dailyGoal=100; Nov 7 spends 80
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 7);
        let txs = vec![expense("Nov 7", -80.0)];
        let month = classify_month(&txs, &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(7), Some(DayStatus::Good));
    }

    #[test]
    fn over_budget_day_is_exceeded() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 7);
        let txs = vec![expense("Nov 7", -150.0)];
        let month = classify_month(&txs, &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(7), Some(DayStatus::Exceeded));
    }

    #[test]
    fn day_before_goal_start_is_inactive() {
        let config = weekly_goal(ymd(2024, 11, 10), 700.0);
        let today = ymd(2024, 11, 5);
        let month = classify_month(&[], &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(7), Some(DayStatus::Inactive));
    }

    #[test]
    fn in_window_day_after_today_is_future() {
        let config = GoalConfig {
            target: 700.0,
            period: GoalPeriod::Month,
            start_date: ymd(2024, 11, 1),
        };
        let today = ymd(2024, 11, 5);
        let month = classify_month(&[], &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(20), Some(DayStatus::Future));
    }

    #[test]
    fn unparsable_date_contributes_to_no_bucket() {
        let today = ymd(2024, 11, 7);
        let txs = vec![expense("13/45", -150.0)];
        assert!(expenses_by_day(&txs, today).is_empty());
    }

    #[test]
    fn zero_target_marks_any_spend_exceeded() {
        let config = weekly_goal(ymd(2024, 11, 1), 0.0);
        let today = ymd(2024, 11, 7);
        let txs = vec![expense("Nov 5", -0.01)];
        let month = classify_month(&txs, &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(5), Some(DayStatus::Exceeded));
        // No-spend days stay good even with a zero threshold
        assert_eq!(month.status_for_day(4), Some(DayStatus::Good));
    }

    #[test]
    fn spending_exactly_the_goal_is_good() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 7);
        let txs = vec![expense("Nov 6", -100.0)];
        let month = classify_month(&txs, &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(6), Some(DayStatus::Good));
    }

    #[test]
    fn one_cent_over_is_exceeded() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 7);
        let txs = vec![expense("Nov 6", -100.01)];
        let month = classify_month(&txs, &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(6), Some(DayStatus::Exceeded));
    }

    #[test]
    fn goal_end_is_inclusive() {
        // Week starting Nov 1 ends Nov 7
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        assert_eq!(config.end_date(), ymd(2024, 11, 7));
        let today = ymd(2024, 11, 30);
        let month = classify_month(&[], &config, today, 2024, 11).unwrap();
        assert_eq!(month.status_for_day(7), Some(DayStatus::Good));
        assert_eq!(month.status_for_day(8), Some(DayStatus::Inactive));
    }

    #[test]
    fn statuses_partition_in_window_past_days() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 4);
        let txs = vec![expense("Nov 2", -150.0), expense("Nov 3", -40.0)];
        let month = classify_month(&txs, &config, today, 2024, 11).unwrap();
        for day in 1..=4u32 {
            let status = month.status_for_day(day).unwrap();
            assert!(
                status == DayStatus::Good || status == DayStatus::Exceeded,
                "day {} got {:?}",
                day,
                status
            );
        }
    }

    #[test]
    fn streak_counts_back_from_today() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 5);
        // Nov 3 exceeded; Nov 4 and Nov 5 under
        let txs = vec![
            expense("Nov 3", -150.0),
            expense("Nov 4", -20.0),
            expense("Nov 5", -30.0),
        ];
        let buckets = expenses_by_day(&txs, today);
        assert_eq!(goal_streak(&buckets, &config, 100.0, today), 2);
    }

    #[test]
    fn streak_is_zero_when_yesterday_exceeded() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 5);
        let txs = vec![expense("Nov 5", -150.0)];
        let buckets = expenses_by_day(&txs, today);
        assert_eq!(goal_streak(&buckets, &config, 100.0, today), 0);
    }

    #[test]
    fn streak_stops_at_goal_start() {
        let config = weekly_goal(ymd(2024, 11, 3), 700.0);
        let today = ymd(2024, 11, 5);
        let buckets = HashMap::new();
        // Nov 3, 4, 5 inside the window with zero spend
        assert_eq!(goal_streak(&buckets, &config, 100.0, today), 3);
    }

    #[test]
    fn streak_with_zero_goal_counts_no_spend_days() {
        let config = weekly_goal(ymd(2024, 11, 1), 0.0);
        let today = ymd(2024, 11, 3);
        let buckets = HashMap::new();
        assert_eq!(goal_streak(&buckets, &config, 0.0, today), 3);

        let txs = vec![expense("Nov 3", -5.0)];
        let buckets = expenses_by_day(&txs, today);
        assert_eq!(goal_streak(&buckets, &config, 0.0, today), 0);
    }

    #[test]
    fn income_never_lands_in_day_buckets() {
        let today = ymd(2024, 11, 7);
        let txs = vec![tx("Nov 5", 500.0, TransactionKind::Income)];
        assert!(expenses_by_day(&txs, today).is_empty());
    }

    #[test]
    fn classification_is_idempotent() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let today = ymd(2024, 11, 7);
        let txs = vec![expense("Nov 3", -150.0), expense("Nov 5", -10.0)];
        let a = classify_month(&txs, &config, today, 2024, 11).unwrap();
        let b = classify_month(&txs, &config, today, 2024, 11).unwrap();
        assert_eq!(a.statuses, b.statuses);
        assert_eq!(a.streak, b.streak);
        assert_eq!(a.day_spend, b.day_spend);
    }

    #[test]
    fn invalid_display_month_is_an_error() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        assert!(classify_month(&[], &config, ymd(2024, 11, 7), 2024, 13).is_err());
    }

    #[test]
    fn calendar_alignment_metadata() {
        let config = weekly_goal(ymd(2024, 11, 1), 700.0);
        let month = classify_month(&[], &config, ymd(2024, 11, 7), 2024, 11).unwrap();
        // Nov 1, 2024 is a Friday
        assert_eq!(month.first_weekday, 5);
        assert_eq!(month.statuses.len(), 30);
    }
}
