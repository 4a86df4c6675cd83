//! Domain models for chattywallet

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A ledger entry
///
/// `date` is kept as the free-text string the user entered ("Nov 7",
/// "11/07/24", "2024-11-07"). Day-bucketed analytics normalize it through
/// [`crate::dates::parse_flexible_date`]; entries that fail to parse are
/// excluded from date buckets but still count toward overall totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: String,
    /// Optional wall-clock time label ("14:30"), display only
    pub time: Option<String>,
    pub description: String,
    /// Signed magnitude; the sign encodes direction redundantly with `kind`
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub mood: Option<Mood>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Absolute amount, regardless of how the sign was recorded
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// A transaction as it arrives for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: String,
    pub time: Option<String>,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub mood: Option<Mood>,
    pub notes: Option<String>,
}

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-reported mood attached to an expense
///
/// Closed set, validated at the boundary. Free-text mood labels from
/// legacy data that don't match are dropped rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Happy => "🙂",
            Self::Neutral => "😐",
            Self::Sad => "🫠",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Neutral => "Neutral",
            Self::Sad => "Sad",
        }
    }

    pub fn all() -> &'static [Mood] {
        &[Self::Happy, Self::Neutral, Self::Sad]
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Self::Happy),
            "neutral" => Ok(Self::Neutral),
            "sad" => Ok(Self::Sad),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Length of the spending-goal window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Week,
    #[serde(rename = "2weeks")]
    TwoWeeks,
    #[serde(rename = "3weeks")]
    ThreeWeeks,
    #[default]
    Month,
}

impl GoalPeriod {
    /// Number of days in the window
    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::TwoWeeks => 14,
            Self::ThreeWeeks => 21,
            Self::Month => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::TwoWeeks => "2weeks",
            Self::ThreeWeeks => "3weeks",
            Self::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "1 Week",
            Self::TwoWeeks => "2 Weeks",
            Self::ThreeWeeks => "3 Weeks",
            Self::Month => "1 Month",
        }
    }
}

impl std::str::FromStr for GoalPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "1week" => Ok(Self::Week),
            "2weeks" => Ok(Self::TwoWeeks),
            "3weeks" => Ok(Self::ThreeWeeks),
            "month" | "1month" => Ok(Self::Month),
            _ => Err(format!("Unknown goal period: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending goal configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Target amount for the whole window
    pub target: f64,
    pub period: GoalPeriod,
    /// First day of the window, inclusive
    pub start_date: NaiveDate,
}

impl GoalConfig {
    /// Last day of the window, inclusive: start + (N - 1) days
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + chrono::Duration::days(self.period.days() - 1)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start_date && day <= self.end_date()
    }
}

/// Classification of a calendar day relative to the goal window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// In the window but after today
    Future,
    /// Spent more than the daily goal
    Exceeded,
    /// At or under the daily goal (zero spend included)
    Good,
    /// Outside the goal window
    Inactive,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Future => "future",
            Self::Exceeded => "exceeded",
            Self::Good => "good",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who said a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Coach,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Coach => "coach",
        }
    }
}

impl std::str::FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "coach" => Ok(Self::Coach),
            _ => Err(format!("Unknown chat role: {}", s)),
        }
    }
}

/// A cached chat exchange line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub role: ChatRole,
    /// Persona the message belongs to ("catty", "future_me")
    pub persona: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Expense total for one month
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    pub total: f64,
}

impl MonthSummary {
    /// `YYYY-MM` key used for bucketing
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// One category's share of a month
#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    /// Share of the month total, 0..=100
    pub percentage: f64,
}

/// Aggregates for one mood bucket
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MoodStats {
    pub mood: Mood,
    pub count: usize,
    pub total: f64,
    /// Share of mood-tagged transaction count, rounded percent
    pub count_percentage: u32,
    /// Share of mood-tagged spend, rounded percent
    pub amount_percentage: u32,
}

/// Headline progress numbers for the goal window
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub target: f64,
    pub total_expenses: f64,
    /// max(0, target - total_expenses)
    pub saved: f64,
    /// Rounded percent of target spent; 0 when target <= 0
    pub spending_percentage: u32,
    pub daily_goal: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
