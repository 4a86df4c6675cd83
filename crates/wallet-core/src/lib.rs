//! ChattyWallet Core Library
//!
//! Shared functionality for the ChattyWallet spending tracker:
//! - Database access and migrations
//! - Flexible date parsing for free-text entry dates
//! - Goal tracker calendar classification and streaks
//! - Monthly, category, and mood analytics
//! - Spending context assembler for coach prompts
//! - Prompt library for customizable coach personas
//! - Pluggable coach completion backends
//! - Settings persistence with local/remote stores

pub mod analytics;
pub mod coach;
pub mod context;
pub mod dates;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod prompts;
pub mod settings;
pub mod tracker;

/// Test utilities including mock completion server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{category_breakdown, goal_progress, monthly_totals, mood_stats, UNCATEGORIZED};
pub use coach::{CoachBackend, CoachClient, CompletionBackend, MockBackend};
pub use context::{SpendingContext, SpendingStatus, TransactionSnippet};
pub use dates::{date_key, month_key, parse_flexible_date};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    CategorySlice, ChatMessage, ChatRole, DayStatus, GoalConfig, GoalPeriod, GoalProgress, Mood,
    MoodStats, MonthSummary, NewTransaction, Transaction, TransactionKind,
};
pub use prompts::{PersonaId, Prompt, PromptLibrary};
pub use settings::{
    migrate_settings, LocalSettingsStore, RemoteSettingsStore, SettingsStore, UserSettings,
};
pub use tracker::{
    classify_day, classify_month, daily_goal, expenses_by_day, goal_streak, TrackerMonth,
};
