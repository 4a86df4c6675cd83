//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ChattyWallet - Track spending, keep a goal, argue with a cat
#[derive(Parser)]
#[command(name = "wallet")]
#[command(about = "Local-first spending tracker with an AI savings coach", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "wallet.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Add a ledger entry
    Add {
        /// What the money was for
        description: String,

        /// Amount spent (or received with --income)
        amount: f64,

        /// Entry date, free text ("Nov 7", "11/07/24", "2024-11-07").
        /// Defaults to today.
        #[arg(short, long)]
        date: Option<String>,

        /// Time label for display ("14:30")
        #[arg(short, long)]
        time: Option<String>,

        /// Record as income instead of expense
        #[arg(long)]
        income: bool,

        /// Category (free text, bucketed case-insensitively)
        #[arg(short, long)]
        category: Option<String>,

        /// How the purchase felt: happy, neutral, sad
        #[arg(short, long)]
        mood: Option<String>,

        /// Free-text note
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List ledger entries (newest first)
    List {
        /// Only show one kind: expense, income
        #[arg(short, long)]
        kind: Option<String>,

        /// Maximum entries to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Print entries as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a ledger entry by ID
    Delete {
        /// Entry ID (see 'wallet list')
        id: i64,
    },

    /// Show the goal tracker calendar for a month
    Tracker {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show expense totals per month
    Monthly {
        /// Break one month down by category (YYYY-MM)
        #[arg(short, long)]
        breakdown: Option<String>,
    },

    /// Show spending grouped by mood
    Moods,

    /// Show or change the spending goal
    Goal {
        #[command(subcommand)]
        action: Option<GoalAction>,
    },

    /// Talk to a savings coach persona
    Chat {
        /// Message to send; omit with --history or --clear
        message: Option<String>,

        /// Coach persona: catty, future_me
        #[arg(short, long, default_value = "catty")]
        persona: String,

        /// Show past conversation instead of sending a message
        #[arg(long)]
        history: bool,

        /// Forget this persona's conversation
        #[arg(long)]
        clear: bool,
    },

    /// Export the ledger to CSV
    Export {
        /// Output file path
        #[arg(short, long, default_value = "wallet-export.csv")]
        output: PathBuf,
    },

    /// Show database and configuration status
    Status,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Set the spending goal
    Set {
        /// Target amount for the whole goal window
        target: f64,

        /// Window length: week, 2weeks, 3weeks, month
        #[arg(short, long, default_value = "month")]
        period: String,

        /// First day of the window (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,
    },

    /// Push local settings to the configured remote backend (one time)
    ///
    /// Requires WALLET_BACKEND_URL and WALLET_USER_ID.
    Migrate,
}
