//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tally_core::{Month, TransactionKind, Year};

/// Tally - Track income, expenses and monthly budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with monthly budgets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to tally.db in the platform data directory)
    #[arg(long, global = true, env = "TALLY_DB")]
    pub db: Option<PathBuf>,

    /// User whose records are read and written
    #[arg(long, global = true, env = "TALLY_USER", default_value = tally_server::LOCAL_DEV_USER)]
    pub user: String,

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

    /// Record a transaction
    Add {
        /// income or expense
        kind: TransactionKind,

        /// Category (e.g. Rent, Groceries, Salary)
        category: String,

        /// Positive amount
        amount: Decimal,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },

    /// Manage transactions (list, show, edit, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets (set, show, history)
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Show totals, budget utilization and spending by category for a month
    Summary {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<Month>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show income, expense and budget for every month of a year
    Overview {
        /// Year (YYYY, defaults to the current year)
        #[arg(short, long)]
        year: Option<Year>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replace the user's data with demo records for the current month
    Seed,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires an identity proxy header or an API key.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: i64,

        /// Transactions per page
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only income or only expense
        #[arg(long)]
        kind: Option<TransactionKind>,

        /// Exact category
        #[arg(long)]
        category: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Minimum amount
        #[arg(long)]
        min: Option<Decimal>,

        /// Maximum amount
        #[arg(long)]
        max: Option<Decimal>,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: i64,
    },

    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: i64,

        #[arg(long)]
        kind: Option<TransactionKind>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        amount: Option<Decimal>,

        #[arg(long)]
        date: Option<NaiveDate>,

        /// New note (empty string clears it)
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the budget for a month (replaces an existing one)
    Set {
        /// Positive amount
        amount: Decimal,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Show the budget for a month
    Show {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// List all budgets, newest month first
    History,
}
