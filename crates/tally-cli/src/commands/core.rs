//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `default_db_path` / `open_db` - Locating and opening the database
//! - `cmd_init` - Initialize the database
//! - `cmd_seed` - Load demo data

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{seed_demo, Database};

/// `tally.db` under the platform data directory, or the working directory
/// when there is none
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tally").join("tally.db"))
        .unwrap_or_else(|| PathBuf::from("tally.db"))
}

/// Open the database, creating its parent directory if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: tally add expense Groceries 42.50");
    println!("  2. Set a budget: tally budget set 3000");
    println!("  3. Start web UI: tally serve");

    Ok(())
}

pub fn cmd_seed(db: &Database, user: &str, today: NaiveDate) -> Result<()> {
    let result = seed_demo(db, user, today).context("Failed to seed demo data")?;

    if result.cleared > 0 {
        println!("🧹 Cleared {} existing records for {}", result.cleared, user);
    }
    println!(
        "🌱 Seeded {} transactions and a budget for {}",
        result.transactions, result.budget_month
    );
    println!();
    println!("   Try: tally summary");

    Ok(())
}
