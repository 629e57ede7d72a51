//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Monthly budget commands (set, show, history)
//! - `core` - Core commands (init, seed) and shared utilities (open_db)
//! - `reports` - Monthly summary and yearly overview
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (add, list, show, edit, delete)

pub mod budget;
pub mod core;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budget::*;
pub use core::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
