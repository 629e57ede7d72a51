//! Budget command implementations

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tally_core::{Database, Month};

pub fn cmd_budget_set(db: &Database, user: &str, month: Month, amount: Decimal) -> Result<()> {
    let budget = db
        .set_budget(user, month, amount)
        .context("Failed to set budget")?;

    println!("✅ Budget for {} set to ${:.2}", budget.month, budget.amount);

    Ok(())
}

pub fn cmd_budget_show(db: &Database, user: &str, month: Month) -> Result<()> {
    match db.get_budget(user, month)? {
        Some(budget) => println!("💰 Budget for {}: ${:.2}", budget.month, budget.amount),
        None => {
            println!("No budget set for {}.", month);
            println!("  tally budget set <amount> --month {}", month);
        }
    }

    Ok(())
}

pub fn cmd_budget_history(db: &Database, user: &str) -> Result<()> {
    let budgets = db.budget_history(user)?;

    if budgets.is_empty() {
        println!("No budgets set yet.");
        return Ok(());
    }

    println!();
    println!("💰 Budget History");
    println!("   ─────────────────────────────");
    for budget in budgets {
        println!("   {} │ {:>12.2}", budget.month, budget.amount);
    }

    Ok(())
}
