//! Report command implementations

use anyhow::{Context, Result};
use tally_core::{Database, Month, MonthlyOverview, MonthlySummary, ReportEngine, Year};

use super::truncate;

pub async fn cmd_summary(
    engine: &ReportEngine<Database>,
    user: &str,
    month: Option<Month>,
    json: bool,
) -> Result<()> {
    let summary = engine
        .monthly_summary(user, month)
        .await
        .context("Failed to build monthly summary")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}

pub async fn cmd_overview(
    engine: &ReportEngine<Database>,
    user: &str,
    year: Option<Year>,
    json: bool,
) -> Result<()> {
    let overview = engine
        .yearly_overview(user, year)
        .await
        .context("Failed to build yearly overview")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print!("{}", format_overview(&overview));
    }

    Ok(())
}

/// Render a monthly summary as a text table
pub fn format_summary(summary: &MonthlySummary) -> String {
    let mut out = String::new();
    let budget = &summary.budget;

    out.push('\n');
    out.push_str(&format!("📊 Summary for {}\n", summary.month));
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str(&format!("   Income:    {:>12.2}\n", summary.income));
    out.push_str(&format!("   Expense:   {:>12.2}\n", summary.expense));
    out.push_str(&format!("   Balance:   {:>12.2}\n", summary.balance));
    out.push('\n');
    out.push_str(&format!("   Budget:    {:>12.2}\n", budget.amount));
    out.push_str(&format!("   Used:      {:>12.2}\n", budget.used));
    out.push_str(&format!("   Remaining: {:>12.2}\n", budget.remaining));
    out.push_str(&format!(
        "   Used %:    {:>11.1}%\n",
        budget.percentage_used
    ));

    if budget.remaining.is_sign_negative() && !budget.remaining.is_zero() {
        out.push_str("   ⚠️  Over budget\n");
    }

    out.push('\n');
    if summary.category_breakdown.is_empty() {
        out.push_str("   No expenses this month.\n");
    } else {
        out.push_str(&format!("   {:25} │ {:>12}\n", "Category", "Amount"));
        out.push_str("   ──────────────────────────┼─────────────\n");
        for entry in &summary.category_breakdown {
            out.push_str(&format!(
                "   {:25} │ {:>12.2}\n",
                truncate(&entry.category, 25),
                entry.amount
            ));
        }
    }

    out
}

/// Render a yearly overview as one row per month
pub fn format_overview(rows: &[MonthlyOverview]) -> String {
    let mut out = String::new();

    if let Some(first) = rows.first() {
        out.push('\n');
        out.push_str(&format!("📅 Overview for {}\n", first.month.year()));
    }
    out.push_str(&format!(
        "   {:7} │ {:>12} │ {:>12} │ {:>12} │ {:>12}\n",
        "Month", "Income", "Expense", "Balance", "Budget"
    ));
    out.push_str("   ────────┼──────────────┼──────────────┼──────────────┼─────────────\n");

    for row in rows {
        out.push_str(&format!(
            "   {:7} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>12.2}\n",
            row.month.to_string(),
            row.income,
            row.expense,
            row.balance,
            row.budget_amount
        ));
    }

    out
}
