//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{
    Database, NewTransaction, Pagination, Transaction, TransactionFilter, TransactionKind,
    TransactionUpdate,
};

use super::truncate;

/// Filters and paging for `tally transactions list`
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page: i64,
    pub limit: i64,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            kind: None,
            category: None,
            from: None,
            to: None,
            min: None,
            max: None,
        }
    }
}

fn format_amount(tx: &Transaction) -> String {
    match tx.kind {
        TransactionKind::Expense => format!("\x1b[31m-${:.2}\x1b[0m", tx.amount), // Red for expenses
        TransactionKind::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount), // Green for income
    }
}

fn print_transaction(tx: &Transaction) {
    println!("   ID:       {}", tx.id);
    println!("   Date:     {}", tx.date);
    println!("   Kind:     {}", tx.kind);
    println!("   Category: {}", tx.category);
    println!("   Amount:   {:.2}", tx.amount);
    if let Some(note) = &tx.note {
        println!("   Note:     {}", note);
    }
}

pub fn cmd_add(
    db: &Database,
    user: &str,
    kind: TransactionKind,
    category: &str,
    amount: Decimal,
    date: NaiveDate,
    note: Option<String>,
) -> Result<()> {
    let mut new_tx = NewTransaction::new(kind, category, amount, date);
    new_tx.note = note;

    let tx = db
        .insert_transaction(user, &new_tx)
        .context("Failed to record transaction")?;

    println!("✅ Recorded transaction #{}", tx.id);
    print_transaction(&tx);

    Ok(())
}

pub fn cmd_transactions_list(db: &Database, user: &str, options: &ListOptions) -> Result<()> {
    let filter = TransactionFilter::new(user)
        .kind(options.kind)
        .category(options.category.as_deref())
        .date_range(options.from, options.to)
        .amount_range(options.min, options.max);

    let total = db.count_transactions(&filter)?;
    let pagination = Pagination::new(total, options.page, options.limit);
    let transactions = db.list_transactions(&filter, pagination.limit, pagination.offset())?;

    if transactions.is_empty() {
        if total == 0 {
            println!("No transactions found. Record one with:");
            println!("  tally add expense Groceries 42.50");
        } else {
            println!(
                "No transactions on page {} ({} pages).",
                pagination.page, pagination.pages
            );
        }
        return Ok(());
    }

    println!();
    println!(
        "📝 Transactions (page {} of {}, {} total)",
        pagination.page, pagination.pages, pagination.total
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &transactions {
        println!(
            "   [{:>4}] {} │ {:>20} │ {:15} │ {}",
            tx.id,
            tx.date,
            format_amount(tx),
            truncate(&tx.category, 15),
            truncate(tx.note.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}

pub fn cmd_transactions_show(db: &Database, user: &str, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(user, id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    println!();
    println!("📄 Transaction");
    println!("   ─────────────────────────────");
    print_transaction(&tx);

    Ok(())
}

pub fn cmd_transactions_edit(
    db: &Database,
    user: &str,
    id: i64,
    update: TransactionUpdate,
) -> Result<()> {
    if update.is_empty() {
        anyhow::bail!(
            "Nothing to change. Pass at least one of --kind, --category, --amount, --date, --note"
        );
    }

    let tx = db
        .update_transaction(user, id, &update)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    println!("✏️  Updated transaction #{}", tx.id);
    print_transaction(&tx);

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    if !db.delete_transaction(user, id)? {
        anyhow::bail!("Transaction {} not found", id);
    }

    println!("🗑️  Deleted transaction #{}", id);

    Ok(())
}
