//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init                          Initialize database
//!   tally add expense Rent 1200         Record a transaction
//!   tally budget set 3000               Set this month's budget
//!   tally summary --month 2024-03       Monthly totals and budget utilization
//!   tally overview --year 2024          Month-by-month totals for a year
//!   tally serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tally_core::ReportEngine;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db_path = cli.db.unwrap_or_else(commands::default_db_path);
    let user = cli.user;

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Add {
            kind,
            category,
            amount,
            date,
            note,
        } => {
            let engine = ReportEngine::new(commands::open_db(&db_path)?);
            let date = date.unwrap_or_else(|| engine.periods().today());
            commands::cmd_add(engine.store(), &user, kind, &category, amount, date, note)
        }
        Commands::Transactions { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None => commands::cmd_transactions_list(
                    &db,
                    &user,
                    &commands::ListOptions::default(),
                ),
                Some(TransactionsAction::List {
                    page,
                    limit,
                    kind,
                    category,
                    from,
                    to,
                    min,
                    max,
                }) => commands::cmd_transactions_list(
                    &db,
                    &user,
                    &commands::ListOptions {
                        page,
                        limit,
                        kind,
                        category,
                        from,
                        to,
                        min,
                        max,
                    },
                ),
                Some(TransactionsAction::Show { id }) => {
                    commands::cmd_transactions_show(&db, &user, id)
                }
                Some(TransactionsAction::Edit {
                    id,
                    kind,
                    category,
                    amount,
                    date,
                    note,
                }) => commands::cmd_transactions_edit(
                    &db,
                    &user,
                    id,
                    tally_core::TransactionUpdate {
                        kind,
                        category,
                        amount,
                        date,
                        note,
                    },
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, &user, id)
                }
            }
        }
        Commands::Budget { action } => {
            let engine = ReportEngine::new(commands::open_db(&db_path)?);
            let periods = engine.periods();
            match action {
                None => commands::cmd_budget_show(engine.store(), &user, periods.current_month()),
                Some(BudgetAction::Set { amount, month }) => {
                    commands::cmd_budget_set(engine.store(), &user, periods.month(month), amount)
                }
                Some(BudgetAction::Show { month }) => {
                    commands::cmd_budget_show(engine.store(), &user, periods.month(month))
                }
                Some(BudgetAction::History) => commands::cmd_budget_history(engine.store(), &user),
            }
        }
        Commands::Summary { month, json } => {
            let engine = ReportEngine::new(commands::open_db(&db_path)?);
            commands::cmd_summary(&engine, &user, month, json).await
        }
        Commands::Overview { year, json } => {
            let engine = ReportEngine::new(commands::open_db(&db_path)?);
            commands::cmd_overview(&engine, &user, year, json).await
        }
        Commands::Seed => {
            let engine = ReportEngine::new(commands::open_db(&db_path)?);
            commands::cmd_seed(engine.store(), &user, engine.periods().today())
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => commands::cmd_serve(&db_path, &host, port, no_auth, static_dir.as_deref()).await,
    }
}
