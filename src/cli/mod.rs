use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::LedgerService;
use crate::domain::{
    Theme, TransactionFilter, TransactionId, TransactionKind, format_cents, parse_cents,
};
use crate::io::Exporter;

/// Moneta - Income and Expense Tracker
#[derive(Parser)]
#[command(name = "moneta")]
#[command(about = "A local-first income and expense tracker")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "moneta.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a new transaction
    Add {
        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Transaction type: income, expense
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Category (e.g., "Salary", "Rent")
        #[arg(short, long)]
        category: String,

        /// Date of the transaction (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Edit an existing transaction (unset fields keep their current value)
    Edit {
        /// Transaction ID
        id: String,

        /// New transaction type: income, expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New amount (e.g., "50.00" or "50")
        #[arg(short, long)]
        amount: Option<String>,

        /// New date (ISO 8601 format: YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Delete all transactions
    Clear {
        /// Confirm deleting everything
        #[arg(long)]
        yes: bool,
    },

    /// List transactions, most recent first
    List {
        /// Only show transactions whose date starts with this prefix (e.g., "2024-05")
        #[arg(short, long)]
        month: Option<String>,

        /// Only show transactions whose category or note contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show income, expense and balance totals
    Summary {
        /// Only count transactions whose date starts with this prefix (e.g., "2024-05")
        #[arg(short, long)]
        month: Option<String>,

        /// Only count transactions whose category or note contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the expense distribution per category
    Breakdown {
        /// Only count transactions whose date starts with this prefix (e.g., "2024-05")
        #[arg(short, long)]
        month: Option<String>,

        /// Only count transactions whose category or note contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Export data to CSV
    Export {
        /// What to export: transactions, breakdown
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show or set the color theme
    Theme {
        /// Theme to set: light, dark (omit to show the current theme)
        theme: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                amount,
                kind,
                category,
                date,
                note,
            } => {
                let mut service = LedgerService::connect(&self.database).await?;
                let kind = parse_kind(&kind)?;
                let amount_cents =
                    parse_cents(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
                let date = parse_date_or_today(date.as_deref())?;

                let transaction = service.add(kind, category, amount_cents, date, note).await?;

                println!(
                    "Recorded {}: {} {} on {} ({})",
                    transaction.kind,
                    format_cents(transaction.amount_cents),
                    transaction.category,
                    transaction.date_str(),
                    transaction.id
                );
            }

            Commands::Edit {
                id,
                kind,
                category,
                amount,
                date,
                note,
            } => {
                let mut service = LedgerService::connect(&self.database).await?;
                let id = parse_id(&id)?;

                // Full-replace semantics: fetch the record and merge the
                // given flags into it before updating.
                let existing = service.get(id)?;

                let kind = match kind {
                    Some(raw) => parse_kind(&raw)?,
                    None => existing.kind,
                };
                let amount_cents = match amount {
                    Some(raw) => parse_cents(&raw)
                        .context("Invalid amount format. Use '50.00' or '50'")?,
                    None => existing.amount_cents,
                };
                let date = match date {
                    Some(raw) => parse_date(&raw)?,
                    None => existing.date,
                };
                let category = category.unwrap_or(existing.category);
                let note = note.unwrap_or(existing.note);

                let updated = service
                    .update(id, kind, category, amount_cents, date, Some(note))
                    .await?;

                println!(
                    "Updated transaction: {} {} {} on {} ({})",
                    updated.kind,
                    format_cents(updated.amount_cents),
                    updated.category,
                    updated.date_str(),
                    updated.id
                );
            }

            Commands::Delete { id } => {
                let mut service = LedgerService::connect(&self.database).await?;
                let id = parse_id(&id)?;

                if service.remove(id).await {
                    println!("Deleted transaction: {}", id);
                } else {
                    println!("No transaction with id {} (nothing to delete)", id);
                }
            }

            Commands::Clear { yes } => {
                let mut service = LedgerService::connect(&self.database).await?;

                if !yes {
                    println!("This deletes all transactions. Re-run with --yes to confirm.");
                    return Ok(());
                }

                let count = service.transactions().len();
                service.clear().await;
                println!("Cleared {} transaction(s)", count);
            }

            Commands::List { month, search } => {
                let service = LedgerService::connect(&self.database).await?;
                run_list_command(&service, build_filter(month, search));
            }

            Commands::Summary { month, search } => {
                let service = LedgerService::connect(&self.database).await?;
                run_summary_command(&service, build_filter(month, search));
            }

            Commands::Breakdown { month, search } => {
                let service = LedgerService::connect(&self.database).await?;
                run_breakdown_command(&service, build_filter(month, search));
            }

            Commands::Export {
                export_type,
                output,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                run_export_command(&service, &export_type, output.as_deref())?;
            }

            Commands::Theme { theme } => {
                let service = LedgerService::connect(&self.database).await?;
                match theme {
                    None => println!("{}", service.theme().await),
                    Some(raw) => {
                        let theme = Theme::from_str(&raw).ok_or_else(|| {
                            anyhow::anyhow!("Invalid theme '{}'. Valid themes: light, dark", raw)
                        })?;
                        service.set_theme(theme).await?;
                        println!("Theme set to {}", theme);
                    }
                }
            }
        }

        Ok(())
    }
}

fn run_list_command(service: &LedgerService, filter: TransactionFilter) {
    let transactions = service.list_for_display(&filter);

    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<12} {:<8} {:>12} {:<20} {:<24} {}",
        "DATE", "TYPE", "AMOUNT", "CATEGORY", "NOTE", "ID"
    );
    println!("{}", "-".repeat(116));
    for t in transactions {
        println!(
            "{:<12} {:<8} {:>12} {:<20} {:<24} {}",
            t.date_str(),
            t.kind,
            format_cents(t.amount_cents),
            t.category,
            t.note,
            t.id
        );
    }
}

fn run_summary_command(service: &LedgerService, filter: TransactionFilter) {
    let totals = service.totals(&filter);

    println!("{:<10} {:>14}", "Income", format_cents(totals.income));
    println!("{:<10} {:>14}", "Expense", format_cents(totals.expense));
    println!("{}", "-".repeat(25));
    println!("{:<10} {:>14}", "Balance", format_cents(totals.balance));
}

fn run_breakdown_command(service: &LedgerService, filter: TransactionFilter) {
    let report = service.breakdown_report(&filter);

    if report.categories.is_empty() {
        println!("No expenses found.");
        return;
    }

    println!("{:<20} {:>12} {:>8}", "CATEGORY", "AMOUNT", "SHARE");
    println!("{}", "-".repeat(42));
    for share in &report.categories {
        println!(
            "{:<20} {:>12} {:>7.1}%",
            share.category,
            format_cents(share.total),
            share.share
        );
    }
    println!("{}", "-".repeat(42));
    println!("{:<20} {:>12}", "TOTAL", format_cents(report.total));
}

fn run_export_command(
    service: &LedgerService,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    let exporter = Exporter::new(service);

    match export_type {
        "transactions" => {
            if service.is_empty() {
                println!("No data to export.");
                return Ok(());
            }
            match output {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("Failed to create output file '{}'", path))?;
                    let count = exporter.export_transactions_csv(file)?;
                    println!("Exported {} transaction(s) to {}", count, path);
                }
                None => {
                    exporter.export_transactions_csv(std::io::stdout())?;
                }
            }
        }

        "breakdown" => {
            let filter = TransactionFilter::default();
            match output {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("Failed to create output file '{}'", path))?;
                    let count = exporter.export_breakdown_csv(file, &filter)?;
                    println!("Exported {} breakdown row(s) to {}", count, path);
                }
                None => {
                    exporter.export_breakdown_csv(std::io::stdout(), &filter)?;
                }
            }
        }

        other => {
            anyhow::bail!(
                "Unknown export type '{}'. Valid types: transactions, breakdown",
                other
            );
        }
    }

    Ok(())
}

fn build_filter(month: Option<String>, search: Option<String>) -> TransactionFilter {
    TransactionFilter { month, search }
}

fn parse_kind(raw: &str) -> Result<TransactionKind> {
    TransactionKind::from_str(raw).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid transaction type '{}'. Valid types: income, expense",
            raw
        )
    })
}

fn parse_id(raw: &str) -> Result<TransactionId> {
    Uuid::parse_str(raw).context("Invalid transaction ID format (expected UUID)")
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", raw))
}

fn parse_date_or_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => parse_date(raw),
        None => Ok(Utc::now().date_naive()),
    }
}
