// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use moneta::application::LedgerService;
use moneta::domain::{Transaction, TransactionKind};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Record an income transaction with no note
pub async fn add_income(
    service: &mut LedgerService,
    category: &str,
    amount_cents: i64,
    date: &str,
) -> Result<Transaction> {
    let txn = service
        .add(
            TransactionKind::Income,
            category.to_string(),
            amount_cents,
            parse_date(date),
            None,
        )
        .await?;
    Ok(txn)
}

/// Record an expense transaction with no note
pub async fn add_expense(
    service: &mut LedgerService,
    category: &str,
    amount_cents: i64,
    date: &str,
) -> Result<Transaction> {
    let txn = service
        .add(
            TransactionKind::Expense,
            category.to_string(),
            amount_cents,
            parse_date(date),
            None,
        )
        .await?;
    Ok(txn)
}

/// Seed the canonical May 2024 data set: salary in, rent out.
pub async fn seed_may_2024(service: &mut LedgerService) -> Result<()> {
    add_income(service, "Salary", 500000, "2024-05-01").await?;
    add_expense(service, "Rent", 150000, "2024-05-02").await?;
    Ok(())
}
