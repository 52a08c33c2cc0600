mod common;

use std::collections::HashSet;

use anyhow::Result;
use moneta::application::{AppError, LedgerService};
use moneta::domain::{Theme, TransactionFilter, TransactionKind};
use moneta::storage::{KeyValueStore, SqliteStore, TRANSACTIONS_KEY};
use tempfile::TempDir;
use uuid::Uuid;

use common::{add_expense, add_income, parse_date, seed_may_2024, test_service};

#[tokio::test]
async fn test_add_then_list_roundtrip() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let added = service
        .add(
            TransactionKind::Income,
            "Salary".to_string(),
            500000,
            parse_date("2024-05-01"),
            Some("May paycheck".to_string()),
        )
        .await?;

    let listed = service.list(&TransactionFilter::default());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], added);
    assert_eq!(listed[0].kind, TransactionKind::Income);
    assert_eq!(listed[0].category, "Salary");
    assert_eq!(listed[0].amount_cents, 500000);
    assert_eq!(listed[0].date_str(), "2024-05-01");
    assert_eq!(listed[0].note, "May paycheck");

    Ok(())
}

#[tokio::test]
async fn test_add_assigns_pairwise_distinct_ids() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    for i in 0..20 {
        add_expense(&mut service, "Food", 100 + i, "2024-05-03").await?;
    }

    let ids: HashSet<_> = service.transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 20);

    Ok(())
}

#[tokio::test]
async fn test_persistence_across_connections() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("ledger.db");
    let db_path = db_path.to_str().unwrap();

    let added = {
        let mut service = LedgerService::init(db_path).await?;
        seed_may_2024(&mut service).await?;
        add_expense(&mut service, "Food", 3000, "2024-05-10").await?
    };

    // A fresh service over the same database restores the collection.
    let service = LedgerService::connect(db_path).await?;
    let listed = service.list(&TransactionFilter::default());
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[2], added);

    Ok(())
}

#[tokio::test]
async fn test_update_replaces_record_wholesale() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let original = add_expense(&mut service, "Rent", 150000, "2024-05-02").await?;

    let updated = service
        .update(
            original.id,
            TransactionKind::Expense,
            "Housing".to_string(),
            160000,
            parse_date("2024-05-03"),
            Some("rent + fees".to_string()),
        )
        .await?;

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.category, "Housing");
    assert_eq!(updated.amount_cents, 160000);
    assert_eq!(updated.note, "rent + fees");

    let listed = service.list(&TransactionFilter::default());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], updated);

    Ok(())
}

#[tokio::test]
async fn test_update_missing_fails_and_leaves_collection_unchanged() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    seed_may_2024(&mut service).await?;

    let before = service.list(&TransactionFilter::default());
    let result = service
        .update(
            Uuid::new_v4(),
            TransactionKind::Expense,
            "Rent".to_string(),
            1,
            parse_date("2024-05-02"),
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::TransactionNotFound(_))));
    assert_eq!(service.list(&TransactionFilter::default()), before);

    Ok(())
}

#[tokio::test]
async fn test_remove_is_idempotent() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let txn = add_expense(&mut service, "Food", 1000, "2024-05-03").await?;

    assert!(service.remove(txn.id).await);
    assert!(!service.remove(txn.id).await);
    assert!(service.is_empty());

    // Removing from an empty ledger is also fine.
    assert!(!service.remove(Uuid::new_v4()).await);

    Ok(())
}

#[tokio::test]
async fn test_clear_twice_leaves_empty() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    seed_may_2024(&mut service).await?;

    service.clear().await;
    assert!(service.is_empty());

    service.clear().await;
    assert!(service.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_add_rejects_negative_amount_and_empty_category() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let result = service
        .add(
            TransactionKind::Expense,
            "Rent".to_string(),
            -1,
            parse_date("2024-05-02"),
            None,
        )
        .await;
    assert!(matches!(result, Err(AppError::InvalidAmount(_))));

    let result = service
        .add(
            TransactionKind::Expense,
            "   ".to_string(),
            1000,
            parse_date("2024-05-02"),
            None,
        )
        .await;
    assert!(matches!(result, Err(AppError::EmptyCategory)));

    assert!(service.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_zero_amount_is_allowed() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let txn = add_expense(&mut service, "Freebie", 0, "2024-05-05").await?;
    assert_eq!(txn.amount_cents, 0);

    Ok(())
}

#[tokio::test]
async fn test_corrupt_snapshot_loads_empty_and_ledger_stays_usable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("ledger.db");
    let db_path = db_path.to_str().unwrap();

    let store = SqliteStore::init(&format!("sqlite:{}?mode=rwc", db_path)).await?;
    store.save(TRANSACTIONS_KEY, "definitely not json").await?;

    let mut service = LedgerService::connect(db_path).await?;
    assert!(service.is_empty());

    // The bad snapshot is simply replaced on the next mutation.
    add_income(&mut service, "Salary", 500000, "2024-05-01").await?;
    drop(service);

    let service = LedgerService::connect(db_path).await?;
    assert_eq!(service.transactions().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_theme_defaults_to_light_and_roundtrips() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("ledger.db");
    let db_path = db_path.to_str().unwrap();

    let service = LedgerService::init(db_path).await?;
    assert_eq!(service.theme().await, Theme::Light);

    service.set_theme(Theme::Dark).await?;
    drop(service);

    let service = LedgerService::connect(db_path).await?;
    assert_eq!(service.theme().await, Theme::Dark);

    Ok(())
}

#[tokio::test]
async fn test_get_returns_stored_record() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let txn = add_expense(&mut service, "Food", 1000, "2024-05-03").await?;
    assert_eq!(service.get(txn.id)?, txn);

    let missing = service.get(Uuid::new_v4());
    assert!(matches!(missing, Err(AppError::TransactionNotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_category_is_trimmed_on_add() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let txn = service
        .add(
            TransactionKind::Expense,
            "  Food  ".to_string(),
            1000,
            parse_date("2024-05-03"),
            None,
        )
        .await?;
    assert_eq!(txn.category, "Food");

    Ok(())
}
