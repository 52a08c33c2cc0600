use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{
    Cents, Theme, Totals, Transaction, TransactionFilter, TransactionId, TransactionKind,
    category_breakdown, compute_totals, filter_transactions, sort_for_display,
};
use crate::storage::Repository;

use super::{AppError, BreakdownReport, build_breakdown_report};

/// Application service owning the transaction collection and all derived
/// computations. This is the primary interface for any client (CLI, TUI,
/// API, etc.).
///
/// The collection is loaded once at construction and kept in insertion
/// order; every mutation rewrites the whole persisted snapshot before
/// returning. Mutating methods take `&mut self`, so a single instance is
/// never mutated concurrently; to share one across tasks, wrap it in a
/// `tokio::sync::Mutex`.
pub struct LedgerService {
    repo: Repository,
    transactions: Vec<Transaction>,
}

impl LedgerService {
    /// Create a service over the given repository, restoring any persisted
    /// state. A missing or unreadable snapshot starts the ledger empty.
    pub async fn open(repo: Repository) -> Self {
        let transactions = repo.load_transactions().await;
        Self { repo, transactions }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::open(repo).await)
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::open(repo).await)
    }

    /// Service with no durable storage, mainly for tests.
    pub async fn in_memory() -> Self {
        Self::open(Repository::in_memory()).await
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a new transaction. Assigns a fresh id, appends, persists and
    /// returns the stored record.
    pub async fn add(
        &mut self,
        kind: TransactionKind,
        category: String,
        amount_cents: Cents,
        date: NaiveDate,
        note: Option<String>,
    ) -> Result<Transaction, AppError> {
        let (category, amount_cents) = validate(category, amount_cents)?;

        let mut transaction = Transaction::new(kind, category, amount_cents, date);
        if let Some(note) = note {
            transaction = transaction.with_note(note);
        }

        self.transactions.push(transaction.clone());
        self.persist().await;
        Ok(transaction)
    }

    /// Get a transaction by id.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, AppError> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(AppError::TransactionNotFound(id))
    }

    /// Replace the transaction with the given id wholesale, keeping its id
    /// and position. Fails if no such record exists, leaving the collection
    /// unchanged.
    pub async fn update(
        &mut self,
        id: TransactionId,
        kind: TransactionKind,
        category: String,
        amount_cents: Cents,
        date: NaiveDate,
        note: Option<String>,
    ) -> Result<Transaction, AppError> {
        let (category, amount_cents) = validate(category, amount_cents)?;

        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(AppError::TransactionNotFound(id))?;

        let mut replacement = Transaction::new(kind, category, amount_cents, date);
        replacement.id = id;
        if let Some(note) = note {
            replacement = replacement.with_note(note);
        }

        *slot = replacement.clone();
        self.persist().await;
        Ok(replacement)
    }

    /// Remove the transaction with the given id. Silent no-op when absent;
    /// returns whether anything was removed.
    pub async fn remove(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() < before;

        self.persist().await;
        removed
    }

    /// Empty the collection. Idempotent.
    pub async fn clear(&mut self) {
        self.transactions.clear();
        self.persist().await;
    }

    // ========================
    // Derived views
    // ========================

    /// All transactions matching the filter, in insertion order. Callers
    /// wanting display order should use [`Self::list_for_display`].
    pub fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        filter_transactions(&self.transactions, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Filtered transactions ordered by date descending, ties in insertion
    /// order.
    pub fn list_for_display(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let mut matched = self.list(filter);
        sort_for_display(&mut matched);
        matched
    }

    /// Income/expense/balance sums over the filtered transactions.
    pub fn totals(&self, filter: &TransactionFilter) -> Totals {
        compute_totals(&self.transactions, filter)
    }

    /// Summed expense amounts per category over the filtered transactions.
    pub fn category_breakdown(&self, filter: &TransactionFilter) -> HashMap<String, Cents> {
        category_breakdown(&self.transactions, filter)
    }

    /// The category breakdown shaped for presentation (sorted, with shares).
    pub fn breakdown_report(&self, filter: &TransactionFilter) -> BreakdownReport {
        build_breakdown_report(self.category_breakdown(filter))
    }

    /// The full collection in insertion order (used by the exporter).
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    // ========================
    // Theme preference
    // ========================

    pub async fn theme(&self) -> Theme {
        self.repo.load_theme().await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), AppError> {
        Ok(self.repo.save_theme(theme).await?)
    }

    /// Rewrite the persisted snapshot. A write failure is logged and
    /// swallowed: the session keeps operating on the in-memory collection
    /// and durability loss is surfaced only through the log.
    async fn persist(&self) {
        if let Err(err) = self.repo.save_transactions(&self.transactions).await {
            log::warn!("failed to persist transactions, continuing in memory: {err:#}");
        }
    }
}

fn validate(category: String, amount_cents: Cents) -> Result<(String, Cents), AppError> {
    let category = category.trim().to_string();
    if category.is_empty() {
        return Err(AppError::EmptyCategory);
    }
    if amount_cents < 0 {
        return Err(AppError::InvalidAmount(
            "Amount must not be negative".to_string(),
        ));
    }
    Ok((category, amount_cents))
}
