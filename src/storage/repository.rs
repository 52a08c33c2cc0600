use anyhow::Result;

use crate::domain::{Theme, Transaction};

use super::{KeyValueStore, MemoryStore, SqliteStore, THEME_KEY, TRANSACTIONS_KEY};

/// Repository for persisting and restoring ledger state through a key-value
/// store. The whole transaction collection is serialized as one JSON array
/// under a fixed key; the theme preference is a bare string under another.
pub struct Repository {
    store: Box<dyn KeyValueStore>,
}

impl Repository {
    /// Create a repository over any key-value store implementation.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Connect to an existing SQLite-backed store at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let store = SqliteStore::connect(database_url).await?;
        Ok(Self::new(Box::new(store)))
    }

    /// Initialize a new SQLite-backed store (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = SqliteStore::init(database_url).await?;
        Ok(Self::new(Box::new(store)))
    }

    /// Repository over an in-memory store. State dies with the process.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Load the persisted transaction collection. A missing or unparsable
    /// snapshot yields an empty collection so startup never fails; a read
    /// failure from the store is treated the same way.
    pub async fn load_transactions(&self) -> Vec<Transaction> {
        let raw = match self.store.load(TRANSACTIONS_KEY).await {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("failed to read stored transactions, starting empty: {err:#}");
                return Vec::new();
            }
        };

        let Some(raw) = raw else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(transactions) => transactions,
            Err(err) => {
                log::warn!("stored transactions are unparsable, starting empty: {err}");
                Vec::new()
            }
        }
    }

    /// Persist the entire transaction collection.
    pub async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        let raw = serde_json::to_string(transactions)?;
        self.store.save(TRANSACTIONS_KEY, &raw).await
    }

    /// Load the theme preference, defaulting to light when absent or unknown.
    pub async fn load_theme(&self) -> Theme {
        match self.store.load(THEME_KEY).await {
            Ok(Some(raw)) => Theme::from_str(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(err) => {
                log::warn!("failed to read stored theme, using default: {err:#}");
                Theme::default()
            }
        }
    }

    /// Persist the theme preference.
    pub async fn save_theme(&self, theme: Theme) -> Result<()> {
        self.store.save(THEME_KEY, theme.as_str()).await
    }
}
