use anyhow::Result;
use async_trait::async_trait;

/// Storage port: a durable string key-value store. The repository persists
/// the whole serialized ledger under a fixed key, so adapters only need
/// point reads and writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<()>;
}
