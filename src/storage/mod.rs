mod kv;
mod memory;
mod repository;
mod sqlite;

pub use kv::*;
pub use memory::*;
pub use repository::*;
pub use sqlite::*;

/// Fixed key the serialized transaction collection lives under.
pub const TRANSACTIONS_KEY: &str = "transactions_v1";

/// Fixed key the theme preference lives under.
pub const THEME_KEY: &str = "theme_v1";

/// SQL migration for the initial key-value schema.
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");
