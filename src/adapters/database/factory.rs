//! Table store factory
//!
//! Builds the store selected by `database_target`. The store is created once
//! at startup and shared by every component that writes or inspects tables.

use crate::adapters::database::traits::TableStore;
use crate::adapters::postgresql::{PostgreSQLClient, PostgreSQLStore};
use crate::adapters::sqlite::SqliteStore;
use crate::config::{DatabaseTarget, EtlConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create a table store based on the configuration
///
/// # Errors
///
/// Returns an error if the store cannot be created. For PostgreSQL the pool
/// is created lazily, so an unreachable server surfaces on first use
/// (or on `test_connection`).
pub async fn create_table_store(config: &EtlConfig) -> Result<Arc<dyn TableStore>> {
    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql_or_default();

            tracing::info!(target = %pg_config.describe(), "Creating PostgreSQL store");
            let client = PostgreSQLClient::new(pg_config)?;

            Ok(Arc::new(PostgreSQLStore::new(client)) as Arc<dyn TableStore>)
        }
        DatabaseTarget::SQLite => {
            let sqlite_config = config.sqlite_or_default();

            tracing::info!(path = %sqlite_config.path, "Creating SQLite store");
            let store = SqliteStore::open(&sqlite_config.path)?;

            Ok(Arc::new(store) as Arc<dyn TableStore>)
        }
    }
}
