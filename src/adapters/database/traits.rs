//! Database abstraction traits
//!
//! A [`TableStore`] holds one table per resource type, each keyed by `id`.
//! Implementations are built once at startup and shared behind an `Arc`.

use crate::domain::{FlatRow, Result};
use async_trait::async_trait;

/// Relational store that rows are persisted to
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Short backend name for logs and status output
    fn backend_name(&self) -> &'static str;

    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Returns true if `table` holds a row whose `id` equals `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails, including when the table does
    /// not exist yet.
    async fn row_exists(&self, table: &str, id: &str) -> Result<bool>;

    /// Creates `table` if absent, with one column per key of `row`
    ///
    /// Column types come from the row's values; `id` becomes the primary key.
    /// An existing table is left unchanged.
    async fn ensure_table(&self, table: &str, row: &FlatRow) -> Result<()>;

    /// Inserts one row
    ///
    /// # Errors
    ///
    /// Returns an error if the table is missing, a column is unknown, or the
    /// id is already present.
    async fn insert_row(&self, table: &str, row: &FlatRow) -> Result<()>;

    /// Number of rows in `table`
    async fn row_count(&self, table: &str) -> Result<u64>;

    /// Column names of `table` in declaration order; empty if it does not exist
    async fn table_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Names of all tables in the store
    async fn list_tables(&self) -> Result<Vec<String>>;
}
