//! Persistence gateway
//!
//! Idempotent row writes: a row whose `id` is already present in its table
//! is skipped with a diagnostic, otherwise the table is created if needed and
//! the row inserted.
//!
//! The existence check and the insert are separate statements. Two writers
//! racing on the same id can both pass the check; the `id` primary key makes
//! the loser fail its insert instead of storing a duplicate.

use super::traits::TableStore;
use crate::core::diagnostics::Diagnostics;
use crate::domain::{FlatRow, IngestError, Result};
use std::sync::Arc;

/// What [`PersistenceGateway::send`] did with a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The row had no columns; nothing was written
    Empty,
    /// A row with the same id already existed
    Skipped,
    /// The row was written
    Inserted,
}

/// Writes flat rows to a [`TableStore`], at most once per (table, id)
pub struct PersistenceGateway {
    store: Arc<dyn TableStore>,
    diagnostics: Diagnostics,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn TableStore>, diagnostics: Diagnostics) -> Self {
        Self { store, diagnostics }
    }

    pub fn store(&self) -> &Arc<dyn TableStore> {
        &self.store
    }

    /// Persists `row` into `table` unless a row with its id already exists.
    ///
    /// A failed existence check (missing table, unreachable store) counts as
    /// "absent"; any real problem resurfaces on the create or insert.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Database`] if the row has no textual id or the
    /// table cannot be created or written.
    pub async fn send(&self, table: &str, row: &FlatRow) -> Result<SendOutcome> {
        if row.is_empty() {
            tracing::debug!(table, "Empty row, nothing to send");
            return Ok(SendOutcome::Empty);
        }

        let id = row
            .id()
            .ok_or_else(|| IngestError::Database(format!("row for table {table} has no id")))?;

        let exists = match self.store.row_exists(table, id).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::debug!(table, id, error = %e, "Existence check failed, treating as absent");
                false
            }
        };

        if exists {
            self.diagnostics.duplicate_skipped(id, table);
            return Ok(SendOutcome::Skipped);
        }

        self.store.ensure_table(table, row).await?;
        self.store.insert_row(table, row).await?;

        tracing::debug!(table, id, columns = row.len(), "Row inserted");
        Ok(SendOutcome::Inserted)
    }
}
