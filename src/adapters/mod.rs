//! Storage adapters
//!
//! - [`database`] - the [`database::TableStore`] seam, SQL text and the persistence gateway
//! - [`postgresql`] - PostgreSQL store (default target)
//! - [`sqlite`] - SQLite store

pub mod database;
pub mod postgresql;
pub mod sqlite;
