//! SQLite database integration
//!
//! File-backed or in-memory store, used for local runs and tests.

pub mod store;

pub use store::SqliteStore;
