//! PostgreSQL database integration
//!
//! The default backend. One table per resource type in the current schema.

pub mod adapter;
pub mod client;

pub use adapter::PostgreSQLStore;
pub use client::PostgreSQLClient;
