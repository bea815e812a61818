//! Database abstraction layer
//!
//! [`TableStore`] is the seam between the pipeline and a relational backend;
//! [`PersistenceGateway`] adds the skip-if-present write policy on top.

pub mod factory;
pub mod gateway;
pub mod sql;
pub mod traits;

pub use factory::create_table_store;
pub use gateway::{PersistenceGateway, SendOutcome};
pub use traits::TableStore;
