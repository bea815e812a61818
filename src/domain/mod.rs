//! Domain models and types for fhir-etl.
//!
//! The domain layer provides:
//! - **Error types** ([`IngestError`]) with the fault taxonomy used for file routing
//! - **Result type alias** ([`Result`])
//! - **Resource types** ([`ResourceType`]), the closed set of supported FHIR types
//! - **Flat rows** ([`FlatRow`], [`ColumnValue`]), the projector's output
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, IngestError>`]:
//!
//! ```rust
//! use fhir_etl::domain::{IngestError, ResourceType, Result};
//! use std::str::FromStr;
//!
//! fn lookup(name: &str) -> Result<ResourceType> {
//!     ResourceType::from_str(name)
//! }
//!
//! assert!(matches!(lookup("bar"), Err(IngestError::Lookup(_))));
//! ```

pub mod errors;
pub mod resource_type;
pub mod result;
pub mod row;

pub use errors::IngestError;
pub use resource_type::ResourceType;
pub use result::Result;
pub use row::{is_valid_identifier, ColumnKind, ColumnValue, FlatRow, ID_COLUMN};
