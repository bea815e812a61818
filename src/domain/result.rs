//! Result type alias for fhir-etl
//!
//! This module provides a convenient Result type alias that uses IngestError
//! as the error type.

use super::errors::IngestError;

/// Result type alias for fhir-etl operations
///
/// # Examples
///
/// ```
/// use fhir_etl::domain::result::Result;
/// use fhir_etl::domain::errors::IngestError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(IngestError::Parse("missing entry list".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, IngestError>;
