//! Domain error types
//!
//! Every pipeline stage returns [`IngestError`]. The variants follow the fault
//! taxonomy the controller uses when routing a file: parse, lookup,
//! validation and projection faults all fail the file they occur in, while
//! database faults fail it only when they happen on the write path.

use thiserror::Error;

/// Main error type for fhir-etl
#[derive(Debug, Error)]
pub enum IngestError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The interchange file could not be read as a bundle
    #[error("Parse error: {0}")]
    Parse(String),

    /// A key or resource type name was not found
    #[error("'{0}', KeyError")]
    Lookup(String),

    /// A resource failed the structural rules of its type
    #[error("1 validation error for {resource_type}: {message}")]
    Validation {
        /// Declared resource type of the failing record
        resource_type: String,
        /// Detail reported by the typed model
        message: String,
    },

    /// A field the projection needs was absent
    #[error("Projection error: {0}")]
    Projection(String),

    /// Database errors (any backend)
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl IngestError {
    /// Builds a projection error for a missing path on a resource type
    pub fn missing(resource_type: &str, path: &str) -> Self {
        IngestError::Projection(format!("{resource_type}.{path} is required but absent"))
    }

    /// Short machine-friendly name of the fault class, used in logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::Configuration(_) => "configuration",
            IngestError::Parse(_) => "parse",
            IngestError::Lookup(_) => "lookup",
            IngestError::Validation { .. } => "validation",
            IngestError::Projection(_) => "projection",
            IngestError::Database(_) => "database",
            IngestError::Serialization(_) => "serialization",
            IngestError::Io(_) => "io",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for IngestError {
    fn from(err: toml::de::Error) -> Self {
        IngestError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<rusqlite::Error> for IngestError {
    fn from(err: rusqlite::Error) -> Self {
        IngestError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_display() {
        let err = IngestError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_lookup_error_display() {
        let err = IngestError::Lookup("resourceType".to_string());
        assert_eq!(err.to_string(), "'resourceType', KeyError");
    }

    #[test]
    fn test_validation_error_display() {
        let err = IngestError::Validation {
            resource_type: "Patient".to_string(),
            message: "unknown field `anotherValue`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "1 validation error for Patient: unknown field `anotherValue`"
        );
    }

    #[test]
    fn test_missing_builds_projection_error() {
        let err = IngestError::missing("Encounter", "period");
        assert!(matches!(err, IngestError::Projection(_)));
        assert!(err.to_string().contains("Encounter.period"));
        assert_eq!(err.kind(), "projection");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: IngestError = io_err.into();
        assert!(matches!(err, IngestError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: IngestError = json_err.into();
        assert!(matches!(err, IngestError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: IngestError = toml_err.into();
        assert!(matches!(err, IngestError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_ingest_error_implements_std_error() {
        let err = IngestError::Database("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
