//! Logging and observability
//!
//! Structured logging through `tracing`, plus a few macros that keep the
//! field names of recurring pipeline events consistent.
//!
//! # Example
//!
//! ```no_run
//! use fhir_etl::logging::init_logging;
//! use fhir_etl::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of processing for one input file
///
/// ```no_run
/// use fhir_etl::log_file_start;
///
/// log_file_start!("data/bundle.json");
/// ```
#[macro_export]
macro_rules! log_file_start {
    ($path:expr) => {
        tracing::info!(file = %$path, "Processing file")
    };
}

/// Log the outcome of one input file
///
/// ```no_run
/// use fhir_etl::log_file_complete;
/// use std::time::Duration;
///
/// log_file_complete!("data/bundle.json", 12, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_file_complete {
    ($path:expr, $inserted:expr, $duration:expr) => {
        tracing::info!(
            file = %$path,
            rows_inserted = $inserted,
            duration_ms = $duration.as_millis() as u64,
            "File processed"
        )
    };
}

/// Log an error with context
///
/// ```no_run
/// use fhir_etl::log_error_with_context;
/// use fhir_etl::domain::IngestError;
///
/// let error = IngestError::Parse("expected value at line 1".to_string());
/// log_error_with_context!(&error, "data/bundle.json");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            kind = $error.kind(),
            context = %$context,
            "Error occurred"
        )
    };
}

/// Log the totals of one directory scan
#[macro_export]
macro_rules! log_scan_summary {
    ($summary:expr) => {
        tracing::info!(
            files_succeeded = $summary.files_succeeded,
            files_failed = $summary.files_failed,
            rows_inserted = $summary.rows_inserted,
            duplicates_skipped = $summary.duplicates_skipped,
            duration_ms = $summary.duration.as_millis() as u64,
            "Scan completed"
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::core::pipeline::ScanSummary;
    use crate::domain::IngestError;
    use std::time::Duration;

    #[test]
    fn test_macros_expand_in_expression_position() {
        let outcomes: [Result<usize, IngestError>; 2] =
            [Ok(3), Err(IngestError::Parse("unexpected end of input".to_string()))];

        for outcome in outcomes {
            match outcome {
                Ok(rows) => crate::log_file_complete!("a.json", rows, Duration::from_millis(5)),
                Err(e) => crate::log_error_with_context!(e, "a.json"),
            }
        }

        let start = |path: &str| crate::log_file_start!(path);
        start("b.json");

        let summarize = |summary: &ScanSummary| crate::log_scan_summary!(summary);
        summarize(&ScanSummary::new());
    }
}
