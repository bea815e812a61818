//! Scan summary and reporting
//!
//! One [`ScanSummary`] is produced per pass over the input directory.

use crate::domain::IngestError;
use std::path::PathBuf;
use std::time::Duration;

/// Totals for one pass over the input directory
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Files moved to `finished/`
    pub files_succeeded: usize,

    /// Files moved to `failed/`
    pub files_failed: usize,

    /// Rows written across all files
    pub rows_inserted: usize,

    /// Rows skipped because their id was already stored
    pub duplicates_skipped: usize,

    /// Entries whose type is not supported
    pub entries_skipped: usize,

    /// Duration of the scan
    pub duration: Duration,

    /// One error per failed file
    pub errors: Vec<FileError>,
}

impl ScanSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn files_processed(&self) -> usize {
        self.files_succeeded + self.files_failed
    }

    /// True if no file failed
    pub fn is_successful(&self) -> bool {
        self.files_failed == 0 && self.errors.is_empty()
    }

    /// Folds the totals of one file into the scan
    pub(crate) fn record_file(&mut self, outcome: &FileOutcome) {
        self.rows_inserted += outcome.rows_inserted;
        self.duplicates_skipped += outcome.duplicates_skipped;
        self.entries_skipped += outcome.entries_skipped;
    }

    pub fn log_summary(&self) {
        crate::log_scan_summary!(self);

        if !self.errors.is_empty() {
            tracing::warn!(error_count = self.errors.len(), "Scan completed with errors");
            for error in &self.errors {
                tracing::warn!(
                    file = %error.path.display(),
                    kind = error.kind,
                    message = %error.message,
                    "File error"
                );
            }
        }
    }
}

/// Per-file counters, kept even when the file later fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOutcome {
    pub rows_inserted: usize,
    pub duplicates_skipped: usize,
    pub entries_skipped: usize,
}

/// A file that was routed to `failed/`
#[derive(Debug, Clone)]
pub struct FileError {
    /// Path the file was read from
    pub path: PathBuf,

    /// Fault class, see [`IngestError::kind`]
    pub kind: &'static str,

    /// Rendered fault
    pub message: String,
}

impl FileError {
    pub fn new(path: PathBuf, error: &IngestError) -> Self {
        Self {
            path,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
