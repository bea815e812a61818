//! User-facing diagnostic lines
//!
//! Diagnostics are the short messages an operator watches on stdout: one per
//! processed file and one per skipped duplicate. They are separate from the
//! structured logs, which carry the same events with fields attached.

use crate::domain::IngestError;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Destination for diagnostic lines
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Writes each line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps lines in memory, for tests and embedding
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// True if any emitted line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

/// Formats pipeline events as diagnostic lines and mirrors them to tracing
#[derive(Clone)]
pub struct Diagnostics {
    sink: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink))
    }

    pub fn file_succeeded(&self, path: &Path) {
        tracing::info!(file = %path.display(), "File processed successfully");
        self.sink
            .emit(&format!("Successfully processed file {}!", path.display()));
    }

    pub fn file_failed(&self, path: &Path, error: &IngestError) {
        tracing::error!(
            file = %path.display(),
            kind = error.kind(),
            error = %error,
            "File processing failed"
        );
        self.sink
            .emit(&format!("Failed to process file {}: {error}", path.display()));
    }

    pub fn duplicate_skipped(&self, id: &str, table: &str) {
        tracing::info!(id, table, "Row already present, skipping");
        self.sink
            .emit(&format!("ID {id} already exists in table {table}, skipping."));
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}
