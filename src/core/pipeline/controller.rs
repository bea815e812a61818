//! Pipeline controller - main orchestrator for file ingestion
//!
//! Scans the input directory, processes each interchange file in name order
//! and routes it to `finished/` or `failed/`. Within a file, entries are
//! loaded, projected and persisted one at a time; the first fault stops the
//! file but rows already written stay written.

use super::summary::{FileError, FileOutcome, ScanSummary};
use crate::adapters::database::{create_table_store, PersistenceGateway, SendOutcome, TableStore};
use crate::config::{EtlConfig, PipelineConfig};
use crate::core::diagnostics::Diagnostics;
use crate::core::{loader, transform};
use crate::domain::{IngestError, ResourceType, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

const ENTRY_KEY: &str = "entry";
const RESOURCE_KEY: &str = "resource";

/// Where a processed file ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Finished,
    Failed,
}

/// Pipeline controller
pub struct PipelineController {
    pipeline: PipelineConfig,
    gateway: PersistenceGateway,
    diagnostics: Diagnostics,
}

impl PipelineController {
    pub fn new(
        pipeline: PipelineConfig,
        store: Arc<dyn TableStore>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            pipeline,
            gateway: PersistenceGateway::new(store, diagnostics.clone()),
            diagnostics,
        }
    }

    /// Builds the store from configuration and checks it is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be created or the connection
    /// test fails.
    pub async fn from_config(config: &EtlConfig, diagnostics: Diagnostics) -> Result<Self> {
        let store = create_table_store(config).await?;
        store.test_connection().await?;
        Ok(Self::new(config.pipeline.clone(), store, diagnostics))
    }

    pub fn pipeline(&self) -> &PipelineConfig {
        &self.pipeline
    }

    pub fn store(&self) -> &Arc<dyn TableStore> {
        self.gateway.store()
    }

    /// Creates the input directory and its `finished/` and `failed/` children
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            self.pipeline.input_dir.clone(),
            self.pipeline.finished_dir(),
            self.pipeline.failed_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                IngestError::Io(format!("Failed to create directory {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// Regular files in the input directory with the configured extension,
    /// sorted by name
    pub fn pending_files(&self) -> Result<Vec<PathBuf>> {
        let extension = self.pipeline.file_extension.as_str();
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.pipeline.input_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Runs one pass over the input directory
    ///
    /// A set shutdown flag stops the pass before the next file.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input directory cannot be listed; file
    /// faults are recorded in the summary.
    pub async fn scan_once(&self, shutdown: Option<&watch::Receiver<bool>>) -> Result<ScanSummary> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::new();

        for path in self.pending_files()? {
            if shutdown.is_some_and(|rx| *rx.borrow()) {
                tracing::info!("Shutdown requested, stopping scan");
                break;
            }

            let file_start = Instant::now();
            crate::log_file_start!(path.display());

            let mut outcome = FileOutcome::default();
            let result = self.process_file(&path, &mut outcome).await;
            summary.record_file(&outcome);

            match result {
                Ok(()) => {
                    summary.files_succeeded += 1;
                    self.route(&path, Route::Finished);
                    self.diagnostics.file_succeeded(&path);
                    crate::log_file_complete!(
                        path.display(),
                        outcome.rows_inserted,
                        file_start.elapsed()
                    );
                }
                Err(e) => {
                    summary.files_failed += 1;
                    summary.errors.push(FileError::new(path.clone(), &e));
                    self.route(&path, Route::Failed);
                    self.diagnostics.file_failed(&path, &e);
                }
            }
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }

    /// Ensures directories exist, then runs exactly one scan
    pub async fn run_once(&self) -> Result<ScanSummary> {
        self.ensure_directories()?;
        let summary = self.scan_once(None).await?;
        summary.log_summary();
        Ok(summary)
    }

    /// Scans on a fixed interval until `shutdown` is set or its sender dropped
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created at startup.
    /// Faults during later scans are logged and the loop continues.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        self.ensure_directories()?;

        let interval = self.pipeline.poll_interval();
        tracing::info!(
            input_dir = %self.pipeline.input_dir.display(),
            poll_interval_ms = interval.as_millis() as u64,
            backend = self.store().backend_name(),
            "Pipeline started"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            if *shutdown.borrow() {
                break;
            }

            match self.scan_once(Some(&shutdown)).await {
                Ok(summary) if summary.files_processed() > 0 => summary.log_summary(),
                Ok(_) => tracing::trace!("No files pending"),
                Err(e) => crate::log_error_with_context!(e, self.pipeline.input_dir.display()),
            }
        }

        tracing::info!("Pipeline stopped");
        Ok(())
    }

    async fn process_file(&self, path: &Path, outcome: &mut FileOutcome) -> Result<()> {
        let contents = tokio::fs::read_to_string(path).await?;
        let entries = parse_entries(&contents)?;

        for (index, entry) in entries.iter().enumerate() {
            let raw = entry
                .get(RESOURCE_KEY)
                .ok_or_else(|| IngestError::Lookup(RESOURCE_KEY.to_string()))?;

            if let Some(name) = loader::declared_type(raw) {
                if !ResourceType::is_supported(name) {
                    tracing::debug!(index, resource_type = name, "Skipping unsupported entry");
                    outcome.entries_skipped += 1;
                    continue;
                }
            }

            let resource = loader::load(raw)?;
            let row = transform::project(&resource)?;
            let table = resource.resource_type().table_name();

            match self.gateway.send(table, &row).await? {
                SendOutcome::Inserted => outcome.rows_inserted += 1,
                SendOutcome::Skipped => outcome.duplicates_skipped += 1,
                SendOutcome::Empty => {}
            }
        }

        Ok(())
    }

    fn route(&self, path: &Path, route: Route) {
        let dir = match route {
            Route::Finished => self.pipeline.finished_dir(),
            Route::Failed => self.pipeline.failed_dir(),
        };

        let Some(name) = path.file_name() else {
            return;
        };
        let mut target = dir.join(name);
        if target.exists() {
            let archived = target;
            target = free_target(&archived);
            tracing::warn!(
                existing = %archived.display(),
                to = %target.display(),
                "Target already exists, keeping both"
            );
        }

        match std::fs::rename(path, &target) {
            Ok(()) => tracing::debug!(
                from = %path.display(),
                to = %target.display(),
                "File moved"
            ),
            Err(e) => {
                let error = IngestError::Io(format!("Failed to move file: {e}"));
                crate::log_error_with_context!(error, path.display());
            }
        }
    }
}

/// First free `<stem>-<timestamp>[-n].<ext>` next to an occupied `target`
fn free_target(target: &Path) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = target
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");

    let mut candidate = target.with_file_name(format!("{stem}-{stamp}{extension}"));
    let mut n = 1;
    while candidate.exists() {
        candidate = target.with_file_name(format!("{stem}-{stamp}-{n}{extension}"));
        n += 1;
    }
    candidate
}

/// Parses an interchange file and returns its `entry` array
fn parse_entries(contents: &str) -> Result<Vec<Value>> {
    let mut document: Value =
        serde_json::from_str(contents).map_err(|e| IngestError::Parse(e.to_string()))?;

    let entries = document
        .as_object_mut()
        .ok_or_else(|| IngestError::Parse("expected a JSON object at top level".to_string()))?
        .remove(ENTRY_KEY)
        .ok_or_else(|| IngestError::Lookup(ENTRY_KEY.to_string()))?;

    match entries {
        Value::Array(entries) => Ok(entries),
        _ => Err(IngestError::Parse(format!("'{ENTRY_KEY}' must be an array"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStore;
    use crate::core::diagnostics::MemorySink;
    use serde_json::json;
    use tempfile::TempDir;

    fn controller(dir: &TempDir) -> (PipelineController, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let pipeline = PipelineConfig {
            input_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let controller = PipelineController::new(pipeline, store, Diagnostics::new(sink.clone()));
        controller.ensure_directories().unwrap();
        (controller, sink)
    }

    #[test]
    fn test_parse_entries() {
        assert_eq!(parse_entries(r#"{"entry": []}"#).unwrap().len(), 0);
        assert!(matches!(parse_entries("not json"), Err(IngestError::Parse(_))));
        assert!(matches!(parse_entries("[]"), Err(IngestError::Parse(_))));
        assert!(matches!(
            parse_entries(r#"{"resourceType": "Bundle"}"#),
            Err(IngestError::Lookup(ref key)) if key == "entry"
        ));
        assert!(matches!(parse_entries(r#"{"entry": {}}"#), Err(IngestError::Parse(_))));
    }

    #[test]
    fn test_pending_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        let (controller, _) = controller(&dir);
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names: Vec<String> = controller
            .pending_files()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[tokio::test]
    async fn test_unsupported_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        let (controller, sink) = controller(&dir);
        let bundle = json!({
            "entry": [
                {"resource": {"resourceType": "Observation", "id": "o1"}},
                {"resource": {
                    "resourceType": "Medication",
                    "id": "m1",
                    "status": "active",
                    "code": {"coding": [{"code": "313782", "display": "Acetaminophen 325 MG"}]}
                }}
            ]
        });
        std::fs::write(dir.path().join("bundle.json"), bundle.to_string()).unwrap();

        let summary = controller.scan_once(None).await.unwrap();

        assert_eq!(summary.files_succeeded, 1);
        assert_eq!(summary.entries_skipped, 1);
        assert_eq!(summary.rows_inserted, 1);
        assert!(dir.path().join("finished").join("bundle.json").exists());
        assert!(sink.contains("Successfully processed file"));
    }

    #[tokio::test]
    async fn test_missing_resource_key_fails_file() {
        let dir = TempDir::new().unwrap();
        let (controller, sink) = controller(&dir);
        std::fs::write(dir.path().join("bad.json"), r#"{"entry": [{"fullUrl": "x"}]}"#).unwrap();

        let summary = controller.scan_once(None).await.unwrap();

        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.errors[0].kind, "lookup");
        assert!(dir.path().join("failed").join("bad.json").exists());
        assert!(sink.contains("'resource', KeyError"));
    }

    #[test]
    fn test_free_target_never_reuses_a_name() {
        let dir = TempDir::new().unwrap();
        let taken = dir.path().join("bundle.json");
        std::fs::write(&taken, "old").unwrap();

        let first = free_target(&taken);
        assert_ne!(first, taken);
        assert_eq!(first.extension().unwrap(), "json");
        assert!(first
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("bundle-"));

        std::fs::write(&first, "older").unwrap();
        let second = free_target(&taken);
        assert!(second != first && second != taken);
        assert!(!second.exists());
    }

    #[tokio::test]
    async fn test_route_keeps_existing_archived_file() {
        let dir = TempDir::new().unwrap();
        let (controller, _) = controller(&dir);
        let finished = dir.path().join("finished");
        std::fs::write(finished.join("a.json"), "old").unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{"entry": []}"#).unwrap();

        let summary = controller.scan_once(None).await.unwrap();

        assert_eq!(summary.files_succeeded, 1);
        assert!(!dir.path().join("a.json").exists());
        assert_eq!(std::fs::read_to_string(finished.join("a.json")).unwrap(), "old");
        let archived: Vec<String> = std::fs::read_dir(&finished)
            .unwrap()
            .map(|e| std::fs::read_to_string(e.unwrap().path()).unwrap())
            .collect();
        assert_eq!(archived.len(), 2);
        assert!(archived.iter().any(|body| body == r#"{"entry": []}"#));
    }

    #[tokio::test]
    async fn test_shutdown_flag_stops_before_first_file() {
        let dir = TempDir::new().unwrap();
        let (controller, _) = controller(&dir);
        std::fs::write(dir.path().join("a.json"), r#"{"entry": []}"#).unwrap();

        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let summary = controller.scan_once(Some(&rx)).await.unwrap();
        assert_eq!(summary.files_processed(), 0);
        assert!(dir.path().join("a.json").exists());
    }

    #[tokio::test]
    async fn test_run_exits_on_shutdown() {
        let dir = TempDir::new().unwrap();
        let (controller, _) = controller(&dir);
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { controller.run(rx).await });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
