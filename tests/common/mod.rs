//! Shared helpers for integration tests

#![allow(dead_code)]

use fhir_etl::adapters::sqlite::SqliteStore;
use fhir_etl::config::PipelineConfig;
use fhir_etl::core::diagnostics::{Diagnostics, MemorySink};
use fhir_etl::core::pipeline::PipelineController;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn load_json_fixture(relative: &str) -> Value {
    let contents = std::fs::read_to_string(fixture_path(relative))
        .unwrap_or_else(|e| panic!("failed to read fixture {relative}: {e}"));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("fixture {relative} is not valid JSON: {e}"))
}

/// A controller over a temporary input directory and an in-memory store
pub struct Harness {
    pub dir: TempDir,
    pub store: Arc<SqliteStore>,
    pub sink: Arc<MemorySink>,
    pub controller: PipelineController,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let sink = Arc::new(MemorySink::new());
        let pipeline = PipelineConfig {
            input_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        let controller =
            PipelineController::new(pipeline, store.clone(), Diagnostics::new(sink.clone()));
        controller.ensure_directories().unwrap();

        Self {
            dir,
            store,
            sink,
            controller,
        }
    }

    pub fn input_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Copies a bundle fixture into the input directory under `name`
    pub fn drop_bundle(&self, fixture: &str, name: &str) -> PathBuf {
        let target = self.input_dir().join(name);
        std::fs::copy(fixture_path(fixture), &target).unwrap();
        target
    }

    pub fn finished(&self, name: &str) -> PathBuf {
        self.input_dir().join("finished").join(name)
    }

    pub fn failed(&self, name: &str) -> PathBuf {
        self.input_dir().join("failed").join(name)
    }
}
