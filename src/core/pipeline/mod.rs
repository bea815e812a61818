//! File ingestion pipeline
//!
//! [`PipelineController`] drives the scan loop; [`ScanSummary`] reports what
//! each pass did.

pub mod controller;
pub mod summary;

pub use controller::PipelineController;
pub use summary::{FileError, FileOutcome, ScanSummary};
