//! Core business logic for fhir-etl.
//!
//! # Modules
//!
//! - [`loader`] - validates raw resources into typed records
//! - [`transform`] - projects typed records into flat rows
//! - [`pipeline`] - directory scanning, per-file processing and routing
//! - [`diagnostics`] - operator-facing output lines
//!
//! # Ingestion Workflow
//!
//! 1. **Scan**: list `*.json` files in the input directory, by name
//! 2. **Parse**: read the file and take its `entry` array
//! 3. **Load**: validate each entry's `resource` against its typed model
//! 4. **Project**: flatten the typed record into a row
//! 5. **Persist**: insert the row unless its id is already stored
//! 6. **Route**: move the file to `finished/` or `failed/`
//!
//! # Example
//!
//! ```rust,no_run
//! use fhir_etl::config::load_config_or_default;
//! use fhir_etl::core::diagnostics::Diagnostics;
//! use fhir_etl::core::pipeline::PipelineController;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default(None)?;
//! let controller = PipelineController::from_config(&config, Diagnostics::stdout()).await?;
//!
//! let summary = controller.run_once().await?;
//! println!("Succeeded: {}", summary.files_succeeded);
//! println!("Failed: {}", summary.files_failed);
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod loader;
pub mod pipeline;
pub mod transform;
