// fhir-etl - FHIR R4B bundle files to relational tables
// Copyright (c) 2025 fhir-etl Contributors
// Licensed under the MIT License

//! # fhir-etl
//!
//! Loads FHIR R4B bundle files dropped into a directory into one relational
//! table per resource type.
//!
//! ## Overview
//!
//! - **Loading** each bundle entry into a typed, validated resource
//! - **Projecting** the resource into a flat row of scalar columns
//! - **Persisting** the row unless a row with the same id already exists
//! - **Routing** each file to `finished/` or `failed/`
//!
//! Supported types: Patient, Encounter, Condition, Claim, Procedure,
//! Immunization, MedicationRequest and Medication. Other entries are skipped.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Loader, projections and the pipeline controller
//! - [`adapters`] - Table stores (PostgreSQL, SQLite) and the persistence gateway
//! - [`fhir`] - Typed FHIR resource models
//! - [`domain`] - Errors, resource types and flat rows
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fhir_etl::config::load_config_or_default;
//! use fhir_etl::core::diagnostics::Diagnostics;
//! use fhir_etl::core::pipeline::PipelineController;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!     let controller = PipelineController::from_config(&config, Diagnostics::stdout()).await?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     controller.run(shutdown_rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Loading and projecting a single resource
//!
//! ```rust
//! use fhir_etl::core::{loader, transform};
//! use fhir_etl::domain::ResourceType;
//! use serde_json::json;
//!
//! let resource = loader::load(&json!({
//!     "resourceType": "Medication",
//!     "id": "med-1",
//!     "code": {"coding": [{"code": "313782", "display": "Acetaminophen 325 MG"}]}
//! }))?;
//! assert_eq!(resource.resource_type(), ResourceType::Medication);
//!
//! let row = transform::project(&resource)?;
//! assert_eq!(row.id(), Some("med-1"));
//! # Ok::<(), fhir_etl::domain::IngestError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every stage returns [`domain::IngestError`]. The pipeline controller turns
//! a fault into a failed file and carries on with the next one.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod fhir;
pub mod logging;
