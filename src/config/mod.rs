//! Configuration management for fhir-etl.
//!
//! Configuration comes from an optional TOML file with `${VAR_NAME}`
//! substitution, followed by environment overrides. Every setting has a
//! default, so the tool runs with no file at all.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`PipelineConfig`] - input directory, polling interval, file extension
//! - [`DatabaseTarget`] - which backend rows are written to
//! - [`PostgreSQLConfig`] - connection string or discrete fields, pool sizing
//! - [`SqliteConfig`] - database file path
//! - [`LoggingConfig`] - rolling file logs and console format
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "postgresql"
//!
//! [application]
//! log_level = "info"
//!
//! [pipeline]
//! input_dir = "data"
//! poll_interval_seconds = 1
//!
//! [postgresql]
//! host = "localhost"
//! port = 5433
//! database = "patientdata"
//! username = "postgres"
//! password = "${DATABASE_PASSWORD}"
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_HOSTNAME`, `DATABASE_PORT`, `DATABASE_NAME`,
//! `DATABASE_USERNAME`, `DATABASE_PASSWORD` and `DATABASE_URL` configure
//! PostgreSQL. `FHIR_ETL_<SECTION>_<KEY>` overrides other settings, e.g.
//! `FHIR_ETL_PIPELINE_INPUT_DIR`.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::{
    ApplicationConfig, DatabaseTarget, EtlConfig, LoggingConfig, PipelineConfig,
    PostgreSQLConfig, SqliteConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
