//! Validate config command implementation

use crate::config::load_config_or_default;
use crate::config::schema::DatabaseTarget;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let shown = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(default lookup)".to_string());
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration: {shown}");
        println!();

        // Loading validates as well
        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Input Directory: {}", config.pipeline.input_dir.display());
        println!("  Poll Interval: {}s", config.pipeline.poll_interval_seconds);
        println!("  File Extension: .{}", config.pipeline.file_extension);
        println!("  Database Target: {}", config.database_target);

        match config.database_target {
            DatabaseTarget::PostgreSQL => {
                let pg_config = config.postgresql_or_default();
                println!("  PostgreSQL Connection: {}", pg_config.describe());
                println!("  Max Connections: {}", pg_config.max_connections);
            }
            DatabaseTarget::SQLite => {
                println!("  SQLite Path: {}", config.sqlite_or_default().path);
            }
        }

        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let code = ValidateArgs {}.execute(Some(&path)).await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fhir-etl.toml");
        std::fs::write(
            &path,
            "database_target = \"sqlite\"\n\n[sqlite]\npath = \":memory:\"\n",
        )
        .unwrap();

        let code = ValidateArgs {}.execute(Some(&path)).await.unwrap();
        assert_eq!(code, 0);
    }
}
