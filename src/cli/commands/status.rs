//! Status command implementation
//!
//! Shows how many files sit in each pipeline directory and how many rows
//! each resource table holds.

use crate::adapters::database::create_table_store;
use crate::config::load_config_or_default;
use crate::domain::ResourceType;
use clap::Args;
use std::path::Path;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show directory counts, without connecting to the database
    #[arg(long)]
    pub files_only: bool,
}

/// Number of files with `extension` directly inside `dir`; 0 if it is missing
pub fn count_files(dir: &Path, extension: &str) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == extension))
                .count()
        })
        .unwrap_or(0)
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        tracing::info!("Checking pipeline status");

        println!("📊 Pipeline Status");
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let pipeline = &config.pipeline;
        let extension = pipeline.file_extension.as_str();
        println!("{:<40} {:>10}", "Directory", "Files");
        println!("{}", "-".repeat(51));
        for (label, dir) in [
            ("pending", pipeline.input_dir.clone()),
            ("finished", pipeline.finished_dir()),
            ("failed", pipeline.failed_dir()),
        ] {
            println!(
                "{:<40} {:>10}",
                format!("{label} ({})", dir.display()),
                count_files(&dir, extension)
            );
        }
        println!();

        if self.files_only {
            return Ok(0);
        }

        let store = match create_table_store(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to database");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        let tables = match store.list_tables().await {
            Ok(t) => t,
            Err(e) => {
                println!("❌ Failed to list tables");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        println!("{:<40} {:>10}", "Table", "Rows");
        println!("{}", "-".repeat(51));
        for resource_type in ResourceType::ALL {
            let table = resource_type.table_name();
            let rows = if tables.iter().any(|t| t == table) {
                match store.row_count(table).await {
                    Ok(n) => n.to_string(),
                    Err(e) => {
                        tracing::warn!(table, error = %e, "Failed to count rows");
                        "error".to_string()
                    }
                }
            } else {
                "-".to_string()
            };
            println!("{table:<40} {rows:>10}");
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("c.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("finished")).unwrap();

        assert_eq!(count_files(dir.path(), "json"), 2);
        assert_eq!(count_files(&dir.path().join("missing"), "json"), 0);
    }
}
