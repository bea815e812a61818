//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fhir-etl - FHIR bundle files to relational tables
#[derive(Parser, Debug)]
#[command(name = "fhir-etl")]
#[command(version, about, long_about = None)]
#[command(author = "fhir-etl Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./fhir-etl.toml when present)
    #[arg(short, long, env = "FHIR_ETL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FHIR_ETL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the input directory and load bundle files
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show file counts per directory and row counts per table
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["fhir-etl", "run"]);
        assert!(matches!(cli.command, Commands::Run(ref args) if !args.once));
    }

    #[test]
    fn test_cli_parse_run_once_with_input_dir() {
        let cli = Cli::parse_from(["fhir-etl", "run", "--once", "--input-dir", "/tmp/in"]);
        match cli.command {
            Commands::Run(args) => {
                assert!(args.once);
                assert_eq!(args.input_dir, Some(PathBuf::from("/tmp/in")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["fhir-etl", "--config", "custom.toml", "run"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["fhir-etl", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["fhir-etl", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["fhir-etl", "init", "--with-examples"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.with_examples));
    }
}
