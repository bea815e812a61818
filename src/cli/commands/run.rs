//! Run command implementation
//!
//! Starts the pipeline: a polling loop by default, or a single scan with
//! `--once`.

use crate::config::load_config_or_default;
use crate::core::diagnostics::Diagnostics;
use crate::core::pipeline::{PipelineController, ScanSummary};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Run a single scan and exit
    #[arg(long)]
    pub once: bool,

    /// Override the input directory
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Override the polling interval, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub poll_interval: Option<u64>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: Option<&Path>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(dir) = &self.input_dir {
            tracing::info!(input_dir = %dir.display(), "Overriding input directory from CLI");
            config.pipeline.input_dir = dir.clone();
        }
        if let Some(seconds) = self.poll_interval {
            tracing::info!(seconds, "Overriding poll interval from CLI");
            config.pipeline.poll_interval_seconds = seconds;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let controller = match PipelineController::from_config(&config, Diagnostics::stdout()).await
        {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize pipeline");
                eprintln!("Failed to initialize pipeline: {e}");
                return Ok(4);
            }
        };

        if self.once {
            let summary = controller.run_once().await?;
            return Ok(exit_code(&summary));
        }

        controller.run(shutdown_signal).await?;
        Ok(0)
    }
}

/// 0 when every file succeeded, 1 when at least one failed
fn exit_code(summary: &ScanSummary) -> i32 {
    if summary.is_successful() {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        let mut summary = ScanSummary::new();
        assert_eq!(exit_code(&summary), 0);

        summary.files_failed = 1;
        assert_eq!(exit_code(&summary), 1);
    }

    #[test]
    fn test_run_args_defaults() {
        let args = RunArgs::default();
        assert!(!args.once);
        assert!(args.input_dir.is_none());
        assert!(args.poll_interval.is_none());
    }
}
