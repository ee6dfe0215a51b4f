//! Save command implementation
//!
//! This module implements the `save` command, which runs the export stage
//! for a single image artifact.

use crate::config::{apply_env_overrides, read_config, DockerSaveConfig};
use crate::core::save::{SaveStage, SaveSummary};
use crate::core::verification::archive_sha256;
use crate::domain::errors::DockerSaveError;
use crate::domain::{Artifact, ImageArtifact, ImageArtifactBuilder};
use crate::ui::{ConsoleUi, Ui};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the save command
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Image ID or reference to save
    #[arg(short, long)]
    pub image: String,

    /// ID of the stage that produced the image
    #[arg(short, long, env = "DOCKER_SAVE_BUILDER_ID")]
    pub builder_id: String,

    /// Destination archive (overrides save.path)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Docker executable (overrides save.docker_path)
    #[arg(long)]
    pub docker_path: Option<String>,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl SaveArgs {
    /// Execute the save command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let ui = if self.json {
            ConsoleUi::new().to_stderr()
        } else {
            ConsoleUi::new()
        };

        let config = match self.effective_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, config_path = %config_path, "Invalid configuration");
                ui.error(&format!("Error: {e}"));
                return Ok(e.exit_code());
            }
        };

        let artifact: Arc<dyn Artifact> = match self.artifact() {
            Ok(a) => Arc::new(a),
            Err(e) => {
                ui.error(&format!("Error: {e}"));
                return Ok(2); // Configuration error exit code
            }
        };

        let stage = SaveStage::new(config.save.clone());
        let outcome = match stage.post_process(&ui, artifact, shutdown_signal).await {
            Ok(o) => o,
            Err(e) => {
                if e.is_cancelled() {
                    tracing::warn!("Save cancelled by shutdown signal");
                }
                ui.error(&format!("Error: {e}"));
                return Ok(e.exit_code());
            }
        };

        let mut summary = SaveSummary::from_outcome(&outcome, &stage.config().path);

        if config.verification.checksum {
            match archive_sha256(&stage.config().path).await {
                Ok(digest) => {
                    tracing::info!(sha256 = %digest, "Archive checksum computed");
                    summary = summary.with_sha256(digest);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Archive checksum failed");
                    ui.error(&format!("Error: {e}"));
                    return Ok(e.exit_code());
                }
            }
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            ui.message("Save Summary:");
            for line in summary.format_lines() {
                ui.message(&line);
            }
        }

        Ok(0)
    }

    /// Build the configuration for this run
    ///
    /// The config file is optional for `save`: when it does not exist the
    /// defaults plus `DOCKER_SAVE_*` overrides are used. Command-line flags
    /// win over both, and validation runs once after every layer is applied.
    pub fn effective_config(&self, config_path: &str) -> crate::domain::Result<DockerSaveConfig> {
        let mut config = if Path::new(config_path).exists() {
            read_config(config_path)?
        } else {
            tracing::debug!(config_path = %config_path, "No config file, using defaults");
            let mut config = DockerSaveConfig::default();
            apply_env_overrides(&mut config);
            config
        };

        if let Some(path) = &self.path {
            config.save.path = path.clone();
        }
        if let Some(docker_path) = &self.docker_path {
            config.save.docker_path = docker_path.clone();
        }

        config.resolve();
        config.validate().map_err(|e| {
            DockerSaveError::Configuration(format!("Configuration validation failed: {}", e))
        })?;
        Ok(config)
    }

    /// Build the artifact handed to the stage
    pub fn artifact(&self) -> Result<ImageArtifact, String> {
        ImageArtifactBuilder::new()
            .id(self.image.as_str())?
            .builder_id(self.builder_id.as_str())
            .build()
    }
}
