//! Export stage
//!
//! Gate-keeps which artifacts may be exported, owns the destination file for
//! the duration of one save and delegates serialization to an
//! [`ExportDriver`].

use super::outcome::PostProcessOutcome;
use super::output::OutputFile;
use crate::adapters::driver::{create_export_driver, ExportDriver};
use crate::config::SaveConfig;
use crate::domain::errors::DockerSaveError;
use crate::domain::ids::is_accepted_builder;
use crate::domain::{Artifact, Result};
use crate::ui::Ui;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Pipeline stage that saves an image artifact to an archive file
pub struct SaveStage {
    config: SaveConfig,
    driver: Arc<dyn ExportDriver>,
}

impl SaveStage {
    /// Create a stage using the docker driver bound to `config.docker_path`
    pub fn new(mut config: SaveConfig) -> Self {
        config.resolve();
        let driver = create_export_driver(&config);
        Self { config, driver }
    }

    /// Create a stage with a caller-supplied driver
    pub fn with_driver(mut config: SaveConfig, driver: Arc<dyn ExportDriver>) -> Self {
        config.resolve();
        Self { config, driver }
    }

    /// Resolved configuration
    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Driver used for saves
    pub fn driver(&self) -> &dyn ExportDriver {
        self.driver.as_ref()
    }

    /// Save `artifact` to the configured path
    ///
    /// On success the same artifact handle is returned with
    /// `continue_chain = true` and `force_override = false`. On any failure
    /// the destination file does not exist when this returns.
    ///
    /// # Errors
    ///
    /// - [`DockerSaveError::Provenance`] if the artifact was not produced by
    ///   the import or tag stage. No file is touched.
    /// - [`DockerSaveError::OutputFile`] if the destination cannot be
    ///   created. The driver is not called.
    /// - [`DockerSaveError::Export`] if the driver fails or is cancelled.
    pub async fn post_process(
        &self,
        ui: &dyn Ui,
        artifact: Arc<dyn Artifact>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<PostProcessOutcome> {
        let started = Instant::now();

        if !is_accepted_builder(artifact.builder_id()) {
            tracing::warn!(
                builder_id = %artifact.builder_id(),
                artifact = %artifact.describe(),
                "Rejecting artifact from unsupported stage"
            );
            return Err(DockerSaveError::Provenance(
                artifact.builder_id().to_string(),
            ));
        }

        let path = &self.config.path;
        let mut output = OutputFile::create(path).await?;

        tracing::info!(
            image_id = %artifact.id(),
            builder_id = %artifact.builder_id(),
            artifact = %artifact.describe(),
            path = %path.display(),
            driver = self.driver.name(),
            "Saving image"
        );
        ui.message(&format!("Saving image: {}", artifact.id()));

        if let Err(e) = self
            .driver
            .save_image(artifact.id(), output.writer(), shutdown)
            .await
        {
            tracing::error!(
                image_id = %artifact.id(),
                path = %path.display(),
                error = %e,
                "Image save failed"
            );
            output.discard().await;
            return Err(DockerSaveError::Export(e));
        }

        let bytes_written = output.commit().await?;
        ui.message(&format!("Saved to: {}", path.display()));

        let duration = started.elapsed();
        tracing::info!(
            image_id = %artifact.id(),
            path = %path.display(),
            bytes = bytes_written,
            duration_ms = duration.as_millis() as u64,
            "Image saved"
        );

        Ok(PostProcessOutcome::saved(artifact, bytes_written, duration))
    }
}
