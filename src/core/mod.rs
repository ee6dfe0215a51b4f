//! Core business logic for docker-save.
//!
//! # Modules
//!
//! - [`save`] - The export stage, output file handling and save summaries
//! - [`verification`] - Archive checksums
//!
//! # Save Workflow
//!
//! 1. **Provenance**: Only artifacts from the import or tag stage are accepted
//! 2. **Create**: Open (and truncate) the destination archive
//! 3. **Export**: Stream `docker save` output into the archive
//! 4. **Close**: Flush and sync the archive, or remove it on failure
//! 5. **Verify** (optional): Compute the archive SHA-256
//!
//! # Example
//!
//! ```rust,no_run
//! use docker_save::config::SaveConfig;
//! use docker_save::core::save::SaveStage;
//! use docker_save::domain::ids::DOCKER_IMPORT_BUILDER_ID;
//! use docker_save::domain::{Artifact, ImageArtifactBuilder};
//! use docker_save::ui::ConsoleUi;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let stage = SaveStage::new(SaveConfig::new("image.tar"));
//!
//! let artifact: Arc<dyn Artifact> = Arc::new(
//!     ImageArtifactBuilder::new()
//!         .id("sha256:abc123")?
//!         .builder_id(DOCKER_IMPORT_BUILDER_ID)
//!         .build()?,
//! );
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let outcome = stage.post_process(&ConsoleUi::new(), artifact, shutdown_rx).await?;
//!
//! println!("Saved {} bytes", outcome.bytes_written);
//! # Ok(())
//! # }
//! ```

pub mod save;
pub mod verification;
