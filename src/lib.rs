// docker-save - Docker image export stage
// Copyright (c) 2025 docker-save Contributors
// Licensed under the MIT License

//! # docker-save - Docker image export stage
//!
//! docker-save is the terminal stage of an image build pipeline: it takes an
//! image produced by the import or tag stage and writes it to a tar archive
//! on local disk using the Docker CLI.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Gating** artifacts by the stage that produced them
//! - **Exporting** images by streaming `docker save` output into a file
//! - **Cleaning up** the destination file whenever a save does not complete
//! - **Passing through** the input artifact so later stages keep running
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The save stage and archive verification
//! - [`adapters`] - Export drivers (Docker CLI)
//! - [`domain`] - Artifacts, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`ui`] - User-facing progress messages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docker_save::config::SaveConfig;
//! use docker_save::core::save::SaveStage;
//! use docker_save::domain::ids::DOCKER_TAG_BUILDER_ID;
//! use docker_save::domain::{Artifact, ImageArtifactBuilder};
//! use docker_save::ui::ConsoleUi;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stage = SaveStage::new(SaveConfig::new("app.tar"));
//!
//!     let artifact: Arc<dyn Artifact> = Arc::new(
//!         ImageArtifactBuilder::new()
//!             .id("registry.example.com/app:1.0")?
//!             .builder_id(DOCKER_TAG_BUILDER_ID)
//!             .build()?,
//!     );
//!
//!     let (_tx, shutdown) = tokio::sync::watch::channel(false);
//!     let outcome = stage.post_process(&ConsoleUi::new(), artifact, shutdown).await?;
//!
//!     assert!(outcome.continue_chain);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::DockerSaveError`], which maps to
//! a process exit code through [`domain::DockerSaveError::exit_code`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod ui;
