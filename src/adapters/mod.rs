//! External system integrations for docker-save.
//!
//! - [`driver`] - Image runtime drivers that serialize an image to a stream
//!
//! # Design Pattern
//!
//! Adapters isolate external processes behind the [`driver::ExportDriver`]
//! trait so the export stage can be exercised with in-memory drivers.
//!
//! ```rust,no_run
//! use docker_save::adapters::driver::{DockerDriver, ExportDriver};
//! use tokio::sync::watch;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = DockerDriver::new("docker");
//! let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//! let mut file = tokio::fs::File::create("app.tar").await?;
//! driver.save_image("app:latest", &mut file, shutdown_rx).await?;
//! # Ok(())
//! # }
//! ```

pub mod driver;
