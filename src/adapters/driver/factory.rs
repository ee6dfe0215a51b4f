//! Export driver factory
//!
//! This module builds the default export driver from configuration.

use crate::adapters::driver::docker::DockerDriver;
use crate::adapters::driver::traits::ExportDriver;
use crate::config::SaveConfig;
use std::sync::Arc;

/// Create the default export driver for a resolved configuration
///
/// # Examples
///
/// ```
/// use docker_save::adapters::driver::{create_export_driver, DockerDriver};
/// use docker_save::config::SaveConfig;
///
/// let driver = create_export_driver(&SaveConfig::new("image.tar"));
/// let docker = driver.as_any().downcast_ref::<DockerDriver>().unwrap();
/// assert_eq!(docker.executable(), "docker");
/// ```
pub fn create_export_driver(config: &SaveConfig) -> Arc<dyn ExportDriver> {
    tracing::debug!(executable = %config.docker_path, "Creating docker export driver");
    Arc::new(DockerDriver::from_config(config))
}
