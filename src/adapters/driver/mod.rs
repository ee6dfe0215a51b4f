//! Export driver abstraction layer
//!
//! This module provides a trait-based abstraction over the image runtime,
//! allowing the export stage to be driven by the docker CLI or by any other
//! implementation supplied by the caller.

pub mod docker;
pub mod factory;
pub mod traits;

pub use docker::DockerDriver;
pub use factory::create_export_driver;
pub use traits::{shutdown_requested, ExportDriver};
