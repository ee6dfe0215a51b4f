//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output on stderr
//! - Configurable log levels
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use docker_save::logging::init_logging;
//! use docker_save::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(image_id = "sha256:abc123", "Saving image");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};
