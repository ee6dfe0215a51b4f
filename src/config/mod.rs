//! Configuration management for docker-save.
//!
//! # Overview
//!
//! docker-save uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DOCKER_SAVE_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [save]
//! docker_path = "docker"
//! path = "${BUILD_DIR}/image.tar"
//!
//! [verification]
//! checksum = true
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docker_save::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docker-save.toml")?;
//! println!("Runtime: {}", config.save.docker_path);
//! println!("Archive: {}", config.save.path.display());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{apply_env_overrides, load_config, read_config};
pub use schema::{
    ApplicationConfig, DockerSaveConfig, LoggingConfig, SaveConfig, VerificationConfig,
    DEFAULT_DOCKER_PATH,
};
