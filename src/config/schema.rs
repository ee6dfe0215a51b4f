//! Configuration schema types
//!
//! This module defines the configuration structure for docker-save.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Executable used by the default driver when `docker_path` is unset
pub const DEFAULT_DOCKER_PATH: &str = "docker";

/// Main docker-save configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerSaveConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export stage settings
    #[serde(default)]
    pub save: SaveConfig,

    /// Archive verification settings
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DockerSaveConfig {
    /// Applies default-value rules that depend on the parsed values
    pub fn resolve(&mut self) {
        self.save.resolve();
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.save.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export stage configuration
///
/// Resolved once before the stage is built and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Image runtime binary used by the default driver
    #[serde(default = "default_docker_path")]
    pub docker_path: String,

    /// Destination archive path
    #[serde(default)]
    pub path: PathBuf,
}

impl SaveConfig {
    /// Creates a resolved configuration writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            docker_path: default_docker_path(),
            path: path.into(),
        }
    }

    /// Sets the image runtime binary
    pub fn with_docker_path(mut self, docker_path: impl Into<String>) -> Self {
        self.docker_path = docker_path.into();
        self.resolve();
        self
    }

    /// Falls back to [`DEFAULT_DOCKER_PATH`] when no executable is set
    pub fn resolve(&mut self) {
        if self.docker_path.trim().is_empty() {
            self.docker_path = default_docker_path();
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("save.path is required".to_string());
        }
        if self.path.is_dir() {
            return Err(format!(
                "save.path '{}' is a directory, expected a file path",
                self.path.display()
            ));
        }
        if self.docker_path.trim().is_empty() {
            return Err("save.docker_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Archive verification configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Compute a SHA-256 digest of the archive after a successful save
    #[serde(default)]
    pub checksum: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_docker_path() -> String {
    DEFAULT_DOCKER_PATH.to_string()
}

fn default_local_path() -> String {
    "/var/log/docker-save".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_config_new_uses_default_docker_path() {
        let config = SaveConfig::new("/tmp/out.tar");
        assert_eq!(config.docker_path, "docker");
        assert_eq!(config.path, PathBuf::from("/tmp/out.tar"));
    }

    #[test]
    fn test_save_config_resolve_empty_docker_path() {
        let mut config = SaveConfig {
            docker_path: String::new(),
            path: PathBuf::from("out.tar"),
        };
        config.resolve();
        assert_eq!(config.docker_path, DEFAULT_DOCKER_PATH);
    }

    #[test]
    fn test_save_config_resolve_keeps_custom_docker_path() {
        let mut config = SaveConfig {
            docker_path: "/usr/local/bin/podman".to_string(),
            path: PathBuf::from("out.tar"),
        };
        config.resolve();
        assert_eq!(config.docker_path, "/usr/local/bin/podman");
    }

    #[test]
    fn test_with_docker_path_blank_falls_back() {
        let config = SaveConfig::new("out.tar").with_docker_path("  ");
        assert_eq!(config.docker_path, "docker");
    }

    #[test]
    fn test_save_config_missing_path() {
        let config = SaveConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.contains("save.path is required"));
    }

    #[test]
    fn test_save_config_directory_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = SaveConfig::new(dir.path());
        assert!(config.validate().unwrap_err().contains("is a directory"));
    }

    #[test]
    fn test_save_config_unresolved_docker_path() {
        let config = SaveConfig {
            docker_path: String::new(),
            path: PathBuf::from("out.tar"),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_application_config_invalid_log_level() {
        let config = ApplicationConfig {
            log_level: "verbose".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_invalid_rotation() {
        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_enabled_without_path() {
        let config = LoggingConfig {
            local_enabled: true,
            local_path: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_root_config_defaults_fail_without_path() {
        let mut config = DockerSaveConfig::default();
        config.resolve();
        assert!(config.validate().is_err());

        config.save.path = PathBuf::from("image.tar");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_without_docker_path() {
        let config: DockerSaveConfig = toml::from_str(
            r#"
[save]
path = "image.tar"
"#,
        )
        .unwrap();
        assert_eq!(config.save.docker_path, "docker");
        assert_eq!(config.application.log_level, "info");
        assert!(!config.verification.checksum);
        assert!(!config.logging.local_enabled);
    }
}
