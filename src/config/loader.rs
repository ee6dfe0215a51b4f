//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DockerSaveConfig;
use crate::domain::errors::DockerSaveError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "DOCKER_SAVE_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads and parses the file with [`read_config`]
/// 2. Resolves defaults and validates the configuration
///
/// # Errors
///
/// Returns [`DockerSaveError::Configuration`] if any step fails
///
/// # Examples
///
/// ```no_run
/// use docker_save::config::loader::load_config;
///
/// let config = load_config("docker-save.toml").expect("Failed to load config");
/// println!("Saving to {}", config.save.path.display());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DockerSaveConfig> {
    let path = path.as_ref();
    let mut config = read_config(path)?;

    config.resolve();
    config.validate().map_err(|e| {
        DockerSaveError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    tracing::debug!(
        config_path = %path.display(),
        docker_path = %config.save.docker_path,
        output = %config.save.path.display(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Reads a TOML file without resolving or validating it
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DockerSaveConfig
/// 4. Applies environment variable overrides (DOCKER_SAVE_* prefix)
///
/// Callers that layer further overrides on top (command-line flags) must
/// call `resolve()` and `validate()` themselves afterwards.
///
/// # Errors
///
/// Returns [`DockerSaveError::Configuration`] if the file is missing,
/// unreadable, references unset variables or is not valid TOML
pub fn read_config(path: impl AsRef<Path>) -> Result<DockerSaveConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DockerSaveError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DockerSaveError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: DockerSaveConfig = toml::from_str(&contents)
        .map_err(|e| DockerSaveError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);
    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied verbatim.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DockerSaveError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the DOCKER_SAVE_* prefix
///
/// Unparseable boolean values leave the file setting untouched.
pub fn apply_env_overrides(config: &mut DockerSaveConfig) {
    let var = |key: &str| std::env::var(format!("{ENV_PREFIX}{key}")).ok();

    if let Some(val) = var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = var("DOCKER_PATH") {
        config.save.docker_path = val;
    }
    if let Some(val) = var("PATH") {
        config.save.path = PathBuf::from(val);
    }

    if let Some(val) = var("VERIFICATION_CHECKSUM") {
        if let Ok(enabled) = val.parse() {
            config.verification.checksum = enabled;
        }
    }

    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
