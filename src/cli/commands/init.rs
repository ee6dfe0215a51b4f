//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "docker-save.toml")]
    pub output: String,

    /// Include commented examples for every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set save.path in {}", self.output);
                println!(
                    "  2. Validate configuration: docker-save --config {} validate-config",
                    self.output
                );
                println!("  3. Save an image: docker-save save --image <ID> --builder-id <STAGE>");
                println!();
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, output = %self.output, "Failed to write configuration");
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# docker-save configuration

[application]
log_level = "info"

[save]
docker_path = "docker"
path = "image.tar"
"#
        .to_string()
    }

    /// Generate configuration with every section documented
    fn generate_config_with_examples() -> String {
        r#"# docker-save configuration
#
# Values may reference environment variables as ${VAR}. Every setting can
# also be overridden with a DOCKER_SAVE_* variable, e.g. DOCKER_SAVE_PATH.

[application]
# trace | debug | info | warn | error
log_level = "info"

[save]
# Docker (or compatible) executable. Empty means "docker" on PATH.
docker_path = "docker"

# Destination archive. Truncated if it already exists.
path = "${HOME}/images/app.tar"

[verification]
# Compute a SHA-256 of the archive after a successful save
checksum = false

[logging]
# JSON log file in addition to console output
local_enabled = false
local_path = "/var/log/docker-save"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
