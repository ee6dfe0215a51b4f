//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for docker-save using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// docker-save - Export Docker images to tar archives
#[derive(Parser, Debug)]
#[command(name = "docker-save")]
#[command(version, about, long_about = None)]
#[command(author = "docker-save Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "docker-save.toml", env = "DOCKER_SAVE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOCKER_SAVE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save an image produced by the import or tag stage to a tar archive
    Save(commands::save::SaveArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
