//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Cloak using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cloak - Document pseudonymization tool
#[derive(Parser, Debug)]
#[command(name = "cloak")]
#[command(version, about, long_about = None)]
#[command(author = "Cloak Contributors")]
pub struct Cli {
    /// Path to settings file
    #[arg(short, long, default_value = "cloak.toml", env = "CLOAK_SETTINGS")]
    pub settings: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLOAK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect entities and write a reviewable replacements file
    Extract(commands::extract::ExtractArgs),

    /// Substitute reviewed entities with replacement ids
    Pseudo(commands::pseudo::PseudoArgs),

    /// Validate a replacements file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new settings file
    Init(commands::init::InitArgs),
}
