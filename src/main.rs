// Cloak - Document pseudonymization tool
// Copyright (c) 2025 Cloak Contributors
// Licensed under the MIT License

use clap::Parser;
use cloak::cli::{Cli, Commands};
use cloak::config::{load_settings_or_default, Settings};
use cloak::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load settings; a missing default settings file falls back to
    // built-in defaults, an explicitly configured one does not
    let settings = match load_settings_or_default(&cli.settings) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            process::exit(2);
        }
    };

    // CLI flag wins over the settings file
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&settings.logging.log_level);
    let _logging_guard = match init_logging(log_level, &settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Cloak - Document pseudonymization tool"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, &settings) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, settings: &Settings) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Extract(args) => args.execute(settings),
        Commands::Pseudo(args) => args.execute(settings),
        Commands::ValidateConfig(args) => args.execute(),
        Commands::Init(args) => args.execute(),
    }
}
