//! Configuration management for Cloak.
//!
//! This module provides TOML-based settings loading plus the YAML
//! replacements file shared between the `extract` and `pseudo`
//! commands.
//!
//! # Overview
//!
//! Cloak uses TOML settings files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`CLOAK_*` prefix)
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cloak::config::load_settings;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load settings from file
//! let settings = load_settings("cloak.toml")?;
//!
//! // Access settings sections
//! println!("Language: {}", settings.detection.language);
//! println!("Person threshold: {}", settings.detection.thresholds.person);
//! # Ok(())
//! # }
//! ```
//!
//! # Settings Structure
//!
//! The settings are organized into sections:
//!
//! - [`DetectionSettings`] - Language, name denylist, thresholds, pattern catalog
//! - [`OutputSettings`] - Replacement id rendering
//! - [`AuditSettings`] - JSON-lines audit trail
//! - [`LoggingSettings`] - Console and file logging
//!
//! # Example Settings
//!
//! ```toml
//! [detection]
//! language = "en"
//! name_denylist = ["multiline", "phone", "account", "code", "street"]
//!
//! [detection.thresholds]
//! person = 85.0
//! date_number = 95.0
//!
//! [output]
//! quote_numeric_ids = true
//!
//! [audit]
//! enabled = true
//! path = "${CLOAK_AUDIT_DIR}/audit.jsonl"
//! ```
//!
//! # Replacements File
//!
//! The replacements YAML produced by `extract` and consumed by
//! `pseudo` is handled by [`load_replacements`] and
//! [`save_replacements`]; see [`replacements`] for the format.

pub mod loader;
pub mod replacements;
pub mod settings;

// Re-export commonly used types
pub use loader::{load_settings, load_settings_or_default, DEFAULT_SETTINGS_PATH};
pub use replacements::{load_replacements, parse_replacements, save_replacements, to_yaml};
pub use settings::{
    AuditSettings, DetectionSettings, LoggingSettings, OutputSettings, Settings,
    ThresholdSettings,
};
