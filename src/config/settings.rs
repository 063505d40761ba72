//! Settings schema types
//!
//! This module defines the settings structure mapped from `cloak.toml`.

use crate::domain::EntityCategory;
use serde::{Deserialize, Serialize};

/// Main Cloak settings
///
/// This is the root settings structure that maps to the TOML file.
/// Every section is optional; omitted sections fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Detection and clustering settings
    #[serde(default)]
    pub detection: DetectionSettings,

    /// Output rendering settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Audit trail settings
    #[serde(default)]
    pub audit: AuditSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Validates the settings
    ///
    /// # Errors
    ///
    /// Returns an error if any settings values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.detection.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Detection and clustering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Language hint passed to recognizers
    #[serde(default = "default_language")]
    pub language: String,

    /// Words that disqualify a detected string as a person name
    #[serde(default = "default_denylist")]
    pub name_denylist: Vec<String>,

    /// Per-category similarity thresholds (0-100)
    #[serde(default)]
    pub thresholds: ThresholdSettings,

    /// Optional TOML pattern catalog replacing the bundled one
    #[serde(default)]
    pub pattern_file: Option<String>,
}

impl DetectionSettings {
    fn validate(&self) -> Result<(), String> {
        if self.language.is_empty() {
            return Err("detection.language cannot be empty".to_string());
        }
        self.thresholds.validate()?;
        Ok(())
    }
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            name_denylist: default_denylist(),
            thresholds: ThresholdSettings::default(),
            pattern_file: None,
        }
    }
}

/// Per-category similarity thresholds
///
/// A detected string joins a cluster only when its similarity to the
/// cluster seed is strictly above the category threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Threshold for person names
    #[serde(default = "default_person_threshold")]
    pub person: f64,

    /// Threshold for phone numbers
    #[serde(default = "default_number_threshold")]
    pub phone_number: f64,

    /// Threshold for numeric dates
    #[serde(default = "default_date_threshold")]
    pub date_number: f64,

    /// Threshold for identifier numbers
    #[serde(default = "default_number_threshold")]
    pub id_number: f64,

    /// Threshold for account and reference codes
    #[serde(default = "default_number_threshold")]
    pub code_number: f64,

    /// Threshold for uncategorized digit sequences
    #[serde(default = "default_number_threshold")]
    pub general_number: f64,
}

impl ThresholdSettings {
    /// Returns the configured threshold for `category`, or `None` for
    /// categories that never cluster.
    pub fn for_category(&self, category: EntityCategory) -> Option<f64> {
        match category {
            EntityCategory::Person => Some(self.person),
            EntityCategory::PhoneNumber => Some(self.phone_number),
            EntityCategory::DateNumber => Some(self.date_number),
            EntityCategory::IdNumber => Some(self.id_number),
            EntityCategory::CodeNumber => Some(self.code_number),
            EntityCategory::GeneralNumber => Some(self.general_number),
            EntityCategory::Email | EntityCategory::Location | EntityCategory::NationalId => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        let thresholds = [
            ("person", self.person),
            ("phone_number", self.phone_number),
            ("date_number", self.date_number),
            ("id_number", self.id_number),
            ("code_number", self.code_number),
            ("general_number", self.general_number),
        ];
        for (name, value) in thresholds {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!(
                    "detection.thresholds.{} must be between 0 and 100, got {}",
                    name, value
                ));
            }
        }
        Ok(())
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            person: default_person_threshold(),
            phone_number: default_number_threshold(),
            date_number: default_date_threshold(),
            id_number: default_number_threshold(),
            code_number: default_number_threshold(),
            general_number: default_number_threshold(),
        }
    }
}

/// Output rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Wrap replacement ids for numeric categories in double quotes
    #[serde(default = "default_true")]
    pub quote_numeric_ids: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            quote_numeric_ids: true,
        }
    }
}

/// Audit trail settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Enable the JSON-lines audit log
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_path")]
    pub path: String,
}

impl AuditSettings {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.path.is_empty() {
            return Err("audit.path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_audit_path(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl LoggingSettings {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid logging.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        Ok(())
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_language() -> String {
    "en".to_string()
}

fn default_denylist() -> Vec<String> {
    crate::core::normalize::default_name_denylist()
}

fn default_person_threshold() -> f64 {
    85.0
}

fn default_number_threshold() -> f64 {
    80.0
}

fn default_date_threshold() -> f64 {
    95.0
}

fn default_true() -> bool {
    true
}

fn default_audit_path() -> String {
    "logs/cloak_audit.jsonl".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
