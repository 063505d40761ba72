//! Settings loading: TOML file, `${VAR}` substitution, `CLOAK_*` overrides.

use super::settings::Settings;
use crate::domain::errors::CloakError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

/// Default settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "cloak.toml";

/// Loads and validates settings from a TOML file.
///
/// `${VAR}` references are substituted from the environment before
/// parsing, and `CLOAK_*` variables override individual keys after it.
///
/// # Errors
///
/// Fails when the file is missing or unreadable, a referenced
/// environment variable is unset, the TOML does not parse, or the
/// resulting settings do not validate.
///
/// ```no_run
/// use cloak::config::loader::load_settings;
///
/// let settings = load_settings("cloak.toml").expect("Failed to load settings");
/// ```
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CloakError::Configuration(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path).map_err(|e| {
        CloakError::Configuration(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;
    let contents = substitute_env_vars(&raw)?;

    let mut settings: Settings = toml::from_str(&contents)
        .map_err(|e| CloakError::Configuration(format!("Failed to parse TOML: {}", e)))?;
    apply_env_overrides(&mut settings);

    settings
        .validate()
        .map_err(|e| CloakError::Configuration(format!("Settings validation failed: {}", e)))?;

    Ok(settings)
}

/// Like [`load_settings`], but the implicit `cloak.toml` lookup may
/// come up empty, in which case defaults (plus `CLOAK_*` overrides)
/// apply. An explicitly configured path that does not exist is still
/// an error.
pub fn load_settings_or_default(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() && path == Path::new(DEFAULT_SETTINGS_PATH) {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);
        settings
            .validate()
            .map_err(|e| CloakError::Configuration(format!("Settings validation failed: {}", e)))?;
        return Ok(settings);
    }

    load_settings(path)
}

/// Replaces `${VAR_NAME}` references with environment values.
///
/// Comment lines are left alone. Every unset variable is reported, not
/// just the first one.
fn substitute_env_vars(input: &str) -> Result<String> {
    let placeholder = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut missing: Vec<String> = Vec::new();
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }
        let substituted = placeholder.replace_all(line, |caps: &Captures| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        lines.push(substituted.into_owned());
    }

    if missing.is_empty() {
        Ok(lines.join("\n"))
    } else {
        Err(CloakError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )))
    }
}

/// Applies `CLOAK_<SECTION>_<KEY>` environment overrides, e.g.
/// `CLOAK_DETECTION_LANGUAGE` or `CLOAK_AUDIT_ENABLED`.
fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("CLOAK_DETECTION_LANGUAGE") {
        settings.detection.language = val;
    }
    if let Ok(val) = std::env::var("CLOAK_DETECTION_PATTERN_FILE") {
        settings.detection.pattern_file = Some(val);
    }
    if let Ok(val) = std::env::var("CLOAK_OUTPUT_QUOTE_NUMERIC_IDS") {
        settings.output.quote_numeric_ids = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CLOAK_AUDIT_ENABLED") {
        settings.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CLOAK_AUDIT_PATH") {
        settings.audit.path = val;
    }
    if let Ok(val) = std::env::var("CLOAK_LOGGING_LOCAL_ENABLED") {
        settings.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CLOAK_LOGGING_LOCAL_PATH") {
        settings.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CLOAK_LOGGING_LOG_LEVEL") {
        settings.logging.log_level = val;
    }
}
