//! The `init` command: writes a starter settings file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the settings file
    #[arg(short, long, default_value = "cloak.toml")]
    pub output: String,

    /// Annotate every setting with comments and examples
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing settings file");

        println!("📝 Initializing Cloak settings");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Settings file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let settings_content = if self.with_examples {
            Self::generate_settings_with_examples()
        } else {
            Self::generate_minimal_settings()
        };

        match fs::write(&self.output, settings_content) {
            Ok(_) => {
                println!("✅ Settings file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Extract entities: cloak extract --file notes.md");
                println!("  3. Review replacements.yaml and fix any mis-grouped variants");
                println!("  4. Anonymize: cloak pseudo --file notes.md --config replacements.yaml");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write settings file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_minimal_settings() -> String {
        r#"# Cloak Settings File
# Document pseudonymization tool

[detection]
# Language hint passed to recognizers
language = "en"

# Whole tokens that disqualify a string from name clustering
name_denylist = ["multiline", "phone", "account", "code", "street"]

# Optional: custom recognizer catalog (TOML)
# pattern_file = "patterns/recognizers.toml"

# Similarity thresholds per category (0-100)
[detection.thresholds]
person = 85.0
phone_number = 80.0
date_number = 95.0
id_number = 80.0
code_number = 80.0
general_number = 80.0

[output]
quote_numeric_ids = true

[audit]
enabled = false
path = "logs/cloak_audit.jsonl"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
log_level = "info"
"#
        .to_string()
    }

    fn generate_settings_with_examples() -> String {
        r#"# Cloak Settings File
# Document pseudonymization tool
#
# This file contains all settings with examples and explanations.
#
# Cloak works in two passes:
#   - extract: detect entities and write a reviewable replacements file
#   - pseudo: substitute the reviewed entities with replacement ids

# ============================================================================
# Detection Settings
# ============================================================================
[detection]
# Language hint passed to recognizers
language = "en"

# Whole tokens that disqualify a string from name clustering.
# Comparison is case-insensitive and token-based, so "Phone" in
# "Phone Number" matches but "phoneme" does not.
name_denylist = ["multiline", "phone", "account", "code", "street"]

# Optional: custom recognizer catalog (TOML). When unset, the catalog
# bundled with the binary is used.
# pattern_file = "patterns/recognizers.toml"

# Similarity thresholds per category (0-100). Two detected strings are
# grouped as variants of one entity when their normalized similarity
# meets the category threshold.
[detection.thresholds]
# Person names tolerate spelling drift and abbreviations
person = 85.0

# Phone numbers compare after stripping separators
phone_number = 80.0

# Dates must be near-identical to group
date_number = 95.0

# Identifier-like numbers (national ids, case numbers)
id_number = 80.0

# Account and reference codes
code_number = 80.0

# Numbers with no recognized shape
general_number = 80.0

# ============================================================================
# Output Settings
# ============================================================================
[output]
# Quote replacement ids for numeric categories, e.g. "<PHONE_NUMBER_1>",
# so downstream parsers do not read them as malformed numbers
quote_numeric_ids = true

# ============================================================================
# Audit Settings
# ============================================================================
[audit]
# Append a JSON line per anonymized document (no original text is logged)
enabled = false

# Audit log path (parent directories are created)
path = "logs/cloak_audit.jsonl"

# ============================================================================
# Logging Settings
# ============================================================================
[logging]
# Enable local file logging
local_enabled = false

# Local log file directory
local_path = "logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"

# Log level (trace, debug, info, warn, error)
log_level = "info"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_existing_file_is_not_overwritten_without_force() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cloak.toml");
        fs::write(&path, "# keep me\n").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# keep me\n");
    }

    #[test]
    fn test_force_overwrites_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cloak.toml");
        fs::write(&path, "# stale\n").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: true,
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[detection]"));
    }

    #[test]
    fn test_minimal_settings_parse_and_validate() {
        let settings: Settings =
            toml::from_str(&InitArgs::generate_minimal_settings()).unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.detection.language, "en");
    }

    #[test]
    fn test_example_settings_parse_and_validate() {
        let settings: Settings =
            toml::from_str(&InitArgs::generate_settings_with_examples()).unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.detection.thresholds.person, 85.0);
    }
}
