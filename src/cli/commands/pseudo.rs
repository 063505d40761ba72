//! Pseudo command implementation
//!
//! This module implements the `pseudo` command: load a reviewed
//! replacements file and rewrite the given documents with replacement
//! ids.

use crate::adapters::formats::{anonymize_file, default_output_path};
use crate::config::{load_replacements, Settings};
use crate::core::audit::AuditLogger;
use crate::core::substitute::{OutputPolicy, SubstitutionEngine};
use crate::domain::{EntityCategory, ReplacementCounts};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the pseudo command
#[derive(Args, Debug)]
pub struct PseudoArgs {
    /// Document(s) to anonymize
    #[arg(short, long, required = true, num_args = 1..)]
    pub file: Vec<PathBuf>,

    /// Replacements YAML produced by extract
    #[arg(short, long)]
    pub config: PathBuf,

    /// Output path (single input file only; default <stem>_anon.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory to write entity_mapping.json into
    #[arg(long)]
    pub mapping_dir: Option<PathBuf>,
}

impl PseudoArgs {
    /// Execute the pseudo command
    pub fn execute(&self, settings: &Settings) -> anyhow::Result<i32> {
        tracing::info!(files = self.file.len(), "Starting pseudo command");

        if self.output.is_some() && self.file.len() > 1 {
            println!("❌ --output cannot be combined with multiple input files");
            return Ok(2);
        }

        let registry = match load_replacements(&self.config) {
            Ok(registry) => registry,
            Err(e) => {
                println!("❌ Failed to load replacements file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };
        if registry.is_empty() {
            println!("⚠️  Replacements file has no entities; output will match input");
        }

        let policy = OutputPolicy {
            quote_numeric_ids: settings.output.quote_numeric_ids,
        };
        let engine = match SubstitutionEngine::new(&registry, &policy) {
            Ok(engine) => engine,
            Err(e) => {
                println!("❌ Invalid replacements file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let audit = AuditLogger::new(PathBuf::from(&settings.audit.path), settings.audit.enabled)?;

        let mut totals = ReplacementCounts::new();
        for path in &self.file {
            crate::log_document_start!(path);

            let document = match anonymize_file(path, &engine) {
                Ok(document) => document,
                Err(e) => {
                    println!("❌ Failed to anonymize {}", path.display());
                    println!("   Error: {e}");
                    return Ok(2);
                }
            };

            let output_path = self
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(path));
            if let Err(e) = fs::write(&output_path, &document.content) {
                tracing::error!(error = %e, "Failed to write output");
                eprintln!("Failed to write {}: {e}", output_path.display());
                return Ok(5);
            }

            println!("✅ {} -> {}", path.display(), output_path.display());
            for category in EntityCategory::ALL {
                let replaced = document.counts.replaced(category);
                if replaced > 0 {
                    println!("   {} replaced: {}", category.label(), replaced);
                }
            }

            audit.record(&path.display().to_string(), &registry, &document.counts)?;
            crate::log_document_complete!(
                path,
                document.counts.total_found(),
                document.counts.total_replaced()
            );
            totals.merge(&document.counts);
        }

        if let Some(dir) = &self.mapping_dir {
            fs::create_dir_all(dir)?;
            let mapping_path = dir.join("entity_mapping.json");
            let mapping = serde_json::to_string_pretty(&registry.variant_map())?;
            fs::write(&mapping_path, mapping)?;
            println!("📝 Wrote {}", mapping_path.display());
        }

        println!();
        println!("📊 Summary:");
        println!("  Files: {}", self.file.len());
        println!("  Found: {}", totals.total_found());
        println!("  Replaced: {}", totals.total_replaced());
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_args_creation() {
        let args = PseudoArgs {
            file: vec![PathBuf::from("notes.md")],
            config: PathBuf::from("replacements.yaml"),
            output: None,
            mapping_dir: None,
        };

        assert_eq!(args.file.len(), 1);
        assert!(args.output.is_none());
        assert!(args.mapping_dir.is_none());
    }

    #[test]
    fn test_output_with_multiple_files_is_rejected() {
        let args = PseudoArgs {
            file: vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
            config: PathBuf::from("replacements.yaml"),
            output: Some(PathBuf::from("out.md")),
            mapping_dir: None,
        };

        let code = args.execute(&Settings::default()).unwrap();
        assert_eq!(code, 2);
    }
}
