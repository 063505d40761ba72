//! Extract command implementation
//!
//! This module implements the `extract` command: detect entities across
//! the given documents, cluster variants, and write the replacements
//! YAML for review.

use crate::adapters::formats::extract_text;
use crate::adapters::recognizer::{
    CompositeRecognizer, DetectionAdapter, Detections, PatternRecognizer,
};
use crate::config::{save_replacements, Settings};
use crate::core::cluster::cluster_category;
use crate::core::registry::Registry;
use crate::domain::EntityCategory;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Document(s) to scan
    #[arg(short, long, required = true, num_args = 1..)]
    pub file: Vec<PathBuf>,

    /// Where to write the replacements YAML
    #[arg(short, long, default_value = "replacements.yaml")]
    pub config: PathBuf,

    /// Override the detection language from settings
    #[arg(short, long)]
    pub language: Option<String>,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self, settings: &Settings) -> anyhow::Result<i32> {
        tracing::info!(files = self.file.len(), "Starting extract command");

        let patterns = match &settings.detection.pattern_file {
            Some(path) => PatternRecognizer::from_file(path),
            None => PatternRecognizer::bundled(),
        };
        let patterns = match patterns {
            Ok(catalog) => catalog,
            Err(e) => {
                println!("❌ Failed to load pattern catalog");
                println!("   Error: {e}");
                return Ok(2);
            }
        };
        tracing::debug!(
            patterns = patterns.pattern_count(),
            "Pattern catalog loaded"
        );

        let language = self
            .language
            .as_deref()
            .unwrap_or(&settings.detection.language);
        let adapter = DetectionAdapter::new(Arc::new(CompositeRecognizer::standard(
            patterns.clone(),
        )));

        let mut detections = Detections::new();
        for path in &self.file {
            crate::log_document_start!(path);
            println!("🔍 Scanning {}", path.display());

            let text = match extract_text(path) {
                Ok(text) => text,
                Err(e) => {
                    println!("❌ Failed to read {}", path.display());
                    println!("   Error: {e}");
                    return Ok(2);
                }
            };

            match adapter.collect(&text, language) {
                Ok(found) => detections.merge(found),
                Err(e) => {
                    tracing::error!(error = %e, "Detection failed");
                    eprintln!("Detection failed for {}: {e}", path.display());
                    return Ok(5);
                }
            }
        }

        println!();
        let mut registry = Registry::new();
        for category in EntityCategory::ALL {
            let strings = detections.strings(category);
            if strings.is_empty() {
                continue;
            }
            println!("{} found: {}", category.label(), strings.len());

            let threshold = settings.detection.thresholds.for_category(category);
            let clusters = cluster_category(
                category,
                strings,
                threshold,
                &settings.detection.name_denylist,
            );
            registry.assign_ids(category, clusters);
        }

        // Numeric entities carry the catalog pattern their variants
        // match, so reviewers can see which format was detected.
        for category in EntityCategory::ALL {
            if !category.is_numeric() {
                continue;
            }
            for entity in registry.entities_mut(category) {
                if entity.pattern.is_none() {
                    entity.pattern = patterns.format_descriptor(category, &entity.variants);
                }
            }
        }

        if registry.is_empty() {
            println!("No entities detected.");
        }

        if let Err(e) = save_replacements(&self.config, &registry) {
            println!("❌ Failed to write {}", self.config.display());
            println!("   Error: {e}");
            return Ok(2);
        }

        println!();
        println!(
            "✅ Wrote {} entities ({} variants) to {}",
            registry.total_entities(),
            registry.total_variants(),
            self.config.display()
        );
        println!("   Review the file before running pseudo.");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_args_creation() {
        let args = ExtractArgs {
            file: vec![PathBuf::from("notes.md")],
            config: PathBuf::from("replacements.yaml"),
            language: None,
        };

        assert_eq!(args.file.len(), 1);
        assert_eq!(args.config, PathBuf::from("replacements.yaml"));
        assert!(args.language.is_none());
    }
}
