//! Pattern catalog recognizer
//!
//! Loads labeled regex patterns from a TOML catalog and emits one span
//! per match. A catalog ships embedded in the binary; deployments with
//! extra formats point `detection.pattern_file` at their own.

use crate::adapters::recognizer::{Recognizer, Span};
use crate::domain::{CloakError, EntityCategory, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this label
    pub patterns: Vec<String>,
    /// Score attached to spans from these patterns (0.0 - 1.0)
    pub confidence: f32,
    /// Recognizer label attached to matches
    pub label: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
struct CompiledPattern {
    regex: Regex,
    /// Original regex source, reported as a format descriptor
    source: String,
    label: String,
    confidence: f32,
}

/// Pattern catalog container
#[derive(Debug, Deserialize)]
struct PatternCatalog {
    // BTreeMap keeps compile order independent of TOML declaration
    // order, so span output is stable across catalog edits.
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Regex-backed recognizer over a pattern catalog.
///
/// Labels in the catalog are recognizer vocabulary, not categories:
/// unknown labels load fine and are simply never mapped by the
/// detection adapter.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    patterns: Vec<CompiledPattern>,
}

impl PatternRecognizer {
    /// Loads a pattern catalog from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CloakError::Configuration(format!(
                "Failed to read pattern catalog {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses a pattern catalog from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: PatternCatalog = toml::from_str(content)
            .map_err(|e| CloakError::Configuration(format!("Failed to parse pattern catalog: {e}")))?;

        let mut patterns = Vec::new();
        for (name, def) in catalog.patterns {
            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    CloakError::Configuration(format!(
                        "Invalid regex in pattern '{name}': {e}"
                    ))
                })?;
                patterns.push(CompiledPattern {
                    regex,
                    source: pattern_str.clone(),
                    label: def.label.clone(),
                    confidence: def.confidence,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// The catalog embedded in the binary.
    pub fn bundled() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/recognizers.toml");
        Self::from_toml(default_toml)
    }

    /// First catalog pattern of `category` that fully matches one of
    /// `variants`, reported as the entity's format descriptor.
    pub fn format_descriptor(
        &self,
        category: EntityCategory,
        variants: &[String],
    ) -> Option<String> {
        for pattern in &self.patterns {
            if EntityCategory::from_recognizer_label(&pattern.label) != Some(category) {
                continue;
            }
            for variant in variants {
                if let Some(m) = pattern.regex.find(variant) {
                    if m.start() == 0 && m.end() == variant.len() {
                        return Some(pattern.source.clone());
                    }
                }
            }
        }
        None
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl Recognizer for PatternRecognizer {
    fn detect(&self, text: &str, _language: &str) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                spans.push(Span {
                    start: m.start(),
                    end: m.end(),
                    label: pattern.label.clone(),
                    score: pattern.confidence,
                });
            }
        }
        Ok(spans)
    }
}
