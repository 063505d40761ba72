//! Deterministic substitution engine
//!
//! Replaces every registered variant in a document with its entity id.
//! Candidates are ordered by variant length descending across the whole
//! registry, so a longer variant is always consumed before any shorter
//! variant that is a substring of it.

use crate::core::registry::Registry;
use crate::domain::{EntityCategory, ReplacementCounts, Result};
use regex::{NoExpand, Regex};

/// Output shaping knobs for substitution.
#[derive(Debug, Clone)]
pub struct OutputPolicy {
    /// Wrap ids of numeric categories in double quotes, keeping data
    /// and markup files well-formed where a bare `<PHONE_NUMBER_1>`
    /// would not parse.
    pub quote_numeric_ids: bool,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        Self {
            quote_numeric_ids: true,
        }
    }
}

/// Result of one substitution pass.
#[derive(Debug, Clone)]
pub struct AnonymizedText {
    pub text: String,
    pub counts: ReplacementCounts,
}

struct Candidate {
    regex: Regex,
    replacement: String,
    category: EntityCategory,
}

/// Compiled substitution pass over one registry.
///
/// Construction validates the registry and compiles one pattern per
/// variant; a malformed registry fails here, before any text is
/// rewritten. The engine is stateless across calls: counts reset at the
/// start of every [`anonymize`](Self::anonymize) and nothing persists
/// between documents. Each call costs O(variants x document length);
/// acceptable at document scale, worth revisiting before feeding it
/// corpora.
pub struct SubstitutionEngine {
    candidates: Vec<Candidate>,
}

impl SubstitutionEngine {
    /// Builds the candidate list from a validated registry.
    ///
    /// # Errors
    ///
    /// Returns the registry's validation error unchanged, or
    /// `CloakError::Configuration` if a variant fails to compile into a
    /// pattern.
    pub fn new(registry: &Registry, policy: &OutputPolicy) -> Result<Self> {
        registry.validate()?;

        let mut ordered: Vec<(EntityCategory, &str, String)> = Vec::new();
        for (category, entities) in registry.iter() {
            for entity in entities {
                let replacement = if policy.quote_numeric_ids && category.is_numeric() {
                    format!("\"{}\"", entity.id)
                } else {
                    entity.id.clone()
                };
                for variant in &entity.variants {
                    ordered.push((category, variant.as_str(), replacement.clone()));
                }
            }
        }
        // Longest variant first; stable, so equal lengths keep registry
        // order.
        ordered.sort_by(|a, b| b.1.chars().count().cmp(&a.1.chars().count()));

        let mut candidates = Vec::with_capacity(ordered.len());
        for (category, variant, replacement) in ordered {
            candidates.push(Candidate {
                regex: build_pattern(variant, category)?,
                replacement,
                category,
            });
        }
        Ok(Self { candidates })
    }

    /// Replaces all registered variants in `text`, counting found and
    /// replaced occurrences per category.
    ///
    /// A variant with zero occurrences contributes nothing; an empty
    /// engine returns the input unchanged with all-zero counts.
    pub fn anonymize(&self, text: &str) -> AnonymizedText {
        let mut counts = ReplacementCounts::new();
        let mut output = text.to_string();
        for candidate in &self.candidates {
            let found = candidate.regex.find_iter(&output).count();
            if found == 0 {
                continue;
            }
            counts.add_found(candidate.category, found);
            output = candidate
                .regex
                .replace_all(&output, NoExpand(&candidate.replacement))
                .into_owned();
            counts.add_replaced(candidate.category, found);
        }
        AnonymizedText {
            text: output,
            counts,
        }
    }
}

/// Escaped literal pattern for one variant.
///
/// Word boundaries are attached only on sides that end in a word
/// character; `\b` next to a leading `+` or `(` can never match, which
/// would silently disable the candidate. Multiline variants and
/// unbounded categories match as plain literals.
fn build_pattern(variant: &str, category: EntityCategory) -> Result<Regex> {
    let escaped = regex::escape(variant);
    if !category.word_bounded() || variant.contains('\n') {
        return Ok(Regex::new(&escaped)?);
    }
    let mut pattern = String::with_capacity(escaped.len() + 4);
    if variant.chars().next().map_or(false, is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&escaped);
    if variant.chars().last().map_or(false, is_word_char) {
        pattern.push_str(r"\b");
    }
    Ok(Regex::new(&pattern)?)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
