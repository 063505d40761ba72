//! PII recognizers
//!
//! Recognizers scan raw text and emit labeled spans. They know nothing
//! about clustering or categories; the [`DetectionAdapter`] turns their
//! spans into the per-category string lists the core consumes.
//!
//! # Modules
//!
//! - [`patterns`] - Regex catalog recognizer, loaded from TOML
//! - [`digits`] - Digit-density fallback for unformatted numbers
//! - [`adapter`] - Span validation, overlap resolution, label mapping

pub mod adapter;
pub mod digits;
pub mod patterns;

pub use adapter::{DetectionAdapter, Detections};
pub use digits::DigitDensityRecognizer;
pub use patterns::PatternRecognizer;

use crate::domain::Result;
use std::sync::Arc;

/// One detected span of PII in a document.
///
/// Offsets are byte positions into the scanned text and must lie on
/// character boundaries. Labels are an open vocabulary; the adapter
/// maps them onto the fixed category set and skips the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    /// Recognizer-specific label, e.g. `EMAIL_ADDRESS` or `CPR_NUMBER`.
    pub label: String,
    /// Recognizer confidence in `[0.0, 1.0]`.
    pub score: f32,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A source of detected PII spans.
pub trait Recognizer: Send + Sync {
    /// Scans `text` and returns every span the recognizer considers
    /// PII. `language` is a BCP 47-ish hint; regex-based recognizers
    /// ignore it.
    fn detect(&self, text: &str, language: &str) -> Result<Vec<Span>>;
}

/// Runs several recognizers over the same text and concatenates their
/// spans. Overlaps between recognizers are resolved downstream by the
/// [`DetectionAdapter`].
pub struct CompositeRecognizer {
    recognizers: Vec<Arc<dyn Recognizer>>,
}

impl CompositeRecognizer {
    pub fn new(recognizers: Vec<Arc<dyn Recognizer>>) -> Self {
        Self { recognizers }
    }

    /// The standard stack: the pattern catalog plus the digit-density
    /// fallback that catches numbers no catalog pattern shaped.
    pub fn standard(patterns: PatternRecognizer) -> Self {
        Self::new(vec![
            Arc::new(patterns),
            Arc::new(DigitDensityRecognizer::default()),
        ])
    }
}

impl Recognizer for CompositeRecognizer {
    fn detect(&self, text: &str, language: &str) -> Result<Vec<Span>> {
        let mut spans = Vec::new();
        for recognizer in &self.recognizers {
            spans.extend(recognizer.detect(text, language)?);
        }
        Ok(spans)
    }
}
