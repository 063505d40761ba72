//! Detection adapter
//!
//! Sits between recognizers and the core: validates span offsets,
//! resolves overlaps, maps open-vocabulary labels onto the category
//! set, and hands the core plain per-category string lists.

use crate::adapters::recognizer::{Recognizer, Span};
use crate::domain::{CloakError, EntityCategory, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Detected strings grouped by category, in first-seen document order
/// with duplicates removed. That order seeds clustering and therefore
/// id assignment, so it must stay stable.
#[derive(Debug, Clone, Default)]
pub struct Detections {
    by_category: BTreeMap<EntityCategory, Vec<String>>,
}

impl Detections {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, category: EntityCategory, value: String) {
        let list = self.by_category.entry(category).or_default();
        if !list.contains(&value) {
            list.push(value);
        }
    }

    /// Folds another document's detections in, keeping first-seen order
    /// across documents.
    pub fn merge(&mut self, other: Detections) {
        for (category, values) in other.by_category {
            for value in values {
                self.insert(category, value);
            }
        }
    }

    /// Distinct detected strings of one category, in first-seen order.
    pub fn strings(&self, category: EntityCategory) -> &[String] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, category: EntityCategory) -> usize {
        self.strings(category).len()
    }

    pub fn total(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, &[String])> {
        self.by_category
            .iter()
            .map(|(category, list)| (*category, list.as_slice()))
    }
}

/// Turns recognizer spans into [`Detections`].
pub struct DetectionAdapter {
    recognizer: Arc<dyn Recognizer>,
}

impl DetectionAdapter {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }

    /// Runs detection over one document.
    ///
    /// # Errors
    ///
    /// Returns `CloakError::Validation` when a recognizer reports spans
    /// outside the text or off a character boundary; recognizer errors
    /// pass through unchanged.
    pub fn collect(&self, text: &str, language: &str) -> Result<Detections> {
        let spans = self.recognizer.detect(text, language)?;

        for span in &spans {
            let valid = span.start <= span.end
                && span.end <= text.len()
                && text.is_char_boundary(span.start)
                && text.is_char_boundary(span.end);
            if !valid {
                return Err(CloakError::Validation {
                    field: "span".to_string(),
                    message: format!(
                        "recognizer returned invalid offsets {}..{} for label {}",
                        span.start, span.end, span.label
                    ),
                });
            }
        }

        let mut detections = Detections::new();
        for span in resolve_overlaps(spans) {
            match EntityCategory::from_recognizer_label(&span.label) {
                Some(category) => {
                    detections.insert(category, text[span.start..span.end].to_string());
                }
                None => {
                    tracing::debug!(label = %span.label, "skipping span with unmapped label");
                }
            }
        }
        Ok(detections)
    }
}

/// Keeps at most one span per overlapping region: highest score wins,
/// ties go to the longer span, then to the earlier one. Survivors come
/// back in document order.
fn resolve_overlaps(mut spans: Vec<Span>) -> Vec<Span> {
    spans.retain(|span| !span.is_empty());
    spans.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut kept: Vec<Span> = Vec::new();
    for span in spans {
        let overlaps = kept
            .iter()
            .any(|k| span.start < k.end && k.start < span.end);
        if !overlaps {
            kept.push(span);
        }
    }
    kept.sort_by_key(|span| (span.start, span.end));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRecognizer(Vec<Span>);

    impl Recognizer for FixedRecognizer {
        fn detect(&self, _text: &str, _language: &str) -> Result<Vec<Span>> {
            Ok(self.0.clone())
        }
    }

    fn adapter_for(spans: Vec<Span>) -> DetectionAdapter {
        DetectionAdapter::new(Arc::new(FixedRecognizer(spans)))
    }

    fn span(start: usize, end: usize, label: &str, score: f32) -> Span {
        Span {
            start,
            end,
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_collect_slices_text_by_span_offsets() {
        let text = "John Doe wrote to maria@example.com";
        let adapter = adapter_for(vec![
            span(0, 8, "PERSON", 0.9),
            span(18, 35, "EMAIL_ADDRESS", 0.95),
        ]);
        let detections = adapter.collect(text, "en").unwrap();
        assert_eq!(detections.strings(EntityCategory::Person), ["John Doe"]);
        assert_eq!(
            detections.strings(EntityCategory::Email),
            ["maria@example.com"]
        );
    }

    #[test]
    fn test_higher_score_wins_overlap() {
        let text = "010203-1234";
        let adapter = adapter_for(vec![
            span(0, 11, "NATIONAL_ID", 0.95),
            span(0, 6, "DIGIT_SEQUENCE", 0.6),
        ]);
        let detections = adapter.collect(text, "en").unwrap();
        assert_eq!(
            detections.strings(EntityCategory::NationalId),
            ["010203-1234"]
        );
        assert!(detections.strings(EntityCategory::GeneralNumber).is_empty());
    }

    #[test]
    fn test_equal_score_prefers_longer_span() {
        let text = "12 34 56 78 90";
        let adapter = adapter_for(vec![
            span(0, 11, "PHONE_NUMBER", 0.8),
            span(0, 14, "PHONE_NUMBER", 0.8),
        ]);
        let detections = adapter.collect(text, "en").unwrap();
        assert_eq!(
            detections.strings(EntityCategory::PhoneNumber),
            ["12 34 56 78 90"]
        );
    }

    #[test]
    fn test_non_overlapping_spans_all_survive() {
        let text = "John Doe and Erik Hansen";
        let adapter = adapter_for(vec![
            span(0, 8, "PERSON", 0.9),
            span(13, 24, "PERSON", 0.9),
        ]);
        let detections = adapter.collect(text, "en").unwrap();
        assert_eq!(
            detections.strings(EntityCategory::Person),
            ["John Doe", "Erik Hansen"]
        );
    }

    #[test]
    fn test_unknown_labels_are_skipped() {
        let text = "ACME Corporation";
        let adapter = adapter_for(vec![span(0, 16, "ORGANIZATION", 0.9)]);
        let detections = adapter.collect(text, "en").unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_out_of_range_offsets_are_rejected() {
        let adapter = adapter_for(vec![span(0, 99, "PERSON", 0.9)]);
        let err = adapter.collect("short", "en").unwrap_err();
        assert!(matches!(err, CloakError::Validation { .. }));
        assert!(err.to_string().contains("invalid offsets"));
    }

    #[test]
    fn test_non_boundary_offsets_are_rejected() {
        // 'ø' spans bytes 1..3; offset 2 is inside it.
        let adapter = adapter_for(vec![span(0, 2, "PERSON", 0.9)]);
        assert!(adapter.collect("søren", "en").is_err());
    }

    #[test]
    fn test_duplicate_strings_keep_first_seen_order() {
        let text = "John Doe, Erik Hansen, John Doe";
        let adapter = adapter_for(vec![
            span(0, 8, "PERSON", 0.9),
            span(10, 21, "PERSON", 0.9),
            span(23, 31, "PERSON", 0.9),
        ]);
        let detections = adapter.collect(text, "en").unwrap();
        assert_eq!(
            detections.strings(EntityCategory::Person),
            ["John Doe", "Erik Hansen"]
        );
    }

    #[test]
    fn test_zero_length_spans_are_dropped() {
        let adapter = adapter_for(vec![span(3, 3, "PERSON", 0.9)]);
        let detections = adapter.collect("abcdef", "en").unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_merge_keeps_first_seen_across_documents() {
        let mut all = Detections::new();
        all.insert(EntityCategory::Person, "John Doe".to_string());

        let mut second = Detections::new();
        second.insert(EntityCategory::Person, "John Doe".to_string());
        second.insert(EntityCategory::Person, "Erik Hansen".to_string());

        all.merge(second);
        assert_eq!(
            all.strings(EntityCategory::Person),
            ["John Doe", "Erik Hansen"]
        );
        assert_eq!(all.total(), 2);
    }

    #[test]
    fn test_alias_labels_map_to_the_same_category() {
        let text = "12 34 56 78";
        let adapter = adapter_for(vec![span(0, 11, "NUMBER_PATTERN", 0.8)]);
        let detections = adapter.collect(text, "en").unwrap();
        assert_eq!(
            detections.strings(EntityCategory::PhoneNumber),
            ["12 34 56 78"]
        );
    }
}
