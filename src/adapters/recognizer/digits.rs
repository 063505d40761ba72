//! Digit-density fallback recognizer
//!
//! Catches digit-heavy runs that no catalog pattern shaped: account
//! numbers with odd grouping, reference codes, concatenated ids. Works
//! on a sliding character window, then merges and trims the qualifying
//! windows to their digit extent.

use crate::adapters::recognizer::{Recognizer, Span};
use crate::domain::Result;

const LABEL: &str = "DIGIT_SEQUENCE";
const SCORE: f32 = 0.6;

/// Sliding-window digit-density scan.
///
/// A window qualifies when it holds at least `min_digits` digits and
/// its digit density reaches `min_density`. Qualifying windows are
/// merged, trimmed to their first and last digit, and re-checked
/// against `min_digits` so trailing prose never leaks into a span.
#[derive(Debug, Clone)]
pub struct DigitDensityRecognizer {
    window: usize,
    min_digits: usize,
    min_density: f64,
}

impl DigitDensityRecognizer {
    pub fn new(window: usize, min_digits: usize, min_density: f64) -> Self {
        Self {
            window,
            min_digits,
            min_density,
        }
    }
}

impl Default for DigitDensityRecognizer {
    fn default() -> Self {
        Self::new(12, 4, 0.4)
    }
}

impl Recognizer for DigitDensityRecognizer {
    fn detect(&self, text: &str, _language: &str) -> Result<Vec<Span>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        if chars.is_empty() {
            return Ok(Vec::new());
        }

        // Candidate intervals in character positions, windows truncated
        // at the end of the text.
        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for start in 0..chars.len() {
            let end = (start + self.window).min(chars.len());
            let len = end - start;
            let digits = chars[start..end]
                .iter()
                .filter(|(_, c)| c.is_ascii_digit())
                .count();
            if digits >= self.min_digits && digits as f64 / len as f64 >= self.min_density {
                candidates.push((start, end));
            }
        }

        let mut spans = Vec::new();
        for (start, end) in merge_intervals(candidates) {
            let (first, last) = match trim_to_digits(&chars[start..end]) {
                Some((first, last)) => (start + first, start + last),
                None => continue,
            };
            let digits = chars[first..=last]
                .iter()
                .filter(|(_, c)| c.is_ascii_digit())
                .count();
            if digits < self.min_digits {
                continue;
            }
            let (last_offset, last_char) = chars[last];
            spans.push(Span {
                start: chars[first].0,
                end: last_offset + last_char.len_utf8(),
                label: LABEL.to_string(),
                score: SCORE,
            });
        }
        Ok(spans)
    }
}

/// Merges overlapping or touching intervals, input already in start
/// order.
fn merge_intervals(intervals: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in intervals {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Positions of the first and last digit within the window, relative to
/// the window start.
fn trim_to_digits(window: &[(usize, char)]) -> Option<(usize, usize)> {
    let first = window.iter().position(|(_, c)| c.is_ascii_digit())?;
    let last = window.iter().rposition(|(_, c)| c.is_ascii_digit())?;
    Some((first, last))
}
