//! Similarity scoring between normalized strings

/// Similarity between two strings on a 0 to 100 scale, where 100 means
/// identical and 0 means nothing in common.
///
/// Backed by normalized Levenshtein distance, so the score is symmetric
/// and length-aware: one edit in a long string costs less than one edit
/// in a short string. Callers pass already-normalized strings; this
/// function does no normalization of its own.
pub fn score(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}
