//! String normalization for variant comparison
//!
//! Detected strings are never mutated; these functions produce the
//! canonical forms that similarity scoring and clustering compare.
//! Substitution always replaces the original surface strings.

/// Folding table for characters that have a conventional ASCII
/// transliteration. Extending the table changes comparison only, never
/// output text.
pub const CHAR_FOLDS: &[(char, &str)] = &[('å', "aa"), ('æ', "ae"), ('ø', "oe")];

/// Words that disqualify a detected string from name clustering when
/// they appear as a whole token, compared case-insensitively.
pub const DEFAULT_NAME_DENYLIST: &[&str] = &["multiline", "phone", "account", "code", "street"];

/// Owned copy of [`DEFAULT_NAME_DENYLIST`], for settings defaults.
pub fn default_name_denylist() -> Vec<String> {
    DEFAULT_NAME_DENYLIST.iter().map(|s| s.to_string()).collect()
}

/// Canonical form of a person name: lowercased, folded through
/// [`CHAR_FOLDS`], hyphens removed, newlines flattened to spaces.
///
/// Hyphen removal makes "Anne-Marie" and "Annemarie" identical;
/// newline flattening lets a name wrapped across lines compare equal
/// to its single-line spelling.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '-' => {}
            '\n' => out.push(' '),
            _ => {
                for lower in ch.to_lowercase() {
                    match CHAR_FOLDS.iter().find(|(c, _)| *c == lower) {
                        Some((_, folded)) => out.push_str(folded),
                        None => out.push(lower),
                    }
                }
            }
        }
    }
    out
}

/// Canonical form of a numeric string: spaces, hyphens, and parentheses
/// removed everywhere, then one leading `+` stripped.
///
/// "+45 12 34 56 78", "(45) 12345678", and "4512345678" all normalize
/// to the same digit string.
pub fn normalize_number(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    match stripped.strip_prefix('+') {
        Some(rest) => rest.to_string(),
        None => stripped,
    }
}

/// Whether a detected string is plausible as a person name.
///
/// Requires one to three whitespace-separated words, each containing at
/// least one alphabetic character, none of which is a denylist word.
/// Strings that fail are excluded from name clustering entirely.
pub fn is_valid_name(raw: &str, denylist: &[String]) -> bool {
    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.is_empty() || words.len() > 3 {
        return false;
    }
    words.iter().all(|word| {
        word.chars().any(|c| c.is_alphabetic())
            && !denylist
                .iter()
                .any(|deny| word.to_lowercase() == deny.to_lowercase())
    })
}
