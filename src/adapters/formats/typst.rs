//! Markdown to Typst conversion
//!
//! Covers the constructs that show up in anonymized notes: ATX
//! headings, bold, italic, and inline links. Inline code already uses
//! backticks in both markups and passes through untouched.

use regex::Regex;

// Typst bold uses the same single stars markdown reserves for italic,
// so bold text is staged through a placeholder until italics are
// rewritten.
const BOLD_MARK: char = '\u{1}';

/// Converts markdown `text` to Typst markup.
pub fn markdown_to_typst(text: &str) -> String {
    let heading = Regex::new(r"(?m)^(#{1,6})[ \t]+").unwrap();
    let link = Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap();
    let bold = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    let italic = Regex::new(r"\*([^*]+)\*").unwrap();

    let converted = heading.replace_all(text, |caps: &regex::Captures| {
        format!("{} ", "=".repeat(caps[1].len()))
    });
    let converted = link.replace_all(&converted, |caps: &regex::Captures| {
        format!("#link(\"{}\")[{}]", &caps[2], &caps[1])
    });
    let converted = bold.replace_all(&converted, format!("{BOLD_MARK}$1{BOLD_MARK}"));
    let converted = italic.replace_all(&converted, "_$1_");
    converted.replace(BOLD_MARK, "*")
}
