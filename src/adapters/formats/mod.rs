//! File format adapters
//!
//! Reads and rewrites the document types the pipeline works on:
//! markdown, plain text, LaTeX, and BibTeX. Extraction produces the
//! prose detection should scan; anonymization rewrites a file while
//! keeping its structure intact.

pub mod bibtex;
pub mod typst;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::substitute::SubstitutionEngine;
use crate::domain::{CloakError, ReplacementCounts};

pub use typst::markdown_to_typst;

/// Rewritten document content plus the counts folded across it.
#[derive(Debug, Clone)]
pub struct AnonymizedDocument {
    pub content: String,
    pub counts: ReplacementCounts,
}

/// Extracts the text detection should scan from `path`.
///
/// Markdown and plain text are read verbatim. LaTeX sources are
/// stripped down to their prose. BibTeX files contribute their field
/// values, one per line.
pub fn extract_text(path: &Path) -> Result<String> {
    match extension_of(path).as_str() {
        "md" | "txt" => read(path),
        "tex" => Ok(strip_latex(&read(path)?)),
        "bib" => {
            let entries = bibtex::parse(&read(path)?)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(entries
                .iter()
                .flat_map(|entry| entry.fields.iter().map(|(_, value)| value.as_str()))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        other => Err(CloakError::UnsupportedFormat(format!(".{other}")).into()),
    }
}

/// Anonymizes the file at `path`.
///
/// Markdown, plain text, and LaTeX are rewritten as a whole; LaTeX
/// markup stays untouched so the output still compiles. BibTeX entries
/// are rewritten field by field and re-serialized with their type,
/// key, and field order preserved.
pub fn anonymize_file(path: &Path, engine: &SubstitutionEngine) -> Result<AnonymizedDocument> {
    match extension_of(path).as_str() {
        "md" | "txt" | "tex" => {
            let output = engine.anonymize(&read(path)?);
            Ok(AnonymizedDocument {
                content: output.text,
                counts: output.counts,
            })
        }
        "bib" => {
            let mut entries = bibtex::parse(&read(path)?)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            let mut counts = ReplacementCounts::new();
            for entry in &mut entries {
                for (_, value) in &mut entry.fields {
                    let output = engine.anonymize(value);
                    counts.merge(&output.counts);
                    *value = output.text;
                }
            }
            Ok(AnonymizedDocument {
                content: bibtex::format(&entries),
                counts,
            })
        }
        other => Err(CloakError::UnsupportedFormat(format!(".{other}")).into()),
    }
}

/// Default output path for an anonymized copy: `report.md` becomes
/// `report_anon.md` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => input.with_file_name(format!("{stem}_anon.{ext}")),
        None => input.with_file_name(format!("{stem}_anon")),
    }
}

/// Reduces LaTeX source to its prose.
///
/// Drops comments and environment markers, unwraps command arguments
/// (`\textbf{Jane}` keeps `Jane`), and removes bare commands. Line
/// structure is preserved.
pub fn strip_latex(text: &str) -> String {
    let environment = Regex::new(r"\\(?:begin|end)\{[^{}]*\}").unwrap();
    let command = Regex::new(r"\\[a-zA-Z]+\*?(?:\[[^\]]*\])?\{([^{}]*)\}").unwrap();
    let bare_command = Regex::new(r"\\[a-zA-Z]+\*?").unwrap();
    let spaces = Regex::new(r"[ \t]{2,}").unwrap();

    let lines: Vec<String> = text.lines().map(strip_comment).collect();
    let mut result = lines.join("\n");
    result = environment.replace_all(&result, "").into_owned();
    // Innermost arguments first; each pass unwraps one nesting level.
    while command.is_match(&result) {
        result = command.replace_all(&result, "$1").into_owned();
    }
    result = bare_command.replace_all(&result, "").into_owned();
    result
        .lines()
        .map(|line| spaces.replace_all(line, " ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_comment(line: &str) -> String {
    let mut previous = None;
    for (offset, ch) in line.char_indices() {
        if ch == '%' && previous != Some('\\') {
            return line[..offset].to_string();
        }
        previous = Some(ch);
    }
    line.to_string()
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::Registry;
    use crate::core::substitute::OutputPolicy;
    use crate::domain::EntityCategory;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn person_engine(variants: &[&str]) -> SubstitutionEngine {
        let mut registry = Registry::new();
        registry.assign_ids(
            EntityCategory::Person,
            vec![variants.iter().map(|v| v.to_string()).collect()],
        );
        SubstitutionEngine::new(&registry, &OutputPolicy::default()).unwrap()
    }

    #[test]
    fn test_extract_text_reads_markdown_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "# Notes\n\nJohn Doe called.\n");
        assert_eq!(extract_text(&path).unwrap(), "# Notes\n\nJohn Doe called.\n");
    }

    #[test]
    fn test_extract_text_reads_plain_text_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.txt", "John Doe called.");
        assert_eq!(extract_text(&path).unwrap(), "John Doe called.");
    }

    #[test]
    fn test_extract_text_strips_latex() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "report.tex",
            "\\section{Visit}\n\\textbf{John Doe} came by. % follow up\n",
        );
        assert_eq!(extract_text(&path).unwrap(), "Visit\nJohn Doe came by.");
    }

    #[test]
    fn test_extract_text_joins_bibtex_field_values() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "refs.bib",
            "@article{doe2021,\n  author = {John Doe},\n  title = {A Study},\n}\n",
        );
        assert_eq!(extract_text(&path).unwrap(), "John Doe\nA Study");
    }

    #[test]
    fn test_extract_text_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "scan.pdf", "binary");
        let err = extract_text(&path).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .pdf");
    }

    #[test]
    fn test_anonymize_file_rewrites_markdown() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "John Doe wrote to J. Doe.\n");
        let engine = person_engine(&["John Doe", "J. Doe"]);

        let document = anonymize_file(&path, &engine).unwrap();

        assert_eq!(document.content, "<PERSON_1> wrote to <PERSON_1>.\n");
        assert_eq!(document.counts.replaced(EntityCategory::Person), 2);
    }

    #[test]
    fn test_anonymize_file_keeps_latex_markup() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "report.tex", "\\textbf{John Doe} came by.\n");
        let engine = person_engine(&["John Doe"]);

        let document = anonymize_file(&path, &engine).unwrap();

        assert_eq!(document.content, "\\textbf{<PERSON_1>} came by.\n");
    }

    #[test]
    fn test_anonymize_file_rewrites_bibtex_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "refs.bib",
            "@article{doe2021,\n  author = {John Doe},\n  title = {A Study},\n}\n",
        );
        let engine = person_engine(&["John Doe"]);

        let document = anonymize_file(&path, &engine).unwrap();

        assert!(document.content.contains("author = {<PERSON_1>},"));
        assert!(document.content.contains("title = {A Study},"));
        assert!(document.content.starts_with("@article{doe2021,"));
        assert_eq!(document.counts.replaced(EntityCategory::Person), 1);
    }

    #[test]
    fn test_anonymize_file_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "scan.docx", "text");
        let engine = person_engine(&["John Doe"]);
        let err = anonymize_file(&path, &engine).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: .docx");
    }

    #[test]
    fn test_default_output_path_inserts_anon_suffix() {
        assert_eq!(
            default_output_path(Path::new("notes.md")),
            PathBuf::from("notes_anon.md")
        );
        assert_eq!(
            default_output_path(Path::new("/tmp/x/report.tex")),
            PathBuf::from("/tmp/x/report_anon.tex")
        );
        assert_eq!(
            default_output_path(Path::new("README")),
            PathBuf::from("README_anon")
        );
    }

    #[test]
    fn test_strip_latex_unwraps_commands() {
        let stripped = strip_latex("\\section{Patient Notes}\n\\textbf{John Doe} visited.");
        assert_eq!(stripped, "Patient Notes\nJohn Doe visited.");
    }

    #[test]
    fn test_strip_latex_removes_comments_but_keeps_escaped_percent() {
        let stripped = strip_latex("John Doe % todo: redact\n100\\% sure");
        assert_eq!(stripped, "John Doe\n100\\% sure");
    }

    #[test]
    fn test_strip_latex_removes_environment_markers() {
        let stripped = strip_latex("\\begin{document}\nText body\n\\end{document}");
        assert_eq!(stripped, "\nText body");
    }

    #[test]
    fn test_strip_latex_handles_nested_commands() {
        let stripped = strip_latex("\\textbf{\\emph{Jane Doe}} wrote");
        assert_eq!(stripped, "Jane Doe wrote");
    }

    #[test]
    fn test_strip_latex_keeps_optional_argument_commands() {
        let stripped = strip_latex("\\includegraphics[width=2cm]{fig.png}");
        assert_eq!(stripped, "fig.png");
    }

    #[test]
    fn test_strip_latex_drops_bare_commands() {
        let stripped = strip_latex("Intro \\par Jane \\newline Doe");
        assert_eq!(stripped, "Intro Jane Doe");
    }
}
