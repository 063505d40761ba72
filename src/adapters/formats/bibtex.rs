//! Minimal BibTeX reader and writer
//!
//! Parses regular reference entries (`@type{key, field = value, ...}`)
//! well enough to anonymize field values and write the file back.
//! Output is canonical: lowercased types and field names, two-space
//! indent, braced values. Inner braces inside values are preserved;
//! `@string`/`@preamble` directives are not supported.

use anyhow::Result;

/// One parsed BibTeX entry with fields in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct BibEntry {
    pub entry_type: String,
    pub key: String,
    pub fields: Vec<(String, String)>,
}

/// Parses every entry in `content`. Text between entries is ignored,
/// matching how BibTeX itself treats stray prose.
pub fn parse(content: &str) -> Result<Vec<BibEntry>> {
    let chars: Vec<char> = content.chars().collect();
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(at) = find_next(&chars, pos, '@') {
        pos = at + 1;

        let brace = find_next(&chars, pos, '{')
            .ok_or_else(|| anyhow::anyhow!("entry marker '@' without an opening brace"))?;
        let entry_type: String = chars[pos..brace]
            .iter()
            .collect::<String>()
            .trim()
            .to_lowercase();
        pos = brace + 1;

        let mut key = String::new();
        while pos < chars.len() && chars[pos] != ',' && chars[pos] != '}' {
            key.push(chars[pos]);
            pos += 1;
        }
        let key = key.trim().to_string();
        if pos >= chars.len() {
            anyhow::bail!("unterminated entry '{key}'");
        }

        let mut fields = Vec::new();
        if chars[pos] == ',' {
            pos += 1;
            loop {
                skip_separators(&chars, &mut pos);
                if pos >= chars.len() {
                    anyhow::bail!("unterminated entry '{key}'");
                }
                if chars[pos] == '}' {
                    break;
                }

                let mut name = String::new();
                while pos < chars.len() && !matches!(chars[pos], '=' | '}' | ',') {
                    name.push(chars[pos]);
                    pos += 1;
                }
                let name = name.trim().to_lowercase();
                if chars.get(pos) != Some(&'=') {
                    anyhow::bail!("field '{name}' in entry '{key}' has no value");
                }
                pos += 1;
                skip_separators(&chars, &mut pos);

                let value = read_value(&chars, &mut pos, &key)?;
                fields.push((name, value));
            }
        }
        pos += 1;

        entries.push(BibEntry {
            entry_type,
            key,
            fields,
        });
    }
    Ok(entries)
}

/// Writes entries back in canonical form.
pub fn format(entries: &[BibEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push('@');
        out.push_str(&entry.entry_type);
        out.push('{');
        out.push_str(&entry.key);
        out.push_str(",\n");
        for (name, value) in &entry.fields {
            out.push_str("  ");
            out.push_str(name);
            out.push_str(" = {");
            out.push_str(value);
            out.push_str("},\n");
        }
        out.push_str("}\n");
    }
    out
}

fn find_next(chars: &[char], from: usize, target: char) -> Option<usize> {
    chars[from..]
        .iter()
        .position(|&c| c == target)
        .map(|i| from + i)
}

fn skip_separators(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && (chars[*pos].is_whitespace() || chars[*pos] == ',') {
        *pos += 1;
    }
}

/// Reads one field value: brace-balanced `{...}`, quoted `"..."`, or a
/// bare token up to the next separator. The cursor ends after the
/// value's closing delimiter.
fn read_value(chars: &[char], pos: &mut usize, key: &str) -> Result<String> {
    match chars.get(*pos) {
        Some('{') => {
            *pos += 1;
            let mut depth = 1;
            let mut value = String::new();
            while *pos < chars.len() {
                let c = chars[*pos];
                *pos += 1;
                match c {
                    '{' => {
                        depth += 1;
                        value.push(c);
                    }
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(value);
                        }
                        value.push(c);
                    }
                    _ => value.push(c),
                }
            }
            anyhow::bail!("unbalanced braces in entry '{key}'")
        }
        Some('"') => {
            *pos += 1;
            let mut value = String::new();
            while *pos < chars.len() {
                let c = chars[*pos];
                *pos += 1;
                if c == '"' {
                    return Ok(value);
                }
                value.push(c);
            }
            anyhow::bail!("unterminated quoted value in entry '{key}'")
        }
        Some(_) => {
            let mut value = String::new();
            while *pos < chars.len() && chars[*pos] != ',' && chars[*pos] != '}' {
                value.push(chars[*pos]);
                *pos += 1;
            }
            Ok(value.trim().to_string())
        }
        None => anyhow::bail!("unexpected end of entry '{key}'"),
    }
}
