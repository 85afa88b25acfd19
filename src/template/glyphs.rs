//! Icon glyph table
//!
//! The game ships an `icons.properties` file mapping private-use code points to
//! icon names, one `<codepoint>=<name>|<texture>` entry per line. Each entry
//! becomes a constant named `_<name>` (with `-` turned into `_`) whose value is
//! the glyph itself, so `$_item_copper` expands to the copper icon.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::StringMap;

/// Errors that can occur when loading a glyph table
#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("Failed to read glyph table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed glyph table line {line_number}: \"{line}\"")]
    MalformedLine { line_number: usize, line: String },
}

/// Constant name -> glyph, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: StringMap<String>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a glyph table from an `icons.properties` file
    pub fn from_file(path: &Path) -> Result<Self, GlyphError> {
        let content = std::fs::read_to_string(path).map_err(|source| GlyphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse `icons.properties` content.
    ///
    /// Lines whose code point is not a valid character are skipped.
    pub fn parse(content: &str) -> Result<Self, GlyphError> {
        let mut table = Self::new();
        for (index, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let mut parts = line.splitn(3, '=');
            let (Some(code), Some(value)) = (parts.next(), parts.next()) else {
                return Err(GlyphError::MalformedLine {
                    line_number: index + 1,
                    line: line.to_string(),
                });
            };
            let Some(glyph) = parse_code_point(code) else {
                continue;
            };
            let icon = value.split('|').next().unwrap_or(value);
            table.insert(format!("_{}", icon.replace('-', "_")), glyph.to_string());
        }
        Ok(table)
    }

    pub fn insert(&mut self, key: impl Into<String>, glyph: impl Into<String>) {
        self.glyphs.insert(key, glyph.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.glyphs.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.glyphs.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Read the leading decimal digits of `code` as a character
fn parse_code_point(code: &str) -> Option<char> {
    let trimmed = code.trim_start();
    let digits: &str = &trimmed[..trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len())];
    digits.parse::<u32>().ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties() {
        let table = GlyphTable::parse(
            "63743=item-copper|item-copper-ui\n63742=liquid-water|liquid-water-ui\n",
        )
        .expect("Should parse");
        assert_eq!(table.get("_item_copper"), Some("\u{F8FF}"));
        assert_eq!(table.get("_liquid_water"), Some("\u{F8FE}"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_invalid_code_point_skipped() {
        let table = GlyphTable::parse("abc=broken|x\n55296=surrogate|x\n65=letter-a|x")
            .expect("Should parse");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("_letter_a"), Some("A"));
    }

    #[test]
    fn test_line_without_separator_is_error() {
        let err = GlyphTable::parse("65=a|b\nnot a property").unwrap_err();
        assert!(matches!(err, GlyphError::MalformedLine { line_number: 2, .. }));
    }

    #[test]
    fn test_crlf_lines() {
        let table = GlyphTable::parse("65=a|x\r\n66=b|y\r\n").expect("Should parse");
        assert_eq!(table.get("_b"), Some("B"));
    }

    #[test]
    fn test_missing_file() {
        let err = GlyphTable::from_file(Path::new("/nonexistent/icons.properties")).unwrap_err();
        assert!(err.to_string().contains("icons.properties"));
    }
}
