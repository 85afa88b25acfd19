//! Error types for reading source documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Character range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{message}")]
    Syntax {
        span: Span,
        message: String,
        line: usize,
        column: usize,
    },
}

impl SourceError {
    /// Build a syntax error from a JSON parser failure on `source`
    pub fn from_json(err: &serde_json::Error, source: &str) -> Self {
        let start = char_offset(source, err.line(), err.column());
        let total = source.chars().count();
        SourceError::Syntax {
            span: start..(start + 1).min(total.max(start)),
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            SourceError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            SourceError::Syntax { span, message, .. } => {
                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("Schematic file contains invalid JSON")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Convert a 1-based line and byte column into a character offset
fn char_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, text) in source.split('\n').enumerate() {
        if index + 1 == line {
            let byte_column = column.saturating_sub(1).min(text.len());
            let prefix = text.get(..byte_column).unwrap_or(text);
            return offset + prefix.chars().count();
        }
        offset += text.chars().count() + 1;
    }
    source.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_error(source: &str) -> SourceError {
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        SourceError::from_json(&err, source)
    }

    #[test]
    fn test_span_points_at_error() {
        let source = "{\n  \"a\": ,\n}";
        let err = syntax_error(source);
        let span = err.span().clone();
        assert_eq!(source[..span.start].matches('\n').count(), 1);
        assert!(span.end > span.start);
    }

    #[test]
    fn test_message_includes_parser_diagnostic() {
        let err = syntax_error("[1, 2");
        assert!(err.to_string().contains("EOF"), "message: {err}");
    }

    #[test]
    fn test_format_contains_filename() {
        let source = "{ nope }";
        let err = syntax_error(source);
        let report = err.format(source, "layout.json");
        assert!(report.contains("layout.json"));
        assert!(report.contains("invalid JSON"));
    }

    #[test]
    fn test_char_offset_multibyte() {
        assert_eq!(char_offset("é\nab", 2, 2), 3);
        assert_eq!(char_offset("éa", 1, 3), 1);
    }
}
