//! Constant substitution in text
//!
//! Two forms are recognised, applied in this order:
//!
//! 1. `$(key)`: each reference is looked up directly. Unknown keys are
//!    reported and left in place. `\$(key)` is never matched and the backslash
//!    is kept.
//! 2. `$key`: only when a `$` survives the first pass. Every constant is
//!    replaced globally, longest key first, until no `$` remains. Text inserted
//!    by one constant is visible to the constants after it.

use tracing::warn;

use super::constants::ConstantTable;
use super::lexer::{lex, Token};

/// Substitute constants from `table` into `text`
pub fn substitute(text: &str, table: &ConstantTable) -> String {
    let mut text = substitute_references(text, table);
    if !text.contains('$') {
        return text;
    }
    for (key, value) in table.iter() {
        let pattern = format!("${key}");
        if text.contains(&pattern) {
            text = text.replace(&pattern, &value.to_string());
        }
        if !text.contains('$') {
            break;
        }
    }
    text
}

/// The `$(key)` pass. Inserted values are not scanned again.
fn substitute_references(text: &str, table: &ConstantTable) -> String {
    if !text.contains('$') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for (token, span) in lex(text) {
        match token {
            Some(Token::Reference(key)) => match table.get(key) {
                Some(value) => out.push_str(&value.to_string()),
                None => {
                    warn!(key, "Unknown compiler const {key}");
                    out.push_str(&text[span]);
                }
            },
            _ => out.push_str(&text[span]),
        }
    }
    out
}
