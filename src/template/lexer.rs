//! Lexer for constant references inside text, using logos

use logos::Logos;

/// Byte range in the scanned text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// `\$(`: an escaped reference, left exactly as written
    #[token("\\$(")]
    Escaped,

    /// `$(key)`, carrying the key
    #[regex(r"\$\([A-Za-z0-9_.\-]+\)", |lex| {
        let s = lex.slice();
        &s[2..s.len() - 1]
    })]
    Reference(&'a str),

    /// `$(` with no closing parenthesis after the key characters
    #[regex(r"\$\([A-Za-z0-9_.\-]*")]
    Partial,

    #[token("$")]
    Dollar,

    #[token("\\")]
    Backslash,

    #[regex(r"[^$\\]+")]
    Text,
}

/// Lex text into tokens with spans. Unrecognized input comes back as `None`.
pub fn lex(input: &str) -> impl Iterator<Item = (Option<Token<'_>>, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.ok(), span))
}
