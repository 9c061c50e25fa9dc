//! Token types for the `.comp` lexer.

use std::fmt;

use super::ast::FieldType;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Contents of a quoted string, without the quotes. Escapes are kept verbatim.
    Str(String),
    /// PascalCase identifier: comp names and resource kinds.
    Name(String),
    /// camelCase identifier.
    FieldName(String),
    FieldType(FieldType),

    // Keywords
    Comp,

    // Delimiters
    LBrace,
    RBrace,
    Semicolon,

    // Special
    Eof,
    /// Unmatched remainder of the input.
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Str(s) => write!(f, "string \"{s}\""),
            TokenKind::Name(s) => write!(f, "name '{s}'"),
            TokenKind::FieldName(s) => write!(f, "field name '{s}'"),
            TokenKind::FieldType(t) => write!(f, "field type '{t}'"),
            TokenKind::Comp => f.write_str("`comp` keyword"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::Semicolon => f.write_str("';'"),
            TokenKind::Eof => f.write_str("end of file"),
            TokenKind::Error(rest) => write!(f, "unrecognized input {:?}", first_line(rest)),
        }
    }
}

/// First line of `s`, capped at 32 characters.
pub(crate) fn first_line(s: &str) -> String {
    let line = s.lines().next().unwrap_or("");
    let mut out: String = line.chars().take(32).collect();
    if out.len() < line.len() {
        out.push_str("...");
    }
    out
}
