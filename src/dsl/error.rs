//! Error types for the `.comp` compiler.

use thiserror::Error;

use super::token::{first_line, Token, TokenKind};

/// An error that occurred while lexing or parsing a `.comp` source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// Input that no lexical rule matches. `text` is the whole unmatched remainder.
    #[error("[{line}:{col}] LexError: unrecognized input {:?}", first_line(.text))]
    Lex {
        text: String,
        line: usize,
        col: usize,
    },

    /// A token other than the one the grammar requires.
    #[error("[{line}:{col}] SyntaxError: expected {expected}, found {found}")]
    Syntax {
        expected: String,
        found: String,
        line: usize,
        col: usize,
    },
}

impl CompileError {
    /// Build the error for `found` appearing where `expected` was required.
    ///
    /// A lexer error token is always reported as the lexical error it stands for.
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        match &found.kind {
            TokenKind::Error(text) => CompileError::Lex {
                text: text.clone(),
                line: found.line,
                col: found.col,
            },
            kind => CompileError::Syntax {
                expected: expected.into(),
                found: kind.to_string(),
                line: found.line,
                col: found.col,
            },
        }
    }
}
