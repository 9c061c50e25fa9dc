//! `.comp` compiler: source text → tokens → lazily parsed [`Comp`] records.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::CompileError;

use lexer::Lexer;
use parser::Parser;
use token::Token;

/// The `.comp` compiler front end.
pub struct Compiler;

impl Compiler {
    /// Lex source text into tokens, terminated by `Eof`.
    pub fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize()
    }

    /// Lex source text and return a lazy iterator over its comp records.
    pub fn parse(source: &str) -> Parser {
        Parser::new(Self::lex(source))
    }

    /// Parse every comp record, stopping at the first error.
    pub fn parse_all(source: &str) -> Result<Vec<Comp>, CompileError> {
        Self::parse(source).collect()
    }
}
