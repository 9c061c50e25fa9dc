//! Parser for `.comp` sources.
//!
//! Recursive descent with one token of lookahead over the grammar
//!
//! ```text
//! File   := Comp* EOF
//! Comp   := 'comp' NAME STRING '{' Field* '}'
//! Field  := FIELD_TYPE FIELD_NAME STRING ';'
//! ```
//!
//! The parser is an iterator: each call to `next` parses one comp block, so
//! records can be consumed before the rest of the file is parsed. The first
//! error ends the sequence.

use super::ast::{Comp, CompField, FieldType};
use super::error::CompileError;
use super::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    done: bool,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            done: false,
        }
    }

    fn parse_comp(&mut self) -> Result<Comp, CompileError> {
        self.expect(TokenKind::Comp, "`comp` keyword")?;
        let name = self.expect_name()?;
        let descr = self.expect_string("comp description (string)")?;
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            fields.push(self.parse_field()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;

        Ok(Comp {
            name,
            descr,
            fields,
        })
    }

    fn parse_field(&mut self) -> Result<CompField, CompileError> {
        let ty = self.expect_field_type()?;
        let name = self.expect_field_name()?;
        let descr = self.expect_string("comp field description (string)")?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(CompField::new(ty, name, descr))
    }

    // --- Utility methods ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), CompileError> {
        if self.check(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(CompileError::unexpected(what, self.peek()))
        }
    }

    fn expect_name(&mut self) -> Result<String, CompileError> {
        match &self.peek().kind {
            TokenKind::Name(s) => {
                let val = s.clone();
                self.advance();
                Ok(val)
            }
            _ => Err(CompileError::unexpected(
                "comp name (PascalCase)",
                self.peek(),
            )),
        }
    }

    fn expect_string(&mut self, what: &str) -> Result<String, CompileError> {
        match &self.peek().kind {
            TokenKind::Str(s) => {
                let val = s.clone();
                self.advance();
                Ok(val)
            }
            _ => Err(CompileError::unexpected(what, self.peek())),
        }
    }

    fn expect_field_type(&mut self) -> Result<FieldType, CompileError> {
        match &self.peek().kind {
            TokenKind::FieldType(ty) => {
                let val = ty.clone();
                self.advance();
                Ok(val)
            }
            _ => Err(CompileError::unexpected(
                format!("comp field type (one of: {})", FieldType::vocabulary()),
                self.peek(),
            )),
        }
    }

    fn expect_field_name(&mut self) -> Result<String, CompileError> {
        match &self.peek().kind {
            TokenKind::FieldName(s) => {
                let val = s.clone();
                self.advance();
                Ok(val)
            }
            _ => Err(CompileError::unexpected(
                "comp field name (camelCase)",
                self.peek(),
            )),
        }
    }
}

impl Iterator for Parser {
    type Item = Result<Comp, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.tokens.is_empty() || self.check(&TokenKind::Eof) {
            self.done = true;
            return None;
        }
        let result = self.parse_comp();
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Parser {}
