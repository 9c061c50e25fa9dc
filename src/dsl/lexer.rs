//! Lexer for `.comp` sources.
//!
//! Converts source text into a stream of [`Token`]s by trying an ordered
//! list of rules at the current position. The first rule that matches wins,
//! on the raw prefix and with no word boundaries: `Vec3Pair` is the type
//! `Vec3` followed by the name `Pair`, and `compute` is the `comp` keyword
//! followed by the field name `ute`.
//!
//! Lexing never fails: input that no rule matches is returned as a single
//! [`TokenKind::Error`] holding the whole remainder, followed by `Eof`.

use std::sync::LazyLock;

use regex::Regex;

use super::ast::FieldType;
use super::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
enum Rule {
    Str,
    Type(FieldType),
    Res,
    Comp,
    FieldName,
    Name,
    LBrace,
    RBrace,
    Semicolon,
    Skip,
}

/// Lexical rules in priority order.
static RULES: LazyLock<Vec<(Rule, Regex)>> = LazyLock::new(|| {
    let mut rules = vec![(Rule::Str, r#"^"(?:\\"|[^"])*""#.to_string())];
    rules.extend(
        FieldType::PLAIN
            .into_iter()
            .map(|ty| (Rule::Type(ty.clone()), format!("^{}", ty.spelling()))),
    );
    rules.extend([
        (Rule::Res, r"^Res<[A-Z][A-Za-z0-9]*>".to_string()),
        (Rule::Comp, r"^comp".to_string()),
        (Rule::FieldName, r"^[a-z][A-Za-z0-9]+".to_string()),
        (Rule::Name, r"^[A-Z][A-Za-z0-9]+".to_string()),
        (Rule::LBrace, r"^\{".to_string()),
        (Rule::RBrace, r"^\}".to_string()),
        (Rule::Semicolon, r"^;".to_string()),
        (Rule::Skip, r"^#[^\n]*".to_string()),
        (Rule::Skip, r"^\s+".to_string()),
    ]);

    rules
        .into_iter()
        .map(|(rule, pattern)| {
            let re = Regex::new(&pattern).expect("lexer rule patterns are valid regexes");
            (rule, re)
        })
        .collect()
});

pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Scan the whole source. The result always ends with exactly one `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let source = self.source;
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let rest = &source[self.pos..];
            let matched = RULES
                .iter()
                .find_map(|(rule, re)| re.find(rest).map(|m| (rule, m.as_str())));

            let Some((rule, text)) = matched else {
                tokens.push(Token {
                    kind: TokenKind::Error(rest.to_string()),
                    line: self.line,
                    col: self.col,
                });
                self.pos = source.len();
                break;
            };

            let (line, col) = (self.line, self.col);
            self.advance(text);

            let kind = match rule {
                Rule::Str => TokenKind::Str(text[1..text.len() - 1].to_string()),
                Rule::Type(ty) => TokenKind::FieldType(ty.clone()),
                Rule::Res => {
                    let kind = &text["Res<".len()..text.len() - 1];
                    TokenKind::FieldType(FieldType::Res(kind.to_string()))
                }
                Rule::Comp => TokenKind::Comp,
                Rule::FieldName => TokenKind::FieldName(text.to_string()),
                Rule::Name => TokenKind::Name(text.to_string()),
                Rule::LBrace => TokenKind::LBrace,
                Rule::RBrace => TokenKind::RBrace,
                Rule::Semicolon => TokenKind::Semicolon,
                Rule::Skip => continue,
            };
            tokens.push(Token { kind, line, col });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            line: self.line,
            col: self.col,
        });
        tokens
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn advance(&mut self, text: &str) {
        self.pos += text.len();
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }
}
