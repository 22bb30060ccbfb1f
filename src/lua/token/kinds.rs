//! Token definitions for Lua source
//!
//! Tokens are produced by the [tokenizer](crate::lua::lexing) and never change afterwards.
//! Every token keeps its source text (`value`) together with a 1-based line and a 0-based
//! column counted from the last newline.

use serde::Serialize;
use std::fmt;

/// Reserved words. Identifiers spelled like one of these are lexed as [`TokenKind::Keyword`].
pub const KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// The closed set of token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Number,
    Name,
    Keyword,
    Operator,
    String,
    #[serde(rename = "EOF")]
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "Number",
            TokenKind::Name => "Name",
            TokenKind::Keyword => "Keyword",
            TokenKind::Operator => "Operator",
            TokenKind::String => "String",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A classified, positioned piece of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            line,
            column,
        }
    }

    /// The synthetic end-of-file marker
    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, "", line, 0)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check whether this token is the given keyword or operator.
    ///
    /// Quoted strings never match, whatever their content.
    pub fn is(&self, value: &str) -> bool {
        self.kind != TokenKind::String && self.kind != TokenKind::Eof && self.value == value
    }

    /// Human readable rendering used in diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::String => format!("string \"{}\"", self.value),
            _ => format!("'{}'", self.value),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.kind)?;
        if !self.is_eof() {
            write!(f, " {:?}", self.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_matches_keywords_and_operators() {
        assert!(Token::new(TokenKind::Keyword, "end", 1, 0).is("end"));
        assert!(Token::new(TokenKind::Operator, "..", 1, 0).is(".."));
        assert!(!Token::new(TokenKind::Operator, "..", 1, 0).is("."));
    }

    #[test]
    fn test_is_never_matches_strings() {
        let token = Token::new(TokenKind::String, "end", 1, 0);
        assert!(!token.is("end"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(Token::new(TokenKind::Name, "foo", 1, 0).describe(), "'foo'");
        assert_eq!(
            Token::new(TokenKind::String, "foo", 1, 0).describe(),
            "string \"foo\""
        );
        assert_eq!(Token::eof(3).describe(), "end of file");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Token::new(TokenKind::Name, "a", 2, 4).to_string(),
            "2:4 Name \"a\""
        );
        assert_eq!(Token::eof(3).to_string(), "3:0 EOF");
    }
}
