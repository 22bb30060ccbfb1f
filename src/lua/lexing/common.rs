//! Lexer errors

use thiserror::Error;

/// Errors that abort tokenization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token
    #[error("'{character}' unexpected on line {line}")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    /// A quote with no closing quote on the same line
    #[error("unfinished string starting on line {line}")]
    UnterminatedString { line: usize, column: usize },
    /// A long string or long comment with no matching close bracket
    #[error("unfinished long bracket starting on line {line}")]
    UnterminatedLongBracket { line: usize, column: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. }
            | LexError::UnterminatedString { line, .. }
            | LexError::UnterminatedLongBracket { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { column, .. }
            | LexError::UnterminatedString { column, .. }
            | LexError::UnterminatedLongBracket { column, .. } => *column,
        }
    }
}
