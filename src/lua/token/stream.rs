//! The immutable token array the parser walks over.

use super::kinds::Token;
use serde::Serialize;
use std::ops::Index;

/// An ordered token sequence that always ends with exactly one EOF token.
///
/// The EOF line is one past the last real token's line, or 0 when there are no real tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Seal a list of real tokens by appending the EOF marker.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let eof_line = tokens.last().map(|t| t.line + 1).unwrap_or(0);
        tokens.push(Token::eof(eof_line));
        TokenStream { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens without the trailing EOF marker
    pub fn significant(&self) -> &[Token] {
        &self.tokens[..self.eof_index()]
    }

    /// Number of tokens, EOF included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A stream is never empty: it holds at least the EOF token.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn eof_index(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Concatenated token values of `start..end`, without separators.
    pub fn text(&self, start: usize, end: usize) -> String {
        self.tokens[start..end.min(self.tokens.len())]
            .iter()
            .map(|t| t.value.as_str())
            .collect()
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::token::TokenKind;

    #[test]
    fn test_empty_stream_has_eof_on_line_zero() {
        let stream = TokenStream::new(vec![]);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0], Token::eof(0));
        assert!(stream.significant().is_empty());
    }

    #[test]
    fn test_eof_line_follows_last_token() {
        let stream = TokenStream::new(vec![
            Token::new(TokenKind::Name, "a", 1, 0),
            Token::new(TokenKind::Name, "b", 4, 2),
        ]);
        assert_eq!(stream.eof_index(), 2);
        assert_eq!(stream[2].line, 5);
    }

    #[test]
    fn test_text_joins_values() {
        let stream = TokenStream::new(vec![
            Token::new(TokenKind::Name, "a", 1, 0),
            Token::new(TokenKind::Operator, ".", 1, 1),
            Token::new(TokenKind::Name, "b", 1, 2),
        ]);
        assert_eq!(stream.text(0, 3), "a.b");
        assert_eq!(stream.text(0, 10), "a.b");
    }
}
