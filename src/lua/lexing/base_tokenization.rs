//! Base tokenization
//!
//! Drives the master regex over the source, one match at a time, and turns matches into
//! positioned [Token]s. Lines are 1-based; columns are 0-based byte offsets from the last
//! newline.

use super::common::LexError;
use super::patterns::{rule, TOKEN_PATTERNS, TOKEN_REGEX};
use crate::lua::token::{Token, TokenKind, TokenStream, KEYWORDS};
use tracing::debug;

/// Lazy tokenizer over a source string.
///
/// Yields tokens in source order and stops for good after the first error. The EOF marker
/// is not yielded; [tokenize] appends it when sealing the stream.
pub struct Tokenizer<'src> {
    source: &'src str,
    pos: usize,
    line: usize,
    line_start: usize,
    failed: bool,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Tokenizer {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
            failed: false,
        }
    }

    /// Move the cursor to `end`, keeping the line counter in step with consumed newlines.
    fn advance_to(&mut self, end: usize) {
        let consumed = &self.source[self.pos..end];
        if let Some(last) = consumed.rfind('\n') {
            self.line += consumed.matches('\n').count();
            self.line_start = self.pos + last + 1;
        }
        self.pos = end;
    }

    /// Find the close of a long bracket whose opening ends at `body_start`.
    ///
    /// Returns the byte range of the close bracket.
    fn close_long_bracket(
        &self,
        body_start: usize,
        level: usize,
        line: usize,
        column: usize,
    ) -> Result<(usize, usize), LexError> {
        let close = format!("]{}]", "=".repeat(level));
        self.source[body_start..]
            .find(&close)
            .map(|offset| (body_start + offset, body_start + offset + close.len()))
            .ok_or(LexError::UnterminatedLongBracket { line, column })
    }

    fn fail(&mut self, err: LexError) -> Option<Result<Token, LexError>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while self.pos < self.source.len() {
            // The `error` rule matches any character, so there is always a match at `pos`.
            let caps = TOKEN_REGEX.captures_at(self.source, self.pos)?;
            let (rule_name, found) = TOKEN_PATTERNS
                .iter()
                .find_map(|(name, _)| caps.name(name).map(|m| (*name, m)))?;

            let line = self.line;
            let column = self.pos - self.line_start;
            let text = found.as_str();

            let kind = match rule_name {
                rule::LONG_COMMENT => {
                    let level = text.matches('=').count();
                    match self.close_long_bracket(found.end(), level, line, column) {
                        Ok((_, close_end)) => self.advance_to(close_end),
                        Err(err) => return self.fail(err),
                    }
                    continue;
                }
                rule::COMMENT | rule::NEWLINE | rule::WHITESPACE => {
                    self.advance_to(found.end());
                    continue;
                }
                rule::LONG_STRING => {
                    let level = text.matches('=').count();
                    let (close_start, close_end) =
                        match self.close_long_bracket(found.end(), level, line, column) {
                            Ok(range) => range,
                            Err(err) => return self.fail(err),
                        };
                    let body = &self.source[found.end()..close_start];
                    let body = body
                        .strip_prefix("\r\n")
                        .or_else(|| body.strip_prefix('\n'))
                        .unwrap_or(body);
                    let token = Token::new(TokenKind::String, body, line, column);
                    self.advance_to(close_end);
                    return Some(Ok(token));
                }
                rule::HEX_NUMBER | rule::NUMBER => TokenKind::Number,
                rule::NAME if KEYWORDS.contains(&text) => TokenKind::Keyword,
                rule::NAME => TokenKind::Name,
                rule::OPERATOR => TokenKind::Operator,
                rule::STRING => {
                    let token =
                        Token::new(TokenKind::String, &text[1..text.len() - 1], line, column);
                    self.advance_to(found.end());
                    return Some(Ok(token));
                }
                rule::UNTERMINATED_STRING => {
                    return self.fail(LexError::UnterminatedString { line, column })
                }
                _ => {
                    let character = text.chars().next().unwrap_or_default();
                    return self.fail(LexError::UnexpectedCharacter {
                        character,
                        line,
                        column,
                    });
                }
            };

            let token = Token::new(kind, text, line, column);
            self.advance_to(found.end());
            return Some(Ok(token));
        }

        None
    }
}

/// Tokenize a whole source text and seal it with the EOF marker.
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    let tokens = Tokenizer::new(source).collect::<Result<Vec<_>, _>>()?;
    debug!(tokens = tokens.len(), "tokenized source");
    Ok(TokenStream::new(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .unwrap()
            .significant()
            .iter()
            .map(|t| (t.kind, t.value.clone()))
            .collect()
    }

    #[test]
    fn test_simple_assignment() {
        let tokens = tokenize("a = 1").unwrap();
        assert_eq!(
            tokens.tokens(),
            &[
                Token::new(TokenKind::Name, "a", 1, 0),
                Token::new(TokenKind::Operator, "=", 1, 2),
                Token::new(TokenKind::Number, "1", 1, 4),
                Token::eof(2),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap().tokens(), &[Token::eof(0)]);
        assert_eq!(tokenize("  \n-- only a comment\n").unwrap().tokens(), &[Token::eof(0)]);
    }

    #[test]
    fn test_keywords_are_retagged() {
        assert_eq!(
            values("local function iffy end"),
            vec![
                (TokenKind::Keyword, "local".to_string()),
                (TokenKind::Keyword, "function".to_string()),
                (TokenKind::Name, "iffy".to_string()),
                (TokenKind::Keyword, "end".to_string()),
            ]
        );
    }

    #[test]
    fn test_lines_and_columns() {
        let tokens = tokenize("x\n  y -- trailing\n\tz").unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(positions, vec![(1, 0), (2, 2), (3, 1), (4, 0)]);
    }

    #[test]
    fn test_quoted_strings_drop_quotes() {
        assert_eq!(
            values(r#"a = "a" b = '"66"' c = "x\"y""#)
                .into_iter()
                .filter(|(kind, _)| *kind == TokenKind::String)
                .map(|(_, value)| value)
                .collect::<Vec<_>>(),
            vec!["a".to_string(), "\"66\"".to_string(), r#"x\"y"#.to_string()]
        );
    }

    #[test]
    fn test_long_string_levels() {
        assert_eq!(
            values("[==[\nfirst ]] still ]=] inside]==]"),
            vec![(TokenKind::String, "first ]] still ]=] inside".to_string())]
        );
    }

    #[test]
    fn test_long_string_advances_lines() {
        let tokens = tokenize("s = [[\none\ntwo]] t").unwrap();
        assert_eq!(tokens[2].value, "one\ntwo");
        assert_eq!(tokens[2].line, 1);
        assert_eq!((tokens[3].line, tokens[3].column), (3, 6));
    }

    #[test]
    fn test_long_comment_is_discarded() {
        let tokens = tokenize("a --[[ skip\nthis ]] b").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[1].value.as_str(), tokens[1].line), ("b", 2));
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("a = 1\nb = $").unwrap_err(),
            LexError::UnexpectedCharacter {
                character: '$',
                line: 2,
                column: 4
            }
        );
    }

    #[test]
    fn test_unterminated_forms() {
        assert_eq!(
            tokenize("x = 'abc").unwrap_err(),
            LexError::UnterminatedString { line: 1, column: 4 }
        );
        assert_eq!(
            tokenize("x = [=[ abc ]]").unwrap_err(),
            LexError::UnterminatedLongBracket { line: 1, column: 4 }
        );
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::new("a @ b");
        assert!(tokenizer.next().unwrap().is_ok());
        assert!(tokenizer.next().unwrap().is_err());
        assert!(tokenizer.next().is_none());
    }
}
