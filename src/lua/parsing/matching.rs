//! Match primitives
//!
//! The only operations that look at a single token. `match_*` test a token at an arbitrary
//! index and log a mismatch; `consume_*` test the token under the cursor, log a mismatch and
//! then step over it either way. Stepping over a bad token is what keeps the parser moving
//! after an error. The EOF token is never stepped over.

use super::context::Parser;
use super::grammar::Rule;
use crate::lua::diagnostics::ErrorKind;
use crate::lua::token::TokenKind;

impl<'t> Parser<'t> {
    /// Whether the token at `at` has `kind`. Logs a mismatch.
    pub fn match_kind(&mut self, at: usize, kind: TokenKind) -> bool {
        let matched = self.token(at).kind == kind;
        if !matched {
            let expected = match kind {
                TokenKind::Eof => "end of file".to_string(),
                kind => kind.to_string(),
            };
            self.mismatch(at, &expected);
        }
        matched
    }

    /// Whether the token at `at` is the non-string token `value`. Logs a mismatch.
    pub fn match_value(&mut self, at: usize, value: &str) -> bool {
        let matched = self.token(at).is(value);
        if !matched {
            self.mismatch(at, &format!("'{}'", value));
        }
        matched
    }

    /// Match the current token by kind and step over it.
    pub fn consume_kind(&mut self, kind: TokenKind) -> bool {
        let matched = self.match_kind(self.pos, kind);
        self.step();
        matched
    }

    /// Match the current token by value and step over it.
    pub fn consume_value(&mut self, value: &str) -> bool {
        let matched = self.match_value(self.pos, value);
        self.step();
        matched
    }

    /// Nothing in `rule` can start here: log it and step over the offending token.
    pub(crate) fn reject(&mut self, rule: Rule) {
        self.mismatch(self.pos, &rule.to_string());
        self.step();
    }

    /// Log "expected X, found Y" for the token at `at`.
    pub(crate) fn mismatch(&mut self, at: usize, expected: &str) {
        if self.diagnostics.is_suppressed() {
            return;
        }
        let found = self.token(at);
        let message = if found.is_eof() {
            format!("unexpected end of file, expected {}", expected)
        } else {
            format!("expected {}, found {}", expected, found.describe())
        };
        self.report(ErrorKind::Syntax, at, at + 1, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::lexing::tokenize;

    fn messages(parser: &Parser) -> Vec<String> {
        parser
            .diagnostics()
            .records()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    #[test]
    fn test_consume_advances_on_failure() {
        let tokens = tokenize("x = 1").unwrap();
        let mut parser = Parser::new(&tokens);
        assert!(!parser.consume_value("end"));
        assert_eq!(parser.position(), 1);
        assert!(!parser.consume_kind(TokenKind::Name));
        assert_eq!(parser.position(), 2);
        assert_eq!(
            messages(&parser),
            vec!["expected 'end', found 'x'", "expected Name, found '='"]
        );
    }

    #[test]
    fn test_consume_never_passes_eof() {
        let tokens = tokenize("if").unwrap();
        let mut parser = Parser::new(&tokens);
        assert!(parser.consume_value("if"));
        assert!(!parser.consume_value("end"));
        assert!(!parser.consume_value("end"));
        assert_eq!(parser.position(), 1);
        assert_eq!(
            messages(&parser),
            vec![
                "unexpected end of file, expected 'end'",
                "unexpected end of file, expected 'end'"
            ]
        );
    }

    #[test]
    fn test_value_match_skips_string_literals() {
        let tokens = tokenize("'end'").unwrap();
        let mut parser = Parser::new(&tokens);
        assert!(!parser.match_value(0, "end"));
        assert_eq!(messages(&parser), vec![r#"expected 'end', found string "end""#]);
    }

    #[test]
    fn test_reject_names_the_rule() {
        let tokens = tokenize(")").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.reject(Rule::Exp);
        assert_eq!(messages(&parser), vec!["expected expression, found ')'"]);
        assert!(parser.at_eof());
    }

    #[test]
    fn test_expected_eof() {
        let tokens = tokenize("end").unwrap();
        let mut parser = Parser::new(&tokens);
        assert!(!parser.consume_kind(TokenKind::Eof));
        assert_eq!(messages(&parser), vec!["expected end of file, found 'end'"]);
    }
}
