//! Parser state
//!
//! A [Parser] owns the cursor into a sealed [TokenStream] together with the two sinks it
//! feeds: the [Diagnostics] buffer and the function [RegistryBuilder]. Both sinks only ever
//! grow, so a [Checkpoint] is just the cursor plus their lengths.

use super::grammar::Rule;
use crate::lua::diagnostics::{Diagnostics, ErrorKind, ErrorRecord};
use crate::lua::registry::{FunctionRecord, RegistryBuilder, RegistryMark, RegistryUndo};
use crate::lua::token::{Token, TokenStream};
use serde::Serialize;
use tracing::debug;

/// Restorable parser position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub(crate) pos: usize,
    pub(crate) diagnostics: usize,
    pub(crate) registry: RegistryMark,
}

/// One repetition a lookback rewind took back, kept so that re-applying the same rule at
/// the same checkpoint can skip straight to its recorded end.
#[derive(Debug)]
pub(crate) struct Undone {
    pub(crate) rule: Rule,
    pub(crate) from: Checkpoint,
    pub(crate) end: usize,
    pub(crate) diagnostics: Vec<ErrorRecord>,
    pub(crate) registry: RegistryUndo,
}

/// Everything a parse run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub diagnostics: Vec<ErrorRecord>,
    pub functions: Vec<FunctionRecord>,
    /// Final cursor; the EOF index after a complete run
    pub position: usize,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Predictive recursive-descent parser over one token stream
pub struct Parser<'t> {
    pub(crate) tokens: &'t TokenStream,
    pub(crate) pos: usize,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) registry: RegistryBuilder,
    pub(crate) undone: Option<Undone>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t TokenStream) -> Self {
        Parser {
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            registry: RegistryBuilder::new(),
            undone: None,
        }
    }

    pub fn tokens(&self) -> &'t TokenStream {
        self.tokens
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor, never past the EOF token.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.eof_index());
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Token under the cursor
    pub fn peek(&self) -> &'t Token {
        self.token(self.pos)
    }

    /// Token at `at`, or the EOF token when `at` is past the end
    pub(crate) fn token(&self, at: usize) -> &'t Token {
        let tokens = self.tokens;
        tokens.get(at).unwrap_or(&tokens[tokens.eof_index()])
    }

    pub fn at_eof(&self) -> bool {
        self.peek().is_eof()
    }

    /// Step over the current token unless it is EOF.
    pub(crate) fn step(&mut self) {
        if self.pos < self.tokens.eof_index() {
            self.pos += 1;
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            diagnostics: self.diagnostics.len(),
            registry: self.registry.mark(),
        }
    }

    /// Record a problem at token index `start`.
    pub(crate) fn report(&mut self, kind: ErrorKind, start: usize, end: usize, message: String) {
        let token = self.token(start);
        let record = ErrorRecord::new(kind, start, end, token, message);
        self.diagnostics.report(record);
    }

    /// Run `check` against the current state and leave no trace behind: the cursor is put
    /// back and nothing is recorded while it runs.
    pub(crate) fn speculate<T>(&mut self, check: impl FnOnce(&mut Self) -> T) -> T {
        let pos = self.pos;
        self.diagnostics.suppress();
        let result = check(self);
        self.diagnostics.resume();
        self.pos = pos;
        result
    }

    /// Parse the whole stream as a chunk.
    pub fn run(mut self) -> ParseOutcome {
        self.apply_rule(Rule::Chunk);
        let outcome = ParseOutcome {
            position: self.pos,
            diagnostics: self.diagnostics.into_records(),
            functions: self.registry.finish(),
        };
        debug!(
            errors = outcome.diagnostics.len(),
            functions = outcome.functions.len(),
            "parsed token stream"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::lexing::tokenize;

    #[test]
    fn test_step_stops_at_eof() {
        let tokens = tokenize("a").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.step();
        parser.step();
        parser.step();
        assert_eq!(parser.position(), 1);
        assert!(parser.at_eof());
    }

    #[test]
    fn test_speculate_restores_cursor() {
        let tokens = tokenize("a b c").unwrap();
        let mut parser = Parser::new(&tokens);
        let reached = parser.speculate(|p| {
            p.step();
            p.step();
            p.report(ErrorKind::Syntax, 0, 1, "hidden".to_string());
            p.position()
        });
        assert_eq!(reached, 2);
        assert_eq!(parser.position(), 0);
        assert!(parser.diagnostics().is_empty());
        assert!(!parser.diagnostics().is_suppressed());
    }

    #[test]
    fn test_empty_stream_is_clean() {
        let tokens = tokenize("").unwrap();
        let outcome = Parser::new(&tokens).run();
        assert!(outcome.is_clean());
        assert_eq!(outcome.position, 0);
    }
}
