//! Diagnostics sink
//!
//!     Parse problems are data, not control flow. Every mismatch the parser meets becomes an
//!     [ErrorRecord] appended to the [Diagnostics] sink, and parsing carries on from the next
//!     token. Records are kept in encounter order and formatted only when the run is over.
//!
//! Suppression
//!
//!     Speculative checks (`contains`, `lookahead`) use the same match primitives as real
//!     parsing, but must never leave a trace. The sink keeps a reentrant suppression counter:
//!     every speculative check increments it on entry and decrements it on exit, and nothing
//!     is recorded while it is above zero. Between top-level productions it is always zero.

use crate::lua::token::Token;
use serde::Serialize;
use std::fmt;

/// Category of a recorded problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// An expected token was not found
    Syntax,
    /// The function registry could not pair names with expressions in one statement
    Structural,
}

/// One positioned problem. `start..end` is a token index range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ErrorRecord {
    /// A record anchored at `token`, which sits at index `start`.
    pub fn new(
        kind: ErrorKind,
        start: usize,
        end: usize,
        token: &Token,
        message: impl Into<String>,
    ) -> Self {
        ErrorRecord {
            kind,
            start,
            end,
            line: token.line,
            column: token.column,
            message: message.into(),
        }
    }

    pub fn token_range(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error (line {}, col {}) {}",
            self.line, self.column, self.message
        )
    }
}

/// Ordered, append-only error buffer with a suppression counter
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    records: Vec<ErrorRecord>,
    suppression: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppression > 0
    }

    pub fn suppression_depth(&self) -> usize {
        self.suppression
    }

    /// Enter a speculative section
    pub fn suppress(&mut self) {
        self.suppression += 1;
    }

    /// Leave a speculative section
    pub fn resume(&mut self) {
        debug_assert!(self.suppression > 0, "unbalanced diagnostics resume");
        self.suppression = self.suppression.saturating_sub(1);
    }

    /// Append a record unless suppressed. Returns whether it was kept.
    pub fn report(&mut self, record: ErrorRecord) -> bool {
        if self.is_suppressed() {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take out the records added after a checkpoint was taken.
    pub(crate) fn split_off(&mut self, len: usize) -> Vec<ErrorRecord> {
        self.records.split_off(len.min(self.records.len()))
    }

    /// Put back records taken out by [split_off](Self::split_off).
    pub(crate) fn restore(&mut self, records: Vec<ErrorRecord>) {
        self.records.extend(records);
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }

    /// One `Error (line L, col C) message` line per record
    pub fn render(&self) -> String {
        render(&self.records)
    }
}

/// Format records one per line, in encounter order.
pub fn render(records: &[ErrorRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}\n", r))
        .collect::<String>()
}
