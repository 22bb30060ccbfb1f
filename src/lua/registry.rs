//! Function Registry
//!
//!     A side table of the functions a source file defines, built while parsing without ever
//!     constructing a syntax tree. All positions are token index ranges into the
//!     [TokenStream](crate::lua::token::TokenStream); text is only produced when rendering.
//!
//! Sources of Entries
//!
//!     Declarations (`function a.b:c(x) end`, `local function f(x) end`) register their name
//!     and parameter list directly.
//!
//!     Assignments (`a, b = e1, e2` and `local a, b = e1, e2`) open a pairing frame. Every
//!     assigned name is pushed on the frame, and every right-hand expression pushes either
//!     the parameter list of the function literal it consists of, or a sentinel. When the
//!     statement ends, names and expressions are paired positionally and only pairs whose
//!     expression is a function literal become entries.
//!
//!     A count mismatch between the two lists drops the whole statement's pairing. It is
//!     reported back to the parser as a [PairingMismatch] when the statement holds a function
//!     literal that would otherwise have been paired.
//!
//!     Function literals that end up bound by no pairing are kept as anonymous entries.

use crate::lua::token::{Token, TokenKind, TokenStream};
use serde::Serialize;
use thiserror::Error;

/// Half-open token index range
pub type Span = (usize, usize);

/// How a function is named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FunctionName {
    Named(Span),
    Anonymous,
}

/// One function with its parameter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: FunctionName,
    pub params: Span,
    /// Token index the entry is ordered by: the name start, or the literal start
    pub anchor: usize,
}

impl FunctionRecord {
    pub fn is_anonymous(&self) -> bool {
        self.name == FunctionName::Anonymous
    }

    /// `a.b:c`, or `<anonymous>`
    pub fn name_text(&self, tokens: &TokenStream) -> String {
        match self.name {
            FunctionName::Named((start, end)) => tokens.text(start, end),
            FunctionName::Anonymous => "<anonymous>".to_string(),
        }
    }

    /// `(a, b, ...)`
    pub fn params_text(&self, tokens: &TokenStream) -> String {
        let (start, end) = self.params;
        render_params(&tokens.tokens()[start..end.min(tokens.len())])
    }

    /// `name(params)`
    pub fn render(&self, tokens: &TokenStream) -> String {
        format!("{}{}", self.name_text(tokens), self.params_text(tokens))
    }

    /// Source line of the entry
    pub fn line(&self, tokens: &TokenStream) -> usize {
        tokens.get(self.anchor).map(|t| t.line).unwrap_or(0)
    }
}

fn render_params(tokens: &[Token]) -> String {
    let mut text = String::new();
    for token in tokens {
        text.push_str(&token.value);
        if token.kind == TokenKind::Operator && token.value == "," {
            text.push(' ');
        }
    }
    text
}

/// Names and expressions of one assignment could not be paired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot pair {names} names with {values} expressions")]
pub struct PairingMismatch {
    pub names: usize,
    pub values: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Literal {
    span: Span,
    params: Span,
    bound: bool,
}

#[derive(Debug, Clone, Default)]
struct PairingFrame {
    names: Vec<Span>,
    /// Index into the literal list, or `None` for anything that is not a function literal
    values: Vec<Option<usize>>,
}

/// Lengths of the append-only lists, used to roll back a speculative stretch of parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryMark {
    records: usize,
    literals: usize,
}

/// Entries rolled back past a mark, kept so they can be put back unchanged
#[derive(Debug, Clone, Default)]
pub struct RegistryUndo {
    records: Vec<FunctionRecord>,
    literals: Vec<Literal>,
}

/// Collects registry entries while the parser runs
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    records: Vec<FunctionRecord>,
    literals: Vec<Literal>,
    frames: Vec<PairingFrame>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `function name(...)` or `local function name(...)` declaration
    pub fn declare(&mut self, name: Span, params: Span) {
        self.records.push(FunctionRecord {
            name: FunctionName::Named(name),
            params,
            anchor: name.0,
        });
    }

    /// A `function(...) ... end` expression spanning `span`
    pub fn function_literal(&mut self, span: Span, params: Span) {
        self.literals.push(Literal {
            span,
            params,
            bound: false,
        });
    }

    pub fn open_assignment(&mut self) {
        self.frames.push(PairingFrame::default());
    }

    pub fn push_name(&mut self, span: Span) {
        if let Some(frame) = self.frames.last_mut() {
            frame.names.push(span);
        }
    }

    /// Classify the right-hand expression spanning `span`.
    ///
    /// Literals complete innermost first, so a literal covering the whole expression is
    /// always the most recent one.
    pub fn push_value(&mut self, span: Span) {
        let literal = self
            .literals
            .len()
            .checked_sub(1)
            .filter(|&last| self.literals[last].span == span);
        if let Some(frame) = self.frames.last_mut() {
            frame.values.push(literal);
        }
    }

    /// Pair the innermost open assignment and emit its entries.
    pub fn close_assignment(&mut self) -> Result<(), PairingMismatch> {
        let Some(frame) = self.frames.pop() else {
            return Ok(());
        };

        if frame.names.len() != frame.values.len() {
            if frame.values.iter().any(Option::is_some) {
                return Err(PairingMismatch {
                    names: frame.names.len(),
                    values: frame.values.len(),
                });
            }
            return Ok(());
        }

        for (name, value) in frame.names.into_iter().zip(frame.values) {
            if let Some(index) = value {
                let literal = &mut self.literals[index];
                literal.bound = true;
                self.records.push(FunctionRecord {
                    name: FunctionName::Named(name),
                    params: literal.params,
                    anchor: name.0,
                });
            }
        }
        Ok(())
    }

    pub fn mark(&self) -> RegistryMark {
        RegistryMark {
            records: self.records.len(),
            literals: self.literals.len(),
        }
    }

    /// Roll back to `mark`, handing back what was removed.
    pub fn rewind(&mut self, mark: RegistryMark) -> RegistryUndo {
        RegistryUndo {
            records: self.records.split_off(mark.records.min(self.records.len())),
            literals: self.literals.split_off(mark.literals.min(self.literals.len())),
        }
    }

    /// Put back entries removed by [rewind](Self::rewind).
    pub fn redo(&mut self, undo: RegistryUndo) {
        self.records.extend(undo.records);
        self.literals.extend(undo.literals);
    }

    /// All entries in source order. Unbound literals become anonymous entries.
    pub fn finish(self) -> Vec<FunctionRecord> {
        let mut records = self.records;
        records.extend(
            self.literals
                .into_iter()
                .filter(|literal| !literal.bound)
                .map(|literal| FunctionRecord {
                    name: FunctionName::Anonymous,
                    params: literal.params,
                    anchor: literal.span.0,
                }),
        );
        records.sort_by_key(|record| record.anchor);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::lexing::tokenize;

    #[test]
    fn test_declaration() {
        let mut builder = RegistryBuilder::new();
        builder.declare((1, 2), (2, 7));
        assert_eq!(
            builder.finish(),
            vec![FunctionRecord {
                name: FunctionName::Named((1, 2)),
                params: (2, 7),
                anchor: 1
            }]
        );
    }

    #[test]
    fn test_pairing_keeps_only_literals() {
        let mut builder = RegistryBuilder::new();
        builder.open_assignment();
        builder.push_name((1, 2));
        builder.push_name((3, 4));
        builder.function_literal((5, 10), (6, 9));
        builder.push_value((5, 10));
        builder.push_value((11, 12));
        assert_eq!(builder.close_assignment(), Ok(()));

        let records = builder.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, FunctionName::Named((1, 2)));
        assert_eq!(records[0].params, (6, 9));
    }

    #[test]
    fn test_literal_inside_larger_expression_is_not_paired() {
        let mut builder = RegistryBuilder::new();
        builder.open_assignment();
        builder.push_name((0, 1));
        builder.function_literal((3, 7), (4, 6));
        builder.push_value((2, 9));
        assert_eq!(builder.close_assignment(), Ok(()));

        let records = builder.finish();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_anonymous());
    }

    #[test]
    fn test_mismatch_with_literal_is_reported() {
        let mut builder = RegistryBuilder::new();
        builder.open_assignment();
        builder.push_name((1, 2));
        builder.push_name((3, 4));
        builder.function_literal((5, 9), (6, 8));
        builder.push_value((5, 9));
        assert_eq!(
            builder.close_assignment(),
            Err(PairingMismatch {
                names: 2,
                values: 1
            })
        );
        assert!(builder.finish().iter().all(FunctionRecord::is_anonymous));
    }

    #[test]
    fn test_mismatch_without_literal_is_silent() {
        let mut builder = RegistryBuilder::new();
        builder.open_assignment();
        builder.push_name((1, 2));
        builder.push_name((3, 4));
        builder.push_value((5, 8));
        assert_eq!(builder.close_assignment(), Ok(()));
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_nested_frames_pair_independently() {
        let mut builder = RegistryBuilder::new();
        builder.open_assignment();
        builder.push_name((0, 1));
        // inner statement inside the literal body
        builder.open_assignment();
        builder.push_name((6, 7));
        builder.push_value((8, 9));
        assert_eq!(builder.close_assignment(), Ok(()));
        builder.function_literal((2, 11), (3, 5));
        builder.push_value((2, 11));
        assert_eq!(builder.close_assignment(), Ok(()));

        let records = builder.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, FunctionName::Named((0, 1)));
    }

    #[test]
    fn test_rewind_and_redo() {
        let mut builder = RegistryBuilder::new();
        builder.declare((0, 1), (1, 3));
        let mark = builder.mark();
        builder.function_literal((5, 9), (6, 8));
        builder.declare((10, 11), (11, 13));

        let undo = builder.rewind(mark);
        assert_eq!(builder.mark(), mark);
        builder.redo(undo);
        assert_eq!(builder.finish().len(), 3);
    }

    #[test]
    fn test_render() {
        let tokens = tokenize("function a.b:c(x, y, ...) end").unwrap();
        let record = FunctionRecord {
            name: FunctionName::Named((1, 6)),
            params: (6, 13),
            anchor: 1,
        };
        assert_eq!(record.render(&tokens), "a.b:c(x, y, ...)");
        assert_eq!(record.line(&tokens), 1);
    }
}
