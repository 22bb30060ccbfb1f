//! Parsing
//!
//!     A predictive recursive-descent checker for Lua 5.1. It walks a sealed token stream
//!     once, front to back, and never builds a syntax tree: the only outputs are the
//!     diagnostics it records and the function registry it fills.
//!
//! Engine
//!
//!     Every choice is made by looking at upcoming tokens, never by trying a production and
//!     undoing it. The pieces, bottom up:
//!
//!         - [grammar]: the rules and their FIRST sets
//!         - [matching]: single-token matches that log mismatches and step over bad tokens
//!         - [combinators]: speculative `contains` / `lookahead` and the committing
//!           `optional` / `star`, with lookback for chains whose tail decides what they are
//!         - [productions]: one method per rule, built from the above
//!
//! Recovery
//!
//!     A mismatch is recorded and the offending token is stepped over, so the parser always
//!     makes progress and always reaches EOF. Nothing is ever thrown; a run over any token
//!     stream returns a [ParseOutcome].

pub mod combinators;
pub mod context;
pub mod grammar;
pub mod matching;
mod productions;

pub use context::{Checkpoint, ParseOutcome, Parser};
pub use grammar::{MatchSpec, Rule, Terminal};

use crate::lua::token::TokenStream;

/// Check a token stream, collecting diagnostics and function records.
pub fn parse(tokens: &TokenStream) -> ParseOutcome {
    Parser::new(tokens).run()
}
