//! Core token types and helpers shared across the lexer, parser, and tooling.

pub mod formatting;
pub mod kinds;
pub mod stream;

pub use formatting::{detokenize, ToLuaString};
pub use kinds::{Token, TokenKind, KEYWORDS};
pub use stream::TokenStream;
