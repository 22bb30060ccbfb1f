//! Lexer
//!
//!     This module turns Lua source text into a [TokenStream](crate::lua::token::TokenStream).
//!
//! Classification Order
//!
//!     Tokens are recognized by one master regex built from an ordered list of named
//!     alternatives, see [patterns](patterns). The regex engine uses leftmost-first semantics,
//!     so when two alternatives match at the same position the one declared first wins. The
//!     order is therefore part of the grammar:
//!         1. Comments (long form first), so that `--` is never read as two minus operators.
//!         2. Long brackets `[==[`, before the `[` operator.
//!         3. Numbers, hexadecimal before decimal, before the `.` operator.
//!         4. Names, re-tagged as keywords when they spell a reserved word.
//!         5. Operators, longest first (`...` before `..` before `.`).
//!         6. Quoted strings.
//!         7. Newlines and whitespace, which produce no tokens.
//!         8. Anything else, which is a fatal error.
//!
//! Long Brackets
//!
//!     The regex crate has no backreferences, so only the opening bracket of a long string or
//!     long comment is matched by the regex. The matching close, a `]` followed by as many `=`
//!     as the opening and another `]`, is found by scanning forward from there.
//!
//! Failure
//!
//!     Lexing is all or nothing: the first unexpected character ends tokenization and no
//!     partial stream is ever handed to the parser.

pub mod base_tokenization;
pub mod common;
pub mod patterns;

pub use base_tokenization::{tokenize, Tokenizer};
pub use common::LexError;
