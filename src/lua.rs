//! Main module for luaparse library functionality

pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod registry;
pub mod testing;
pub mod token;

pub use diagnostics::{Diagnostics, ErrorKind, ErrorRecord};
pub use lexing::{tokenize, LexError};
pub use parsing::{parse, ParseOutcome};
pub use processor::{analyze, AnalyzerConfig, Report};
pub use registry::{FunctionName, FunctionRecord};
pub use token::{Token, TokenKind, TokenStream};
