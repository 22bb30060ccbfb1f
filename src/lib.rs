//! # luaparse
//!
//! A grammar checker for Lua source text.
//!
//! The crate reads Lua-family source, decides whether it conforms to the context-free grammar
//! of the language and, along the way, indexes every declared function with its parameter
//! list. It recovers from local errors instead of stopping at the first one, so a single run
//! reports every syntax problem it can find.
//!
//! File Layout
//!
//! The pipeline is split the same way the data flows:
//! src/lua
//!   ├── token        Token types and the detokenizer
//!   ├── lexing       Regex driven tokenizer
//!   ├── parsing      Predictive recursive descent engine and grammar productions
//!   ├── diagnostics  Error sink, with suppression during speculative checks
//!   ├── registry     Function name / parameter list side table
//!   ├── processor    Stage + format processing API used by the binary
//!   └── formats      Text, JSON and YAML serializers
//!
//! For testing guidelines, see the [testing module](lua::testing).

pub mod lua;
