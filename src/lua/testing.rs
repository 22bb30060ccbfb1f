//! Testing utilities
//!
//! # Sample Programs
//!
//! Tests that need more than a one-line fragment must load their Lua source from the
//! verified programs under `samples/` through [Samples], instead of pasting programs into
//! test files. When the grammar or the diagnostics change, the samples are the one place to
//! review.
//!
//! ```rust-example
//! use luaparse::lua::testing::Samples;
//!
//! let source = Samples::get_string("010-functions.lua")?;
//! let processed = Samples::get_processed("100-missing-end.lua", "report-simple")?;
//! ```
//!
//! Samples numbered below 100 are valid programs; from 100 on, each one holds a known
//! error.

use crate::lua::lexing::tokenize;
use crate::lua::processor::{process_file, AnalyzerConfig, ProcessingError, ProcessingSpec};
use crate::lua::token::TokenStream;
use std::fs;
use std::path::PathBuf;

/// Available sample files
pub const AVAILABLE_SAMPLES: &[&str] = &[
    "000-statements.lua",
    "010-functions.lua",
    "020-expressions.lua",
    "030-tables.lua",
    "040-strings-and-comments.lua",
    "100-missing-end.lua",
    "110-unpaired-assignment.lua",
    "120-stray-tokens.lua",
];

/// Access to the verified sample programs
pub struct Samples;

impl Samples {
    /// Samples that must parse without diagnostics
    pub fn valid() -> impl Iterator<Item = &'static str> {
        AVAILABLE_SAMPLES
            .iter()
            .copied()
            .filter(|name| !name.starts_with('1'))
    }

    /// Samples that hold a known error
    pub fn invalid() -> impl Iterator<Item = &'static str> {
        AVAILABLE_SAMPLES
            .iter()
            .copied()
            .filter(|name| name.starts_with('1'))
    }

    pub fn path(filename: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("samples")
            .join(filename)
    }

    fn validate(filename: &str) -> Result<PathBuf, ProcessingError> {
        if !AVAILABLE_SAMPLES.contains(&filename) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Sample '{}' is not available. Available samples: {:?}",
                filename, AVAILABLE_SAMPLES
            )));
        }
        Ok(Self::path(filename))
    }

    /// Raw source text
    pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
        let path = Self::validate(filename)?;
        fs::read_to_string(&path).map_err(|source| ProcessingError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Sealed token stream
    pub fn get_tokens(filename: &str) -> Result<TokenStream, ProcessingError> {
        Ok(tokenize(&Self::get_string(filename)?)?)
    }

    /// Output of a processing spec such as `report-simple`, with default analyzer options
    pub fn get_processed(filename: &str, format: &str) -> Result<String, ProcessingError> {
        let path = Self::validate(filename)?;
        let spec = ProcessingSpec::from_string(format)?;
        Ok(process_file(path, &spec, &AnalyzerConfig::default())?.output)
    }
}
