//! File processing API
//!
//! This module ties the pipeline together for callers that start from source text or a
//! file path: tokenize, parse, and render either the resulting report or the token stream
//! in one of the available formats.
//!
//! Processing Specs
//!
//!     A spec is written `<stage>-<format>`:
//!
//!         - stages: `report` (diagnostics, or the function list when there are none) and
//!           `token` (the sealed token stream)
//!         - formats: `simple`, `json`, `yaml`
//!
//!     `report-simple` is the plain output of the command line tool: one
//!     `Error (line L, col C) message` line per diagnostic, or one `name(params)` line per
//!     function.

use crate::lua::diagnostics::ErrorRecord;
use crate::lua::formats::{formatter_for, FormatError};
use crate::lua::lexing::{tokenize, LexError};
use crate::lua::parsing::{parse, ParseOutcome};
use crate::lua::token::TokenStream;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Options for turning a parse outcome into a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// List function literals that are not bound to any name
    #[serde(default)]
    pub include_anonymous: bool,
}

/// One function of the registry, rendered to text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    pub name: String,
    pub params: String,
    pub line: usize,
}

impl FunctionEntry {
    /// `name(params)`
    pub fn signature(&self) -> String {
        format!("{}{}", self.name, self.params)
    }
}

/// What a run reports: its diagnostics if there are any, the function registry otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    Diagnostics(Vec<ErrorRecord>),
    Functions(Vec<FunctionEntry>),
}

impl Report {
    pub fn from_outcome(tokens: &TokenStream, outcome: ParseOutcome, config: &AnalyzerConfig) -> Self {
        if !outcome.is_clean() {
            return Report::Diagnostics(outcome.diagnostics);
        }
        Report::Functions(
            outcome
                .functions
                .iter()
                .filter(|record| config.include_anonymous || !record.is_anonymous())
                .map(|record| FunctionEntry {
                    name: record.name_text(tokens),
                    params: record.params_text(tokens),
                    line: record.line(tokens),
                })
                .collect(),
        )
    }

    /// Whether the source parsed without diagnostics
    pub fn is_clean(&self) -> bool {
        matches!(self, Report::Functions(_))
    }
}

/// Tokenize and parse `source`.
pub fn analyze(source: &str, config: &AnalyzerConfig) -> Result<Report, LexError> {
    let tokens = tokenize(source)?;
    let outcome = parse(&tokens);
    Ok(Report::from_outcome(&tokens, outcome, config))
}

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Report,
    Token,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl Default for ProcessingSpec {
    fn default() -> Self {
        ProcessingSpec {
            stage: ProcessingStage::Report,
            format: OutputFormat::Simple,
        }
    }
}

impl ProcessingSpec {
    /// Parse a format string like "report-simple" or "token-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "report" => ProcessingStage::Report,
            "token" => ProcessingStage::Token,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        if stage == ProcessingStage::Token && format == OutputFormat::Yaml {
            return Err(ProcessingError::InvalidFormatType(
                "Format 'yaml' only works with report stage".to_string(),
            ));
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        use OutputFormat::*;
        use ProcessingStage::*;
        [(Report, Simple), (Report, Json), (Report, Yaml), (Token, Simple), (Token, Json)]
            .into_iter()
            .map(|(stage, format)| ProcessingSpec { stage, format })
            .collect()
    }

    pub fn name(&self) -> String {
        let stage = match self.stage {
            ProcessingStage::Report => "report",
            ProcessingStage::Token => "token",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        format!("{}-{}", stage, format)
    }
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Lexing failed: {0}")]
    Lex(#[from] LexError),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error(transparent)]
    Serialization(#[from] FormatError),
}

/// Rendered output of one processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub output: String,
    /// False when the report holds diagnostics
    pub clean: bool,
}

/// Process source text according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &AnalyzerConfig,
) -> Result<Processed, ProcessingError> {
    let formatter = formatter_for(spec.format);
    let tokens = tokenize(source)?;
    match spec.stage {
        ProcessingStage::Token => Ok(Processed {
            output: formatter.tokens(&tokens)?,
            clean: true,
        }),
        ProcessingStage::Report => {
            let report = Report::from_outcome(&tokens, parse(&tokens), config);
            Ok(Processed {
                output: formatter.report(&report)?,
                clean: report.is_clean(),
            })
        }
    }
}

/// Process a Lua file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &AnalyzerConfig,
) -> Result<Processed, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path).map_err(|source| ProcessingError::Io {
        path: file_path.display().to_string(),
        source,
    })?;
    process_source(&content, spec, config)
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}
