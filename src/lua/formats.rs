//! Output formats for reports and token streams
//!
//! Each format implements the [Formatter] trait. The simple format is line oriented text
//! meant for terminals; JSON and YAML serialize the same data through serde.

use crate::lua::processor::{OutputFormat, Report};
use crate::lua::token::TokenStream;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{format}' cannot render {what}")]
    Unsupported {
        format: &'static str,
        what: &'static str,
    },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Serializes reports and token streams to one output format
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "simple", "json")
    fn name(&self) -> &'static str;

    fn report(&self, report: &Report) -> Result<String, FormatError>;

    fn tokens(&self, tokens: &TokenStream) -> Result<String, FormatError> {
        let _ = tokens;
        Err(FormatError::Unsupported {
            format: self.name(),
            what: "tokens",
        })
    }
}

/// One line per diagnostic, function or token
pub struct SimpleFormatter;

impl Formatter for SimpleFormatter {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn report(&self, report: &Report) -> Result<String, FormatError> {
        let lines: Vec<String> = match report {
            Report::Diagnostics(records) => records.iter().map(ToString::to_string).collect(),
            Report::Functions(entries) => entries.iter().map(|e| e.signature()).collect(),
        };
        Ok(lines.into_iter().map(|line| line + "\n").collect())
    }

    fn tokens(&self, tokens: &TokenStream) -> Result<String, FormatError> {
        Ok(tokens.iter().map(|t| format!("{}\n", t)).collect())
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn report(&self, report: &Report) -> Result<String, FormatError> {
        serde_json::to_string_pretty(report).map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn tokens(&self, tokens: &TokenStream) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tokens).map_err(|e| FormatError::Serialization(e.to_string()))
    }
}

/// Reports only
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn report(&self, report: &Report) -> Result<String, FormatError> {
        serde_yaml::to_string(report).map_err(|e| FormatError::Serialization(e.to_string()))
    }
}

/// The formatter for an output format
pub fn formatter_for(format: OutputFormat) -> &'static dyn Formatter {
    match format {
        OutputFormat::Simple => &SimpleFormatter,
        OutputFormat::Json => &JsonFormatter,
        OutputFormat::Yaml => &YamlFormatter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lua::lexing::tokenize;
    use crate::lua::processor::{analyze, AnalyzerConfig, FunctionEntry};

    fn functions() -> Report {
        Report::Functions(vec![FunctionEntry {
            name: "m.run".to_string(),
            params: "(a, b)".to_string(),
            line: 3,
        }])
    }

    #[test]
    fn test_simple_report() {
        assert_eq!(
            SimpleFormatter.report(&functions()).unwrap(),
            "m.run(a, b)\n"
        );
        let report = analyze("if x then", &AnalyzerConfig::default()).unwrap();
        assert_eq!(
            SimpleFormatter.report(&report).unwrap(),
            "Error (line 2, col 0) unexpected end of file, expected 'end'\n"
        );
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("x = 'y'").unwrap();
        assert_eq!(
            SimpleFormatter.tokens(&tokens).unwrap(),
            "1:0 Name \"x\"\n1:2 Operator \"=\"\n1:4 String \"y\"\n2:0 EOF\n"
        );
    }

    #[test]
    fn test_json_report() {
        let json = JsonFormatter.report(&functions()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["functions"][0]["name"], "m.run");
        assert_eq!(value["functions"][0]["line"], 3);
    }

    #[test]
    fn test_yaml_rejects_tokens() {
        let tokens = tokenize("x").unwrap();
        assert_eq!(
            YamlFormatter.tokens(&tokens),
            Err(FormatError::Unsupported {
                format: "yaml",
                what: "tokens"
            })
        );
    }
}
