//! Detokenizer for Lua source
//!
//! This module converts a stream of tokens back into source text. Tokens are laid out on
//! their original lines and separated by a single space, so re-lexing the output yields the
//! same kinds and values even though the original spacing is normalized.
use super::kinds::{Token, TokenKind};

/// Trait for converting a token to its source representation
pub trait ToLuaString {
    fn to_lua_string(&self) -> String;
}

impl ToLuaString for Token {
    fn to_lua_string(&self) -> String {
        match self.kind {
            TokenKind::String => quote(&self.value),
            // Synthetic, never part of the source text
            TokenKind::Eof => String::new(),
            TokenKind::Number | TokenKind::Name | TokenKind::Keyword | TokenKind::Operator => {
                self.value.clone()
            }
        }
    }
}

/// Quote a string value so that the lexer reads back exactly `value`.
///
/// Plain content gets double quotes (or single quotes if it holds a double quote). Anything
/// holding a newline or a backslash goes into a long bracket, whose content is never
/// interpreted.
fn quote(value: &str) -> String {
    if value.contains(['\n', '\\']) || (value.contains('"') && value.contains('\'')) {
        long_bracket(value)
    } else if value.contains('"') {
        format!("'{}'", value)
    } else {
        format!("\"{}\"", value)
    }
}

fn long_bracket(value: &str) -> String {
    let mut level = 0;
    loop {
        let equals = "=".repeat(level);
        let close = format!("]{}]", equals);
        let closed = format!("{}{}", value, close);
        if closed.find(&close) == Some(value.len()) {
            // The newline after the opening bracket is dropped by the lexer, which keeps
            // values that start with a newline intact.
            return format!("[{}[\n{}", equals, closed);
        }
        level += 1;
    }
}

/// Detokenize a stream of tokens into source text
pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = String::new();
    let mut line = 1;

    for token in tokens.iter().filter(|t| !t.is_eof()) {
        if token.line > line {
            for _ in line..token.line {
                result.push('\n');
            }
            line = token.line;
        } else if !result.is_empty() && !result.ends_with('\n') {
            result.push(' ');
        }
        let text = token.to_lua_string();
        line += text.matches('\n').count();
        result.push_str(&text);
    }

    result
}
