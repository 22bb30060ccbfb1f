//! Token Pattern Definitions
//!
//! The lexical vocabulary as an ordered list of named regex rules. Order matters: the rules
//! are joined into a single alternation and the first rule that matches at the current
//! position wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// Names of the alternatives, used to find out which rule produced a match.
pub(super) mod rule {
    pub const LONG_COMMENT: &str = "long_comment";
    pub const COMMENT: &str = "comment";
    pub const LONG_STRING: &str = "long_string";
    pub const HEX_NUMBER: &str = "hex_number";
    pub const NUMBER: &str = "number";
    pub const NAME: &str = "name";
    pub const OPERATOR: &str = "operator";
    pub const STRING: &str = "string";
    pub const UNTERMINATED_STRING: &str = "unterminated_string";
    pub const NEWLINE: &str = "newline";
    pub const WHITESPACE: &str = "whitespace";
    pub const ERROR: &str = "error";
}

/// Token rules as (name, pattern) pairs, in priority order.
///
/// - Hexadecimal numbers need digits on at least one side of the point; the first branch
///   covers a required fraction, the second a required integer part.
/// - Decimal numbers likewise: `3.` and `.5` are numbers, a lone `.` is not.
/// - Quoted strings keep escapes verbatim; an escaped newline is allowed, a raw one is not.
/// - `error` matches any single character and must stay last.
pub(super) const TOKEN_PATTERNS: &[(&str, &str)] = &[
    (rule::LONG_COMMENT, r"--\[=*\["),
    (rule::COMMENT, r"--[^\n]*"),
    (rule::LONG_STRING, r"\[=*\["),
    (
        rule::HEX_NUMBER,
        r"0[xX](?:[0-9a-fA-F]*\.[0-9a-fA-F]+|[0-9a-fA-F]+(?:\.[0-9a-fA-F]*)?)(?:[pP][+-]?[0-9]+)?",
    ),
    (
        rule::NUMBER,
        r"(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?",
    ),
    (rule::NAME, r"[A-Za-z_][A-Za-z0-9_]*"),
    (
        rule::OPERATOR,
        r"\.\.\.|\.\.|==|~=|<=|>=|[-+*/%^#<>=(){}\[\];:,.]",
    ),
    (
        rule::STRING,
        r#""(?:[^"\\\n]|\\(?s:.))*"|'(?:[^'\\\n]|\\(?s:.))*'"#,
    ),
    (rule::UNTERMINATED_STRING, r#"["']"#),
    (rule::NEWLINE, r"\n"),
    (rule::WHITESPACE, r"[ \t\r\x0C]+"),
    (rule::ERROR, r"."),
];

/// All rules joined into one alternation of named groups.
pub(super) static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    let alternation = TOKEN_PATTERNS
        .iter()
        .map(|(name, pattern)| format!("(?P<{}>{})", name, pattern))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).unwrap()
});

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_at(source: &str) -> (&'static str, String) {
        let caps = TOKEN_REGEX.captures(source).unwrap();
        TOKEN_PATTERNS
            .iter()
            .find_map(|(name, _)| caps.name(name).map(|m| (*name, m.as_str().to_string())))
            .unwrap()
    }

    #[test]
    fn test_master_regex_compiles() {
        Lazy::force(&TOKEN_REGEX);
    }

    #[test]
    fn test_comment_wins_over_minus() {
        assert_eq!(rule_at("-- note"), (rule::COMMENT, "-- note".to_string()));
        assert_eq!(rule_at("--[==[ x"), (rule::LONG_COMMENT, "--[==[".to_string()));
        assert_eq!(rule_at("- 1"), (rule::OPERATOR, "-".to_string()));
    }

    #[test]
    fn test_hex_is_tried_before_decimal() {
        assert_eq!(rule_at("0x3p3"), (rule::HEX_NUMBER, "0x3p3".to_string()));
        assert_eq!(rule_at("0xA.8p-1"), (rule::HEX_NUMBER, "0xA.8p-1".to_string()));
        assert_eq!(rule_at("0x.8"), (rule::HEX_NUMBER, "0x.8".to_string()));
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(rule_at("35.53e-53"), (rule::NUMBER, "35.53e-53".to_string()));
        assert_eq!(rule_at("3."), (rule::NUMBER, "3.".to_string()));
        assert_eq!(rule_at(".5"), (rule::NUMBER, ".5".to_string()));
        assert_eq!(rule_at(". 5"), (rule::OPERATOR, ".".to_string()));
    }

    #[test]
    fn test_operators_longest_first() {
        assert_eq!(rule_at("..."), (rule::OPERATOR, "...".to_string()));
        assert_eq!(rule_at(".. x"), (rule::OPERATOR, "..".to_string()));
        assert_eq!(rule_at("<="), (rule::OPERATOR, "<=".to_string()));
        assert_eq!(rule_at("~="), (rule::OPERATOR, "~=".to_string()));
    }

    #[test]
    fn test_long_string_before_bracket() {
        assert_eq!(rule_at("[[x]]"), (rule::LONG_STRING, "[[".to_string()));
        assert_eq!(rule_at("[=[x]=]"), (rule::LONG_STRING, "[=[".to_string()));
        assert_eq!(rule_at("[1]"), (rule::OPERATOR, "[".to_string()));
    }

    #[test]
    fn test_strings_with_escaped_delimiters() {
        assert_eq!(
            rule_at(r#""a\"b" rest"#),
            (rule::STRING, r#""a\"b""#.to_string())
        );
        assert_eq!(rule_at("'it' s"), (rule::STRING, "'it'".to_string()));
        assert_eq!(rule_at("\"open\n"), (rule::UNTERMINATED_STRING, "\"".to_string()));
    }

    #[test]
    fn test_unknown_character_hits_error_rule() {
        assert_eq!(rule_at("$"), (rule::ERROR, "$".to_string()));
    }
}
