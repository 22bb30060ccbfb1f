//! Expressions
//!
//! Operator precedence is not modelled: an expression is a flat run of operands joined by
//! binary operators, which accepts exactly the same token sequences as the layered grammar.

use crate::lua::parsing::context::Parser;
use crate::lua::parsing::grammar::{MatchSpec, Rule};
use crate::lua::token::TokenKind;

impl<'t> Parser<'t> {
    /// explist ::= exp {',' exp}
    pub(crate) fn expression_list(&mut self) {
        self.apply_rule(Rule::Exp);
        self.star(&[MatchSpec::Value(","), MatchSpec::Rule(Rule::Exp)], 2, 0);
    }

    /// exp ::= unop exp | simpleexp, then an optional binop exp
    pub(crate) fn expression(&mut self) {
        if self.contains(self.pos, Rule::UnaryOperator) {
            self.apply_rule(Rule::UnaryOperator);
            self.apply_rule(Rule::Exp);
            return;
        }
        self.apply_rule(Rule::SimpleExp);
        self.optional(
            &[
                MatchSpec::Rule(Rule::BinaryOperator),
                MatchSpec::Rule(Rule::Exp),
            ],
            1,
        );
    }

    pub(crate) fn simple_expression(&mut self) {
        self.ordered_choice(
            Rule::SimpleExp,
            &[
                Rule::Constant,
                Rule::FunctionLiteral,
                Rule::TableConstructor,
                Rule::PrefixExp,
            ],
        );
    }

    /// prefixexp ::= (Name | '(' exp ')') {index | call}
    pub(crate) fn prefix_expression(&mut self) {
        self.prefix_head();
        self.star(&[MatchSpec::Rule(Rule::AfterPrefix)], 1, 0);
    }

    /// Name | '(' exp ')'. Returns whether the head is a bare name.
    pub(crate) fn prefix_head(&mut self) -> bool {
        if self.lookahead(self.pos, &[MatchSpec::Kind(TokenKind::Name)], 1) {
            self.consume_kind(TokenKind::Name);
            return true;
        }
        self.consume_value("(");
        self.apply_rule(Rule::Exp);
        self.consume_value(")");
        false
    }

    pub(crate) fn after_prefix(&mut self) {
        self.ordered_choice(Rule::AfterPrefix, &[Rule::IndexSuffix, Rule::CallSuffix]);
    }

    /// '[' exp ']' | '.' Name
    pub(crate) fn index_suffix(&mut self) {
        if self.lookahead(self.pos, &[MatchSpec::Value("[")], 1) {
            self.consume_value("[");
            self.apply_rule(Rule::Exp);
            self.consume_value("]");
        } else {
            self.consume_value(".");
            self.consume_kind(TokenKind::Name);
        }
    }

    /// [':' Name] args
    pub(crate) fn call_suffix(&mut self) {
        self.optional(
            &[MatchSpec::Value(":"), MatchSpec::Kind(TokenKind::Name)],
            1,
        );
        self.apply_rule(Rule::Args);
    }

    /// '(' [explist] ')' | tableconstructor | String
    pub(crate) fn arguments(&mut self) {
        if self.lookahead(self.pos, &[MatchSpec::Value("(")], 1) {
            self.consume_value("(");
            self.optional(&[MatchSpec::Rule(Rule::ExpList)], 1);
            self.consume_value(")");
        } else if self.contains(self.pos, Rule::TableConstructor) {
            self.apply_rule(Rule::TableConstructor);
        } else if self.lookahead(self.pos, &[MatchSpec::Kind(TokenKind::String)], 1) {
            self.consume_kind(TokenKind::String);
        } else {
            self.reject(Rule::Args);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lua::lexing::tokenize;
    use crate::lua::parsing::parse;

    fn messages(source: &str) -> Vec<String> {
        let tokens = tokenize(source).unwrap();
        parse(&tokens)
            .diagnostics
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    #[test]
    fn test_operators() {
        assert!(messages("x = -a ^ 2 .. 'u' .. #t + (b or not c) * 3 % 4 / 5").is_empty());
        assert!(messages("x = a <= b and c >= d or e ~= f and g == h").is_empty());
        assert!(messages("x = - - - 1").is_empty());
    }

    #[test]
    fn test_constants() {
        assert!(messages("x = nil y = true z = false w = ... v = 0x1F u = [[s]]").is_empty());
    }

    #[test]
    fn test_dangling_operator() {
        assert_eq!(
            messages("x = 1 +"),
            vec!["unexpected end of file, expected expression"]
        );
    }

    #[test]
    fn test_empty_parentheses() {
        assert_eq!(
            messages("x = ()"),
            vec![
                "expected expression, found ')'",
                "unexpected end of file, expected ')'"
            ]
        );
    }

    #[test]
    fn test_call_forms() {
        assert!(messages("f() f(1, 2) f'x' f\"y\" f{} o:m() o:m'x' o:m{1}").is_empty());
        assert!(messages("x = f(a)(b)[c].d:e(f)").is_empty());
    }

    #[test]
    fn test_method_call_needs_arguments() {
        assert_eq!(
            messages("o:m"),
            vec!["unexpected end of file, expected function arguments"]
        );
    }

    #[test]
    fn test_trailing_comma_in_arguments() {
        assert_eq!(
            messages("f(a, )"),
            vec!["expected ')', found ','", "expected end of file, found ')'"]
        );
    }
}
