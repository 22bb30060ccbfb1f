//! Table constructors

use crate::lua::parsing::context::Parser;
use crate::lua::parsing::grammar::{MatchSpec, Rule};
use crate::lua::token::TokenKind;

impl<'t> Parser<'t> {
    /// '{' [fieldlist] '}'
    pub(crate) fn table_constructor(&mut self) {
        self.consume_value("{");
        self.optional(&[MatchSpec::Rule(Rule::FieldList)], 1);
        self.consume_value("}");
    }

    /// field {fieldsep field} [fieldsep]
    pub(crate) fn field_list(&mut self) {
        self.apply_rule(Rule::Field);
        self.star(
            &[
                MatchSpec::Rule(Rule::FieldSeparator),
                MatchSpec::Rule(Rule::Field),
            ],
            2,
            0,
        );
        self.optional(&[MatchSpec::Rule(Rule::FieldSeparator)], 1);
    }

    /// '[' exp ']' '=' exp | Name '=' exp | exp
    pub(crate) fn field(&mut self) {
        if self.lookahead(self.pos, &[MatchSpec::Value("[")], 1) {
            self.consume_value("[");
            self.apply_rule(Rule::Exp);
            self.consume_value("]");
            self.consume_value("=");
        } else if self.lookahead(
            self.pos,
            &[MatchSpec::Kind(TokenKind::Name), MatchSpec::Value("=")],
            2,
        ) {
            self.consume_kind(TokenKind::Name);
            self.consume_value("=");
        }
        self.apply_rule(Rule::Exp);
    }
}
