//! Function bodies and literals

use crate::lua::parsing::context::Parser;
use crate::lua::parsing::grammar::{MatchSpec, Rule};
use crate::lua::registry::Span;
use crate::lua::token::TokenKind;

impl<'t> Parser<'t> {
    /// function funcbody, as an expression
    pub(crate) fn function_literal(&mut self) {
        let start = self.pos;
        self.consume_value("function");
        let params = self.function_body();
        self.registry.function_literal((start, self.pos), params);
    }

    /// funcbody ::= '(' [parlist] ')' block end
    ///
    /// Returns the token range of the parameter list, parentheses included.
    pub(crate) fn function_body(&mut self) -> Span {
        let start = self.pos;
        self.consume_value("(");
        self.optional(&[MatchSpec::Rule(Rule::ParList)], 1);
        self.consume_value(")");
        let params = (start, self.pos);
        self.block();
        self.consume_value("end");
        params
    }

    /// parlist ::= namelist [',' '...'] | '...'
    pub(crate) fn parameter_list(&mut self) {
        if self.lookahead(self.pos, &[MatchSpec::Value("...")], 1) {
            self.consume_value("...");
            return;
        }
        self.consume_kind(TokenKind::Name);
        self.star(
            &[MatchSpec::Value(","), MatchSpec::Kind(TokenKind::Name)],
            2,
            0,
        );
        self.optional(&[MatchSpec::Value(","), MatchSpec::Value("...")], 2);
    }
}
