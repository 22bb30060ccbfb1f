//! Chunks, blocks and statement dispatch

use crate::lua::parsing::context::Parser;
use crate::lua::parsing::grammar::{MatchSpec, Rule};
use crate::lua::token::TokenKind;

impl<'t> Parser<'t> {
    /// chunk ::= block EOF
    ///
    /// Anything that ends the block before EOF is reported and parsing resumes with a fresh
    /// block, so the run always reaches EOF. A token that cannot start a block is stepped
    /// over first; one that can (a statement after `return`) is parsed as usual.
    pub(crate) fn chunk(&mut self) {
        self.block();
        while !self.at_eof() {
            if self.contains(self.pos, Rule::Block) {
                self.match_kind(self.pos, TokenKind::Eof);
            } else {
                self.consume_kind(TokenKind::Eof);
            }
            self.block();
        }
    }

    /// block ::= {stat [';']} [laststat [';']]
    pub(crate) fn block(&mut self) {
        self.star(&[MatchSpec::Rule(Rule::Statement)], 1, 0);
        self.optional(&[MatchSpec::Rule(Rule::LastStatement)], 1);
    }

    pub(crate) fn statement(&mut self) {
        self.ordered_choice(
            Rule::Statement,
            &[
                Rule::ExpressionStatement,
                Rule::DoStatement,
                Rule::WhileStatement,
                Rule::RepeatStatement,
                Rule::IfStatement,
                Rule::ForStatement,
                Rule::FunctionStatement,
                Rule::LocalStatement,
            ],
        );
        self.optional(&[MatchSpec::Value(";")], 1);
    }

    pub(crate) fn last_statement(&mut self) {
        self.ordered_choice(
            Rule::LastStatement,
            &[Rule::ReturnStatement, Rule::BreakStatement],
        );
        self.optional(&[MatchSpec::Value(";")], 1);
    }

    /// return [explist]
    pub(crate) fn return_statement(&mut self) {
        self.consume_value("return");
        self.optional(&[MatchSpec::Rule(Rule::ExpList)], 1);
    }

    pub(crate) fn break_statement(&mut self) {
        self.consume_value("break");
    }

    /// do block end
    pub(crate) fn do_statement(&mut self) {
        self.consume_value("do");
        self.block();
        self.consume_value("end");
    }
}
