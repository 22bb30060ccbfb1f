//! Statements
//!
//! Control flow, declarations and the two statements that start with a prefix expression.
//! Assignment and call statements share their whole head (`a.b[c]:d(e).f`), and only the
//! last suffix of the chain tells them apart. The head is parsed greedily with a lookback of
//! one repetition, which leaves the cursor on that last suffix.

use crate::lua::diagnostics::ErrorKind;
use crate::lua::parsing::context::Parser;
use crate::lua::parsing::grammar::{MatchSpec, Rule};
use crate::lua::token::TokenKind;

impl<'t> Parser<'t> {
    /// while exp do block end
    pub(crate) fn while_statement(&mut self) {
        self.consume_value("while");
        self.apply_rule(Rule::Exp);
        self.consume_value("do");
        self.block();
        self.consume_value("end");
    }

    /// repeat block until exp
    pub(crate) fn repeat_statement(&mut self) {
        self.consume_value("repeat");
        self.block();
        self.consume_value("until");
        self.apply_rule(Rule::Exp);
    }

    /// if exp then block {elseif exp then block} [else block] end
    pub(crate) fn if_statement(&mut self) {
        self.consume_value("if");
        self.apply_rule(Rule::Exp);
        self.consume_value("then");
        self.block();
        self.star(&[MatchSpec::Rule(Rule::ElseIfClause)], 1, 0);
        self.optional(&[MatchSpec::Rule(Rule::ElseClause)], 1);
        self.consume_value("end");
    }

    pub(crate) fn elseif_clause(&mut self) {
        self.consume_value("elseif");
        self.apply_rule(Rule::Exp);
        self.consume_value("then");
        self.block();
    }

    pub(crate) fn else_clause(&mut self) {
        self.consume_value("else");
        self.block();
    }

    /// Both loop forms start with a Name; the token after it decides.
    pub(crate) fn for_statement(&mut self) {
        self.consume_value("for");
        let numeric = self.lookahead(
            self.pos,
            &[MatchSpec::Kind(TokenKind::Name), MatchSpec::Value("=")],
            2,
        );
        if numeric {
            self.apply_rule(Rule::NumericFor);
        } else {
            self.apply_rule(Rule::GenericFor);
        }
    }

    /// Name '=' exp ',' exp [',' exp] do block end
    pub(crate) fn numeric_for(&mut self) {
        self.consume_kind(TokenKind::Name);
        self.consume_value("=");
        self.apply_rule(Rule::Exp);
        self.consume_value(",");
        self.apply_rule(Rule::Exp);
        self.optional(&[MatchSpec::Value(","), MatchSpec::Rule(Rule::Exp)], 1);
        self.consume_value("do");
        self.block();
        self.consume_value("end");
    }

    /// namelist in explist do block end
    pub(crate) fn generic_for(&mut self) {
        self.apply_rule(Rule::NameList);
        self.consume_value("in");
        self.apply_rule(Rule::ExpList);
        self.consume_value("do");
        self.block();
        self.consume_value("end");
    }

    /// function funcname funcbody
    pub(crate) fn function_statement(&mut self) {
        self.consume_value("function");
        let start = self.pos;
        self.apply_rule(Rule::FuncName);
        let name = (start, self.pos);
        let params = self.function_body();
        self.registry.declare(name, params);
    }

    /// Name {'.' Name} [':' Name]
    pub(crate) fn function_name(&mut self) {
        self.consume_kind(TokenKind::Name);
        self.star(
            &[MatchSpec::Value("."), MatchSpec::Kind(TokenKind::Name)],
            2,
            0,
        );
        self.optional(
            &[MatchSpec::Value(":"), MatchSpec::Kind(TokenKind::Name)],
            2,
        );
    }

    pub(crate) fn local_statement(&mut self) {
        self.consume_value("local");
        if self.contains(self.pos, Rule::LocalFunction) {
            self.apply_rule(Rule::LocalFunction);
        } else {
            self.apply_rule(Rule::LocalNames);
        }
    }

    /// local function Name funcbody
    pub(crate) fn local_function(&mut self) {
        self.consume_value("function");
        let start = self.pos;
        self.consume_kind(TokenKind::Name);
        let name = (start, self.pos);
        let params = self.function_body();
        self.registry.declare(name, params);
    }

    /// local namelist ['=' explist]
    pub(crate) fn local_names(&mut self) {
        let start = self.pos;
        self.registry.open_assignment();
        self.apply_rule(Rule::LocalName);
        self.star(
            &[MatchSpec::Value(","), MatchSpec::Rule(Rule::LocalName)],
            2,
            0,
        );
        self.optional(
            &[MatchSpec::Value("="), MatchSpec::Rule(Rule::AssignedExpList)],
            1,
        );
        self.close_assignment(start);
    }

    pub(crate) fn local_name(&mut self) {
        let start = self.pos;
        self.consume_kind(TokenKind::Name);
        self.registry.push_name((start, self.pos));
    }

    /// varlist '=' explist | functioncall
    pub(crate) fn expression_statement(&mut self) {
        let start = self.pos;
        let named = self.prefix_head();
        self.star(&[MatchSpec::Rule(Rule::AfterPrefix)], 1, 1);

        if self.contains(self.pos, Rule::CallSuffix) {
            self.apply_rule(Rule::AfterPrefix);
            return;
        }
        if self.contains(self.pos, Rule::IndexSuffix) {
            self.apply_rule(Rule::AfterPrefix);
        } else if !named {
            // `(x) = 1` is still parsed as an assignment to keep going
            self.mismatch(self.pos, &Rule::AfterPrefix.to_string());
        }
        self.assignment(start);
    }

    /// The rest of an assignment whose first variable spans `start..cursor`.
    fn assignment(&mut self, start: usize) {
        self.registry.open_assignment();
        self.registry.push_name((start, self.pos));
        self.star(
            &[MatchSpec::Value(","), MatchSpec::Rule(Rule::AssignedVar)],
            2,
            0,
        );
        self.consume_value("=");
        self.apply_rule(Rule::AssignedExpList);
        self.close_assignment(start);
    }

    pub(crate) fn assigned_var(&mut self) {
        let start = self.pos;
        self.apply_rule(Rule::Var);
        self.registry.push_name((start, self.pos));
    }

    /// var ::= Name | prefixexp '[' exp ']' | prefixexp '.' Name
    pub(crate) fn var(&mut self) {
        let named = self.prefix_head();
        self.star(&[MatchSpec::Rule(Rule::AfterPrefix)], 1, 1);

        let last = self.pos;
        if self.contains(last, Rule::IndexSuffix) {
            self.apply_rule(Rule::AfterPrefix);
        } else if self.contains(last, Rule::CallSuffix) {
            self.apply_rule(Rule::AfterPrefix);
            self.mismatch(last, &Rule::IndexSuffix.to_string());
        } else if !named {
            self.mismatch(last, &Rule::AfterPrefix.to_string());
        }
    }

    /// Name {',' Name}
    pub(crate) fn name_list(&mut self) {
        self.consume_kind(TokenKind::Name);
        self.star(
            &[MatchSpec::Value(","), MatchSpec::Kind(TokenKind::Name)],
            2,
            0,
        );
    }

    pub(crate) fn assigned_expression_list(&mut self) {
        self.apply_rule(Rule::AssignedExp);
        self.star(
            &[MatchSpec::Value(","), MatchSpec::Rule(Rule::AssignedExp)],
            2,
            0,
        );
    }

    pub(crate) fn assigned_expression(&mut self) {
        let start = self.pos;
        self.apply_rule(Rule::Exp);
        self.registry.push_value((start, self.pos));
    }

    /// Pair the innermost assignment; a failed pairing is reported over the statement.
    fn close_assignment(&mut self, start: usize) {
        if let Err(mismatch) = self.registry.close_assignment() {
            self.report(ErrorKind::Structural, start, self.pos, mismatch.to_string());
        }
    }
}
