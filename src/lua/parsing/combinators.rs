//! Combinators
//!
//! Everything the productions are built from. The speculative checks ([Parser::contains],
//! [Parser::lookahead]) run with diagnostics suppressed and the cursor restored, so they can
//! be asked any number of times without side effects. The committing combinators
//! ([Parser::optional], [Parser::star]) only ever enter a sequence after a successful
//! lookahead and never back out of it.
//!
//! Lookback
//!
//!     A `star` loop with a lookback of `k` rewinds, after its last repetition, to the
//!     boundary `k` repetitions back. The caller can then inspect what those repetitions
//!     started with and pick the production that follows. Rewinding also takes back the
//!     diagnostics and registry entries recorded after the boundary, so nothing is recorded
//!     twice when the caller parses that stretch again.
//!
//!     For a single-rule loop rewound by one repetition, the undone work is kept: applying
//!     the same rule again from the same checkpoint replays it instead of re-parsing.

use super::context::{Parser, Undone};
use super::grammar::{MatchSpec, Rule};
use tracing::trace;

impl<'t> Parser<'t> {
    /// Whether the token at `at` can begin `rule`. Never mutates observable state.
    pub fn contains(&mut self, at: usize, rule: Rule) -> bool {
        self.speculate(|p| rule.starts_with(p.token(at)))
    }

    /// Whether the first `n` specs match consecutive tokens starting at `at`.
    ///
    /// A rule spec is checked against its FIRST set only and counts as one token.
    pub fn lookahead(&mut self, at: usize, specs: &[MatchSpec], n: usize) -> bool {
        self.speculate(|p| {
            specs
                .iter()
                .take(n)
                .enumerate()
                .all(|(offset, spec)| match *spec {
                    MatchSpec::Value(value) => p.match_value(at + offset, value),
                    MatchSpec::Kind(kind) => p.match_kind(at + offset, kind),
                    MatchSpec::Rule(rule) => p.contains(at + offset, rule),
                })
        })
    }

    /// Apply `specs` in order if the first `n` of them look ahead successfully.
    pub fn optional(&mut self, specs: &[MatchSpec], n: usize) -> bool {
        if !self.lookahead(self.pos, specs, n) {
            return false;
        }
        self.apply_all(specs);
        true
    }

    /// Apply `specs` repeatedly while the first `n` of them look ahead successfully, then
    /// rewind `lookback` repetitions. Fewer repetitions than `lookback` rewind to the start.
    pub fn star(&mut self, specs: &[MatchSpec], n: usize, lookback: usize) {
        let mut boundaries = vec![self.checkpoint()];
        while self.lookahead(self.pos, specs, n) {
            let before = self.pos;
            self.apply_all(specs);
            boundaries.push(self.checkpoint());
            if self.pos == before {
                break;
            }
        }

        let repetitions = boundaries.len() - 1;
        if lookback == 0 || repetitions == 0 {
            return;
        }
        let boundary = boundaries[repetitions.saturating_sub(lookback)];
        trace!(
            from = self.pos,
            to = boundary.pos,
            repetitions,
            "lookback rewind"
        );

        let end = self.pos;
        let diagnostics = self.diagnostics.split_off(boundary.diagnostics);
        let registry = self.registry.rewind(boundary.registry);
        self.pos = boundary.pos;
        self.undone = match specs {
            [MatchSpec::Rule(rule)] if lookback == 1 => Some(Undone {
                rule: *rule,
                from: boundary,
                end,
                diagnostics,
                registry,
            }),
            _ => None,
        };
    }

    /// Apply one spec: consume a terminal, or run a production.
    pub fn apply(&mut self, spec: MatchSpec) {
        match spec {
            MatchSpec::Value(value) => {
                self.consume_value(value);
            }
            MatchSpec::Kind(kind) => {
                self.consume_kind(kind);
            }
            MatchSpec::Rule(rule) => self.apply_rule(rule),
        }
    }

    pub fn apply_all(&mut self, specs: &[MatchSpec]) {
        for spec in specs {
            self.apply(*spec);
        }
    }

    /// Run the production for `rule` at the cursor.
    pub fn apply_rule(&mut self, rule: Rule) {
        if self.replay(rule) {
            return;
        }
        match rule {
            Rule::Chunk => self.chunk(),
            Rule::Block => self.block(),
            Rule::Statement => self.statement(),
            Rule::LastStatement => self.last_statement(),
            Rule::ReturnStatement => self.return_statement(),
            Rule::BreakStatement => self.break_statement(),
            Rule::DoStatement => self.do_statement(),
            Rule::WhileStatement => self.while_statement(),
            Rule::RepeatStatement => self.repeat_statement(),
            Rule::IfStatement => self.if_statement(),
            Rule::ElseIfClause => self.elseif_clause(),
            Rule::ElseClause => self.else_clause(),
            Rule::ForStatement => self.for_statement(),
            Rule::NumericFor => self.numeric_for(),
            Rule::GenericFor => self.generic_for(),
            Rule::FunctionStatement => self.function_statement(),
            Rule::LocalStatement => self.local_statement(),
            Rule::LocalFunction => self.local_function(),
            Rule::LocalNames => self.local_names(),
            Rule::LocalName => self.local_name(),
            Rule::ExpressionStatement => self.expression_statement(),
            Rule::AssignedVar => self.assigned_var(),
            Rule::AssignedExpList => self.assigned_expression_list(),
            Rule::AssignedExp => self.assigned_expression(),
            Rule::FuncName => self.function_name(),
            Rule::Var => self.var(),
            Rule::NameList => self.name_list(),
            Rule::ExpList => self.expression_list(),
            Rule::Exp => self.expression(),
            Rule::SimpleExp => self.simple_expression(),
            Rule::Constant
            | Rule::FieldSeparator
            | Rule::BinaryOperator
            | Rule::UnaryOperator => self.terminal_choice(rule),
            Rule::PrefixExp => self.prefix_expression(),
            Rule::AfterPrefix => self.after_prefix(),
            Rule::IndexSuffix => self.index_suffix(),
            Rule::CallSuffix => self.call_suffix(),
            Rule::Args => self.arguments(),
            Rule::FunctionLiteral => self.function_literal(),
            Rule::FuncBody => {
                self.function_body();
            }
            Rule::ParList => self.parameter_list(),
            Rule::TableConstructor => self.table_constructor(),
            Rule::FieldList => self.field_list(),
            Rule::Field => self.field(),
        }
    }

    /// Run the first alternative whose FIRST set holds the current token, or reject.
    pub(crate) fn ordered_choice(&mut self, parent: Rule, alternatives: &[Rule]) {
        let at = self.pos;
        match alternatives
            .iter()
            .copied()
            .find(|alternative| self.contains(at, *alternative))
        {
            Some(alternative) => self.apply_rule(alternative),
            None => self.reject(parent),
        }
    }

    /// Consume one token from the FIRST set of `rule`, or reject.
    pub(crate) fn terminal_choice(&mut self, rule: Rule) {
        if self.contains(self.pos, rule) {
            self.step();
        } else {
            self.reject(rule);
        }
    }

    /// Restore a repetition taken back by a lookback rewind, if `rule` is being applied
    /// again from exactly where it was undone.
    fn replay(&mut self, rule: Rule) -> bool {
        let Some(undone) = self.undone.take() else {
            return false;
        };
        if undone.rule != rule || undone.from != self.checkpoint() {
            return false;
        }
        self.diagnostics.restore(undone.diagnostics);
        self.registry.redo(undone.registry);
        self.pos = undone.end;
        true
    }
}
