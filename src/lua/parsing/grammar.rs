//! Grammar Rule Definitions
//!
//! This module names every production of the grammar and gives each one its FIRST set: the
//! terminals a token must match for the production to be able to start there. The parser
//! never backtracks into a production, so these sets are what every choice is made on.
//!
//! # Grammar (Lua 5.1)
//!
//!     chunk        ::= block EOF
//!     block        ::= {stat [';']} [laststat [';']]
//!     stat         ::= varlist '=' explist | functioncall | do block end
//!                    | while exp do block end | repeat block until exp
//!                    | if exp then block {elseif exp then block} [else block] end
//!                    | for Name '=' exp ',' exp [',' exp] do block end
//!                    | for namelist in explist do block end
//!                    | function funcname funcbody | local function Name funcbody
//!                    | local namelist ['=' explist]
//!     laststat     ::= return [explist] | break
//!     funcname     ::= Name {'.' Name} [':' Name]
//!     var          ::= Name | prefixexp '[' exp ']' | prefixexp '.' Name
//!     exp          ::= unop exp | simpleexp {binop exp}
//!     simpleexp    ::= nil | false | true | Number | String | '...' | function
//!                    | prefixexp | tableconstructor
//!     prefixexp    ::= (Name | '(' exp ')') {index | call}
//!     call         ::= [':' Name] args
//!     args         ::= '(' [explist] ')' | tableconstructor | String
//!     funcbody     ::= '(' [parlist] ')' block end
//!     parlist      ::= namelist [',' '...'] | '...'
//!     field        ::= '[' exp ']' '=' exp | Name '=' exp | exp
//!
//! Order matters in the operator sets: longer operators come first so that a set can be
//! scanned front to back.

use crate::lua::token::{Token, TokenKind};
use std::fmt;

/// A single-token test: an exact non-string value, or a token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Value(&'static str),
    Kind(TokenKind),
}

impl Terminal {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Terminal::Value(value) => token.is(value),
            Terminal::Kind(kind) => token.kind == *kind,
        }
    }
}

/// One element of a lookahead or repetition sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSpec {
    /// Exact token value; never matches a string literal
    Value(&'static str),
    /// Token kind
    Kind(TokenKind),
    /// Production, matched speculatively through its FIRST set
    Rule(Rule),
}

/// Every production the parser knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Chunk,
    Block,
    Statement,
    LastStatement,
    ReturnStatement,
    BreakStatement,
    DoStatement,
    WhileStatement,
    RepeatStatement,
    IfStatement,
    ElseIfClause,
    ElseClause,
    ForStatement,
    NumericFor,
    GenericFor,
    FunctionStatement,
    LocalStatement,
    LocalFunction,
    LocalNames,
    LocalName,
    /// Assignment or call, both starting with a prefix expression
    ExpressionStatement,
    AssignedVar,
    AssignedExpList,
    AssignedExp,
    FuncName,
    Var,
    NameList,
    ExpList,
    Exp,
    SimpleExp,
    Constant,
    PrefixExp,
    AfterPrefix,
    IndexSuffix,
    CallSuffix,
    Args,
    FunctionLiteral,
    FuncBody,
    ParList,
    TableConstructor,
    FieldList,
    Field,
    FieldSeparator,
    BinaryOperator,
    UnaryOperator,
}

use Terminal::{Kind, Value};

const STATEMENT_FIRST: &[Terminal] = &[
    Kind(TokenKind::Name),
    Value("("),
    Value("do"),
    Value("while"),
    Value("repeat"),
    Value("if"),
    Value("for"),
    Value("function"),
    Value("local"),
];

const BLOCK_FIRST: &[Terminal] = &[
    Kind(TokenKind::Name),
    Value("("),
    Value("do"),
    Value("while"),
    Value("repeat"),
    Value("if"),
    Value("for"),
    Value("function"),
    Value("local"),
    Value("return"),
    Value("break"),
];

const CONSTANT_FIRST: &[Terminal] = &[
    Value("nil"),
    Value("false"),
    Value("true"),
    Kind(TokenKind::Number),
    Kind(TokenKind::String),
    Value("..."),
];

const SIMPLE_EXP_FIRST: &[Terminal] = &[
    Value("nil"),
    Value("false"),
    Value("true"),
    Kind(TokenKind::Number),
    Kind(TokenKind::String),
    Value("..."),
    Value("function"),
    Value("{"),
    Kind(TokenKind::Name),
    Value("("),
];

const EXP_FIRST: &[Terminal] = &[
    Value("nil"),
    Value("false"),
    Value("true"),
    Kind(TokenKind::Number),
    Kind(TokenKind::String),
    Value("..."),
    Value("function"),
    Value("{"),
    Kind(TokenKind::Name),
    Value("("),
    Value("-"),
    Value("not"),
    Value("#"),
];

const FIELD_FIRST: &[Terminal] = &[
    Value("["),
    Value("nil"),
    Value("false"),
    Value("true"),
    Kind(TokenKind::Number),
    Kind(TokenKind::String),
    Value("..."),
    Value("function"),
    Value("{"),
    Kind(TokenKind::Name),
    Value("("),
    Value("-"),
    Value("not"),
    Value("#"),
];

const PREFIX_FIRST: &[Terminal] = &[Kind(TokenKind::Name), Value("(")];

const AFTER_PREFIX_FIRST: &[Terminal] = &[
    Value("["),
    Value("."),
    Value(":"),
    Value("("),
    Value("{"),
    Kind(TokenKind::String),
];

const CALL_FIRST: &[Terminal] = &[
    Value(":"),
    Value("("),
    Value("{"),
    Kind(TokenKind::String),
];

const ARGS_FIRST: &[Terminal] = &[Value("("), Value("{"), Kind(TokenKind::String)];

const BINARY_OPERATORS: &[Terminal] = &[
    Value(".."),
    Value("<="),
    Value(">="),
    Value("=="),
    Value("~="),
    Value("+"),
    Value("-"),
    Value("*"),
    Value("/"),
    Value("%"),
    Value("^"),
    Value("<"),
    Value(">"),
    Value("and"),
    Value("or"),
];

const UNARY_OPERATORS: &[Terminal] = &[Value("-"), Value("not"), Value("#")];

impl Rule {
    /// Terminals that can begin this production
    pub fn first(self) -> &'static [Terminal] {
        match self {
            Rule::Chunk | Rule::Block => BLOCK_FIRST,
            Rule::Statement => STATEMENT_FIRST,
            Rule::LastStatement => &[Value("return"), Value("break")],
            Rule::ReturnStatement => &[Value("return")],
            Rule::BreakStatement => &[Value("break")],
            Rule::DoStatement => &[Value("do")],
            Rule::WhileStatement => &[Value("while")],
            Rule::RepeatStatement => &[Value("repeat")],
            Rule::IfStatement => &[Value("if")],
            Rule::ElseIfClause => &[Value("elseif")],
            Rule::ElseClause => &[Value("else")],
            Rule::ForStatement => &[Value("for")],
            Rule::FunctionStatement | Rule::LocalFunction | Rule::FunctionLiteral => {
                &[Value("function")]
            }
            Rule::LocalStatement => &[Value("local")],
            Rule::NumericFor
            | Rule::GenericFor
            | Rule::LocalNames
            | Rule::LocalName
            | Rule::FuncName
            | Rule::NameList => &[Kind(TokenKind::Name)],
            Rule::ExpressionStatement | Rule::AssignedVar | Rule::Var | Rule::PrefixExp => {
                PREFIX_FIRST
            }
            Rule::AssignedExpList | Rule::AssignedExp | Rule::ExpList | Rule::Exp => EXP_FIRST,
            Rule::SimpleExp => SIMPLE_EXP_FIRST,
            Rule::Constant => CONSTANT_FIRST,
            Rule::AfterPrefix => AFTER_PREFIX_FIRST,
            Rule::IndexSuffix => &[Value("["), Value(".")],
            Rule::CallSuffix => CALL_FIRST,
            Rule::Args => ARGS_FIRST,
            Rule::FuncBody => &[Value("(")],
            Rule::ParList => &[Kind(TokenKind::Name), Value("...")],
            Rule::TableConstructor => &[Value("{")],
            Rule::FieldList | Rule::Field => FIELD_FIRST,
            Rule::FieldSeparator => &[Value(","), Value(";")],
            Rule::BinaryOperator => BINARY_OPERATORS,
            Rule::UnaryOperator => UNARY_OPERATORS,
        }
    }

    /// Whether `token` can begin this production
    pub fn starts_with(self, token: &Token) -> bool {
        self.first().iter().any(|terminal| terminal.matches(token))
    }
}

impl fmt::Display for Rule {
    /// Name used in "expected ..." messages
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Chunk | Rule::Block => "block",
            Rule::Statement
            | Rule::DoStatement
            | Rule::WhileStatement
            | Rule::RepeatStatement
            | Rule::IfStatement
            | Rule::ForStatement
            | Rule::FunctionStatement
            | Rule::LocalStatement
            | Rule::ExpressionStatement => "statement",
            Rule::LastStatement | Rule::ReturnStatement | Rule::BreakStatement => {
                "'return' or 'break'"
            }
            Rule::ElseIfClause => "'elseif'",
            Rule::ElseClause => "'else'",
            Rule::NumericFor | Rule::GenericFor => "for loop header",
            Rule::LocalFunction => "'function'",
            Rule::LocalNames | Rule::LocalName | Rule::NameList => "Name",
            Rule::FuncName => "function name",
            Rule::AssignedVar | Rule::Var => "variable",
            Rule::AssignedExpList
            | Rule::AssignedExp
            | Rule::ExpList
            | Rule::Exp
            | Rule::SimpleExp
            | Rule::Constant => "expression",
            Rule::PrefixExp => "Name or '('",
            Rule::AfterPrefix => "index or call",
            Rule::IndexSuffix => "'[' or '.'",
            Rule::CallSuffix | Rule::Args => "function arguments",
            Rule::FunctionLiteral => "'function'",
            Rule::FuncBody => "'('",
            Rule::ParList => "parameter",
            Rule::TableConstructor => "'{'",
            Rule::FieldList | Rule::Field => "table field",
            Rule::FieldSeparator => "',' or ';'",
            Rule::BinaryOperator => "binary operator",
            Rule::UnaryOperator => "unary operator",
        };
        f.write_str(name)
    }
}
