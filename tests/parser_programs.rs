//! Parser integration tests on short program fragments

use luaparse::lua::diagnostics::ErrorKind;
use luaparse::lua::lexing::tokenize;
use luaparse::lua::parsing::parse;
use rstest::rstest;

fn messages(source: &str) -> Vec<String> {
    let tokens = tokenize(source).unwrap();
    let outcome = parse(&tokens);
    assert_eq!(outcome.position, tokens.eof_index());
    outcome
        .diagnostics
        .iter()
        .map(|r| r.to_string())
        .collect()
}

#[rstest]
#[case::empty("")]
#[case::assignment("x = 1")]
#[case::multiple_assignment("a, b.c, d[1] = 1, 2")]
#[case::swap("a, b = b, a")]
#[case::call_chain("io.write('x'):flush()")]
#[case::string_call("require 'module'")]
#[case::table_call("setup { debug = true }")]
#[case::parenthesized_call("(f or g)(1)")]
#[case::local_without_value("local a, b")]
#[case::nested_functions("local function outer() return function() return 1 end end")]
#[case::method_definition("function obj:method(a) self.a = a end")]
#[case::numeric_for_with_step("for i = 10, 1, -1 do end")]
#[case::generic_for("for _, v in ipairs(list) do total = total + v end")]
#[case::elseif_chain("if a then elseif b then elseif c then else end")]
#[case::repeat_scope("repeat local x = f() until x")]
#[case::break_with_semicolon("while true do break; end")]
#[case::bare_return("return")]
#[case::return_list("return 1, 'two', {3}")]
#[case::varargs("local function f(...) return ... end")]
#[case::long_strings("s = [==[\n]] ]=] ]==]")]
#[case::comments("--[[ block\ncomment ]] x = 1 -- trailing")]
#[case::indexed_chain("a.b[c].d = e.f[g](h)")]
fn test_valid_fragment(#[case] source: &str) {
    assert_eq!(messages(source), Vec::<String>::new());
}

#[rstest]
#[case::missing_then(
    "if x do y() end",
    &["Error (line 1, col 5) expected 'then', found 'do'"]
)]
#[case::missing_do(
    "while x then y() end",
    &["Error (line 1, col 8) expected 'do', found 'then'"]
)]
#[case::unclosed_call(
    "f(1",
    &["Error (line 2, col 0) unexpected end of file, expected ')'"]
)]
#[case::stray_end(
    "x = 1 end",
    &["Error (line 1, col 6) expected end of file, found 'end'"]
)]
#[case::unclosed_function(
    "function f()\n  return 1\n",
    &["Error (line 3, col 0) unexpected end of file, expected 'end'"]
)]
#[case::missing_index_close(
    "t[1 = 2",
    &[
        "Error (line 1, col 4) expected ']', found '='",
        "Error (line 1, col 6) expected '=', found '2'",
        "Error (line 2, col 0) unexpected end of file, expected expression",
    ]
)]
#[case::string_is_not_a_keyword(
    "do x = 1 'end'",
    &["Error (line 1, col 9) expected 'end', found string \"end\""]
)]
fn test_invalid_fragment(#[case] source: &str, #[case] expected: &[&str]) {
    assert_eq!(messages(source), expected);
}

#[test]
fn test_errors_continue_after_recovery() {
    let errors = messages("do x = 1 ) end\nwhile y then z() end\n");
    assert_eq!(
        errors,
        vec![
            "Error (line 1, col 9) expected 'end', found ')'",
            "Error (line 1, col 11) expected end of file, found 'end'",
            "Error (line 2, col 8) expected 'do', found 'then'",
        ]
    );
}

#[test]
fn test_structural_error_spans_statement() {
    let tokens = tokenize("local a, b = function() end").unwrap();
    let outcome = parse(&tokens);
    assert_eq!(outcome.diagnostics.len(), 1);

    let record = &outcome.diagnostics[0];
    assert_eq!(record.kind, ErrorKind::Structural);
    assert_eq!((record.line, record.column), (1, 6));
    assert_eq!(record.token_range(), (1, tokens.eof_index()));
}

#[test]
fn test_errors_without_literals_are_not_structural() {
    assert!(messages("local a, b, c = 1").is_empty());
    assert!(messages("x, y = 1, 2, 3").is_empty());
}
