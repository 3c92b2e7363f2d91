// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use cnack::{DiagnosticSeverity, InterpreterConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tests::{diagnostic_lines, run_program_with_config, run_statements, symbol};

#[rstest]
#[case(
    "print(\"hi\");",
    "[Syntax Error] Line 2: Unknown command. Did you mean 'display'? (Found 'print')",
    "hi\n",
)]
#[case(
    "cout(\"hi\");",
    "[Syntax Error] Line 2: Unknown command. Did you mean 'display'? (Found 'cout')",
    "hi\n",
)]
#[case(
    "Display(\"hi\");",
    "[Syntax Error] Line 2: Keywords are case-sensitive. Did you mean 'display'? (Found 'Display')",
    "hi\n",
)]
#[case(
    "INT x = 3; display(x);",
    "[Syntax Error] Line 2: Keywords are case-sensitive. Did you mean 'int'? (Found 'INT')",
    "3\n",
)]
#[case(
    "if (0) { display(\"a\"); } else if (1) { display(\"b\"); }",
    "[Syntax Error] Line 2: Invalid syntax 'else if'. Did you mean 'elif'? (Found 'else')",
    "b\n",
)]
fn soft_hints_keep_parsing(#[case] body: &str, #[case] expected: &str, #[case] output: &str) {
    let report = run_statements(body);

    assert!(!report.success);
    assert_eq!(diagnostic_lines(&report), vec![expected.to_string()]);
    assert_eq!(report.diagnostics[0].severity, DiagnosticSeverity::Hint);
    assert_eq!(report.output, output);
}

#[rstest]
#[case("else { display(1); }", "[Syntax Error] Line 2: Unexpected 'else'. Did you mean 'elif' or is it missing an 'if'? (Found 'else')")]
#[case("Shape s;", "[Syntax Error] Line 2: Unknown type 'Shape' (Found 'Shape')")]
#[case("break;", "[Syntax Error] Line 2: 'break' outside of a loop (Found 'break')")]
#[case("int x = 3 +;", "[Syntax Error] Line 2: Invalid expression factor (Found ';')")]
#[case("x;", "[Syntax Error] Line 2: Expected assignment operator, '++', or '--' (Found ';')")]
#[case("launch(1);", "[Syntax Error] Line 2: Unknown function call or missing assignment (Found '(')")]
#[case("int y = launch(1);", "[Syntax Error] Line 2: Unknown function call (Found 'launch')")]
#[case("*| p;", "[Syntax Error] Line 2: Expected assignment for Quantum op (Found ';')")]
#[case("for (display(1); 1; ) { }", "[Syntax Error] Line 2: Invalid For-Loop Init (Found 'display')")]
#[case("int x = 1 @ 2;", "[Syntax Error] Line 2: Unexpected character '@'")]
#[case("int a | b;", "[Syntax Error] Line 2: Unexpected character '|'")]
#[case("int a[99999999999999999999];", "[Syntax Error] Line 2: Array size too large, at most 65536 elements are allowed (Found ']')")]
#[case("int a[2]; a[99999999999999999999] = 1;", "[Syntax Error] Line 2: Array index 100000000000000000000 is out of range (Found 'a')")]
fn hard_errors(#[case] body: &str, #[case] expected: &str) {
    let report = run_statements(body);

    assert!(!report.success);
    assert_eq!(diagnostic_lines(&report).first().map(String::as_str), Some(expected));
    assert_eq!(report.diagnostics[0].severity, DiagnosticSeverity::Error);
}

#[test]
fn constants_reject_writes() {
    let report = run_statements("const int limit = 10; limit = 11; limit++;");

    assert_eq!(report.diagnostics.len(), 2);
    assert_eq!(report.diagnostics[0].message(), "Cannot assign to constant 'limit'");
    assert_eq!(report.symbols.value("limit").map(|v| v.serialize()).as_deref(), Some("10"));
}

#[test]
fn conditional_assignment_arity_is_a_hint() {
    let report = run_statements("assign(a, b) { when 1: (1, 2, 3); otherwise: (0, 0); }");

    assert_eq!(diagnostic_lines(&report), vec![
        "[Syntax Error] Line 2: Conditional assignment gives 3 value(s) for 2 target(s) (Found ';')".to_string(),
    ]);
    assert_eq!(report.symbols.value("b").map(|v| v.serialize()).as_deref(), Some("2"));
}

#[test]
fn runaway_loops_are_stopped() {
    let config = InterpreterConfig {
        max_iterations: 25,
        ..Default::default()
    };

    let reports = run_program_with_config("execute() {\n    int i = 0;\n    while (i >= 0) {\n        i++;\n    }\n    display(i);\n}", config);

    assert_eq!(diagnostic_lines(&reports[0]), vec![
        "[Syntax Error] Line 3: Loop iteration limit of 25 exceeded".to_string(),
    ]);
    assert_eq!(reports[0].output, "25\n");
}

#[test]
fn loop_errors_are_reported_once() {
    let report = run_statements("int i = 0; while (i < 3) { i++; display(i) }");

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.output, "");
}

#[test]
fn output_is_bounded() {
    let config = InterpreterConfig {
        max_output: 8,
        ..Default::default()
    };

    let reports = run_program_with_config("execute() { for (int i = 0; i < 10; i++) { display(\"line\"); } }", config);

    assert!(reports[0].output_truncated);
    assert_eq!(reports[0].output, "line\nlin");
}

#[rstest]
#[case("int i = 0; while () { i++; if (i > 2) { break; } }")]
#[case("int i = 0; do { i++; if (i > 2) { break; } } while ();")]
fn loops_need_a_while_condition(#[case] body: &str) {
    let report = run_statements(body);

    assert!(!report.success);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].message(), "Invalid expression factor");
    assert_eq!(symbol(&report, "i").as_deref(), Some("0"));
}
