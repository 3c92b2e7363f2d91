// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tests::{run_statements, run_statements_with_answers, symbol};

#[test]
fn summary_lists_every_principle() {
    let report = run_statements(r#"
        string label = "pair";
        int a = 1;
        int b = 2;
        *| both = { &a, &b };
        int copy[] = auto_ref(int[], [a, b]);
        assign(a) { when 0: (5); otherwise: (6); }
        display(label, " ", copy);
    "#);

    assert!(report.success, "{:#?}", report.diagnostics);
    assert_eq!(report.to_string(), "\
>>> SYNTAX ANALYSIS: PARSING SUCCESSFUL!
----------------------------------------
Principles Detected:
 [x] Principle 1: String Data Type
 [x] Principle 2: Conditional Assignment Blocks (CAB)
 [x] Principle 3: Auto Reference Command
 [x] Principle 4: Quantum Pointer Aliasing (QPA)
----------------------------------------

[PROGRAM OUTPUT]
pair [1, 2]
----------------------------------------
");
}

#[test]
fn principles_are_detected_in_code_that_never_runs() {
    let report = run_statements("if (0) { string s = \"x\"; } while (0) { *| p = { &s }; }");

    assert!(report.success);
    assert!(report.features.string_type);
    assert!(report.features.quantum_pointer);
    assert!(!report.features.auto_ref);
    assert_eq!(report.symbols.len(), 0);
}

#[test]
fn quantum_aliases_write_through() {
    let report = run_statements("int a = 1; int b = 2; *| p = { &a, &b }; * p = 9; int c = 3; * q = &c;");

    assert_eq!(symbol(&report, "p").as_deref(), Some("\"a,b\""));
    assert_eq!(symbol(&report, "a").as_deref(), Some("9"));
    assert_eq!(symbol(&report, "b").as_deref(), Some("9"));
    assert_eq!(symbol(&report, "q").as_deref(), Some("\"c\""));
    assert!(report.symbols.get("q").is_some_and(|s| s.is_alias_set()));
}

#[rstest]
#[case("int x = auto_ref(int, 4 * 2);", "8")]
#[case("int x[] = auto_ref(int[], [1, 2, 3]);", "[1, 2, 3]")]
#[case("int x = auto_ref(float, 1.5);", "1.5")]
fn auto_ref_yields_its_value(#[case] body: &str, #[case] expected: &str) {
    let report = run_statements(body);

    assert!(report.features.auto_ref);
    assert_eq!(symbol(&report, "x").as_deref(), Some(expected));
}

#[test]
fn nested_conditional_assignments() {
    let report = run_statements(r#"
        int score = 72;
        assign(grade) {
            when score >= 90: ("A");
            when score >= 70: (assign(note) { when score >= 75: ("solid"); otherwise: ("close"); }, "C");
            otherwise: ("F");
        }
    "#);

    assert!(report.success, "{:#?}", report.diagnostics);
    assert_eq!(symbol(&report, "grade").as_deref(), Some("\"C\""));
    assert_eq!(symbol(&report, "note").as_deref(), Some("\"close\""));
}

#[test]
fn ask_consumes_answers_in_order() {
    let report = run_statements_with_answers(r#"
        string name;
        ask(name);
        int age = ask("age?");
        display(name, " is ", age + 1);
        input(later);
    "#, &["Ada", "36"]);

    assert_eq!(report.output, "Ada is 37\n");
    assert_eq!(symbol(&report, "later").as_deref(), Some("\"\""));
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn break_and_continue() {
    let report = run_statements(r#"
        int total = 0;
        for (int i = 0; i < 100; i++) {
            if (i == 5) { break; }
            if (i % 2 == 1) { continue; }
            total += i;
        }
    "#);

    assert!(report.success);
    assert_eq!(symbol(&report, "total").as_deref(), Some("6"));
    assert_eq!(symbol(&report, "i").as_deref(), Some("5"));
}
