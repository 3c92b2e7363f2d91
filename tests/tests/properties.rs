// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use tests::{diagnostic_lines, run_program, run_statements, symbol};

#[test]
fn clean_input_succeeds() {
    let reports = run_program(r#"
        struct Point {
            int x;
            int y = 2;
        }

        execute() {
            Point p;
            p->x = 4;
            string name = "origin";
            assign(d) { when p->x > 3: (p->x - 3); otherwise: (0); }
            display(name, " ", p, " ", d);
            exit();
        }
    "#);

    assert_eq!(reports.len(), 1);
    assert_eq!(diagnostic_lines(&reports[0]), Vec::<String>::new());
    assert!(reports[0].success);
    assert_eq!(reports[0].banner(), ">>> SYNTAX ANALYSIS: PARSING SUCCESSFUL!");
    assert_eq!(reports[0].output, "origin {x: 4, y: 2} 1\n");
}

#[test]
fn redeclaration_updates_in_place() {
    let report = run_statements("int x = 1; int y = 2; float x = 3.5;");

    assert_eq!(report.symbols.len(), 2);
    assert_eq!(symbol(&report, "x").as_deref(), Some("3.5"));
    assert_eq!(report.symbols.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["x", "y"]);
}

#[test]
fn division_by_zero_is_skipped() {
    let report = run_statements("int x = 5; x = x / 0;");

    assert!(report.success);
    assert_eq!(symbol(&report, "x").as_deref(), Some("5"));
}

#[test]
fn first_true_branch_of_conditional_assignment_wins() {
    let report = run_statements("assign(x){ when 0: (1); when 1: (2); otherwise: (3); }");

    assert!(report.success);
    assert!(report.features.conditional_assignment);
    assert_eq!(symbol(&report, "x").as_deref(), Some("2"));
}

#[test]
fn while_loop_replays_in_order() {
    let report = run_statements("int i=0; while(i<3){ display(i); i+=1; }");

    assert!(report.success);
    assert_eq!(report.output, "0\n1\n2\n");
    assert_eq!(symbol(&report, "i").as_deref(), Some("3"));
}

#[test]
fn unterminated_string_reports_its_start_line() {
    let reports = run_program("execute() {\n    int x = 1;\n    string s = \"never closed;\n    x = 2;\n}\n");

    let lines = diagnostic_lines(&reports[0]);
    assert_eq!(lines[0], "[Syntax Error] Line 3: Unterminated string");
}

#[test]
fn string_literal_round_trips_through_display() {
    let report = run_statements("string s = \"hi\"; display(s);");

    assert!(report.success);
    assert!(report.features.string_type);
    assert_eq!(symbol(&report, "s").as_deref(), Some("\"hi\""));
    assert_eq!(report.output, "hi\n");
}

#[test]
fn missing_semicolons_are_reported_independently() {
    let reports = run_program("execute() {\n    int x = 1\n    display(x);\n    int y = 2;\n    y = 3\n}\n");

    assert_eq!(diagnostic_lines(&reports[0]), vec![
        "[Syntax Error] Line 3: Expected ';' (Found 'display')".to_string(),
        "[Syntax Error] Line 6: Expected ';' (Found '}')".to_string(),
    ]);
    assert!(!reports[0].success);
}

#[test]
fn failed_units_keep_partial_output() {
    let report = run_statements("display(\"before\"); int = 4; display(\"after\");");

    assert!(!report.success);
    assert_eq!(report.output, "before\nafter\n");
    assert!(report.to_string().contains("[PROGRAM OUTPUT]\nbefore\nafter\n"));
}

#[test]
fn units_are_independent() {
    let reports = run_program(r#"
        execute() { int x = 1; display(x) }
        execute() { display(x); }
    "#);

    assert_eq!(reports.len(), 2);
    assert!(!reports[0].success);
    assert!(reports[1].success);
    assert_eq!(reports[1].output, "0\n");
    assert_eq!(reports[1].symbols.len(), 0);
}
