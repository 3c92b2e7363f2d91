// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use cnack::{InterpreterConfig, RunReport};

fn init_logging() {
    _ = env_logger::builder()
        .is_test(true)
        .filter(None, log::LevelFilter::max())
        .try_init();
}

pub fn run_program(input: &str) -> Vec<RunReport> {
    run_program_with_config(input, InterpreterConfig::default())
}

pub fn run_program_with_config(input: &str, config: InterpreterConfig) -> Vec<RunReport> {
    init_logging();
    cnack::run(input, config)
}

/// Runs `body` as the statements of a single executable unit.
pub fn run_statements(body: &str) -> RunReport {
    run_statements_with_answers(body, &[])
}

pub fn run_statements_with_answers(body: &str, answers: &[&str]) -> RunReport {
    let source = format!("execute() {{\n{body}\n}}\n");
    let config = InterpreterConfig::default().with_answers(answers.iter().copied());

    let mut reports = run_program_with_config(&source, config);
    assert_eq!(reports.len(), 1, "expected exactly one unit: {reports:#?}");
    reports.remove(0)
}

pub fn run_and_return_output(body: &str) -> Vec<String> {
    let report = run_statements(body);
    assert!(report.success, "Diagnostics: {:#?}", report.diagnostics);

    report.output.lines().map(ToString::to_string).collect()
}

/// The serialized value of a symbol.
pub fn symbol(report: &RunReport, name: &str) -> Option<String> {
    report.symbols.value(name).map(|value| value.serialize())
}

pub fn diagnostic_lines(report: &RunReport) -> Vec<String> {
    report.diagnostics.iter().map(ToString::to_string).collect()
}
