// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use strum::AsRefStr;

use crate::LexerErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// A syntax error; the parser enters panic mode until it resynchronizes.
    Error,
    /// A recoverable mistake that fails the run but never interrupts parsing.
    Hint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    /// The lexeme of the offending token. Custom-message diagnostics have none.
    pub found: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.as_ref()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[Syntax Error] Line {}: {}", self.line, self.kind)?;

        if let Some(found) = &self.found {
            write!(f, " (Found '{found}')")?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error, AsRefStr)]
pub enum DiagnosticKind {
    #[error("{message}")]
    Expected { message: &'static str },

    #[error("{0}")]
    Lexical(LexerErrorKind),

    #[error("Unexpected statement start")]
    UnexpectedStatementStart,

    #[error("Unexpected 'else'. Did you mean 'elif' or is it missing an 'if'?")]
    UnexpectedElse,

    #[error("Invalid syntax 'else if'. Did you mean 'elif'?")]
    ElseIf,

    #[error("Unknown command. Did you mean '{suggestion}'?")]
    ConfusableCommand { suggestion: &'static str },

    #[error("Keywords are case-sensitive. Did you mean '{keyword}'?")]
    KeywordCase { keyword: &'static str },

    #[error("Unknown type '{name}'")]
    UnknownType { name: String },

    #[error("Invalid expression factor")]
    InvalidExpressionFactor,

    #[error("Unknown function call")]
    UnknownFunctionCall,

    #[error("Unknown function call or missing assignment")]
    UnknownFunctionCallOrMissingAssignment,

    #[error("Expected assignment operator, '++', or '--'")]
    ExpectedAssignmentOperator,

    #[error("Expected assignment for Quantum op")]
    ExpectedQuantumAssignment,

    #[error("Invalid For-Loop Init")]
    InvalidForInit,

    #[error("'{keyword}' outside of a loop")]
    OutsideOfLoop { keyword: &'static str },

    #[error("Cannot assign to constant '{name}'")]
    ConstantAssignment { name: String },

    #[error("Conditional assignment gives {values} value(s) for {targets} target(s)")]
    ConditionalAssignmentArity { values: usize, targets: usize },

    #[error("Array size too large, at most {max} elements are allowed")]
    ArraySizeTooLarge { max: usize },

    #[error("Array index {index} is out of range")]
    ArrayIndexOutOfRange { index: String },

    #[error("Loop iteration limit of {limit} exceeded")]
    IterationLimit { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        Diagnostic {
            line: 3,
            kind: DiagnosticKind::Expected { message: "Expected ';'" },
            severity: DiagnosticSeverity::Error,
            found: Some("display".into()),
        },
        "[Syntax Error] Line 3: Expected ';' (Found 'display')",
    )]
    #[case(
        Diagnostic {
            line: 7,
            kind: DiagnosticKind::Lexical(LexerErrorKind::UnterminatedString),
            severity: DiagnosticSeverity::Error,
            found: None,
        },
        "[Syntax Error] Line 7: Unterminated string",
    )]
    #[case(
        Diagnostic {
            line: 1,
            kind: DiagnosticKind::ConfusableCommand { suggestion: "display" },
            severity: DiagnosticSeverity::Hint,
            found: Some("print".into()),
        },
        "[Syntax Error] Line 1: Unknown command. Did you mean 'display'? (Found 'print')",
    )]
    fn format(#[case] diagnostic: Diagnostic, #[case] expected: &str) {
        assert_eq!(diagnostic.to_string(), expected);
    }
}
