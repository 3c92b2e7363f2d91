// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use cnack::{Diagnostic, DiagnosticSeverity};
use colored::{Color, ColoredString, Colorize};

/// Prints a diagnostic together with the source line it points at.
pub struct DiagnosticPrinter<'source_code> {
    diagnostic: &'source_code Diagnostic,
    source_line: Option<&'source_code str>,

    color: Color,
    line_number: ColoredString,
}

impl<'source_code> DiagnosticPrinter<'source_code> {
    #[must_use = "Use the `print` method to actually print"]
    pub fn new(source_code: &'source_code str, diagnostic: &'source_code Diagnostic) -> Self {
        Self {
            diagnostic,
            source_line: source_code.lines().nth(diagnostic.line.saturating_sub(1)),

            color: match diagnostic.severity {
                DiagnosticSeverity::Error => Color::Red,
                DiagnosticSeverity::Hint => Color::Yellow,
            },
            line_number: diagnostic.line.to_string().blue().bold(),
        }
    }

    pub fn print(self) {
        self.print_prelude();

        if let Some(line) = self.source_line.filter(|line| !line.trim().is_empty()) {
            self.print_line_prefix(true);
            eprintln!("{line}");
            self.print_indicator(line);
        }

        eprintln!();
    }

    fn print_prelude(&self) {
        let mut message = format!("Line {}: {}", self.diagnostic.line, self.diagnostic.message());
        if let Some(found) = &self.diagnostic.found {
            message += &format!(" (Found '{found}')");
        }

        eprintln!("{} {}", "[Syntax Error]".color(self.color).bold(), message.bold());
    }

    /// Underlines the offending lexeme when it can be found on the line.
    fn print_indicator(&self, line: &str) {
        let Some(found) = self.diagnostic.found.as_deref().filter(|found| !found.is_empty()) else {
            return;
        };

        let Some(column) = line.find(found) else {
            return;
        };

        let spaces = " ".repeat(line[..column].chars().count());
        let caret = "^".color(self.color).bold();
        let tildes = "~".repeat(found.chars().count().saturating_sub(1)).color(self.color);
        let label = match self.diagnostic.severity {
            DiagnosticSeverity::Error => "error occurred here",
            DiagnosticSeverity::Hint => "hint",
        };

        self.print_line_prefix(false);
        eprintln!("{spaces}{caret}{tildes} {}", label.color(self.color));
    }

    fn print_line_prefix(&self, is_primary: bool) {
        let separator = " | ".blue().bold();

        if is_primary {
            eprint!("{} {separator}", self.line_number);
        } else {
            eprint!("{} {separator}", " ".repeat(self.line_number.chars().count()));
        }
    }
}
