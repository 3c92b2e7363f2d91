// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::{Diagnostic, SymbolTable};

const SEPARATOR: &str = "----------------------------------------";

/// Language principles seen while parsing a unit. These are syntactic: a
/// construct counts even when it sits in a branch that never executes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub string_type: bool,
    pub conditional_assignment: bool,
    pub auto_ref: bool,
    pub quantum_pointer: bool,
}

impl Features {
    pub fn detected(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.string_type, "Principle 1: String Data Type"),
            (self.conditional_assignment, "Principle 2: Conditional Assignment Blocks (CAB)"),
            (self.auto_ref, "Principle 3: Auto Reference Command"),
            (self.quantum_pointer, "Principle 4: Quantum Pointer Aliasing (QPA)"),
        ]
        .into_iter()
        .filter_map(|(detected, name)| detected.then_some(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("program output exceeded its capacity of {capacity} bytes")]
pub struct OutputOverflow {
    pub capacity: usize,
}

/// The bounded accumulator `display` writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    buffer: String,
    capacity: usize,
    truncated: bool,
}

impl Output {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::new(),
            capacity,
            truncated: false,
        }
    }

    /// Appends as much of `text` as fits. Text beyond the capacity is
    /// dropped and reported.
    pub fn push_str(&mut self, text: &str) -> Result<(), OutputOverflow> {
        let remaining = self.capacity.saturating_sub(self.buffer.len());

        if text.len() <= remaining {
            self.buffer.push_str(text);
            return Ok(());
        }

        let mut end = remaining;
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        self.buffer.push_str(&text[..end]);
        self.truncated = true;
        Err(OutputOverflow { capacity: self.capacity })
    }

    /// Terminates the current line, unless nothing was written yet or the
    /// output already ends with a newline.
    pub fn end_line(&mut self) -> Result<(), OutputOverflow> {
        if self.buffer.is_empty() || self.buffer.ends_with('\n') {
            return Ok(());
        }

        self.push_str("\n")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// The result of parsing and running one executable unit.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub success: bool,
    pub features: Features,
    pub output: String,
    pub output_truncated: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub symbols: SymbolTable,
}

impl RunReport {
    #[must_use]
    pub const fn banner(&self) -> &'static str {
        if self.success {
            ">>> SYNTAX ANALYSIS: PARSING SUCCESSFUL!"
        } else {
            ">>> SYNTAX ANALYSIS: PARSING UNSUCCESSFUL!"
        }
    }

    /// Everything after the banner: the detected principles and the
    /// program output.
    #[must_use]
    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary { report: self }
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.banner())?;
        self.summary().fmt(f)
    }
}

pub struct RunSummary<'report> {
    report: &'report RunReport,
}

impl Display for RunSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "Principles Detected:")?;

        let mut any = false;
        for principle in self.report.features.detected() {
            writeln!(f, " [x] {principle}")?;
            any = true;
        }

        if !any {
            writeln!(f, " [ ] None detected.")?;
        }

        writeln!(f, "{SEPARATOR}")?;

        if !self.report.output.is_empty() {
            writeln!(f)?;
            writeln!(f, "[PROGRAM OUTPUT]")?;
            f.write_str(&self.report.output)?;
            if !self.report.output.ends_with('\n') {
                writeln!(f)?;
            }
            writeln!(f, "{SEPARATOR}")?;
        }

        Ok(())
    }
}
