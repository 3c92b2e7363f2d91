// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{Diagnostic, Features, InterpreterConfig, Output, RunReport, SymbolTable, TypeRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Normal,
    Break,
    Continue,
}

/// Everything one executable unit owns. A fresh instance replaces it at
/// the end of every unit.
#[derive(Debug)]
pub(crate) struct InterpreterState {
    pub symbols: SymbolTable,
    pub types: TypeRegistry,
    pub output: Output,
    pub features: Features,
    pub diagnostics: Vec<Diagnostic>,

    /// Sticky: once false it stays false for the rest of the unit.
    pub success: bool,
    pub panic_mode: bool,

    /// Whether statements currently have side effects.
    pub exec: bool,
    pub flow: Flow,
    pub loop_depth: usize,
}

impl InterpreterState {
    pub fn new(config: &InterpreterConfig) -> Self {
        Self {
            symbols: SymbolTable::new(),
            types: TypeRegistry::default(),
            output: Output::with_capacity(config.max_output),
            features: Features::default(),
            diagnostics: Vec::new(),
            success: true,
            panic_mode: false,
            exec: true,
            flow: Flow::Normal,
            loop_depth: 0,
        }
    }

    pub fn into_report(self) -> RunReport {
        RunReport {
            success: self.success,
            features: self.features,
            output_truncated: self.output.is_truncated(),
            output: self.output.as_str().to_string(),
            diagnostics: self.diagnostics,
            symbols: self.symbols,
        }
    }
}
