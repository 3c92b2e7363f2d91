// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod config;
mod diagnostic;
mod lexer;
mod parser;
mod report;
mod symbol;
mod value;

pub use self::{
    config::{ConfigRoot, ConfigSectionInput, ConfigSectionLimits, ConfigSectionLog, InterpreterConfig},
    diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSeverity},
    lexer::{Keyword, Lexer, LexerErrorKind, Punctuator, Token, TokenKind},
    parser::{BinaryOperator, Checkpoint, Parser, TokenSpan, TokenStream},
    report::{Features, Output, OutputOverflow, RunReport, RunSummary},
    symbol::{StructDefinition, Symbol, SymbolTable, TypeRegistry},
    value::{format_number, StructField, Value},
};

/// Parses and runs every executable unit in `source`.
#[must_use]
pub fn run(source: &str, config: InterpreterConfig) -> Vec<RunReport> {
    Parser::new(source, config).parse_program()
}
