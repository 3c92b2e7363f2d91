// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod config;
mod dump;
mod error;
mod logger;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use cnack::{InterpreterConfig, RunReport};
use colored::Colorize;
use log::LevelFilter;

use self::{
    dump::TokenTable,
    error::DiagnosticPrinter,
    logger::Logger,
};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file to use instead of `Cnack.toml`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        use clap::Parser;
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse and run every executable unit of a program
    Run {
        file: PathBuf,

        /// Answer handed to `ask`, in order, after the configured answers
        #[arg(short, long = "answer")]
        answers: Vec<String>,
    },

    /// Print the token table of a program
    Tokens {
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = config::load(args.config.as_deref())?;

    Logger::initialize(log_level(args.verbose, config.log.debug));

    match args.command {
        Commands::Run { file, answers } => run(&file, config::interpreter_config(&config, answers)),
        Commands::Tokens { file } => tokens(&file),
    }
}

fn log_level(verbose: bool, debug: bool) -> LevelFilter {
    if verbose || debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
}

fn run(path: &Path, config: InterpreterConfig) -> anyhow::Result<()> {
    let source_code = read_source(path)?;

    for report in cnack::run(&source_code, config) {
        print_report(&source_code, &report);
    }

    Ok(())
}

fn print_report(source_code: &str, report: &RunReport) {
    for diagnostic in &report.diagnostics {
        DiagnosticPrinter::new(source_code, diagnostic).print();
    }

    let banner = if report.success {
        report.banner().green().bold()
    } else {
        report.banner().red().bold()
    };

    println!("{banner}");
    print!("{}", report.summary());

    if report.output_truncated {
        println!("{}", "(program output was truncated)".yellow());
    }

    println!();
}

fn tokens(path: &Path) -> anyhow::Result<()> {
    let source_code = read_source(path)?;
    print!("{}", TokenTable::new(&source_code));
    Ok(())
}
