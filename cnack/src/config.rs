// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use serde::Deserialize;

/// The contents of a `Cnack.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigRoot {
    pub log: ConfigSectionLog,
    pub limits: ConfigSectionLimits,
    pub input: ConfigSectionInput,
}

impl ConfigRoot {
    #[must_use]
    pub fn interpreter_config(&self) -> InterpreterConfig {
        InterpreterConfig {
            max_output: self.limits.max_output,
            max_iterations: self.limits.max_iterations,
            answers: self.input.answers.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionLog {
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionLimits {
    /// Capacity of the program output, in bytes.
    pub max_output: usize,
    /// How many times a single loop may iterate.
    pub max_iterations: usize,
}

impl Default for ConfigSectionLimits {
    fn default() -> Self {
        Self {
            max_output: InterpreterConfig::DEFAULT_MAX_OUTPUT,
            max_iterations: InterpreterConfig::DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionInput {
    /// Answers handed out, in order, to `ask`.
    pub answers: Vec<String>,
}

/// The settings the parser itself consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub max_output: usize,
    pub max_iterations: usize,
    pub answers: Vec<String>,
}

impl InterpreterConfig {
    pub const DEFAULT_MAX_OUTPUT: usize = 8192;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

    #[must_use]
    pub fn with_answers(self, answers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..self
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        ConfigRoot::default().interpreter_config()
    }
}
