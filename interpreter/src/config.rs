// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::path::{Path, PathBuf};

use cnack::{ConfigRoot, InterpreterConfig};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "Cnack.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Loads the given configuration file, or `Cnack.toml` in the working
/// directory when it exists. Without either, the defaults apply.
pub fn load(path: Option<&Path>) -> Result<ConfigRoot, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                return Ok(ConfigRoot::default());
            }
            path
        }
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::Read { path: path.clone(), source })?;

    let config = parse(&contents)
        .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

    log::debug!("Loaded configuration from {}: {config:?}", path.display());
    Ok(config)
}

pub fn parse(contents: &str) -> Result<ConfigRoot, toml::de::Error> {
    toml::from_str(contents)
}

/// Answers given on the command line are handed out after the configured ones.
pub fn interpreter_config(config: &ConfigRoot, answers: Vec<String>) -> InterpreterConfig {
    let mut interpreter_config = config.interpreter_config();
    interpreter_config.answers.extend(answers);
    interpreter_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").map(|config| config.interpreter_config());

        assert_eq!(config.ok(), Some(InterpreterConfig::default()));
    }

    #[test]
    fn sections_are_kebab_case() {
        let config = parse(r#"
            [log]
            debug = true

            [limits]
            max-iterations = 50

            [input]
            answers = ["3", "Ada"]
        "#);

        let Ok(config) = config else {
            panic!("configuration should parse: {config:?}");
        };

        assert!(config.log.debug);
        assert_eq!(config.limits.max_iterations, 50);
        assert_eq!(config.limits.max_output, InterpreterConfig::DEFAULT_MAX_OUTPUT);
        assert_eq!(config.input.answers, vec!["3".to_string(), "Ada".to_string()]);
    }

    #[rstest]
    #[case("[limits]\nmax-output = \"lots\"")]
    #[case("[limits]\nmax-iterations = -1")]
    #[case("[log]\ndebug = 1")]
    #[case("[input]\nanswers = \"3\"")]
    fn wrong_types_are_rejected(#[case] contents: &str) {
        assert!(parse(contents).is_err());
    }

    #[rstest]
    #[case("", &[], &[])]
    #[case("[input]\nanswers = [\"1\", \"2\"]", &[], &["1", "2"])]
    #[case("", &["7"], &["7"])]
    #[case("[input]\nanswers = [\"1\", \"2\"]", &["7", "8"], &["1", "2", "7", "8"])]
    fn command_line_answers_follow_configured_ones(
        #[case] contents: &str,
        #[case] answers: &[&str],
        #[case] expected: &[&str],
    ) {
        let Ok(config) = parse(contents) else {
            panic!("configuration should parse: {contents}");
        };

        let answers = answers.iter().map(ToString::to_string).collect();
        assert_eq!(interpreter_config(&config, answers).answers, expected);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load(Some(Path::new("does/not/exist/Cnack.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
