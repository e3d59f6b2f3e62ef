// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Every field is optional; a missing file means the built-in defaults, which
//! reproduce the classic `cargo run --release` ten-run session. Invalid values
//! result in a HardValidationError before any solver is launched.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult, HardValidationError};
use crate::types::{RunCount, DEFAULT_RUN_COUNT};

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "aocbench.yaml";

/// What to do with an invocation whose solver exited unsuccessfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatusPolicy {
    /// Skip the invocation's output and log a warning.
    #[default]
    Discard,
    /// Parse whatever output was captured, as if the run had succeeded.
    Keep,
    /// Fail the whole session.
    Abort,
}

/// What to do with a timing line that cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Drop the line and log a warning.
    #[default]
    Skip,
    /// Fail the whole session.
    Fail,
}

/// Raw solver section as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSolverConfig {
    #[serde(default = "default_program")]
    program: String,
    #[serde(default = "default_args")]
    args: Vec<String>,
    #[serde(default)]
    working_dir: Option<String>,
}

fn default_program() -> String {
    "cargo".to_string()
}

fn default_args() -> Vec<String> {
    vec!["run".to_string(), "--release".to_string()]
}

impl Default for RawSolverConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default = "default_run_count")]
    run_count: usize,
    #[serde(default)]
    solver: RawSolverConfig,
    #[serde(default)]
    on_nonzero_exit: ExitStatusPolicy,
    #[serde(default)]
    on_malformed_line: MalformedLinePolicy,
}

fn default_run_count() -> usize {
    DEFAULT_RUN_COUNT
}

/// Validated solver invocation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
        }
    }
}

impl SolverConfig {
    /// Human-readable command line, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub run_count: RunCount,
    pub solver: SolverConfig,
    pub on_nonzero_exit: ExitStatusPolicy,
    pub on_malformed_line: MalformedLinePolicy,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load an explicit config file, else `aocbench.yaml` if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> BenchResult<Config> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!(path = %fallback.display(), "Using configuration from working directory");
            return Self::load_file(fallback);
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        // A relative working_dir is resolved against the file's own directory.
        let base = path.parent().filter(|dir| !dir.as_os_str().is_empty());
        Self::parse(&content, base)
    }

    /// Load and validate configuration from a YAML string.
    ///
    /// A relative `working_dir` is resolved against the current directory.
    pub fn load_string(content: &str) -> BenchResult<Config> {
        Self::parse(content, None)
    }

    fn parse(content: &str, base: Option<&Path>) -> BenchResult<Config> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw, base)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawConfig, base: Option<&Path>) -> BenchResult<Config> {
        let run_count = RunCount::new(raw.run_count)?;
        let solver = Self::validate_solver(raw.solver, base)?;

        Ok(Config {
            run_count,
            solver,
            on_nonzero_exit: raw.on_nonzero_exit,
            on_malformed_line: raw.on_malformed_line,
        })
    }

    /// Validate the solver section.
    fn validate_solver(raw: RawSolverConfig, base: Option<&Path>) -> BenchResult<SolverConfig> {
        if raw.program.trim().is_empty() {
            return Err(HardValidationError::MissingRequiredField {
                field: "program",
                context: "solver".to_string(),
            }
            .into());
        }

        let working_dir = match raw.working_dir {
            Some(dir) => {
                let path = match base {
                    Some(base) => base.join(&dir),
                    None => PathBuf::from(&dir),
                };
                if !path.is_dir() {
                    return Err(HardValidationError::InvalidFieldValue {
                        field: "working_dir",
                        value: dir,
                        reason: "Working directory does not exist".to_string(),
                    }
                    .into());
                }
                Some(path)
            }
            None => None,
        };

        Ok(SolverConfig {
            program: raw.program,
            args: raw.args,
            working_dir,
        })
    }
}
