// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for aocbench.
//!
//! Session-scoped failures are `BenchError` variants and abort the run.
//! Line-scoped problems in solver output are `ParseIssue`s and are recovered
//! locally unless the configured policy escalates them.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for a benchmarking session.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Solver Process Errors
    // =========================================================================
    #[error("Failed to launch solver '{program}': {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver invocation {invocation} exited with {}", exit_description(.code))]
    SolverFailed {
        invocation: usize,
        code: Option<i32>,
    },

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Malformed solver output: {0}")]
    MalformedMeasurement(ParseIssue),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Hard validation errors reject a configuration before any solver runs.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Missing required field: {field} in {context}")]
    MissingRequiredField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// A recoverable problem found on a single line of solver output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseIssue {
    #[error("line {line_number}: cannot read measurement from '{line}' - {reason}")]
    MalformedMeasurement {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("line {line_number}: cannot read puzzle marker from '{line}' - {reason}")]
    MalformedMarker {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("line {line_number}: measurement of {millis}ms appears before any puzzle marker")]
    OrphanMeasurement { line_number: usize, millis: f64 },
}

impl ParseIssue {
    /// 1-based line number within the invocation's output.
    pub fn line_number(&self) -> usize {
        match self {
            ParseIssue::MalformedMeasurement { line_number, .. } => *line_number,
            ParseIssue::MalformedMarker { line_number, .. } => *line_number,
            ParseIssue::OrphanMeasurement { line_number, .. } => *line_number,
        }
    }
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;
