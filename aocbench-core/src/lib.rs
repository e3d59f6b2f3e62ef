// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! aocbench Core Library
//!
//! Benchmarks an Advent of Code solver binary by running it repeatedly,
//! parsing the `Time to solve` lines it prints for each puzzle, averaging
//! them per `(year, puzzle)` and rendering a per-year progress report.
//!
//! # Pipeline
//!
//! ```text
//! RunDriver ──invoke──▶ Solver ──stdout──▶ parse_output ──▶ ResultStore
//!     (repeated run_count times)                                  │
//!                                                                 ▼
//!                                                   Report::from_store ──▶ markdown / JSON
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod parser;
pub mod report;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, ExitStatusPolicy, MalformedLinePolicy, SolverConfig};
pub use driver::{Invocation, ProcessSolver, Progress, RunDriver, SessionSummary, Solver};
pub use error::{BenchError, BenchResult, HardValidationError, ParseIssue};
pub use parser::{parse_output, ParseContext, ParsedRun};
pub use report::{render_json, render_markdown, Report, ReportFormat};
pub use store::ResultStore;
pub use types::{PuzzleKey, RunCount, TimeUnit, PUZZLES_PER_YEAR};
