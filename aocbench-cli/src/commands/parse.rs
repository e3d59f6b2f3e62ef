// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `aocbench parse` command - Report on captured solver output.
//!
//! Each file stands in for one invocation, so a transcript saved with
//! `cargo run --release > run1.txt` can be aggregated without re-running.

use std::collections::VecDeque;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aocbench_core::{
    BenchError, BenchResult, ConfigLoader, Invocation, ReportFormat, RunCount, RunDriver, Solver,
};

use super::{print_progress, write_report};

/// Replays captured output files in order.
struct ReplaySolver {
    files: VecDeque<PathBuf>,
}

impl Solver for ReplaySolver {
    fn invoke(&mut self) -> impl Future<Output = BenchResult<Invocation>> + Send {
        let result = match self.files.pop_front() {
            Some(path) => read_capture(&path),
            None => Err(BenchError::Io {
                context: "replaying captured output",
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "no captured output left",
                ),
            }),
        };
        std::future::ready(result)
    }
}

fn read_capture(path: &Path) -> BenchResult<Invocation> {
    tracing::debug!(file = %path.display(), "Reading captured output");
    let bytes = std::fs::read(path).map_err(|e| BenchError::Io {
        context: "reading captured output",
        source: e,
    })?;
    Ok(Invocation::succeeded(String::from_utf8_lossy(&bytes)))
}

pub async fn execute(
    config_path: Option<&Path>,
    files: &[PathBuf],
    format: ReportFormat,
) -> BenchResult<ExitCode> {
    let config = ConfigLoader::discover(config_path)?;
    let run_count = RunCount::new(files.len())?;

    let solver = ReplaySolver {
        files: files.iter().cloned().collect(),
    };
    let mut driver =
        RunDriver::new(solver, run_count).malformed_line_policy(config.on_malformed_line);

    let store = driver.run(print_progress).await?;
    write_report(format, &store)?;
    Ok(ExitCode::SUCCESS)
}
