// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `aocbench run` command - Benchmark the solver and print the report.
//!
//! Ctrl+C is handled here, at the session boundary: the in-flight invocation
//! is dropped (which kills the solver) and the store keeps every invocation
//! that had already completed.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::ExitCode;
use std::time::Duration;

use aocbench_core::{BenchError, BenchResult, ConfigLoader, ResultStore, RunDriver};

use super::{print_progress, write_report};
use crate::RunArgs;

/// Conventional exit status for a SIGINT-terminated program.
const INTERRUPTED: u8 = 130;

pub async fn execute(config_path: Option<&Path>, args: RunArgs) -> BenchResult<ExitCode> {
    let mut config = ConfigLoader::discover(config_path)?;
    if let Some(runs) = args.runs {
        config.run_count = runs;
    }

    tracing::info!(
        solver = %config.solver.command_line(),
        runs = %config.run_count,
        "Starting benchmark session"
    );

    let mut driver = RunDriver::from_config(&config);
    let mut store = ResultStore::new();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // A terminal Ctrl+C also kills the solver, so the session can complete in
    // the same turn the signal arrives. The signal must win that race.
    let finished = tokio::select! {
        biased;

        signal = &mut ctrl_c => {
            interrupt_result(signal)?;
            false
        }
        result = driver.run_session(&mut store, print_progress) => {
            let summary = result?;
            let skipped =
                summary.discarded_invocations + summary.malformed_lines + summary.orphan_measurements;
            if skipped > 0 {
                tracing::warn!(
                    discarded = summary.discarded_invocations,
                    malformed_lines = summary.malformed_lines,
                    orphans = summary.orphan_measurements,
                    "Some solver output was left out of the report"
                );
            }
            !interrupt_pending(ctrl_c.as_mut()).await?
        }
    };

    if finished {
        write_report(args.format, &store)?;
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("Ctrl+C received, terminating...");
    tracing::debug!(
        puzzles = store.len(),
        samples = store.sample_count(),
        "Session interrupted"
    );
    if args.partial_on_interrupt && !store.is_empty() {
        write_report(args.format, &store)?;
    }
    Ok(ExitCode::from(INTERRUPTED))
}

fn interrupt_result(signal: std::io::Result<()>) -> BenchResult<()> {
    signal.map_err(|e| BenchError::Io {
        context: "listening for Ctrl+C",
        source: e,
    })
}

/// Whether Ctrl+C was delivered but not yet observed.
async fn interrupt_pending<F>(ctrl_c: Pin<&mut F>) -> BenchResult<bool>
where
    F: Future<Output = std::io::Result<()>>,
{
    // Let the runtime drain signal events before checking.
    tokio::task::yield_now().await;
    match tokio::time::timeout(Duration::ZERO, ctrl_c).await {
        Ok(signal) => interrupt_result(signal).map(|()| true),
        Err(_) => Ok(false),
    }
}
