// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use std::io::Write;

use aocbench_core::{BenchError, BenchResult, Progress, ReportFormat, ResultStore};

pub mod parse;
pub mod run;
pub mod validate;

/// Print a progress notification on the diagnostic stream.
pub fn print_progress(progress: Progress) {
    eprintln!("{}% complete...", progress.percent);
}

/// Render the report and write it to stdout.
pub fn write_report(format: ReportFormat, store: &ResultStore) -> BenchResult<()> {
    let mut rendered = format.render(store)?;
    if !rendered.is_empty() && !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| BenchError::Io {
            context: "writing report",
            source: e,
        })
}
