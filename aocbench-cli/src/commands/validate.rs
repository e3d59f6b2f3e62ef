// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `aocbench validate` command - Validate configuration file.

use std::path::Path;
use std::process::ExitCode;

use aocbench_core::{BenchResult, ConfigLoader};

pub fn execute(file: Option<&Path>) -> BenchResult<ExitCode> {
    let config = ConfigLoader::discover(file)?;

    match file {
        Some(path) => tracing::info!(file = %path.display(), "Validated configuration"),
        None => tracing::info!("No configuration file given, using discovered settings"),
    }

    println!("✓ Configuration is valid");
    println!();
    println!("Session Settings:");
    println!("  Run Count:          {}", config.run_count);
    println!("  Solver Command:     {}", config.solver.command_line());
    println!(
        "  Working Directory:  {}",
        config
            .solver
            .working_dir
            .as_deref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );
    println!("  On Nonzero Exit:    {:?}", config.on_nonzero_exit);
    println!("  On Malformed Line:  {:?}", config.on_malformed_line);

    Ok(ExitCode::SUCCESS)
}
