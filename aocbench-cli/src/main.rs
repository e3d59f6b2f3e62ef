// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! aocbench CLI
//!
//! Command-line interface for benchmarking Advent of Code solvers.
//! The report goes to stdout; progress, logs and errors go to stderr.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use aocbench_core::{ReportFormat, RunCount};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// aocbench - Average Advent of Code solver runtimes across repeated runs
#[derive(Parser)]
#[command(name = "aocbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./aocbench.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the solver repeatedly and print the averaged report (default)
    Run(RunArgs),

    /// Build a report from previously captured solver output files
    Parse {
        /// Captured stdout files, one per solver invocation
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Report format
        #[arg(short, long, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
pub struct RunArgs {
    /// Number of solver invocations (overrides run_count from the config)
    #[arg(short, long)]
    pub runs: Option<RunCount>,

    /// Report format
    #[arg(short, long, default_value_t = ReportFormat::Markdown)]
    pub format: ReportFormat,

    /// On Ctrl+C, print the report for the invocations that completed
    #[arg(long)]
    pub partial_on_interrupt: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging on stderr so the report stays clean on stdout
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    // Dispatch to command handlers
    let result = match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => commands::run::execute(cli.config.as_deref(), args).await,
        Commands::Parse { files, format } => {
            commands::parse::execute(cli.config.as_deref(), &files, format).await
        }
        Commands::Validate { file } => {
            commands::validate::execute(file.as_deref().or(cli.config.as_deref()))
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            let message = e.to_string();
            eprintln!("ERROR: {}", message.lines().collect::<Vec<_>>().join(" "));
            ExitCode::FAILURE
        }
    }
}
