// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Session driver.
//!
//! Runs the solver a fixed number of times, one invocation after another,
//! and folds each invocation's parsed output into a [`ResultStore`].
//!
//! Merging an invocation into the store happens without any await point, so
//! dropping the session future (e.g. on Ctrl+C) leaves the store holding
//! exactly the invocations that completed.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::{Config, ExitStatusPolicy, MalformedLinePolicy, SolverConfig};
use crate::error::{BenchError, BenchResult, ParseIssue};
use crate::parser::parse_output;
use crate::store::ResultStore;
use crate::types::RunCount;

/// Captured result of one solver execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl Invocation {
    /// An invocation that exited with status 0.
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can be executed to produce solver output.
pub trait Solver {
    /// Run once and wait for completion.
    fn invoke(&mut self) -> impl Future<Output = BenchResult<Invocation>> + Send;
}

/// Solver backed by an external process.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    config: SolverConfig,
}

impl ProcessSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl Solver for ProcessSolver {
    async fn invoke(&mut self) -> BenchResult<Invocation> {
        let output = self
            .command()
            .output()
            .await
            .map_err(|e| BenchError::ProcessLaunch {
                program: self.config.program.clone(),
                source: e,
            })?;

        Ok(Invocation {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}

/// Progress notification emitted after every invocation but the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Invocations finished so far.
    pub completed: usize,
    /// Invocations in the session.
    pub total: usize,
    /// `100 * completed / total`, rounded down.
    pub percent: usize,
}

impl Progress {
    fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percent: 100 * completed / total,
        }
    }
}

/// Counters describing what happened during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub invocations: usize,
    pub discarded_invocations: usize,
    pub samples_recorded: usize,
    pub malformed_lines: usize,
    pub orphan_measurements: usize,
}

/// Drives repeated sequential solver invocations.
pub struct RunDriver<S> {
    solver: S,
    run_count: RunCount,
    on_nonzero_exit: ExitStatusPolicy,
    on_malformed_line: MalformedLinePolicy,
}

impl RunDriver<ProcessSolver> {
    /// Build a driver for the configured solver process.
    pub fn from_config(config: &Config) -> Self {
        RunDriver::new(ProcessSolver::new(config.solver.clone()), config.run_count)
            .exit_policy(config.on_nonzero_exit)
            .malformed_line_policy(config.on_malformed_line)
    }
}

impl<S: Solver> RunDriver<S> {
    /// Create a driver with default failure policies.
    pub fn new(solver: S, run_count: RunCount) -> Self {
        Self {
            solver,
            run_count,
            on_nonzero_exit: ExitStatusPolicy::default(),
            on_malformed_line: MalformedLinePolicy::default(),
        }
    }

    /// Set how unsuccessful solver exits are handled.
    pub fn exit_policy(mut self, policy: ExitStatusPolicy) -> Self {
        self.on_nonzero_exit = policy;
        self
    }

    /// Set how unreadable timing lines are handled.
    pub fn malformed_line_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.on_malformed_line = policy;
        self
    }

    pub fn run_count(&self) -> RunCount {
        self.run_count
    }

    /// Run a full session into a fresh store.
    pub async fn run<F>(&mut self, on_progress: F) -> BenchResult<ResultStore>
    where
        F: FnMut(Progress),
    {
        let mut store = ResultStore::new();
        self.run_session(&mut store, on_progress).await?;
        Ok(store)
    }

    /// Run `run_count` invocations, recording every valid sample into `store`.
    ///
    /// # Errors
    /// Launch failures always abort. Unsuccessful exits and malformed lines
    /// abort only under the `Abort` and `Fail` policies respectively.
    pub async fn run_session<F>(
        &mut self,
        store: &mut ResultStore,
        mut on_progress: F,
    ) -> BenchResult<SessionSummary>
    where
        F: FnMut(Progress),
    {
        let total = self.run_count.get();
        let mut summary = SessionSummary::default();

        for index in 0..total {
            let number = index + 1;
            tracing::debug!(invocation = number, total = total, "Invoking solver");

            let invocation = self.solver.invoke().await?;
            summary.invocations += 1;
            self.absorb(number, &invocation, store, &mut summary)?;

            if index > 0 {
                on_progress(Progress::new(number, total));
            }
        }

        tracing::info!(
            invocations = summary.invocations,
            discarded = summary.discarded_invocations,
            samples = summary.samples_recorded,
            malformed_lines = summary.malformed_lines,
            orphans = summary.orphan_measurements,
            puzzles = store.len(),
            "Session complete"
        );

        Ok(summary)
    }

    /// Apply one invocation's output to the store according to the policies.
    fn absorb(
        &self,
        number: usize,
        invocation: &Invocation,
        store: &mut ResultStore,
        summary: &mut SessionSummary,
    ) -> BenchResult<()> {
        if !invocation.success() {
            match self.on_nonzero_exit {
                ExitStatusPolicy::Abort => {
                    return Err(BenchError::SolverFailed {
                        invocation: number,
                        code: invocation.code,
                    });
                }
                ExitStatusPolicy::Discard => {
                    tracing::warn!(
                        invocation = number,
                        code = ?invocation.code,
                        stderr = %invocation.stderr.trim_end(),
                        "Solver exited unsuccessfully, discarding its output"
                    );
                    summary.discarded_invocations += 1;
                    return Ok(());
                }
                ExitStatusPolicy::Keep => {
                    tracing::warn!(
                        invocation = number,
                        code = ?invocation.code,
                        "Solver exited unsuccessfully, keeping partial output"
                    );
                }
            }
        }

        let run = parse_output(&invocation.stdout);

        for issue in &run.issues {
            match issue {
                ParseIssue::MalformedMeasurement { .. } | ParseIssue::MalformedMarker { .. } => {
                    if self.on_malformed_line == MalformedLinePolicy::Fail {
                        return Err(BenchError::MalformedMeasurement(issue.clone()));
                    }
                    summary.malformed_lines += 1;
                }
                ParseIssue::OrphanMeasurement { .. } => summary.orphan_measurements += 1,
            }
            tracing::warn!(invocation = number, issue = %issue, "Skipping solver output line");
        }

        summary.samples_recorded += store.merge_run(&run);
        Ok(())
    }
}
