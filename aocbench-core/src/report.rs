// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Progress report rendering.
//!
//! A [`Report`] is built once from a [`ResultStore`] and rendered either as
//! the markdown progress table or as JSON for tooling.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BenchResult;
use crate::store::ResultStore;
use crate::types::PUZZLES_PER_YEAR;

/// Heading glyph for a year with every puzzle benchmarked.
pub const COMPLETE_GLYPH: &str = "✅";

/// Heading glyph for a year that is still in progress.
pub const IN_PROGRESS_GLYPH: &str = "📝";

/// Average timing for one puzzle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleRow {
    pub puzzle: u32,
    pub samples: usize,
    pub mean_ms: f64,
}

/// All benchmarked puzzles of one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSection {
    pub year: u32,
    pub solved: usize,
    pub total: usize,
    pub complete: bool,
    pub puzzles: Vec<PuzzleRow>,
}

impl YearSection {
    pub fn glyph(&self) -> &'static str {
        if self.complete {
            COMPLETE_GLYPH
        } else {
            IN_PROGRESS_GLYPH
        }
    }
}

/// Report model: years newest first, puzzles ascending within a year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub years: Vec<YearSection>,
}

impl Report {
    /// Build the report model from aggregated results.
    pub fn from_store(store: &ResultStore) -> Self {
        let years = store
            .years()
            .into_iter()
            .map(|year| {
                let puzzles: Vec<PuzzleRow> = store
                    .year(year)
                    .map(|(puzzle, samples)| PuzzleRow {
                        puzzle,
                        samples: samples.len(),
                        mean_ms: samples.iter().sum::<f64>() / samples.len() as f64,
                    })
                    .collect();
                let solved = puzzles.len();
                YearSection {
                    year,
                    solved,
                    total: PUZZLES_PER_YEAR,
                    complete: solved == PUZZLES_PER_YEAR,
                    puzzles,
                }
            })
            .collect();

        Self { years }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Markdown progress tables.
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.years {
            writeln!(
                f,
                "### {} ({}/{} {})",
                section.year,
                section.solved,
                section.total,
                section.glyph()
            )?;
            writeln!(f)?;
            writeln!(f, "| Puzzle | Time (ms) |")?;
            writeln!(f, "|:---|---:|")?;
            for row in &section.puzzles {
                writeln!(f, "| {} | {:.3} |", row.puzzle, row.mean_ms)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render the markdown progress report for a store.
pub fn render_markdown(store: &ResultStore) -> String {
    Report::from_store(store).to_markdown()
}

/// Render the JSON report for a store.
pub fn render_json(store: &ResultStore) -> BenchResult<String> {
    Report::from_store(store).to_json()
}

/// Output format of the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn render(self, store: &ResultStore) -> BenchResult<String> {
        match self {
            ReportFormat::Markdown => Ok(render_markdown(store)),
            ReportFormat::Json => render_json(store),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{}' (expected markdown or json)",
                other
            )),
        }
    }
}
