// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Per-puzzle measurement store.
//!
//! Accumulates elapsed-time samples across every invocation of a session.
//! Samples are appended in run order and never removed.

use std::collections::{BTreeMap, BTreeSet};

use crate::parser::ParsedRun;
use crate::types::PuzzleKey;

/// Mapping from puzzle to all of its recorded timings in milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    results: BTreeMap<PuzzleKey, Vec<f64>>,
}

impl ResultStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a measurement for a puzzle.
    pub fn record(&mut self, key: PuzzleKey, millis: f64) {
        self.results.entry(key).or_default().push(millis);
    }

    /// Record every sample of a parsed invocation, returning how many were added.
    pub fn merge_run(&mut self, run: &ParsedRun) -> usize {
        for (key, millis) in &run.samples {
            self.record(*key, *millis);
        }
        run.samples.len()
    }

    /// All samples recorded for a puzzle, in run order.
    pub fn samples(&self, key: &PuzzleKey) -> Option<&[f64]> {
        self.results.get(key).map(Vec::as_slice)
    }

    /// Arithmetic mean of a puzzle's samples.
    pub fn mean(&self, key: &PuzzleKey) -> Option<f64> {
        let samples = self.results.get(key)?;
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> Vec<u32> {
        let years: BTreeSet<u32> = self.results.keys().map(|key| key.year).collect();
        years.into_iter().rev().collect()
    }

    /// Distinct puzzle numbers recorded for a year, ascending.
    pub fn puzzles(&self, year: u32) -> Vec<u32> {
        self.year(year).map(|(puzzle, _)| puzzle).collect()
    }

    /// Puzzles of one year with their samples, ascending. Sample slices are never empty.
    pub fn year(&self, year: u32) -> impl Iterator<Item = (u32, &[f64])> {
        self.results
            .range(PuzzleKey::new(year, 0)..=PuzzleKey::new(year, u32::MAX))
            .map(|(key, samples)| (key.puzzle, samples.as_slice()))
    }

    /// Iterate over every puzzle and its samples in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PuzzleKey, &[f64])> {
        self.results.iter().map(|(key, samples)| (key, samples.as_slice()))
    }

    /// Number of distinct puzzles.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total number of samples across all puzzles.
    pub fn sample_count(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}
