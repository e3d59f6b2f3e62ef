// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by construction.
//! All types validate their invariants at creation time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Number of puzzles in a complete Advent of Code year.
pub const PUZZLES_PER_YEAR: usize = 25;

/// Number of solver invocations per session when nothing else is configured.
pub const DEFAULT_RUN_COUNT: usize = 10;

/// Identifies one report row: a puzzle within a year.
///
/// Ordering is `(year, puzzle)` ascending; the report reverses the year order itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PuzzleKey {
    pub year: u32,
    pub puzzle: u32,
}

impl PuzzleKey {
    /// Key used before any marker has been seen in an invocation's output.
    pub const SENTINEL: PuzzleKey = PuzzleKey { year: 0, puzzle: 0 };

    pub fn new(year: u32, puzzle: u32) -> Self {
        Self { year, puzzle }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for PuzzleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AOC {} puzzle {}", self.year, self.puzzle)
    }
}

/// Validated number of solver invocations in a session.
/// Must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct RunCount(usize);

impl RunCount {
    /// Create a new RunCount with validation.
    pub fn new(count: usize) -> Result<Self, HardValidationError> {
        if count == 0 {
            return Err(HardValidationError::InvalidFieldValue {
                field: "run_count",
                value: count.to_string(),
                reason: "Run count must be at least 1".to_string(),
            });
        }
        Ok(Self(count))
    }

    /// Get the raw count.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for RunCount {
    fn default() -> Self {
        Self(DEFAULT_RUN_COUNT)
    }
}

impl fmt::Display for RunCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for RunCount {
    type Error = HardValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RunCount> for usize {
    fn from(count: RunCount) -> Self {
        count.0
    }
}

impl FromStr for RunCount {
    type Err = HardValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s
            .parse::<usize>()
            .map_err(|e| HardValidationError::InvalidFieldValue {
                field: "run_count",
                value: s.to_string(),
                reason: e.to_string(),
            })?;
        Self::new(count)
    }
}

/// Time unit suffix attached to a measurement token in solver output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    /// Parse a unit suffix. `µs` and `us` are both accepted for microseconds.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ns" => Some(TimeUnit::Nanoseconds),
            "us" | "µs" | "μs" => Some(TimeUnit::Microseconds),
            "ms" => Some(TimeUnit::Milliseconds),
            "s" => Some(TimeUnit::Seconds),
            _ => None,
        }
    }

    /// Convert a value expressed in this unit to milliseconds.
    pub fn to_millis(self, value: f64) -> f64 {
        match self {
            TimeUnit::Nanoseconds => value / 1_000_000.0,
            TimeUnit::Microseconds => value / 1_000.0,
            TimeUnit::Milliseconds => value,
            TimeUnit::Seconds => value * 1_000.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Nanoseconds => write!(f, "ns"),
            TimeUnit::Microseconds => write!(f, "µs"),
            TimeUnit::Milliseconds => write!(f, "ms"),
            TimeUnit::Seconds => write!(f, "s"),
        }
    }
}
