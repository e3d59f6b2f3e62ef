// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Solver output parser.
//!
//! Recognizes two line shapes in the captured stdout of one solver invocation:
//! puzzle markers (`AOC <year> puzzle <n>`) and timing lines containing
//! `Time to solve`. Everything else is ignored, so the solver is free to
//! interleave arbitrary log output.
//!
//! Parsing is a left-to-right fold over the lines with a small `Copy`
//! [`ParseContext`] threaded through each step.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseIssue;
use crate::types::{PuzzleKey, TimeUnit};

/// Phrase identifying a timing line.
pub const MEASUREMENT_PHRASE: &str = "Time to solve";

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"AOC (\d{4}) puzzle (\d+)").expect("marker pattern is a valid regex")
});

/// Puzzle currently in effect while scanning one invocation's output.
///
/// Starts at the sentinel key for every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    pub key: PuzzleKey,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            key: PuzzleKey::SENTINEL,
        }
    }
}

/// What a single line of output means to the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// A puzzle marker switched the current context.
    Marker(PuzzleKey),
    /// A valid timing attributed to the current puzzle.
    Measurement { key: PuzzleKey, millis: f64 },
    /// A timing line that could not be used.
    Issue(ParseIssue),
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a marker has been seen yet.
    pub fn has_marker(&self) -> bool {
        !self.key.is_sentinel()
    }

    /// Advance over one line, returning the next context and the line's event, if any.
    pub fn step(self, line_number: usize, line: &str) -> (ParseContext, Option<LineEvent>) {
        let line = line.trim_end_matches('\r');

        match match_marker(line) {
            Some(Ok(key)) => return (ParseContext { key }, Some(LineEvent::Marker(key))),
            // Later timings must not be filed under the previous puzzle.
            Some(Err(reason)) => {
                let issue = ParseIssue::MalformedMarker {
                    line_number,
                    line: line.to_string(),
                    reason,
                };
                return (ParseContext::default(), Some(LineEvent::Issue(issue)));
            }
            None => {}
        }

        if !line.contains(MEASUREMENT_PHRASE) {
            return (self, None);
        }

        let event = match parse_measurement(line) {
            Ok(millis) if self.has_marker() => LineEvent::Measurement {
                key: self.key,
                millis,
            },
            Ok(millis) => LineEvent::Issue(ParseIssue::OrphanMeasurement {
                line_number,
                millis,
            }),
            Err(reason) => LineEvent::Issue(ParseIssue::MalformedMeasurement {
                line_number,
                line: line.to_string(),
                reason,
            }),
        };
        (self, Some(event))
    }
}

/// Samples and recovered issues from one invocation's output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRun {
    /// Valid measurements in output order.
    pub samples: Vec<(PuzzleKey, f64)>,
    /// Lines that were skipped, in output order.
    pub issues: Vec<ParseIssue>,
}

impl ParsedRun {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() && self.issues.is_empty()
    }
}

/// Turn raw output into the sequence of meaningful line events.
pub fn line_events(raw: &str) -> Vec<LineEvent> {
    raw.split('\n')
        .enumerate()
        .scan(ParseContext::new(), |context, (index, line)| {
            let (next, event) = context.step(index + 1, line);
            *context = next;
            Some(event)
        })
        .flatten()
        .collect()
}

/// Parse the captured stdout of one solver invocation.
pub fn parse_output(raw: &str) -> ParsedRun {
    let mut run = ParsedRun::default();
    for event in line_events(raw) {
        match event {
            LineEvent::Marker(_) => {}
            LineEvent::Measurement { key, millis } => run.samples.push((key, millis)),
            LineEvent::Issue(issue) => run.issues.push(issue),
        }
    }
    run
}

/// `None` when the line carries no marker, `Some(Err)` when it does but the
/// numbers are out of range.
fn match_marker(line: &str) -> Option<Result<PuzzleKey, String>> {
    let captures = MARKER.captures(line)?;
    let number = |index: usize| {
        captures[index]
            .parse::<u32>()
            .map_err(|e| format!("'{}' is out of range: {}", &captures[index], e))
    };
    Some(number(1).and_then(|year| Ok(PuzzleKey::new(year, number(2)?))))
}

/// Read the trailing `<number><unit>` token of a timing line as milliseconds.
fn parse_measurement(line: &str) -> Result<f64, String> {
    let token = line
        .split_whitespace()
        .last()
        .ok_or_else(|| "line has no tokens".to_string())?;

    let number_len = token.trim_end_matches(|c: char| c.is_alphabetic()).len();
    let (number, suffix) = token.split_at(number_len);

    if number.is_empty() {
        return Err(format!("'{}' has no numeric value", token));
    }
    if suffix.is_empty() {
        return Err(format!("'{}' has no time unit", token));
    }

    let unit = TimeUnit::from_suffix(suffix)
        .ok_or_else(|| format!("unrecognized time unit '{}'", suffix))?;
    let value: f64 = number
        .parse()
        .map_err(|_| format!("'{}' is not a number", number))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{}' is not a valid duration", number));
    }

    Ok(unit.to_millis(value))
}
