//! Analysis-summary file parsing
//!
//! The simulation testbench writes a plain-text summary with one labelled
//! metric per line. Lines are matched by substring, order does not
//! matter, and an absent metric stays at zero.

use std::path::Path;

use tracing::{debug, warn};

/// Aggregate metrics pre-computed by the simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSummary {
    /// Total output values compared
    pub total_outputs: u64,
    /// Values matching the reference exactly
    pub exact_matches: u64,
    /// Values within one LSB of the reference
    pub close_matches: u64,
    /// Values differing by more than one LSB
    pub total_errors: u64,
    /// Mean absolute error in LSB
    pub mean_error: f64,
    /// Maximum absolute error in LSB
    pub max_error: f64,
}

impl AnalysisSummary {
    /// Parse a summary file; a missing file degrades to all-zero metrics
    /// with a warning.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_text(&content),
            Err(_) => {
                warn!("file {} not found, using empty summary", path.display());
                Self::default()
            }
        }
    }

    /// Parse summary text line by line
    pub fn from_text(content: &str) -> Self {
        let mut summary = Self::default();

        for line in content.lines() {
            if line.contains("Total outputs processed:") {
                if let Some(v) = parse_count(line) {
                    summary.total_outputs = v;
                }
            } else if line.contains("Exact matches:") {
                if let Some(v) = parse_count(line) {
                    summary.exact_matches = v;
                }
            } else if line.contains("Close matches") && line.contains("\u{2264}1 LSB") {
                if let Some(v) = parse_count(line) {
                    summary.close_matches = v;
                }
            } else if line.contains("Total errors:") {
                if let Some(v) = parse_count(line) {
                    summary.total_errors = v;
                }
            } else if line.contains("Mean absolute error:") {
                if let Some(v) = parse_value(line) {
                    summary.mean_error = v;
                }
            } else if line.contains("Maximum error:") {
                if let Some(v) = parse_value(line) {
                    summary.max_error = v;
                }
            }
        }

        summary
    }

    /// Exact-match percentage over all outputs
    pub fn exact_match_percent(&self) -> f64 {
        percent(self.exact_matches, self.total_outputs)
    }

    /// Exact-plus-close match percentage
    pub fn close_match_percent(&self) -> f64 {
        percent(self.exact_matches + self.close_matches, self.total_outputs)
    }

    /// Error percentage
    pub fn error_percent(&self) -> f64 {
        percent(self.total_errors, self.total_outputs)
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Count value: everything after the colon, cut at a trailing
/// parenthesized percentage if present
fn parse_count(line: &str) -> Option<u64> {
    let after = line.split_once(':')?.1;
    let cleaned = after.split('(').next().unwrap_or(after).trim();
    match cleaned.replace(',', "").parse() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!("skipping unparsable count in line {:?}", line);
            None
        }
    }
}

/// Float value: first whitespace token after the colon (drops a trailing
/// unit word)
fn parse_value(line: &str) -> Option<f64> {
    let after = line.split_once(':')?.1;
    let token = after.trim().split_whitespace().next()?;
    match token.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!("skipping unparsable value in line {:?}", line);
            None
        }
    }
}
