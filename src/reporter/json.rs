//! JSON reporter for machine-readable output

use crate::aggregate::RunTotals;
use serde::Serialize;
use std::path::Path;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Summary of a finished run as a JSON object
    pub fn report(&self, output: &Path, totals: &RunTotals) -> String {
        let stats = &totals.stats;
        let failure_rate = stats.failure_rate();
        let summary = JsonSummary {
            output: output.display().to_string(),
            suites: totals.files,
            tests: stats.tests,
            errors: stats.errors,
            failures: stats.failures,
            not_run: stats.not_run,
            inconclusive: stats.inconclusive,
            ignored: stats.ignored,
            skipped: stats.skipped,
            invalid: stats.invalid,
            platforms: stats.platforms.iter().collect(),
            failure_rate: failure_rate.as_f64(),
            success: failure_rate.complement().as_f64(),
        };

        if self.pretty {
            serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    output: String,
    suites: usize,
    tests: u32,
    errors: u32,
    failures: u32,
    not_run: u32,
    inconclusive: u32,
    ignored: u32,
    skipped: u32,
    invalid: u32,
    platforms: Vec<&'a str>,
    failure_rate: f64,
    success: f64,
}
