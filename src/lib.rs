//! nunit-report: NUnit XML results to a self-contained HTML report
//!
//! Parses one or more NUnit 2 result documents, aggregates their statistics
//! and renders a single static page with a total summary, per-file summaries,
//! a fixture grid, printable views and per-fixture detail dialogs.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod parser;
pub mod plan;
pub mod reporter;
pub mod stats;
pub mod xml;

pub use aggregate::RunTotals;
pub use error::{ParseError, ReportError};
pub use parser::parse_document;
pub use stats::{Percent, PlatformSet, TestRunStats};

use reporter::{AssetBundle, HtmlReporter};
use std::path::{Path, PathBuf};

/// Outcome of a fixture or test case, parsed once from the `result` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestResult {
    Success,
    Ignored,
    Failure,
    Error,
    NotRunnable,
    Inconclusive,
    Skipped,
    /// Anything else (`NotRun`, `Cancelled`, empty, ...)
    Unknown,
}

impl TestResult {
    /// Case-insensitive parse of an NUnit result value
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "success" => TestResult::Success,
            "ignored" => TestResult::Ignored,
            "failure" => TestResult::Failure,
            "error" => TestResult::Error,
            "notrunnable" => TestResult::NotRunnable,
            "inconclusive" => TestResult::Inconclusive,
            "skipped" => TestResult::Skipped,
            _ => TestResult::Unknown,
        }
    }

    /// True for results counted against the success rate
    pub fn is_failing(self) -> bool {
        matches!(self, TestResult::Failure | TestResult::Error)
    }
}

/// Message and stack trace of a failed test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail {
    pub message: String,
    pub stack_trace: String,
}

/// A single test case inside a fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseNode {
    /// Name with the namespace stripped
    pub name: String,
    pub full_name: String,
    /// `Some(true)`/`Some(false)` for `executed="true"`/`"false"`, `None` otherwise
    pub executed: Option<bool>,
    pub result: TestResult,
    /// Result as written in the document
    pub result_label: String,
    /// Only read for successful cases
    pub assert_count: Option<u32>,
    /// Only set when the case has exactly one `failure` child
    pub failure: Option<FailureDetail>,
    /// Only set when the case has exactly one `reason` child
    pub reason: Option<String>,
}

/// A `TestFixture` suite with its test cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureNode {
    pub name: String,
    /// Dot-joined names of the enclosing namespace suites
    pub namespace: String,
    /// Elapsed seconds as written in the document (empty when absent)
    pub elapsed: String,
    pub result: TestResult,
    pub result_label: String,
    pub reason: Option<String>,
    /// Every test case below the fixture, nested fixtures included
    pub test_cases: Vec<TestCaseNode>,
    /// Counters recomputed from `test_cases`
    pub stats: TestRunStats,
}

/// Everything extracted from one result document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRun {
    pub stats: TestRunStats,
    pub fixtures: Vec<FixtureNode>,
}

/// Presentation options for a report run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub tooltip_placement: String,
    pub assets: AssetBundle,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Results".to_string(),
            tooltip_placement: "bottom".to_string(),
            assets: AssetBundle::builtin(),
        }
    }
}

/// A rendered report and the totals it was built from
#[derive(Debug, Clone)]
pub struct Report {
    pub html: String,
    pub totals: RunTotals,
}

/// Read, parse and render every input in order.
///
/// Stops at the first file that cannot be read or parsed. Nothing is
/// written; see [`write_report`].
pub fn generate_report(inputs: &[PathBuf], options: &ReportOptions) -> Result<Report, ReportError> {
    let reporter = HtmlReporter::new(options);
    let mut totals = RunTotals::new();
    let mut sections = Vec::with_capacity(inputs.len());

    for input in inputs {
        tracing::debug!(file = %input.display(), "processing");
        let xml = std::fs::read_to_string(input).map_err(|source| ReportError::Io {
            action: "read",
            path: input.clone(),
            source,
        })?;
        let run = parse_document(&xml).map_err(|source| ReportError::Parse {
            path: input.clone(),
            source,
        })?;
        tracing::debug!(
            file = %input.display(),
            fixtures = run.fixtures.len(),
            tests = run.stats.tests,
            "parsed"
        );
        let index = totals.record(&run.stats);
        sections.push(reporter.file_section(index, &run));
    }

    let html = reporter.document(&totals, &sections);
    Ok(Report { html, totals })
}

/// Write the rendered document to `output`
pub fn write_report(output: &Path, report: &Report) -> Result<(), ReportError> {
    std::fs::write(output, &report.html).map_err(|source| ReportError::Io {
        action: "write",
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!(output = %output.display(), bytes = report.html.len(), "report written");
    Ok(())
}
