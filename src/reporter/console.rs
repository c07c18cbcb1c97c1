//! Console reporter with colored output

use crate::aggregate::RunTotals;
use crate::stats::Percent;
use colored::{Color, Colorize};
use std::path::Path;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Print the run summary
    pub fn report(&self, output: &Path, totals: &RunTotals) {
        for line in self.summary_lines(output, totals) {
            println!("{}", line);
        }
    }

    /// Print a single line: output path and success rate
    pub fn report_quiet(&self, output: &Path, totals: &RunTotals) {
        println!("{}", self.quiet_line(output, totals));
    }

    pub fn quiet_line(&self, output: &Path, totals: &RunTotals) -> String {
        let rate = totals.stats.success_rate();
        format!(
            "{}: {}",
            output.display(),
            self.paint(&format!("{}%", rate), Self::rate_color(rate))
        )
    }

    pub fn summary_lines(&self, output: &Path, totals: &RunTotals) -> Vec<String> {
        let stats = &totals.stats;
        let mut lines = Vec::with_capacity(6);
        lines.push(String::new());
        let header = format!("📊 NUnit Report: {}", output.display());
        lines.push(if self.use_colors {
            header.bold().to_string()
        } else {
            header
        });
        lines.push(format!(
            "   Suites: {} | Tests: {} | Failures: {} | Errors: {} | Ignored: {} | Skipped: {}",
            totals.files,
            stats.tests,
            self.count(stats.failures),
            self.count(stats.errors),
            self.count(stats.ignored),
            self.count(stats.skipped),
        ));

        if self.verbose {
            lines.push(format!(
                "   Not Run: {} | Inconclusive: {} | Invalid: {}",
                stats.not_run, stats.inconclusive, stats.invalid
            ));
            if !stats.platforms.is_empty() {
                lines.push(format!("   Platforms: {}", stats.platforms));
            }
        }

        let rate = stats.success_rate();
        lines.push(format!(
            "   Success: {}",
            self.paint(&format!("{}%", rate), Self::rate_color(rate))
        ));
        lines
    }

    fn count(&self, value: u32) -> String {
        if value > 0 {
            self.paint(&value.to_string(), Color::Red)
        } else {
            value.to_string()
        }
    }

    fn rate_color(rate: Percent) -> Color {
        if rate == Percent::HUNDRED {
            Color::Green
        } else if rate.tenths() >= 800 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{PlatformSet, TestRunStats};

    fn totals() -> RunTotals {
        let mut totals = RunTotals::new();
        totals.record(&TestRunStats {
            tests: 5,
            failures: 1,
            errors: 1,
            platforms: PlatformSet::from_attribute("Win32NT"),
            ..TestRunStats::default()
        });
        totals
    }

    #[test]
    fn test_summary_lines_plain() {
        let reporter = ConsoleReporter::new().without_colors();
        let lines = reporter.summary_lines(Path::new("out.html"), &totals());
        assert!(lines.iter().any(|l| l.contains("NUnit Report: out.html")));
        assert!(lines
            .iter()
            .any(|l| l.contains("Suites: 1 | Tests: 5 | Failures: 1 | Errors: 1 | Ignored: 0 | Skipped: 0")));
        assert!(lines.iter().any(|l| l == "   Success: 60%"));
        assert!(!lines.iter().any(|l| l.contains("Platforms")));
    }

    #[test]
    fn test_verbose_adds_details() {
        let reporter = ConsoleReporter::new().without_colors().verbose();
        let lines = reporter.summary_lines(Path::new("out.html"), &totals());
        assert!(lines.iter().any(|l| l.contains("Not Run: 0 | Inconclusive: 0 | Invalid: 0")));
        assert!(lines.iter().any(|l| l.contains("Platforms: Win32NT")));
    }

    #[test]
    fn test_quiet_line() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(reporter.quiet_line(Path::new("r.html"), &RunTotals::new()), "r.html: 100%");
    }

    #[test]
    fn test_rate_color() {
        assert_eq!(ConsoleReporter::rate_color(Percent::HUNDRED), Color::Green);
        assert_eq!(ConsoleReporter::rate_color(Percent::from_tenths(850)), Color::Yellow);
        assert_eq!(ConsoleReporter::rate_color(Percent::from_tenths(600)), Color::Red);
    }
}
