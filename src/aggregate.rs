//! Running totals across input files

use crate::stats::TestRunStats;

/// Merged statistics of every processed file plus a file counter.
///
/// Owned by the processing loop and handed to the document assembler once
/// all files are done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub files: usize,
    pub stats: TestRunStats,
}

impl RunTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's statistics; returns the 1-based index of that file
    pub fn record(&mut self, stats: &TestRunStats) -> usize {
        self.files += 1;
        self.stats += stats;
        self.files
    }
}
