//! Test run statistics: counters, platform set and failure rate

use chrono::NaiveDateTime;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Ordered, de-duplicated set of platform labels.
///
/// Labels are compared case-sensitively and keep the order in which they
/// were first seen. Rendered as a comma separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSet {
    labels: Vec<String>,
}

impl PlatformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from an `environment/@platform` value. Comma separated
    /// values contribute one label per trimmed, non-empty part.
    pub fn from_attribute(value: &str) -> Self {
        let mut set = Self::new();
        set.insert_all(value);
        set
    }

    /// Insert a single label; returns false if it was already present
    pub fn insert(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    /// Insert every comma separated part of `value`
    pub fn insert_all(&mut self, value: &str) {
        for part in value.split(',') {
            self.insert(part);
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Union with `other`; labels already present keep their position
    pub fn union(&self, other: &PlatformSet) -> PlatformSet {
        let mut merged = self.clone();
        for label in other.iter() {
            merged.insert(label);
        }
        merged
    }
}

impl fmt::Display for PlatformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join(", "))
    }
}

/// A percentage with one decimal place, stored in tenths of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percent {
    tenths: u32,
}

impl Percent {
    pub const ZERO: Percent = Percent { tenths: 0 };
    pub const HUNDRED: Percent = Percent { tenths: 1000 };

    pub fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    pub fn tenths(self) -> u32 {
        self.tenths
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.tenths) / 10.0
    }

    /// `part / whole * 100`, rounded half-to-even to one decimal place and
    /// capped at 100. A zero `whole` yields zero.
    pub fn ratio(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let scaled = part.saturating_mul(1000);
        let mut tenths = scaled / whole;
        let remainder = scaled % whole;
        let twice = remainder.saturating_mul(2);
        if twice > whole || (twice == whole && tenths % 2 == 1) {
            tenths += 1;
        }
        Self {
            tenths: tenths.min(1000) as u32,
        }
    }

    /// `100 - self`
    pub fn complement(self) -> Self {
        Self {
            tenths: 1000 - self.tenths.min(1000),
        }
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.tenths / 10;
        let frac = self.tenths % 10;
        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{}", whole, frac)
        }
    }
}

/// Counters for a whole run or a single fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRunStats {
    /// Suite or fixture name
    pub name: String,
    pub tests: u32,
    pub errors: u32,
    pub failures: u32,
    pub not_run: u32,
    pub inconclusive: u32,
    pub ignored: u32,
    pub skipped: u32,
    /// Test cases reported as `NotRunnable`
    pub invalid: u32,
    pub platforms: PlatformSet,
    /// Only set for whole-run statistics
    pub timestamp: Option<NaiveDateTime>,
}

impl TestRunStats {
    /// All-zero statistics with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Percentage of tests that errored or failed
    pub fn failure_rate(&self) -> Percent {
        let bad = u64::from(self.errors) + u64::from(self.failures);
        Percent::ratio(bad, u64::from(self.tests))
    }

    /// `100 - failure_rate`
    pub fn success_rate(&self) -> Percent {
        self.failure_rate().complement()
    }

    /// True when every counter is zero
    pub fn is_empty(&self) -> bool {
        self.counters() == [0; 8]
    }

    /// Counters in display order: tests, failures, errors, not run,
    /// inconclusive, ignored, skipped, invalid
    pub fn counters(&self) -> [u32; 8] {
        [
            self.tests,
            self.failures,
            self.errors,
            self.not_run,
            self.inconclusive,
            self.ignored,
            self.skipped,
            self.invalid,
        ]
    }

    /// Element-wise sum of counters and union of platforms. Name and
    /// timestamp come from `self`.
    pub fn merge(&self, other: &TestRunStats) -> TestRunStats {
        TestRunStats {
            name: self.name.clone(),
            tests: self.tests.saturating_add(other.tests),
            errors: self.errors.saturating_add(other.errors),
            failures: self.failures.saturating_add(other.failures),
            not_run: self.not_run.saturating_add(other.not_run),
            inconclusive: self.inconclusive.saturating_add(other.inconclusive),
            ignored: self.ignored.saturating_add(other.ignored),
            skipped: self.skipped.saturating_add(other.skipped),
            invalid: self.invalid.saturating_add(other.invalid),
            platforms: self.platforms.union(&other.platforms),
            timestamp: self.timestamp,
        }
    }
}

impl Add for TestRunStats {
    type Output = TestRunStats;

    fn add(self, rhs: TestRunStats) -> TestRunStats {
        self.merge(&rhs)
    }
}

impl AddAssign<&TestRunStats> for TestRunStats {
    fn add_assign(&mut self, rhs: &TestRunStats) {
        *self = self.merge(rhs);
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_stats() -> impl Strategy<Value = TestRunStats> {
        (
            prop::array::uniform8(0u32..10_000),
            prop::collection::vec(prop::sample::select(vec!["Win", "Linux", "Unix", "MacOSX"]), 0..4),
        )
            .prop_map(|(c, platforms)| {
                let mut set = PlatformSet::new();
                for p in platforms {
                    set.insert(p);
                }
                TestRunStats {
                    name: String::new(),
                    tests: c[0],
                    failures: c[1],
                    errors: c[2],
                    not_run: c[3],
                    inconclusive: c[4],
                    ignored: c[5],
                    skipped: c[6],
                    invalid: c[7],
                    platforms: set,
                    timestamp: None,
                }
            })
    }

    fn same_platforms(a: &PlatformSet, b: &PlatformSet) -> bool {
        a.len() == b.len() && a.iter().all(|l| b.contains(l))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn merge_is_associative(a in arb_stats(), b in arb_stats(), c in arb_stats()) {
            let left = (a.clone() + b.clone()) + c.clone();
            let right = a + (b + c);
            prop_assert_eq!(left.counters(), right.counters());
            prop_assert!(same_platforms(&left.platforms, &right.platforms));
        }

        #[test]
        fn merge_is_commutative(a in arb_stats(), b in arb_stats()) {
            let ab = a.clone() + b.clone();
            let ba = b + a;
            prop_assert_eq!(ab.counters(), ba.counters());
            prop_assert!(same_platforms(&ab.platforms, &ba.platforms));
        }

        #[test]
        fn zero_is_identity(a in arb_stats()) {
            let merged = a.clone() + TestRunStats::default();
            prop_assert_eq!(merged.counters(), a.counters());
            prop_assert_eq!(merged.platforms, a.platforms);
        }

        #[test]
        fn failure_rate_in_bounds(a in arb_stats()) {
            let rate = a.failure_rate();
            if a.tests == 0 {
                prop_assert_eq!(rate, Percent::ZERO);
            } else {
                prop_assert!(rate <= Percent::HUNDRED);
            }
            prop_assert_eq!(rate.tenths() + a.success_rate().tenths(), 1000);
        }
    }
}
