//! Binary search and its variants over a sorted array.
//!
//! Every probe records `low`, `high`, `mid` and how `array[mid]` compared
//! with the target. Bounds are signed so that `high` can reach -1.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Recorder, StepState, Trace};

use crate::error::{Error, Result};
use crate::input::{ensure_sorted, parse_sorted, parse_target};

/// Pseudocode for the binary-search loop; `source_line` is 1-based.
pub const PSEUDOCODE: &[&str] = &[
    "low = 0, high = n - 1",
    "while low <= high:",
    "  mid = low + (high - low) / 2",
    "  if array[mid] == target: record mid",
    "  if array[mid] < target: low = mid + 1",
    "  else: high = mid - 1",
    "return result",
];

/// Pseudocode for exponential search. Lines 6 onward are the binary-search
/// loop above, shifted by [`EXPONENTIAL_OFFSET`].
pub const EXPONENTIAL_PSEUDOCODE: &[&str] = &[
    "if array[0] == target: return 0",
    "i = 1",
    "while i < n and array[i] <= target:",
    "  i = i * 2",
    "low = i / 2, high = min(i, n - 1)",
    "while low <= high:",
    "  mid = low + (high - low) / 2",
    "  if array[mid] == target: record mid",
    "  if array[mid] < target: low = mid + 1",
    "  else: high = mid - 1",
    "return result",
];

pub const EXPONENTIAL_OFFSET: u32 = 4;

/// Pseudocode for the first index where a monotonic predicate `p` holds.
pub const PREDICATE_PSEUDOCODE: &[&str] = &[
    "low = 0, high = n - 1, answer = none",
    "while low <= high:",
    "  mid = low + (high - low) / 2",
    "  if p(array[mid]): answer = mid, high = mid - 1",
    "  else: low = mid + 1",
    "return answer",
];

/// A monotonic predicate over the array: false, then true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// `array[i] >= target` (lower bound)
    AtLeast,
    /// `array[i] > target` (upper bound)
    Greater,
}

impl Predicate {
    pub fn holds(self, value: i64, target: i64) -> bool {
        match self {
            Predicate::AtLeast => value >= target,
            Predicate::Greater => value > target,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Predicate::AtLeast => ">=",
            Predicate::Greater => ">",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchVariant {
    /// Any index holding the target
    Classic,
    /// First and last index holding the target, in two passes
    FirstLast,
    /// Doubling to find a range, then binary search inside it
    Exponential,
    /// First index where a monotonic predicate holds
    FirstTrue(Predicate),
}

impl SearchVariant {
    /// Listing that this variant's `source_line` values index into.
    pub fn pseudocode(self) -> &'static [&'static str] {
        match self {
            SearchVariant::Classic | SearchVariant::FirstLast => PSEUDOCODE,
            SearchVariant::Exponential => EXPONENTIAL_PSEUDOCODE,
            SearchVariant::FirstTrue(_) => PREDICATE_PSEUDOCODE,
        }
    }
}

impl FromStr for SearchVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "classic" | "binary" => Ok(SearchVariant::Classic),
            "first-last" | "boundaries" => Ok(SearchVariant::FirstLast),
            "exponential" => Ok(SearchVariant::Exponential),
            "lower-bound" => Ok(SearchVariant::FirstTrue(Predicate::AtLeast)),
            "upper-bound" => Ok(SearchVariant::FirstTrue(Predicate::Greater)),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Which part of the search a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Ordinary binary search
    Binary,
    /// Boundary search, first-occurrence pass
    FirstPass,
    /// Boundary search, last-occurrence pass
    LastPass,
    /// Exponential search, growing the range
    Doubling,
}

/// How `array[mid]` compares with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Less,
    Equal,
    Greater,
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Less => "<",
            Comparison::Equal => "==",
            Comparison::Greater => ">",
        })
    }
}

/// First and last index of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Boundaries {
    pub first: Option<usize>,
    pub last: Option<usize>,
}

impl Boundaries {
    /// The boundaries with -1 standing for "absent".
    pub fn as_pair(&self) -> (isize, isize) {
        let signed = |i: Option<usize>| i.map_or(-1, |i| i as isize);
        (signed(self.first), signed(self.last))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub array: Vec<i64>,
    pub target: i64,
    pub variant: SearchVariant,
    pub phase: Phase,
    pub low: isize,
    pub high: isize,
    pub mid: Option<usize>,
    pub comparison: Option<Comparison>,
    /// Predicate outcome at `mid` (first-true variant only).
    pub predicate: Option<bool>,
    /// Doubling index (exponential variant only).
    pub bound: Option<usize>,
    pub probes: usize,
    /// Best answer of the current pass so far.
    pub found: Option<usize>,
    /// Set once both boundary passes are done.
    pub boundaries: Option<Boundaries>,
    pub done: bool,
}

impl StepState for SearchState {
    fn check(&self) -> std::result::Result<(), String> {
        let n = self.array.len();
        if let Some(mid) = self.mid {
            if mid >= n {
                return Err(format!("mid {mid} outside array of {n}"));
            }
            let signed = mid as isize;
            if signed < self.low || signed > self.high {
                return Err(format!("mid {mid} outside [{}, {}]", self.low, self.high));
            }
        }
        if self.predicate.is_some() && self.mid.is_none() {
            return Err("predicate outcome without a probe".to_string());
        }
        if let Some(bound) = self.bound {
            if bound >= n {
                return Err(format!("bound {bound} outside array of {n}"));
            }
        }
        if let Some(found) = self.found {
            if found >= n {
                return Err(format!("found index {found} outside array of {n}"));
            }
        }
        Ok(())
    }
}

/// Parse a sorted array and a target, then record the search.
pub fn build_trace(array: &str, target: &str, variant: SearchVariant) -> Result<Trace<SearchState>> {
    let array = parse_sorted(array)?;
    let target = parse_target(target)?;
    Ok(run(&array, target, variant))
}

/// Record a search over a validated, sorted, non-empty array.
///
/// # Panics
///
/// Panics if `array` is empty or unsorted.
pub(crate) fn run(array: &[i64], target: i64, variant: SearchVariant) -> Trace<SearchState> {
    assert!(
        !array.is_empty() && ensure_sorted(array).is_ok(),
        "search input must be non-empty and sorted"
    );
    let phase = match variant {
        SearchVariant::FirstLast => Phase::FirstPass,
        SearchVariant::Exponential => Phase::Doubling,
        _ => Phase::Binary,
    };
    let mut searcher = Searcher {
        recorder: Recorder::new(SearchState {
            array: array.to_vec(),
            target,
            variant,
            phase,
            low: 0,
            high: array.len() as isize - 1,
            mid: None,
            comparison: None,
            predicate: None,
            bound: None,
            probes: 0,
            found: None,
            boundaries: None,
            done: false,
        }),
        array,
        target,
        offset: 0,
    };

    match variant {
        SearchVariant::Classic => searcher.classic(),
        SearchVariant::FirstLast => searcher.first_last(),
        SearchVariant::Exponential => searcher.exponential(),
        SearchVariant::FirstTrue(predicate) => searcher.first_true(predicate),
    }
    searcher.recorder.finish()
}

/// What to do when `array[mid] == target` during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnMatch {
    Stop,
    GoLeft,
    GoRight,
}

struct Searcher<'a> {
    recorder: Recorder<SearchState>,
    array: &'a [i64],
    target: i64,
    /// Added to binary-search line numbers (exponential listing).
    offset: u32,
}

impl Searcher<'_> {
    fn line(&self, line: u32) -> Option<u32> {
        Some(line + self.offset)
    }

    /// Start a binary-search pass over `[low, high]`.
    fn start_pass(&mut self, phase: Phase, low: isize, high: isize, label: &str) {
        let line = self.line(1);
        self.recorder.record(
            format!("{label}: search for {} in [{low}, {high}]", self.target),
            line,
            |s| {
                s.phase = phase;
                s.low = low;
                s.high = high;
                s.mid = None;
                s.comparison = None;
                s.found = None;
            },
        );
    }

    /// Probe the middle of `[low, high]`.
    fn probe(&mut self, low: isize, high: isize) -> (usize, Comparison) {
        let mid = (low + (high - low) / 2) as usize;
        let value = self.array[mid];
        let comparison = Comparison::from(value.cmp(&self.target));
        let line = self.line(3);
        self.recorder.record(
            format!("mid = {mid}: array[{mid}] = {value} {comparison} {}", self.target),
            line,
            |s| {
                s.low = low;
                s.high = high;
                s.mid = Some(mid);
                s.comparison = Some(comparison);
                s.probes += 1;
            },
        );
        (mid, comparison)
    }

    /// Move the bounds after a probe. The probe itself is cleared since
    /// `mid` now lies outside `[low, high]`.
    fn narrow(&mut self, description: String, line: u32, low: isize, high: isize, found: Option<usize>) {
        let line = self.line(line);
        self.recorder.record(description, line, |s| {
            s.low = low;
            s.high = high;
            s.mid = None;
            s.comparison = None;
            s.predicate = None;
            if found.is_some() {
                s.found = found;
            }
        });
    }

    /// Run one binary-search loop and return the recorded match, if any.
    fn binary_pass(&mut self, mut low: isize, mut high: isize, on_match: OnMatch) -> Option<usize> {
        let mut found = None;
        while low <= high {
            let (mid, comparison) = self.probe(low, high);
            let signed = mid as isize;
            match (comparison, on_match) {
                (Comparison::Equal, OnMatch::Stop) => {
                    found = Some(mid);
                    let line = self.line(4);
                    self.recorder.record(format!("Found {} at index {mid}", self.target), line, |s| {
                        s.found = Some(mid)
                    });
                    break;
                }
                (Comparison::Equal, OnMatch::GoLeft) => {
                    found = Some(mid);
                    high = signed - 1;
                    self.narrow(
                        format!("Match at {mid}; keep looking left in [{low}, {high}]"),
                        4,
                        low,
                        high,
                        found,
                    );
                }
                (Comparison::Equal, OnMatch::GoRight) => {
                    found = Some(mid);
                    low = signed + 1;
                    self.narrow(
                        format!("Match at {mid}; keep looking right in [{low}, {high}]"),
                        4,
                        low,
                        high,
                        found,
                    );
                }
                (Comparison::Less, _) => {
                    low = signed + 1;
                    self.narrow(format!("Too small: low = {low}"), 5, low, high, None);
                }
                (Comparison::Greater, _) => {
                    high = signed - 1;
                    self.narrow(format!("Too large: high = {high}"), 6, low, high, None);
                }
            }
        }
        found
    }

    fn finish(&mut self, description: String) {
        let line = self.line(7);
        self.recorder.record(description, line, |s| {
            s.mid = None;
            s.comparison = None;
            s.done = true;
        });
    }

    fn last_index(&self) -> isize {
        self.array.len() as isize - 1
    }

    fn classic(&mut self) {
        let high = self.last_index();
        self.start_pass(Phase::Binary, 0, high, "Binary search");
        let description = match self.binary_pass(0, high, OnMatch::Stop) {
            Some(i) => format!("{} is at index {i}", self.target),
            None => format!("{} is not in the array", self.target),
        };
        self.finish(description);
    }

    fn first_last(&mut self) {
        let high = self.last_index();

        self.start_pass(Phase::FirstPass, 0, high, "First occurrence");
        let first = self.binary_pass(0, high, OnMatch::GoLeft);
        self.recorder.record(
            format!("First occurrence: {}", first.map_or(-1, |i| i as isize)),
            self.line(7),
            |_| {},
        );

        self.start_pass(Phase::LastPass, 0, high, "Last occurrence");
        let last = self.binary_pass(0, high, OnMatch::GoRight);
        self.recorder.record(
            format!("Last occurrence: {}", last.map_or(-1, |i| i as isize)),
            self.line(7),
            |_| {},
        );

        let boundaries = Boundaries { first, last };
        let (lo, hi) = boundaries.as_pair();
        self.recorder.record(format!("Boundaries of {}: [{lo}, {hi}]", self.target), self.line(7), |s| {
            s.boundaries = Some(boundaries);
            s.found = None;
            s.mid = None;
            s.comparison = None;
            s.done = true;
        });
    }

    fn first_true(&mut self, predicate: Predicate) {
        let mut low = 0;
        let mut high = self.last_index();
        let symbol = predicate.symbol();
        self.start_pass(
            Phase::Binary,
            low,
            high,
            &format!("First index with array[i] {symbol} target"),
        );

        let mut answer = None;
        while low <= high {
            let (mid, _) = self.probe(low, high);
            let value = self.array[mid];
            let holds = predicate.holds(value, self.target);
            self.recorder.record(
                format!("{value} {symbol} {} is {holds}", self.target),
                Some(4),
                |s| s.predicate = Some(holds),
            );
            let signed = mid as isize;
            if holds {
                answer = Some(mid);
                high = signed - 1;
                self.narrow(format!("Answer is at most {mid}: high = {high}"), 4, low, high, answer);
            } else {
                low = signed + 1;
                self.narrow(format!("Answer is after {mid}: low = {low}"), 5, low, high, None);
            }
        }

        let description = match answer {
            Some(i) => format!("First index with array[i] {symbol} {} is {i}", self.target),
            None => format!(
                "No element is {symbol} {}; insertion point is {}",
                self.target,
                self.array.len()
            ),
        };
        self.recorder.record(description, Some(6), |s| {
            s.predicate = None;
            s.mid = None;
            s.comparison = None;
            s.done = true;
        });
    }

    fn exponential(&mut self) {
        let n = self.array.len();
        let first = self.array[0];
        let comparison = Comparison::from(first.cmp(&self.target));
        self.recorder.record(
            format!("Check array[0] = {first} {comparison} {}", self.target),
            Some(1),
            |s| {
                s.bound = Some(0);
                s.comparison = Some(comparison);
                s.probes += 1;
            },
        );
        if comparison == Comparison::Equal {
            self.recorder.record(format!("Found {} at index 0", self.target), Some(1), |s| {
                s.found = Some(0);
                s.comparison = None;
                s.done = true;
            });
            return;
        }

        let mut i = 1;
        while i < n {
            let value = self.array[i];
            let comparison = Comparison::from(value.cmp(&self.target));
            self.recorder.record(
                format!("array[{i}] = {value} {comparison} {}", self.target),
                Some(3),
                |s| {
                    s.bound = Some(i);
                    s.comparison = Some(comparison);
                    s.probes += 1;
                },
            );
            if value > self.target {
                break;
            }
            i *= 2;
            self.recorder.record(format!("Double: i = {i}"), Some(4), |s| s.comparison = None);
        }

        let low = (i / 2) as isize;
        let high = i.min(n - 1) as isize;
        self.offset = EXPONENTIAL_OFFSET;
        self.recorder.record(
            format!("Range found: binary search in [{low}, {high}]"),
            Some(5),
            |s| {
                s.phase = Phase::Binary;
                s.bound = None;
                s.comparison = None;
                s.low = low;
                s.high = high;
            },
        );
        let description = match self.binary_pass(low, high, OnMatch::Stop) {
            Some(i) => format!("{} is at index {i}", self.target),
            None => format!("{} is not in the array", self.target),
        };
        self.finish(description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARRAY: &[i64] = &[5, 7, 7, 8, 8, 10];

    fn boundaries(trace: &Trace<SearchState>) -> (isize, isize) {
        trace.last().state.boundaries.expect("boundaries recorded").as_pair()
    }

    #[test]
    fn boundaries_of_present_target() {
        let trace = run(ARRAY, 8, SearchVariant::FirstLast);
        assert_eq!(boundaries(&trace), (3, 4));
        assert!(trace.last().state.done);
    }

    #[test]
    fn boundaries_of_absent_target() {
        let trace = run(ARRAY, 6, SearchVariant::FirstLast);
        assert_eq!(boundaries(&trace), (-1, -1));
    }

    #[test]
    fn boundary_passes_are_tagged() {
        let trace = run(ARRAY, 7, SearchVariant::FirstLast);
        let phases: Vec<Phase> = trace.iter().map(|s| s.state.phase).collect();
        let switch = phases.iter().position(|&p| p == Phase::LastPass).unwrap();
        assert!(phases[..switch].iter().all(|&p| p == Phase::FirstPass));
        assert!(phases[switch..].iter().all(|&p| p == Phase::LastPass));
        assert_eq!(boundaries(&trace), (1, 2));
    }

    #[test]
    fn classic_finds_target() {
        let trace = run(ARRAY, 8, SearchVariant::Classic);
        assert_eq!(trace.last().state.found, Some(4));
        assert_eq!(trace.last().state.probes, 2);
    }

    #[test]
    fn classic_reports_absence() {
        let trace = run(ARRAY, 11, SearchVariant::Classic);
        let last = trace.last();
        assert_eq!(last.state.found, None);
        assert!(last.description.contains("not in the array"));
        assert!(last.state.low > last.state.high);
    }

    #[test]
    fn probes_stay_inside_bounds() {
        for target in [4, 5, 6, 7, 8, 9, 10, 11] {
            for variant in [
                SearchVariant::Classic,
                SearchVariant::FirstLast,
                SearchVariant::Exponential,
                SearchVariant::FirstTrue(Predicate::AtLeast),
            ] {
                let trace = run(ARRAY, target, variant);
                for snapshot in &trace {
                    if let (Some(mid), Some(_)) = (snapshot.state.mid, snapshot.state.comparison) {
                        let mid = mid as isize;
                        assert!(snapshot.state.low <= mid && mid <= snapshot.state.high);
                    }
                }
            }
        }
    }

    #[test]
    fn exponential_doubles_then_searches() {
        let array: Vec<i64> = (1..=20).collect();
        let trace = run(&array, 13, SearchVariant::Exponential);
        assert_eq!(trace.last().state.found, Some(12));

        let phases: Vec<Phase> = trace.iter().map(|s| s.state.phase).collect();
        assert_eq!(phases[0], Phase::Doubling);
        let switch = phases.iter().position(|&p| p == Phase::Binary).unwrap();
        assert!(phases[switch..].iter().all(|&p| p == Phase::Binary));

        // 1, 2, 4, 8 pass; 16 stops the doubling
        let bounds: Vec<usize> = trace.iter().filter_map(|s| s.state.bound).collect();
        assert!(bounds.contains(&16));
        let range_step = &trace.snapshots()[switch];
        assert_eq!((range_step.state.low, range_step.state.high), (8, 16));
        assert_eq!(range_step.source_line, Some(5));
    }

    #[test]
    fn exponential_edges() {
        let trace = run(ARRAY, 5, SearchVariant::Exponential);
        assert_eq!(trace.last().state.found, Some(0));

        let trace = run(ARRAY, 10, SearchVariant::Exponential);
        assert_eq!(trace.last().state.found, Some(5));

        let trace = run(ARRAY, 42, SearchVariant::Exponential);
        assert_eq!(trace.last().state.found, None);

        let trace = run(&[3], 1, SearchVariant::Exponential);
        assert_eq!(trace.last().state.found, None);
    }

    #[test]
    fn monotonic_predicates() {
        let array = [1, 3, 3, 5];
        let lower = run(&array, 3, SearchVariant::FirstTrue(Predicate::AtLeast));
        assert_eq!(lower.last().state.found, Some(1));

        let upper = run(&array, 3, SearchVariant::FirstTrue(Predicate::Greater));
        assert_eq!(upper.last().state.found, Some(3));

        let none = run(&array, 9, SearchVariant::FirstTrue(Predicate::AtLeast));
        assert_eq!(none.last().state.found, None);
        assert!(none.last().description.contains("insertion point is 4"));
    }

    #[test]
    fn variant_names() {
        assert_eq!("first-last".parse::<SearchVariant>(), Ok(SearchVariant::FirstLast));
        assert_eq!(
            "upper-bound".parse::<SearchVariant>(),
            Ok(SearchVariant::FirstTrue(Predicate::Greater))
        );
        assert!("ternary".parse::<SearchVariant>().is_err());
    }

    #[test]
    fn unsorted_input_rejected() {
        assert_eq!(
            build_trace("5 3 9", "3", SearchVariant::Classic),
            Err(Error::Unsorted { position: 1 })
        );
        assert!(build_trace("1 2 3", "x", SearchVariant::Classic).is_err());
        assert_eq!(
            build_trace("", "5", SearchVariant::Exponential),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    #[should_panic(expected = "non-empty and sorted")]
    fn unsorted_slice_fails_fast() {
        run(&[9, 1, 5], 1, SearchVariant::Classic);
    }

    #[test]
    #[should_panic(expected = "non-empty and sorted")]
    fn empty_slice_fails_fast() {
        run(&[], 5, SearchVariant::Exponential);
    }

    #[test]
    fn predicate_outcome_only_shown_with_its_probe() {
        for predicate in [Predicate::AtLeast, Predicate::Greater] {
            let trace = run(&[1, 3, 3, 5, 8], 3, SearchVariant::FirstTrue(predicate));
            let judged: Vec<_> = trace.iter().filter(|s| s.state.predicate.is_some()).collect();
            assert!(!judged.is_empty());
            for snapshot in judged {
                assert!(snapshot.state.mid.is_some(), "{}", snapshot.description);
                assert_eq!(snapshot.source_line, Some(4));
            }
        }
    }

    #[test]
    fn source_lines_point_into_listing() {
        for variant in [
            SearchVariant::Classic,
            SearchVariant::FirstLast,
            SearchVariant::Exponential,
            SearchVariant::FirstTrue(Predicate::AtLeast),
            SearchVariant::FirstTrue(Predicate::Greater),
        ] {
            let lines = variant.pseudocode().len() as u32;
            for target in [0, 7, 8, 11] {
                let trace = run(ARRAY, target, variant);
                for snapshot in &trace {
                    let line = snapshot.source_line.expect("every search step has a line");
                    assert!((1..=lines).contains(&line), "{variant:?}: line {line}");
                }
            }
        }
        let last = run(ARRAY, 8, SearchVariant::FirstTrue(Predicate::AtLeast));
        assert_eq!(last.last().source_line, Some(6));
    }

    fn sorted_vec() -> impl Strategy<Value = Vec<i64>> {
        proptest::collection::vec(-20i64..20, 1..40).prop_map(|mut v| {
            v.sort_unstable();
            v
        })
    }

    proptest! {
        #[test]
        fn boundaries_match_linear_scan(array in sorted_vec(), target in -25i64..25) {
            let trace = run(&array, target, SearchVariant::FirstLast);
            let first = array.iter().position(|&v| v == target);
            let last = array.iter().rposition(|&v| v == target);
            let recorded = trace.last().state.boundaries.unwrap();
            prop_assert_eq!(recorded, Boundaries { first, last });
        }

        #[test]
        fn exponential_agrees_with_contains(array in sorted_vec(), target in -25i64..25) {
            let trace = run(&array, target, SearchVariant::Exponential);
            let found = trace.last().state.found;
            prop_assert_eq!(found.is_some(), array.contains(&target));
            if let Some(i) = found {
                prop_assert_eq!(array[i], target);
            }
        }

        #[test]
        fn lower_bound_matches_partition_point(array in sorted_vec(), target in -25i64..25) {
            let trace = run(&array, target, SearchVariant::FirstTrue(Predicate::AtLeast));
            let expected = array.partition_point(|&v| v < target);
            let found = trace.last().state.found.unwrap_or(array.len());
            prop_assert_eq!(found, expected);
        }
    }
}
