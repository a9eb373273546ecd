//! Comparison sorts with running counters.
//!
//! Every comparison and every swap, shift or flip is its own snapshot. The
//! `sorted` set only ever grows: an index enters it once its value is
//! known to be in place (or, for insertion sort, once it belongs to the
//! sorted prefix).

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepwise_trace::{Recorder, StepState, Trace};

use crate::error::{Error, Result};
use crate::input::parse_values;

pub const HEAP_PSEUDOCODE: &[&str] = &[
    "for i = n / 2 - 1 down to 0: siftDown(i, n)",
    "for end = n - 1 down to 1:",
    "  swap(array[0], array[end])",
    "  siftDown(0, end)",
    "siftDown(root, size):",
    "  largest = largest of root and its children below size",
    "  if largest == root: return",
    "  swap(array[root], array[largest]); root = largest",
];

pub const INSERTION_PSEUDOCODE: &[&str] = &[
    "for i = 1 to n - 1:",
    "  key = array[i], j = i",
    "  while j > 0 and array[j - 1] > key:",
    "    array[j] = array[j - 1]",
    "    j = j - 1",
    "  array[j] = key",
];

pub const PANCAKE_PSEUDOCODE: &[&str] = &[
    "for size = n down to 2:",
    "  m = index of the largest value in array[0..size)",
    "  if m == size - 1: continue",
    "  if m > 0: flip(m)",
    "  flip(size - 1)",
];

pub const SELECTION_PSEUDOCODE: &[&str] = &[
    "for i = 0 to n - 2:",
    "  min = i",
    "  for j = i + 1 to n - 1:",
    "    if array[j] < array[min]: min = j",
    "  swap(array[i], array[min])",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Heap,
    Insertion,
    Pancake,
    Selection,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 4] = [
        SortAlgorithm::Heap,
        SortAlgorithm::Insertion,
        SortAlgorithm::Pancake,
        SortAlgorithm::Selection,
    ];

    /// Listing that this algorithm's `source_line` values index into.
    pub fn pseudocode(self) -> &'static [&'static str] {
        match self {
            SortAlgorithm::Heap => HEAP_PSEUDOCODE,
            SortAlgorithm::Insertion => INSERTION_PSEUDOCODE,
            SortAlgorithm::Pancake => PANCAKE_PSEUDOCODE,
            SortAlgorithm::Selection => SELECTION_PSEUDOCODE,
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortAlgorithm::Heap => "heap sort",
            SortAlgorithm::Insertion => "insertion sort",
            SortAlgorithm::Pancake => "pancake sort",
            SortAlgorithm::Selection => "selection sort",
        })
    }
}

impl FromStr for SortAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "heap" => Ok(SortAlgorithm::Heap),
            "insertion" => Ok(SortAlgorithm::Insertion),
            "pancake" => Ok(SortAlgorithm::Pancake),
            "selection" => Ok(SortAlgorithm::Selection),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub algorithm: SortAlgorithm,
    pub input: Vec<i64>,
    pub array: Vec<i64>,
    /// Pair compared in this step.
    pub comparing: Option<(usize, usize)>,
    /// Pair exchanged in this step.
    pub swapped: Option<(usize, usize)>,
    /// Value held aside by insertion sort.
    pub key: Option<i64>,
    /// Boundary of the heap (heap sort only).
    pub heap_size: Option<usize>,
    /// Last index of the reversed prefix (pancake sort only).
    pub flipped: Option<usize>,
    pub sorted: BTreeSet<usize>,
    pub comparisons: usize,
    pub swaps: usize,
    pub shifts: usize,
    pub flips: usize,
    pub done: bool,
}

impl StepState for SortState {
    fn check(&self) -> std::result::Result<(), String> {
        let n = self.array.len();
        if n != self.input.len() {
            return Err(format!("array has {n} values, input had {}", self.input.len()));
        }
        let pairs = [self.comparing, self.swapped];
        for (i, j) in pairs.into_iter().flatten() {
            if i >= n || j >= n {
                return Err(format!("pair ({i}, {j}) outside array of {n}"));
            }
        }
        if let Some(&last) = self.sorted.last() {
            if last >= n {
                return Err(format!("sorted index {last} outside array of {n}"));
            }
        }
        if matches!(self.heap_size, Some(size) if size > n) {
            return Err(format!("heap larger than array of {n}"));
        }
        Ok(())
    }
}

/// Parse `raw` and record `algorithm` sorting it.
pub fn build_trace(raw: &str, algorithm: SortAlgorithm) -> Result<Trace<SortState>> {
    let values = parse_values(raw)?;
    Ok(run(&values, algorithm))
}

/// Record `algorithm` sorting validated, non-empty input.
pub(crate) fn run(values: &[i64], algorithm: SortAlgorithm) -> Trace<SortState> {
    let mut sorter = Sorter {
        recorder: Recorder::new(SortState {
            algorithm,
            input: values.to_vec(),
            array: values.to_vec(),
            comparing: None,
            swapped: None,
            key: None,
            heap_size: None,
            flipped: None,
            sorted: BTreeSet::new(),
            comparisons: 0,
            swaps: 0,
            shifts: 0,
            flips: 0,
            done: false,
        }),
    };
    sorter
        .recorder
        .note(format!("Sort {values:?} with {algorithm}"), None);

    match algorithm {
        SortAlgorithm::Heap => sorter.heap(),
        SortAlgorithm::Insertion => sorter.insertion(),
        SortAlgorithm::Pancake => sorter.pancake(),
        SortAlgorithm::Selection => sorter.selection(),
    }

    let n = values.len();
    sorter.emit("Array is sorted".to_string(), None, |s| {
        s.sorted.extend(0..n);
        s.key = None;
        s.heap_size = None;
        s.done = true;
    });
    sorter.recorder.finish()
}

struct Sorter {
    recorder: Recorder<SortState>,
}

impl Sorter {
    /// Record a step with the comparison and exchange markers cleared.
    fn emit<F>(&mut self, description: String, line: Option<u32>, update: F)
    where
        F: FnOnce(&mut SortState),
    {
        self.recorder.record(description, line, |s| {
            s.comparing = None;
            s.swapped = None;
            s.flipped = None;
            update(s);
        });
    }

    fn len(&self) -> usize {
        self.recorder.state().array.len()
    }

    fn value(&self, i: usize) -> i64 {
        self.recorder.state().array[i]
    }

    /// Compare `array[i]` with `array[j]` and record it.
    fn compare(&mut self, i: usize, j: usize, line: u32) -> Ordering {
        let (a, b) = (self.value(i), self.value(j));
        let ordering = a.cmp(&b);
        let symbol = match ordering {
            Ordering::Less => "<",
            Ordering::Equal => "==",
            Ordering::Greater => ">",
        };
        self.emit(
            format!("Compare array[{i}] = {a} with array[{j}] = {b}: {a} {symbol} {b}"),
            Some(line),
            |s| {
                s.comparing = Some((i, j));
                s.comparisons += 1;
            },
        );
        ordering
    }

    fn swap(&mut self, i: usize, j: usize, line: u32) {
        let (a, b) = (self.value(i), self.value(j));
        self.emit(format!("Swap array[{i}] = {a} and array[{j}] = {b}"), Some(line), |s| {
            s.array.swap(i, j);
            s.swapped = Some((i, j));
            s.swaps += 1;
        });
    }

    fn mark_sorted(&mut self, i: usize, line: Option<u32>) {
        let value = self.value(i);
        self.emit(format!("{value} is in place at index {i}"), line, |s| {
            s.sorted.insert(i);
        });
    }

    fn heap(&mut self) {
        let n = self.len();
        self.emit(format!("Build a max-heap over all {n} values"), Some(1), |s| {
            s.heap_size = Some(n)
        });
        for root in (0..n / 2).rev() {
            self.sift_down(root, n);
        }

        for end in (1..n).rev() {
            self.emit(format!("Largest value goes to index {end}"), Some(2), |_| {});
            self.swap(0, end, 3);
            self.emit(format!("Heap shrinks to {end} values"), Some(3), |s| {
                s.heap_size = Some(end);
                s.sorted.insert(end);
            });
            self.sift_down(0, end);
        }
    }

    fn sift_down(&mut self, mut root: usize, size: usize) {
        self.emit(format!("Sift down from index {root}"), Some(5), |_| {});
        loop {
            let mut largest = root;
            for child in [2 * root + 1, 2 * root + 2] {
                if child < size && self.compare(child, largest, 6) == Ordering::Greater {
                    largest = child;
                }
            }
            if largest == root {
                let value = self.value(root);
                self.emit(format!("{value} is not smaller than its children"), Some(7), |_| {});
                return;
            }
            self.swap(root, largest, 8);
            root = largest;
        }
    }

    fn insertion(&mut self) {
        let n = self.len();
        self.emit("A single value is sorted".to_string(), Some(1), |s| {
            s.sorted.insert(0);
        });
        for i in 1..n {
            let key = self.value(i);
            self.emit(format!("Take key {key} from index {i}"), Some(2), |s| {
                s.key = Some(key)
            });

            let mut j = i;
            while j > 0 {
                // array[j] is the hole; compare the value before it with the key
                let before = self.value(j - 1);
                self.emit(
                    format!("Compare array[{}] = {before} with key {key}", j - 1),
                    Some(3),
                    |s| {
                        s.comparing = Some((j - 1, j));
                        s.comparisons += 1;
                    },
                );
                if before <= key {
                    break;
                }
                self.emit(format!("Shift {before} right to index {j}"), Some(4), |s| {
                    s.array[j] = before;
                    s.shifts += 1;
                });
                j -= 1;
            }

            self.emit(format!("Place key {key} at index {j}"), Some(6), |s| {
                s.array[j] = key;
                s.key = None;
                s.sorted.extend(0..=i);
            });
        }
    }

    fn selection(&mut self) {
        let n = self.len();
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            let first = self.value(i);
            self.emit(format!("Pass {i}: minimum so far is {first}"), Some(2), |_| {});
            for j in i + 1..n {
                if self.compare(j, min, 4) == Ordering::Less {
                    min = j;
                    let value = self.value(j);
                    self.emit(format!("New minimum {value} at index {j}"), Some(4), |_| {});
                }
            }
            if min == i {
                self.emit(format!("{first} is already the minimum"), Some(5), |_| {});
            } else {
                self.swap(i, min, 5);
            }
            self.mark_sorted(i, Some(5));
        }
    }

    fn pancake(&mut self) {
        let n = self.len();
        for size in (2..=n).rev() {
            let mut max = 0;
            self.emit(format!("Find the largest of the first {size} values"), Some(2), |_| {});
            for i in 1..size {
                if self.compare(i, max, 2) == Ordering::Greater {
                    max = i;
                }
            }

            if max == size - 1 {
                let value = self.value(max);
                self.emit(format!("{value} is already at the bottom"), Some(3), |_| {});
            } else {
                if max > 0 {
                    self.flip(max, 4);
                }
                self.flip(size - 1, 5);
            }
            self.mark_sorted(size - 1, Some(1));
        }
    }

    /// Reverse `array[0..=k]`.
    fn flip(&mut self, k: usize, line: u32) {
        let top = self.value(0);
        self.emit(format!("Flip the first {} values: {top} goes to index {k}", k + 1), Some(line), |s| {
            s.array[..=k].reverse();
            s.flipped = Some(k);
            s.flips += 1;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted_copy(values: &[i64]) -> Vec<i64> {
        let mut v = values.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn every_algorithm_sorts() {
        let input = [5, 2, 9, 1, 5, 6];
        for algorithm in SortAlgorithm::ALL {
            let trace = run(&input, algorithm);
            let last = trace.last();
            assert_eq!(last.state.array, sorted_copy(&input), "{algorithm}");
            assert_eq!(last.state.sorted.len(), input.len(), "{algorithm}");
            assert!(last.state.done);
            assert_eq!(trace.first().state.array, input.to_vec());
        }
    }

    #[test]
    fn insertion_counts_shifts() {
        let trace = run(&[3, 2, 1], SortAlgorithm::Insertion);
        let last = trace.last();
        assert_eq!(last.state.shifts, 3);
        assert_eq!(last.state.comparisons, 3);
        assert_eq!(last.state.swaps, 0);
    }

    #[test]
    fn selection_swaps_at_most_once_per_pass() {
        let trace = run(&[4, 3, 2, 1], SortAlgorithm::Selection);
        let last = trace.last();
        assert_eq!(last.state.swaps, 2);
        assert_eq!(last.state.comparisons, 6);

        let trace = run(&[1, 2, 3], SortAlgorithm::Selection);
        assert_eq!(trace.last().state.swaps, 0);
    }

    #[test]
    fn pancake_counts_flips() {
        let trace = run(&[3, 1, 2], SortAlgorithm::Pancake);
        assert_eq!(trace.last().state.flips, 2);
        let flipped: Vec<usize> = trace.iter().filter_map(|s| s.state.flipped).collect();
        assert_eq!(flipped, vec![2, 1]);
    }

    #[test]
    fn heap_shrinks() {
        let trace = run(&[4, 10, 3, 5, 1], SortAlgorithm::Heap);
        let sizes: Vec<usize> = trace.iter().filter_map(|s| s.state.heap_size).collect();
        assert_eq!(sizes.first(), Some(&5));
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(sizes.last(), Some(&1));
    }

    #[test]
    fn markers_do_not_carry_forward() {
        let trace = run(&[2, 1], SortAlgorithm::Selection);
        let at = trace.iter().position(|s| s.state.swapped.is_some()).unwrap();
        let next = trace.get(at + 1).unwrap();
        assert!(next.state.swapped.is_none());
        assert!(next.state.comparing.is_none());
        assert_eq!(next.state.swaps, 1);
    }

    #[test]
    fn single_value() {
        for algorithm in SortAlgorithm::ALL {
            let trace = run(&[7], algorithm);
            assert_eq!(trace.last().state.array, vec![7]);
            assert_eq!(trace.last().state.comparisons, 0);
        }
    }

    #[test]
    fn source_lines_point_into_listing() {
        for algorithm in SortAlgorithm::ALL {
            let lines = algorithm.pseudocode().len() as u32;
            let trace = run(&[3, 1, 4, 1, 5, 9, 2, 6], algorithm);
            for snapshot in &trace {
                if let Some(line) = snapshot.source_line {
                    assert!((1..=lines).contains(&line), "{algorithm}: line {line}");
                }
            }
        }
    }

    #[test]
    fn names_and_bad_input() {
        assert_eq!("pancake".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Pancake));
        assert!("bogo".parse::<SortAlgorithm>().is_err());
        assert!(build_trace("3, x", SortAlgorithm::Heap).is_err());
        assert!(build_trace("", SortAlgorithm::Heap).is_err());
    }

    proptest! {
        #[test]
        fn result_is_sorted_permutation(values in proptest::collection::vec(-50i64..50, 1..25)) {
            for algorithm in SortAlgorithm::ALL {
                let trace = run(&values, algorithm);
                prop_assert_eq!(&trace.last().state.array, &sorted_copy(&values));
            }
        }

        #[test]
        fn sorted_set_only_grows(values in proptest::collection::vec(-50i64..50, 1..25)) {
            for algorithm in SortAlgorithm::ALL {
                let trace = run(&values, algorithm);
                for pair in trace.snapshots().windows(2) {
                    prop_assert!(pair[0].state.sorted.is_subset(&pair[1].state.sorted));
                }
            }
        }
    }
}
