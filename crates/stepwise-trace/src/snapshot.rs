//! Snapshots of an instrumented algorithm and the traces that hold them.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Family-specific state carried from snapshot to snapshot.
///
/// Implementors must own all of their data so that `Clone` is a deep copy:
/// a recorded snapshot may never alias the live algorithm state.
pub trait StepState: Clone + Debug {
    /// Report an internal inconsistency (an index outside the array, a
    /// bound past the end). The recorder refuses to emit a state that fails
    /// this check.
    fn check(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// The observable state of an algorithm at one logical instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    /// Position in the trace, equal to the snapshot's offset.
    pub index: usize,
    /// What just happened, for the learner.
    pub description: String,
    /// 1-based line in the family's pseudocode listing.
    pub source_line: Option<u32>,
    /// Family-specific state.
    pub state: S,
}

/// An ordered, immutable sequence of snapshots.
///
/// Only [`Recorder::finish`](crate::Recorder::finish) creates a trace, and it
/// always holds at least one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace<S> {
    snapshots: Vec<Snapshot<S>>,
}

impl<S> Trace<S> {
    pub(crate) fn from_snapshots(snapshots: Vec<Snapshot<S>>) -> Self {
        assert!(!snapshots.is_empty(), "a trace needs at least one snapshot");
        Self { snapshots }
    }

    /// Number of snapshots (always at least 1).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Index of the final snapshot.
    pub fn last_index(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// Snapshot at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Snapshot<S>> {
        self.snapshots.get(index)
    }

    pub fn first(&self) -> &Snapshot<S> {
        &self.snapshots[0]
    }

    pub fn last(&self) -> &Snapshot<S> {
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn snapshots(&self) -> &[Snapshot<S>] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<S>> {
        self.snapshots.iter()
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a Snapshot<S>;
    type IntoIter = std::slice::Iter<'a, Snapshot<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
