//! Append-only recorder that instrumented algorithms report into.

use crate::snapshot::{Snapshot, StepState, Trace};

/// Builds a [`Trace`] one snapshot at a time.
///
/// The recorder keeps the last full state. Each [`record`](Self::record)
/// applies a delta to that state, checks it, and appends a deep copy. Fields
/// the delta does not touch carry forward unchanged.
#[derive(Debug)]
pub struct Recorder<S> {
    current: S,
    snapshots: Vec<Snapshot<S>>,
}

impl<S: StepState> Recorder<S> {
    /// Create a recorder whose first delta applies to `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            snapshots: Vec::new(),
        }
    }

    /// Apply `update` to the carried state and append the result.
    ///
    /// # Panics
    ///
    /// Panics if the updated state fails [`StepState::check`]. That is a bug
    /// in the instrumentation, never a user-facing condition.
    pub fn record<F>(&mut self, description: impl Into<String>, source_line: Option<u32>, update: F)
    where
        F: FnOnce(&mut S),
    {
        update(&mut self.current);
        self.push(description.into(), source_line);
    }

    /// Append the carried state unchanged under a new description.
    pub fn note(&mut self, description: impl Into<String>, source_line: Option<u32>) {
        self.push(description.into(), source_line);
    }

    fn push(&mut self, description: String, source_line: Option<u32>) {
        let index = self.snapshots.len();
        if let Err(problem) = self.current.check() {
            panic!("snapshot {index} ({description}) is inconsistent: {problem}");
        }
        tracing::trace!(index, %description, "snapshot recorded");
        self.snapshots.push(Snapshot {
            index,
            description,
            source_line,
            state: self.current.clone(),
        });
    }

    /// The state as of the most recent snapshot (or the initial state).
    pub fn state(&self) -> &S {
        &self.current
    }

    /// Number of snapshots recorded so far.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Seal the recording into an immutable trace.
    ///
    /// # Panics
    ///
    /// Panics if nothing was recorded.
    pub fn finish(self) -> Trace<S> {
        tracing::debug!(snapshots = self.snapshots.len(), "trace finished");
        Trace::from_snapshots(self.snapshots)
    }
}
