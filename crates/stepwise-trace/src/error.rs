//! Error types for stepwise-trace.

use thiserror::Error;

/// Result type for stepwise-trace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by trace inspection and configuration parsing.
///
/// Playback itself never fails: out-of-range steps and seeks clamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The frames shared by two consecutive snapshots differ.
    #[error("snapshot {index}: call stack frames changed below the top")]
    FrameMismatch { index: usize },

    /// More than one push or pop happened between two snapshots.
    #[error("snapshot {index}: call stack changed by {delta} frames in one step")]
    MultipleFrameChanges { index: usize, delta: usize },

    /// The stack is not empty at the start or end of the trace.
    #[error("snapshot {index}: call stack should be empty, has {depth} frames")]
    StackNotEmpty { index: usize, depth: usize },

    /// The stack emptied before the last snapshot.
    #[error("snapshot {index}: call stack emptied before the end of the trace")]
    StackEmptied { index: usize },

    /// A playback speed string could not be parsed.
    #[error("unknown playback speed: {0}")]
    UnknownSpeed(String),
}
