//! Error types for stepwise-algorithms.

use thiserror::Error;

/// Result type for input parsing and trace building.
pub type Result<T> = std::result::Result<T, Error>;

/// Input rejected before any trace is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No values were supplied
    #[error("input is empty")]
    EmptyInput,

    /// A token is not an integer
    #[error("invalid number {token:?} at position {position}")]
    InvalidNumber { token: String, position: usize },

    /// Traversals of different lengths
    #[error("preorder has {preorder} values but inorder has {inorder}")]
    LengthMismatch { preorder: usize, inorder: usize },

    /// A value appears twice in a traversal
    #[error("value {0} appears more than once")]
    DuplicateValue(i64),

    /// Traversals hold different values
    #[error("preorder and inorder contain different values")]
    ValueSetMismatch,

    /// Same values, but no single tree has both traversals
    #[error("preorder and inorder are not traversals of the same tree")]
    InconsistentTraversals,

    /// Input that must be sorted is not
    #[error("input is not sorted: position {position} is smaller than the value before it")]
    Unsorted { position: usize },

    /// Unknown algorithm or variant name
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A required argument was not supplied
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}
