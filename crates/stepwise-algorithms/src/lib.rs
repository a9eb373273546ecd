//! Stepwise Algorithms
//!
//! Instrumented algorithms that record every logical step into a
//! [`Trace`](stepwise_trace::Trace) for playback.
//!
//! # Families
//!
//! - **AVL**: balanced construction from a sorted list, or sequential
//!   insertion with rotations
//! - **Reconstruct**: rebuild a binary tree from preorder and inorder
//! - **Search**: binary search, boundaries, exponential, monotonic predicates
//! - **Sort**: heap, insertion, pancake and selection sort
//!
//! Input is parsed and validated first; a family only runs on valid input
//! and always runs to completion.
//!
//! # Usage
//!
//! ```ignore
//! let trace = build_trace(&Request::Sort {
//!     values: "5,2,9,1".into(),
//!     algorithm: SortAlgorithm::Heap,
//! })?;
//! println!("{} steps", trace.len());
//! ```

pub mod avl;
mod error;
pub mod input;
pub mod reconstruct;
pub mod search;
pub mod sort;
pub mod tree;

pub use avl::{AvlMode, AvlState, Rotation, RotationCase, RotationType};
pub use error::{Error, Result};
pub use reconstruct::ReconstructState;
pub use search::{Boundaries, Comparison, Phase, Predicate, SearchState, SearchVariant};
pub use sort::{SortAlgorithm, SortState};
pub use tree::{BinaryTree, HeightConvention, TreeNode};

use serde::{Deserialize, Serialize};
use stepwise_trace::Trace;

/// Which family to run, on raw user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Request {
    Avl {
        values: String,
        #[serde(default)]
        mode: AvlMode,
    },
    Reconstruct {
        preorder: String,
        inorder: String,
    },
    Search {
        array: String,
        target: String,
        variant: SearchVariant,
    },
    Sort {
        values: String,
        algorithm: SortAlgorithm,
    },
}

impl Request {
    /// Build a request from command-line style arguments:
    ///
    /// - `avl [--insert] <values>`
    /// - `reconstruct <preorder> <inorder>`
    /// - `search <variant> <array> <target>`
    /// - `sort <algorithm> <values>`
    pub fn from_args<A: AsRef<str>>(args: &[A]) -> Result<Self> {
        let mut args = args.iter().map(AsRef::as_ref);
        let family = args.next().ok_or(Error::MissingArgument("family"))?;

        match family {
            "avl" => {
                let mut mode = AvlMode::Balanced;
                let mut values = args.next().ok_or(Error::MissingArgument("values"))?;
                if values == "--insert" {
                    mode = AvlMode::Insert;
                    values = args.next().ok_or(Error::MissingArgument("values"))?;
                }
                Ok(Request::Avl {
                    values: values.to_string(),
                    mode,
                })
            }
            "reconstruct" => Ok(Request::Reconstruct {
                preorder: args.next().ok_or(Error::MissingArgument("preorder"))?.to_string(),
                inorder: args.next().ok_or(Error::MissingArgument("inorder"))?.to_string(),
            }),
            "search" => {
                let variant = args.next().ok_or(Error::MissingArgument("variant"))?.parse()?;
                Ok(Request::Search {
                    variant,
                    array: args.next().ok_or(Error::MissingArgument("array"))?.to_string(),
                    target: args.next().ok_or(Error::MissingArgument("target"))?.to_string(),
                })
            }
            "sort" => {
                let algorithm = args.next().ok_or(Error::MissingArgument("algorithm"))?.parse()?;
                Ok(Request::Sort {
                    algorithm,
                    values: args.next().ok_or(Error::MissingArgument("values"))?.to_string(),
                })
            }
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// A trace from any family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", content = "snapshots", rename_all = "snake_case")]
pub enum AnyTrace {
    Avl(Trace<AvlState>),
    Reconstruct(Trace<ReconstructState>),
    Search(Trace<SearchState>),
    Sort(Trace<SortState>),
}

impl AnyTrace {
    pub fn len(&self) -> usize {
        match self {
            AnyTrace::Avl(t) => t.len(),
            AnyTrace::Reconstruct(t) => t.len(),
            AnyTrace::Search(t) => t.len(),
            AnyTrace::Sort(t) => t.len(),
        }
    }

    /// Traces are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Step descriptions in order.
    pub fn descriptions(&self) -> Vec<&str> {
        fn collect<S>(trace: &Trace<S>) -> Vec<&str> {
            trace.iter().map(|s| s.description.as_str()).collect()
        }
        match self {
            AnyTrace::Avl(t) => collect(t),
            AnyTrace::Reconstruct(t) => collect(t),
            AnyTrace::Search(t) => collect(t),
            AnyTrace::Sort(t) => collect(t),
        }
    }
}

/// Parse, validate and run one request.
pub fn build_trace(request: &Request) -> Result<AnyTrace> {
    let trace = match request {
        Request::Avl { values, mode } => AnyTrace::Avl(avl::build_trace(values, *mode)?),
        Request::Reconstruct { preorder, inorder } => {
            AnyTrace::Reconstruct(reconstruct::build_trace(preorder, inorder)?)
        }
        Request::Search {
            array,
            target,
            variant,
        } => AnyTrace::Search(search::build_trace(array, target, *variant)?),
        Request::Sort { values, algorithm } => AnyTrace::Sort(sort::build_trace(values, *algorithm)?),
    };
    tracing::debug!(snapshots = trace.len(), "trace built");
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requests() -> Vec<Request> {
        vec![
            Request::Avl {
                values: "5,3,8,1,4".into(),
                mode: AvlMode::Balanced,
            },
            Request::Avl {
                values: "1 2 3 4 5".into(),
                mode: AvlMode::Insert,
            },
            Request::Reconstruct {
                preorder: "3,9,20,15,7".into(),
                inorder: "9,3,15,20,7".into(),
            },
            Request::Search {
                array: "[5,7,7,8,8,10]".into(),
                target: "8".into(),
                variant: SearchVariant::FirstLast,
            },
            Request::Sort {
                values: "5,2,9,1".into(),
                algorithm: SortAlgorithm::Heap,
            },
        ]
    }

    #[test]
    fn every_family_builds() {
        for request in requests() {
            let trace = build_trace(&request).unwrap();
            assert!(trace.len() > 1, "{request:?}");
            assert_eq!(trace.descriptions().len(), trace.len());
        }
    }

    #[test]
    fn building_is_deterministic() {
        for request in requests() {
            assert_eq!(build_trace(&request).unwrap(), build_trace(&request).unwrap());
        }
    }

    #[test]
    fn indices_are_sequential() {
        let AnyTrace::Sort(trace) = build_trace(&requests()[4]).unwrap() else {
            panic!("expected a sort trace");
        };
        for (i, snapshot) in trace.iter().enumerate() {
            assert_eq!(snapshot.index, i);
        }
    }

    #[test]
    fn copies_never_alias_the_trace() {
        let AnyTrace::Sort(trace) = build_trace(&requests()[4]).unwrap() else {
            panic!("expected a sort trace");
        };
        let mut copy = trace.last().clone();
        copy.state.array.clear();
        copy.state.sorted.clear();
        assert_eq!(trace.last().state.array, vec![1, 2, 5, 9]);
        assert_eq!(trace.last().state.sorted.len(), 4);
    }

    #[test]
    fn validation_errors_surface() {
        let bad = Request::Reconstruct {
            preorder: "1,2".into(),
            inorder: "1,2,3".into(),
        };
        assert_eq!(
            build_trace(&bad),
            Err(Error::LengthMismatch {
                preorder: 2,
                inorder: 3
            })
        );

        let unsorted = Request::Search {
            array: "3 1 2".into(),
            target: "1".into(),
            variant: SearchVariant::Classic,
        };
        assert_eq!(build_trace(&unsorted), Err(Error::Unsorted { position: 1 }));
    }

    #[test]
    fn parses_command_line_requests() {
        assert_eq!(
            Request::from_args(&["avl", "--insert", "3,2,1"]).unwrap(),
            Request::Avl {
                values: "3,2,1".into(),
                mode: AvlMode::Insert
            }
        );
        assert_eq!(
            Request::from_args(&["search", "lower-bound", "1 3 5", "4"]).unwrap(),
            Request::Search {
                array: "1 3 5".into(),
                target: "4".into(),
                variant: SearchVariant::FirstTrue(Predicate::AtLeast)
            }
        );
        assert_eq!(
            Request::from_args(&["sort", "bubble", "1"]),
            Err(Error::UnknownAlgorithm("bubble".into()))
        );
        assert_eq!(
            Request::from_args(&["reconstruct", "1,2"]),
            Err(Error::MissingArgument("inorder"))
        );
        let none: [&str; 0] = [];
        assert_eq!(Request::from_args(&none), Err(Error::MissingArgument("family")));
    }

    #[test]
    fn traces_serialize_with_family_tag() {
        let trace = build_trace(&Request::Sort {
            values: "2,1".into(),
            algorithm: SortAlgorithm::Selection,
        })
        .unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["family"], "sort");
        let snapshots = json["snapshots"].as_array().unwrap();
        assert_eq!(snapshots.len(), trace.len());
        assert_eq!(snapshots[0]["index"], 0);
        assert_eq!(snapshots.last().unwrap()["state"]["array"], serde_json::json!([1, 2]));
    }

    #[test]
    fn requests_deserialize() {
        let request: Request = serde_json::from_str(
            r#"{"family": "search", "array": "1,2,3", "target": "2", "variant": "exponential"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::Search {
                array: "1,2,3".into(),
                target: "2".into(),
                variant: SearchVariant::Exponential
            }
        );
    }
}
