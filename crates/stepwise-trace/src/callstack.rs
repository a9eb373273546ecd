//! Explicit call stacks for recursive algorithms.
//!
//! Recursion is not suspended and resumed. Instead each snapshot carries the
//! list of active invocation frames, and entering or leaving a call shows up
//! as one push or one pop between consecutive snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::snapshot::Trace;

/// A half-open index range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Which child slot a recursive call fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Root,
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Root => f.write_str("root"),
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// One active invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// The range this call works on.
    pub span: Span,
    /// A second range for calls that walk two sequences at once.
    pub secondary: Option<Span>,
    /// Recursion depth; the outermost call is 0.
    pub depth: usize,
    pub side: Side,
}

/// Active frames, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a call.
    ///
    /// # Panics
    ///
    /// Panics if the frame's depth is not the current stack depth.
    pub fn push(&mut self, frame: Frame) {
        assert_eq!(
            frame.depth,
            self.frames.len(),
            "frame depth must match the stack depth"
        );
        self.frames.push(frame);
    }

    /// Leave the innermost call.
    ///
    /// # Panics
    ///
    /// Panics on an empty stack.
    pub fn pop(&mut self) -> Frame {
        self.frames.pop().expect("pop from an empty call stack")
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

/// States of recursive families expose their call stack.
pub trait HasCallStack {
    fn call_stack(&self) -> &CallStack;
}

/// A push or pop observed between two consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    /// `frame` was pushed; `index` is the snapshot where it first appears.
    Push { index: usize, frame: Frame },
    /// `frame` was popped; `index` is the first snapshot without it.
    Pop { index: usize, frame: Frame },
}

/// Reconstruct the push/pop history of a trace and check it is well nested.
///
/// The stack must be empty at the first and last snapshot and nowhere in
/// between. Consecutive snapshots may differ by at most one push or one pop
/// with every other frame unchanged.
pub fn stack_events<S: HasCallStack>(trace: &Trace<S>) -> Result<Vec<StackEvent>> {
    for snapshot in [trace.first(), trace.last()] {
        let depth = snapshot.state.call_stack().depth();
        if depth != 0 {
            return Err(Error::StackNotEmpty {
                index: snapshot.index,
                depth,
            });
        }
    }

    let last = trace.last_index();
    let mut events = Vec::new();
    for pair in trace.snapshots().windows(2) {
        let (before, after) = (pair[0].state.call_stack().frames(), pair[1].state.call_stack().frames());
        let index = pair[1].index;
        if after.is_empty() && index != last {
            return Err(Error::StackEmptied { index });
        }
        let shared = before.len().min(after.len());
        if before[..shared] != after[..shared] {
            return Err(Error::FrameMismatch { index });
        }
        match after.len().abs_diff(before.len()) {
            0 => {}
            1 if after.len() > before.len() => events.push(StackEvent::Push {
                index,
                frame: after[shared].clone(),
            }),
            1 => events.push(StackEvent::Pop {
                index,
                frame: before[shared].clone(),
            }),
            delta => return Err(Error::MultipleFrameChanges { index, delta }),
        }
    }
    Ok(events)
}
