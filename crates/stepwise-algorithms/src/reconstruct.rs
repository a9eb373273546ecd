//! Rebuilding a binary tree from its preorder and inorder traversals.
//!
//! The first preorder value of a range is the subtree root. Its position in
//! the matching inorder range splits the rest into left and right subtrees.
//!
//! Subtree heights here count edges: an empty subtree has height -1 and a
//! leaf height 0.

use serde::{Deserialize, Serialize};
use stepwise_trace::{CallStack, Frame, HasCallStack, Recorder, Side, Span, StepState, Trace};

use crate::error::Result;
use crate::input::{parse_traversals, Traversals};
use crate::tree::{BinaryTree, HeightConvention, NodeId, TreeArena};

const HEIGHTS: HeightConvention = HeightConvention::EmptyIsMinusOne;

/// Pseudocode listing; `source_line` is 1-based.
pub const PSEUDOCODE: &[&str] = &[
    "build(preStart, inStart, inEnd):",
    "  if inStart > inEnd: return null",
    "  root = Node(preorder[preStart])",
    "  inIndex = indexOf(inorder, root.value, inStart, inEnd)",
    "  leftSize = inIndex - inStart",
    "  root.left = build(preStart + 1, inStart, inIndex - 1)",
    "  root.right = build(preStart + 1 + leftSize, inIndex + 1, inEnd)",
    "  return root",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructState {
    pub preorder: Vec<i64>,
    pub inorder: Vec<i64>,
    pub tree: BinaryTree,
    pub call_stack: CallStack,
    /// Ranges of the innermost call.
    pub pre_range: Option<Span>,
    pub in_range: Option<Span>,
    pub root_value: Option<i64>,
    /// Where the root was found in `inorder`.
    pub in_index: Option<usize>,
    pub left_size: Option<usize>,
    /// Subtrees finished so far.
    pub completed: usize,
}

impl StepState for ReconstructState {
    fn check(&self) -> std::result::Result<(), String> {
        let n = self.preorder.len();
        if let (Some(pre), Some(within)) = (self.pre_range, self.in_range) {
            if pre.end > n || within.end > n {
                return Err(format!("ranges {pre} / {within} outside {n} values"));
            }
            if pre.len() != within.len() {
                return Err(format!("ranges {pre} and {within} differ in length"));
            }
            if let Some(k) = self.in_index {
                if !within.contains(k) {
                    return Err(format!("inorder index {k} outside {within}"));
                }
            }
        }
        Ok(())
    }
}

impl HasCallStack for ReconstructState {
    fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }
}

/// Parse and validate both traversals, then record the reconstruction.
pub fn build_trace(preorder: &str, inorder: &str) -> Result<Trace<ReconstructState>> {
    let traversals = parse_traversals(preorder, inorder)?;
    Ok(run(&traversals))
}

/// Record the reconstruction of validated traversals.
///
/// # Panics
///
/// Panics if a root is missing from its inorder range, which validated
/// traversals rule out.
pub(crate) fn run(traversals: &Traversals) -> Trace<ReconstructState> {
    let mut builder = Builder {
        recorder: Recorder::new(ReconstructState {
            preorder: traversals.preorder().to_vec(),
            inorder: traversals.inorder().to_vec(),
            tree: BinaryTree::default(),
            call_stack: CallStack::new(),
            pre_range: None,
            in_range: None,
            root_value: None,
            in_index: None,
            left_size: None,
            completed: 0,
        }),
        arena: TreeArena::new(),
        root: None,
    };
    builder.recorder.note(
        format!(
            "Rebuild from preorder {:?} and inorder {:?}",
            traversals.preorder(),
            traversals.inorder()
        ),
        None,
    );

    let n = traversals.len();
    builder.build(Span::new(0, n), Span::new(0, n), 0, Side::Root, None);
    builder.recorder.finish()
}

/// What the innermost call is looking at, restored after a child returns.
#[derive(Debug, Clone, Copy)]
struct Focus {
    pre_range: Span,
    in_range: Span,
    root_value: Option<i64>,
    in_index: Option<usize>,
    left_size: Option<usize>,
}

impl Focus {
    fn apply(self, s: &mut ReconstructState) {
        s.pre_range = Some(self.pre_range);
        s.in_range = Some(self.in_range);
        s.root_value = self.root_value;
        s.in_index = self.in_index;
        s.left_size = self.left_size;
    }
}

struct Builder {
    recorder: Recorder<ReconstructState>,
    arena: TreeArena,
    root: Option<NodeId>,
}

impl Builder {
    fn emit<F>(&mut self, description: String, line: u32, update: F)
    where
        F: FnOnce(&mut ReconstructState),
    {
        let tree = self.arena.materialize(self.root);
        self.recorder.record(description, Some(line), |s| {
            s.tree = tree;
            update(s);
        });
    }

    fn build(
        &mut self,
        pre: Span,
        within: Span,
        depth: usize,
        side: Side,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        let mut focus = Focus {
            pre_range: pre,
            in_range: within,
            root_value: None,
            in_index: None,
            left_size: None,
        };
        let frame = Frame {
            span: pre,
            secondary: Some(within),
            depth,
            side,
        };
        self.emit(
            format!("build {side} subtree: preorder {pre}, inorder {within}"),
            1,
            |s| {
                s.call_stack.push(frame);
                focus.apply(s);
            },
        );

        if within.is_empty() {
            self.emit(format!("Inorder range {within} is empty: no node"), 2, |_| {});
            self.leave("Return null".to_string(), 2);
            return None;
        }

        let state = self.recorder.state();
        let value = state.preorder[pre.start];
        let in_index = state.inorder[within.start..within.end]
            .iter()
            .position(|&v| v == value)
            .map(|offset| within.start + offset)
            .unwrap_or_else(|| panic!("root {value} not found in inorder range {within}"));

        let id = self.arena.alloc(value);
        match parent {
            Some(parent) => self.arena.attach(parent, side, Some(id)),
            None => self.root = Some(id),
        }
        focus.root_value = Some(value);
        self.emit(
            format!("Root is preorder[{}] = {value}", pre.start),
            3,
            |s| focus.apply(s),
        );

        focus.in_index = Some(in_index);
        self.emit(format!("Found {value} at inorder[{in_index}]"), 4, |s| {
            focus.apply(s)
        });

        let left_size = in_index - within.start;
        focus.left_size = Some(left_size);
        self.emit(
            format!(
                "leftSize = {in_index} - {} = {left_size}; right subtree has {} nodes",
                within.start,
                within.len() - left_size - 1
            ),
            5,
            |s| focus.apply(s),
        );

        let left_pre = Span::new(pre.start + 1, pre.start + 1 + left_size);
        let left_in = Span::new(within.start, in_index);
        self.emit(
            format!("Build left subtree of {value}: preorder {left_pre}, inorder {left_in}"),
            6,
            |_| {},
        );
        let left = self.build(left_pre, left_in, depth + 1, Side::Left, Some(id));
        self.emit(format!("Left subtree of {value} is built"), 6, |s| focus.apply(s));

        let right_pre = Span::new(left_pre.end, pre.end);
        let right_in = Span::new(in_index + 1, within.end);
        self.emit(
            format!("Build right subtree of {value}: preorder {right_pre}, inorder {right_in}"),
            7,
            |_| {},
        );
        let right = self.build(right_pre, right_in, depth + 1, Side::Right, Some(id));
        self.emit(format!("Right subtree of {value} is built"), 7, |s| focus.apply(s));

        let lh = self.arena.height(left, HEIGHTS);
        let rh = self.arena.height(right, HEIGHTS);
        let height = 1 + lh.max(rh);
        let node = self.arena.node_mut(id);
        node.height = Some(height);
        node.balance = Some(lh - rh);
        self.emit(
            format!("Subtree rooted at {value} is complete (height {height})"),
            8,
            |s| s.completed += 1,
        );

        let message = if depth == 0 {
            format!("Tree rebuilt with root {value}")
        } else {
            format!("Return node {value}")
        };
        self.leave(message, 8);
        Some(id)
    }

    fn leave(&mut self, description: String, line: u32) {
        self.emit(description, line, |s| {
            s.call_stack.pop();
            s.pre_range = s.call_stack.top().map(|f| f.span);
            s.in_range = s.call_stack.top().and_then(|f| f.secondary);
            s.root_value = None;
            s.in_index = None;
            s.left_size = None;
        });
    }
}
