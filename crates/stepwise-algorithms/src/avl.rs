//! AVL trees, step by step.
//!
//! Two modes:
//! - [`AvlMode::Balanced`] sorts the input and builds a balanced tree by
//!   recursive midpoint splitting. Imbalance is still checked at every node
//!   and would be annotated with its rotation case, but the tree is never
//!   re-linked (it is balanced by construction).
//! - [`AvlMode::Insert`] inserts values one at a time and repairs each
//!   imbalance with real rotations.
//!
//! Heights count nodes: an empty subtree has height 0 and a leaf height 1.
//! Balance factor is `height(left) - height(right)`.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepwise_trace::{CallStack, Frame, HasCallStack, Recorder, Side, Span, StepState, Trace};

use crate::error::Result;
use crate::input::parse_values;
use crate::tree::{BinaryTree, HeightConvention, NodeId, TreeArena};

const HEIGHTS: HeightConvention = HeightConvention::EmptyIsZero;

/// Pseudocode for balanced construction; `source_line` is 1-based.
pub const PSEUDOCODE: &[&str] = &[
    "sorted = sort(values)",
    "build(lo, hi):",
    "  if lo > hi: return null",
    "  mid = (lo + hi) / 2",
    "  node = Node(sorted[mid])",
    "  node.left = build(lo, mid - 1)",
    "  node.right = build(mid + 1, hi)",
    "  node.height = 1 + max(height(left), height(right))",
    "  balance = height(left) - height(right)",
    "  if |balance| > 1: classify rotation case",
    "  return node",
];

/// Pseudocode for sequential insertion.
pub const INSERT_PSEUDOCODE: &[&str] = &[
    "insert(node, v):",
    "  if node is null: return Node(v)",
    "  if v < node.value: node.left = insert(node.left, v)",
    "  else if v > node.value: node.right = insert(node.right, v)",
    "  else: return node",
    "  update height and balance of node",
    "  if |balance| > 1: classify by heavy child's balance",
    "  LL: return rotateRight(node)",
    "  LR: node.left = rotateLeft(node.left); return rotateRight(node)",
    "  RR: return rotateLeft(node)",
    "  RL: node.right = rotateRight(node.right); return rotateLeft(node)",
    "  return node",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvlMode {
    #[default]
    Balanced,
    Insert,
}

/// The four imbalance shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationCase {
    #[serde(rename = "LL")]
    LeftLeft,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "RR")]
    RightRight,
    #[serde(rename = "RL")]
    RightLeft,
}

impl RotationCase {
    /// Classify an imbalance from the node's balance and its heavy child's.
    /// Returns `None` when `|balance| <= 1`.
    pub fn classify(balance: i32, heavy_child_balance: i32) -> Option<Self> {
        if balance > 1 {
            Some(if heavy_child_balance >= 0 {
                RotationCase::LeftLeft
            } else {
                RotationCase::LeftRight
            })
        } else if balance < -1 {
            Some(if heavy_child_balance <= 0 {
                RotationCase::RightRight
            } else {
                RotationCase::RightLeft
            })
        } else {
            None
        }
    }

    /// The rotation that repairs this case.
    pub fn rotation_type(self) -> RotationType {
        match self {
            RotationCase::LeftLeft => RotationType::Right,
            RotationCase::LeftRight => RotationType::LeftRight,
            RotationCase::RightRight => RotationType::Left,
            RotationCase::RightLeft => RotationType::RightLeft,
        }
    }
}

impl fmt::Display for RotationCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RotationCase::LeftLeft => "LL",
            RotationCase::LeftRight => "LR",
            RotationCase::RightRight => "RR",
            RotationCase::RightLeft => "RL",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationType {
    Right,
    Left,
    LeftRight,
    RightLeft,
}

impl fmt::Display for RotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RotationType::Right => "right rotation",
            RotationType::Left => "left rotation",
            RotationType::LeftRight => "left-right rotation",
            RotationType::RightLeft => "right-left rotation",
        })
    }
}

/// An imbalance found at one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub rotation_type: RotationType,
    pub unbalanced_node: i64,
    pub balance_factor: i32,
    pub case: RotationCase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvlState {
    pub mode: AvlMode,
    /// Values as the user gave them.
    pub input: Vec<i64>,
    /// Sorted values (balanced mode only).
    pub sorted: Vec<i64>,
    pub tree: BinaryTree,
    pub call_stack: CallStack,
    /// Range of `sorted` the innermost build call covers.
    pub range: Option<Span>,
    pub mid: Option<usize>,
    /// Value of the node in focus.
    pub current: Option<i64>,
    /// Set only on the snapshot that reports an imbalance.
    pub rotation: Option<Rotation>,
    pub rotation_count: usize,
    /// Values inserted so far (insert mode only).
    pub inserted: usize,
}

impl AvlState {
    fn new(mode: AvlMode, input: &[i64]) -> Self {
        Self {
            mode,
            input: input.to_vec(),
            sorted: Vec::new(),
            tree: BinaryTree::default(),
            call_stack: CallStack::new(),
            range: None,
            mid: None,
            current: None,
            rotation: None,
            rotation_count: 0,
            inserted: 0,
        }
    }
}

impl StepState for AvlState {
    fn check(&self) -> std::result::Result<(), String> {
        if let Some(range) = self.range {
            if range.end > self.sorted.len() {
                return Err(format!("range {range} outside {} sorted values", self.sorted.len()));
            }
            if let Some(mid) = self.mid {
                if !range.contains(mid) {
                    return Err(format!("mid {mid} outside range {range}"));
                }
            }
        }
        if self.inserted > self.input.len() {
            return Err(format!("{} of {} values inserted", self.inserted, self.input.len()));
        }
        Ok(())
    }
}

impl HasCallStack for AvlState {
    fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }
}

/// Parse `raw` and record an AVL run over it.
pub fn build_trace(raw: &str, mode: AvlMode) -> Result<Trace<AvlState>> {
    let values = parse_values(raw)?;
    Ok(run(&values, mode))
}

/// Record an AVL run over validated, non-empty input.
pub(crate) fn run(values: &[i64], mode: AvlMode) -> Trace<AvlState> {
    let mut builder = Builder {
        recorder: Recorder::new(AvlState::new(mode, values)),
        arena: TreeArena::new(),
        root: None,
    };
    match mode {
        AvlMode::Balanced => builder.balanced(values),
        AvlMode::Insert => builder.insert_all(values),
    }
    builder.recorder.finish()
}

struct Builder {
    recorder: Recorder<AvlState>,
    arena: TreeArena,
    root: Option<NodeId>,
}

impl Builder {
    /// Record a step with the live tree copied in and the rotation marker
    /// cleared.
    fn emit<F>(&mut self, description: String, line: u32, update: F)
    where
        F: FnOnce(&mut AvlState),
    {
        let tree = self.arena.materialize(self.root);
        self.recorder.record(description, Some(line), |s| {
            s.tree = tree;
            s.rotation = None;
            update(s);
        });
    }

    fn enter(&mut self, description: String, line: u32, frame: Frame) {
        self.emit(description, line, |s| {
            s.range = if s.sorted.is_empty() { None } else { Some(frame.span) };
            s.mid = None;
            s.current = None;
            s.call_stack.push(frame);
        });
    }

    fn leave(&mut self, description: String, line: u32) {
        self.emit(description, line, |s| {
            s.call_stack.pop();
            s.range = if s.sorted.is_empty() {
                None
            } else {
                s.call_stack.top().map(|f| f.span)
            };
            s.mid = None;
            s.current = None;
        });
    }

    fn relink(&mut self, parent: Option<NodeId>, side: Side, child: NodeId) {
        match parent {
            Some(parent) => self.arena.attach(parent, side, Some(child)),
            None => self.root = Some(child),
        }
    }

    /// Recompute stored height and balance of `id`; returns the balance.
    fn update(&mut self, id: NodeId) -> i32 {
        let node = self.arena.node(id);
        let (left, right) = (node.left, node.right);
        let lh = self.arena.height(left, HEIGHTS);
        let rh = self.arena.height(right, HEIGHTS);
        let node = self.arena.node_mut(id);
        node.height = Some(1 + lh.max(rh));
        node.balance = Some(lh - rh);
        lh - rh
    }

    fn child_balance(&self, id: NodeId, balance: i32) -> i32 {
        let node = self.arena.node(id);
        let heavy = if balance > 0 { node.left } else { node.right };
        heavy
            .and_then(|child| self.arena.node(child).balance)
            .unwrap_or(0)
    }

    /// Classify an imbalance at `id` and record it. Returns the case, if any.
    fn check_rotation(&mut self, id: NodeId, balance: i32, line: u32) -> Option<RotationCase> {
        let case = RotationCase::classify(balance, self.child_balance(id, balance))?;
        let rotation = Rotation {
            rotation_type: case.rotation_type(),
            unbalanced_node: self.arena.value(id),
            balance_factor: balance,
            case,
        };
        tracing::debug!(node = rotation.unbalanced_node, %case, "imbalance found");
        self.emit(
            format!(
                "Node {} has balance {balance}: case {case}, needs a {}",
                rotation.unbalanced_node, rotation.rotation_type
            ),
            line,
            |s| {
                s.current = Some(rotation.unbalanced_node);
                s.rotation = Some(rotation);
                s.rotation_count += 1;
            },
        );
        Some(case)
    }

    // Balanced construction

    fn balanced(&mut self, values: &[i64]) {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        self.recorder.record(format!("Sorted input: {sorted:?}"), Some(1), |s| {
            s.sorted = sorted;
        });

        // The root call's return is the final snapshot.
        self.build(Span::new(0, values.len()), 0, Side::Root, None);
    }

    fn build(&mut self, span: Span, depth: usize, side: Side, parent: Option<NodeId>) -> Option<NodeId> {
        let frame = Frame {
            span,
            secondary: None,
            depth,
            side,
        };
        self.enter(format!("build {span} ({side} subtree)"), 2, frame);

        if span.is_empty() {
            self.emit(format!("Range {span} is empty: no node, height 0"), 3, |_| {});
            self.leave("Return null".to_string(), 3);
            return None;
        }

        let mid = span.start + (span.len() - 1) / 2;
        let value = self.recorder.state().sorted[mid];
        let id = self.arena.alloc(value);
        self.relink(parent, side, id);
        self.emit(format!("mid = {mid}: create node {value}"), 5, |s| {
            s.mid = Some(mid);
            s.current = Some(value);
        });

        let left_span = Span::new(span.start, mid);
        let right_span = Span::new(mid + 1, span.end);
        let focus = move |s: &mut AvlState| {
            s.range = Some(span);
            s.mid = Some(mid);
            s.current = Some(value);
        };

        self.emit(format!("Build left subtree of {value} over {left_span}"), 6, |_| {});
        let left = self.build(left_span, depth + 1, Side::Left, Some(id));
        self.emit(format!("Left subtree of {value} finished"), 6, focus);

        self.emit(format!("Build right subtree of {value} over {right_span}"), 7, |_| {});
        let right = self.build(right_span, depth + 1, Side::Right, Some(id));
        self.emit(format!("Right subtree of {value} finished"), 7, focus);

        let balance = self.update(id);
        let height = self.arena.height(Some(id), HEIGHTS);
        let (lh, rh) = (self.arena.height(left, HEIGHTS), self.arena.height(right, HEIGHTS));
        self.emit(
            format!("Node {value}: height 1 + max({lh}, {rh}) = {height}, balance {lh} - {rh} = {balance}"),
            9,
            |_| {},
        );

        self.check_rotation(id, balance, 10);

        let message = if depth == 0 {
            let count = self.recorder.state().sorted.len();
            format!("Balanced tree complete: {count} nodes, height {height}")
        } else {
            format!("Return node {value} (height {height})")
        };
        self.leave(message, 11);
        Some(id)
    }

    // Sequential insertion

    fn insert_all(&mut self, values: &[i64]) {
        self.recorder.note("Start with an empty tree", None);
        // One frame spans the whole run; each insert call nests under it.
        let run = Frame {
            span: Span::new(0, values.len()),
            secondary: None,
            depth: 0,
            side: Side::Root,
        };
        self.enter(format!("Insert {} values in order", values.len()), 1, run);

        for (i, &value) in values.iter().enumerate() {
            self.emit(format!("Insert {value}"), 1, |s| s.current = Some(value));
            self.insert(self.root, value, Span::new(i, i + 1), 1, Side::Root, None);
            self.emit(format!("{value} done"), 12, |s| {
                s.inserted = i + 1;
                s.current = None;
            });
        }

        let tree = self.arena.materialize(self.root);
        let height = tree.height(HEIGHTS);
        self.leave(
            format!("AVL tree complete: {} nodes, height {height}", tree.len()),
            12,
        );
    }

    fn insert(
        &mut self,
        node: Option<NodeId>,
        value: i64,
        span: Span,
        depth: usize,
        side: Side,
        parent: Option<NodeId>,
    ) {
        let frame = Frame {
            span,
            secondary: None,
            depth,
            side,
        };
        let at = match node {
            Some(id) => format!("node {}", self.arena.value(id)),
            None => "an empty slot".to_string(),
        };
        self.enter(format!("insert({value}) at {at}"), 1, frame);

        let Some(id) = node else {
            let leaf = self.arena.alloc(value);
            self.update(leaf);
            self.relink(parent, side, leaf);
            self.emit(format!("Create leaf {value}"), 2, |s| s.current = Some(value));
            self.leave(format!("Return leaf {value}"), 2);
            return;
        };

        let here = self.arena.value(id);
        if value < here {
            self.emit(format!("{value} < {here}: go left"), 3, |s| s.current = Some(here));
            let child = self.arena.node(id).left;
            self.insert(child, value, span, depth + 1, Side::Left, Some(id));
        } else if value > here {
            self.emit(format!("{value} > {here}: go right"), 4, |s| s.current = Some(here));
            let child = self.arena.node(id).right;
            self.insert(child, value, span, depth + 1, Side::Right, Some(id));
        } else {
            self.emit(format!("{value} is already in the tree: ignore"), 5, |s| {
                s.current = Some(here)
            });
            self.leave(format!("Return node {here}"), 5);
            return;
        }

        let balance = self.update(id);
        let height = self.arena.height(Some(id), HEIGHTS);
        self.emit(format!("Node {here}: height {height}, balance {balance}"), 6, |s| {
            s.current = Some(here)
        });

        let top = match self.check_rotation(id, balance, 7) {
            Some(case) => self.rotate(id, case, side, parent),
            None => id,
        };
        let top_value = self.arena.value(top);
        self.leave(format!("Return node {top_value}"), 12);
    }

    /// Repair the imbalance at `id` and return the subtree's new root.
    fn rotate(&mut self, id: NodeId, case: RotationCase, side: Side, parent: Option<NodeId>) -> NodeId {
        match case {
            RotationCase::LeftLeft => self.rotate_right(id, side, parent, 8),
            RotationCase::RightRight => self.rotate_left(id, side, parent, 10),
            RotationCase::LeftRight => {
                let child = self.arena.node(id).left.expect("LR case without a left child");
                self.rotate_left(child, Side::Left, Some(id), 9);
                self.rotate_right(id, side, parent, 9)
            }
            RotationCase::RightLeft => {
                let child = self.arena.node(id).right.expect("RL case without a right child");
                self.rotate_right(child, Side::Right, Some(id), 11);
                self.rotate_left(id, side, parent, 11)
            }
        }
    }

    fn rotate_right(&mut self, y: NodeId, side: Side, parent: Option<NodeId>, line: u32) -> NodeId {
        let x = self.arena.node(y).left.expect("right rotation without a left child");
        let moved = self.arena.node(x).right;
        self.arena.attach(y, Side::Left, moved);
        self.arena.attach(x, Side::Right, Some(y));
        self.update(y);
        self.update(x);
        self.relink(parent, side, x);

        let (xv, yv) = (self.arena.value(x), self.arena.value(y));
        self.emit(format!("Rotate right at {yv}: {xv} moves up"), line, |s| {
            s.current = Some(xv)
        });
        x
    }

    fn rotate_left(&mut self, x: NodeId, side: Side, parent: Option<NodeId>, line: u32) -> NodeId {
        let y = self.arena.node(x).right.expect("left rotation without a right child");
        let moved = self.arena.node(y).left;
        self.arena.attach(x, Side::Right, moved);
        self.arena.attach(y, Side::Left, Some(x));
        self.update(x);
        self.update(y);
        self.relink(parent, side, y);

        let (xv, yv) = (self.arena.value(x), self.arena.value(y));
        self.emit(format!("Rotate left at {xv}: {yv} moves up"), line, |s| {
            s.current = Some(yv)
        });
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_trace::stack_events;

    fn final_tree(trace: &Trace<AvlState>) -> &BinaryTree {
        &trace.last().state.tree
    }

    #[test]
    fn classify_cases() {
        assert_eq!(RotationCase::classify(2, 1), Some(RotationCase::LeftLeft));
        assert_eq!(RotationCase::classify(2, 0), Some(RotationCase::LeftLeft));
        assert_eq!(RotationCase::classify(2, -1), Some(RotationCase::LeftRight));
        assert_eq!(RotationCase::classify(-2, -1), Some(RotationCase::RightRight));
        assert_eq!(RotationCase::classify(-2, 0), Some(RotationCase::RightRight));
        assert_eq!(RotationCase::classify(-2, 1), Some(RotationCase::RightLeft));
        assert_eq!(RotationCase::classify(1, -1), None);
        assert_eq!(RotationCase::classify(0, 0), None);
    }

    #[test]
    fn seven_sorted_values_give_height_three() {
        let trace = run(&[1, 2, 3, 4, 5, 6, 7], AvlMode::Balanced);
        let tree = final_tree(&trace);

        assert_eq!(tree.height(HeightConvention::EmptyIsZero), 3);
        assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.preorder(), vec![4, 2, 1, 3, 6, 5, 7]);
        for node in tree.nodes() {
            let balance = node.balance.expect("balance recorded");
            assert!((-1..=1).contains(&balance), "node {} has balance {balance}", node.value);
        }
        assert_eq!(tree.root.as_ref().and_then(|n| n.height), Some(3));
    }

    #[test]
    fn sorting_is_the_first_step() {
        let trace = run(&[5, 3, 8, 1], AvlMode::Balanced);
        let first = trace.first();
        assert_eq!(first.state.sorted, vec![1, 3, 5, 8]);
        assert_eq!(first.state.input, vec![5, 3, 8, 1]);
        assert_eq!(first.source_line, Some(1));
        assert!(first.state.tree.is_empty());

        // Even count: mid = floor((0 + 3) / 2) = 1
        assert_eq!(final_tree(&trace).preorder(), vec![3, 1, 5, 8]);
    }

    #[test]
    fn balanced_mode_never_rotates() {
        let trace = run(&[9, 4, 7, 1, 3, 8, 2, 6, 5, 10], AvlMode::Balanced);
        assert!(trace.iter().all(|s| s.state.rotation.is_none()));
        assert_eq!(trace.last().state.rotation_count, 0);
        assert!(final_tree(&trace).is_balanced());
    }

    #[test]
    fn balanced_mode_call_stack_is_well_nested() {
        let trace = run(&[1, 2, 3, 4, 5, 6, 7], AvlMode::Balanced);
        let events = stack_events(&trace).unwrap();
        // 7 nodes + 8 empty ranges, each pushed and popped once
        assert_eq!(events.len(), 30);
        let max_depth = trace.iter().map(|s| s.state.call_stack.depth()).max();
        assert_eq!(max_depth, Some(4));
        // Only the first and last snapshots have an empty stack
        let empty = trace.iter().filter(|s| s.state.call_stack.is_empty()).count();
        assert_eq!(empty, 2);
    }

    #[test]
    fn tree_grows_as_nodes_are_created() {
        let trace = run(&[1, 2, 3], AvlMode::Balanced);
        let sizes: Vec<usize> = trace.iter().map(|s| s.state.tree.len()).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(sizes.last(), Some(&3));
    }

    #[test]
    fn duplicates_allowed_in_balanced_mode() {
        let trace = run(&[2, 2, 1], AvlMode::Balanced);
        assert_eq!(final_tree(&trace).inorder(), vec![1, 2, 2]);
    }

    fn rotations(trace: &Trace<AvlState>) -> Vec<Rotation> {
        trace.iter().filter_map(|s| s.state.rotation.clone()).collect()
    }

    #[test]
    fn insert_ascending_rotates_left() {
        let trace = run(&[1, 2, 3], AvlMode::Insert);
        let found = rotations(&trace);
        assert_eq!(
            found,
            vec![Rotation {
                rotation_type: RotationType::Left,
                unbalanced_node: 1,
                balance_factor: -2,
                case: RotationCase::RightRight,
            }]
        );
        assert_eq!(final_tree(&trace).preorder(), vec![2, 1, 3]);
    }

    #[test]
    fn insert_covers_all_four_cases() {
        let cases = [
            (vec![3, 2, 1], RotationCase::LeftLeft),
            (vec![3, 1, 2], RotationCase::LeftRight),
            (vec![1, 2, 3], RotationCase::RightRight),
            (vec![1, 3, 2], RotationCase::RightLeft),
        ];
        for (values, expected) in cases {
            let trace = run(&values, AvlMode::Insert);
            let found = rotations(&trace);
            assert_eq!(found.len(), 1, "{values:?}");
            assert_eq!(found[0].case, expected, "{values:?}");
            assert_eq!(final_tree(&trace).preorder(), vec![2, 1, 3], "{values:?}");
        }
    }

    #[test]
    fn insert_keeps_tree_balanced() {
        let values: Vec<i64> = (1..=15).collect();
        let trace = run(&values, AvlMode::Insert);
        let tree = final_tree(&trace);
        assert!(tree.is_balanced());
        assert_eq!(tree.height(HeightConvention::EmptyIsZero), 4);
        assert_eq!(tree.inorder(), values);
        assert_eq!(trace.last().state.inserted, 15);
        assert!(trace.last().state.rotation_count > 0);
        stack_events(&trace).unwrap();

        let empty: Vec<usize> = trace
            .iter()
            .filter(|s| s.state.call_stack.is_empty())
            .map(|s| s.index)
            .collect();
        assert_eq!(empty, vec![0, trace.last_index()]);
    }

    #[test]
    fn insert_stack_stays_open_between_values() {
        let trace = run(&[3, 1, 2], AvlMode::Insert);
        stack_events(&trace).unwrap();
        let last = trace.last_index();
        for snapshot in &trace {
            let depth = snapshot.state.call_stack.depth();
            if snapshot.index == 0 || snapshot.index == last {
                assert_eq!(depth, 0);
            } else {
                assert!(depth >= 1, "snapshot {} has an empty stack", snapshot.index);
            }
        }
        assert_eq!(trace.last().description, "AVL tree complete: 3 nodes, height 2");
    }

    #[test]
    fn insert_ignores_duplicates() {
        let trace = run(&[2, 1, 2], AvlMode::Insert);
        assert_eq!(final_tree(&trace).inorder(), vec![1, 2]);
        assert!(trace.iter().any(|s| s.description.contains("already in the tree")));
    }

    #[test]
    fn rotation_marker_is_not_carried_forward() {
        let trace = run(&[1, 2, 3], AvlMode::Insert);
        let at = trace.iter().position(|s| s.state.rotation.is_some()).unwrap();
        assert!(trace.get(at + 1).unwrap().state.rotation.is_none());
        assert_eq!(trace.get(at + 1).unwrap().state.rotation_count, 1);
    }

    #[test]
    fn build_trace_rejects_bad_input() {
        assert!(build_trace("1, x", AvlMode::Balanced).is_err());
        assert!(build_trace("", AvlMode::Insert).is_err());
        assert!(build_trace("4 2 6", AvlMode::Balanced).is_ok());
    }

    #[test]
    fn traces_are_deterministic() {
        assert_eq!(run(&[4, 9, 1, 7], AvlMode::Insert), run(&[4, 9, 1, 7], AvlMode::Insert));
        assert_eq!(run(&[4, 9, 1, 7], AvlMode::Balanced), run(&[4, 9, 1, 7], AvlMode::Balanced));
    }
}
