//! Binary trees for the tree-building families.
//!
//! Algorithms work on a [`TreeArena`], where children are indices and a
//! rotation is a matter of rewriting a few links. Snapshots hold a
//! [`BinaryTree`] materialised from the arena, which owns every node and so
//! never aliases the live tree.

use serde::{Deserialize, Serialize};
use stepwise_trace::Side;

/// Height of an empty subtree.
///
/// The AVL family counts a leaf as height 1 (empty = 0) and its balance
/// arithmetic relies on that. The reconstruction family counts edges
/// (empty = -1, leaf = 0). Each family states its convention instead of
/// sharing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightConvention {
    EmptyIsZero,
    EmptyIsMinusOne,
}

impl HeightConvention {
    pub fn empty(self) -> i32 {
        match self {
            HeightConvention::EmptyIsZero => 0,
            HeightConvention::EmptyIsMinusOne => -1,
        }
    }
}

/// A node of a materialised tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: i64,
    /// Set once the subtree below this node is complete.
    pub height: Option<i32>,
    pub balance: Option<i32>,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

/// An owned binary tree, possibly partially built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryTree {
    pub root: Option<Box<TreeNode>>,
}

impl BinaryTree {
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        fn count(node: Option<&TreeNode>) -> usize {
            node.map_or(0, |n| 1 + count(n.left.as_deref()) + count(n.right.as_deref()))
        }
        count(self.root.as_deref())
    }

    pub fn inorder(&self) -> Vec<i64> {
        fn walk(node: Option<&TreeNode>, out: &mut Vec<i64>) {
            if let Some(n) = node {
                walk(n.left.as_deref(), out);
                out.push(n.value);
                walk(n.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(self.root.as_deref(), &mut out);
        out
    }

    pub fn preorder(&self) -> Vec<i64> {
        fn walk(node: Option<&TreeNode>, out: &mut Vec<i64>) {
            if let Some(n) = node {
                out.push(n.value);
                walk(n.left.as_deref(), out);
                walk(n.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(self.root.as_deref(), &mut out);
        out
    }

    /// Structural height under `convention`, ignoring stored heights.
    pub fn height(&self, convention: HeightConvention) -> i32 {
        fn measure(node: Option<&TreeNode>, convention: HeightConvention) -> i32 {
            match node {
                None => convention.empty(),
                Some(n) => {
                    1 + measure(n.left.as_deref(), convention)
                        .max(measure(n.right.as_deref(), convention))
                }
            }
        }
        measure(self.root.as_deref(), convention)
    }

    /// Whether every node's subtrees differ in height by at most one.
    pub fn is_balanced(&self) -> bool {
        // Height with empty = 0, or None when a subtree is out of balance.
        fn check(node: Option<&TreeNode>) -> Option<i32> {
            match node {
                None => Some(0),
                Some(n) => {
                    let left = check(n.left.as_deref())?;
                    let right = check(n.right.as_deref())?;
                    ((left - right).abs() <= 1).then_some(1 + left.max(right))
                }
            }
        }
        check(self.root.as_deref()).is_some()
    }

    /// Every node in preorder.
    pub fn nodes(&self) -> Vec<&TreeNode> {
        fn walk<'a>(node: Option<&'a TreeNode>, out: &mut Vec<&'a TreeNode>) {
            if let Some(n) = node {
                out.push(n);
                walk(n.left.as_deref(), out);
                walk(n.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(self.root.as_deref(), &mut out);
        out
    }
}

/// Index of a node in a [`TreeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaNode {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub height: Option<i32>,
    pub balance: Option<i32>,
}

/// The live tree an algorithm mutates.
#[derive(Debug, Clone, Default)]
pub struct TreeArena {
    nodes: Vec<ArenaNode>,
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node.
    pub fn alloc(&mut self, value: i64) -> NodeId {
        self.nodes.push(ArenaNode {
            value,
            left: None,
            right: None,
            height: None,
            balance: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &ArenaNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ArenaNode {
        &mut self.nodes[id.0]
    }

    pub fn value(&self, id: NodeId) -> i64 {
        self.nodes[id.0].value
    }

    /// Link `child` under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `side` is [`Side::Root`].
    pub fn attach(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(parent);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
            Side::Root => panic!("cannot attach a child on the root side"),
        }
    }

    /// Stored height of `id`, or the empty height for `None`.
    pub fn height(&self, id: Option<NodeId>, convention: HeightConvention) -> i32 {
        match id {
            Some(id) => self
                .node(id)
                .height
                .expect("height read before the subtree was measured"),
            None => convention.empty(),
        }
    }

    /// Copy the tree under `root` into an owned [`BinaryTree`].
    pub fn materialize(&self, root: Option<NodeId>) -> BinaryTree {
        BinaryTree {
            root: root.map(|id| Box::new(self.copy_node(id))),
        }
    }

    fn copy_node(&self, id: NodeId) -> TreeNode {
        let node = self.node(id);
        TreeNode {
            value: node.value,
            height: node.height,
            balance: node.balance,
            left: node.left.map(|child| Box::new(self.copy_node(child))),
            right: node.right.map(|child| Box::new(self.copy_node(child))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 with children 1 and 3.
    fn small_arena() -> (TreeArena, NodeId) {
        let mut arena = TreeArena::new();
        let root = arena.alloc(2);
        let left = arena.alloc(1);
        let right = arena.alloc(3);
        arena.attach(root, Side::Left, Some(left));
        arena.attach(root, Side::Right, Some(right));
        (arena, root)
    }

    #[test]
    fn traversals_of_materialized_tree() {
        let (arena, root) = small_arena();
        let tree = arena.materialize(Some(root));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.inorder(), vec![1, 2, 3]);
        assert_eq!(tree.preorder(), vec![2, 1, 3]);
        assert_eq!(tree.nodes().len(), 3);
    }

    #[test]
    fn height_conventions_differ_by_one() {
        let (arena, root) = small_arena();
        let tree = arena.materialize(Some(root));
        assert_eq!(tree.height(HeightConvention::EmptyIsZero), 2);
        assert_eq!(tree.height(HeightConvention::EmptyIsMinusOne), 1);

        let empty = BinaryTree::default();
        assert_eq!(empty.height(HeightConvention::EmptyIsZero), 0);
        assert_eq!(empty.height(HeightConvention::EmptyIsMinusOne), -1);
    }

    #[test]
    fn materialized_tree_is_independent() {
        let (mut arena, root) = small_arena();
        let before = arena.materialize(Some(root));
        arena.attach(root, Side::Right, None);
        let after = arena.materialize(Some(root));

        assert_eq!(before.len(), 3);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn balance_check() {
        let mut arena = TreeArena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let c = arena.alloc(3);
        arena.attach(a, Side::Right, Some(b));
        arena.attach(b, Side::Right, Some(c));
        assert!(!arena.materialize(Some(a)).is_balanced());
        assert!(arena.materialize(Some(b)).is_balanced());
    }

    #[test]
    fn empty_height_from_arena() {
        let arena = TreeArena::new();
        assert_eq!(arena.height(None, HeightConvention::EmptyIsZero), 0);
        assert_eq!(arena.height(None, HeightConvention::EmptyIsMinusOne), -1);
    }
}
