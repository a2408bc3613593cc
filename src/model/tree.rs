//! Arena-based discourse tree.
//!
//! Provides [DiscourseTree], the binary tree rebuilt from a bracket file,
//! with its nodes stored in a contiguous arena and referenced by
//! [NodeIndex], as well as breadth-first and post-order iterators.

use crate::model::node::{CombinationForm, NodeIndex, TreeNode};
use crate::model::record::EduIndex;
use std::collections::VecDeque;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A binary discourse tree represented using the arena pattern on [TreeNode].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex];
/// each parent exclusively owns its two children by index, so no reference
/// counting is needed.
///
/// # Structure
/// - All nodes (leaves, internal constituents and the synthesized root) are
///   stored in the arena, in bracket-record order with the root last.
/// - A well-formed tree over `N` EDUs has `2N - 1` nodes.
///
/// # Construction
/// Trees are produced by
/// [BracketTreeBuilder::reconstruct](crate::convert::BracketTreeBuilder::reconstruct).
/// Test structural soundness with [DiscourseTree::is_valid].
#[derive(Debug, Clone)]
pub struct DiscourseTree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<TreeNode>,

    /// Index of the synthesized root
    root_index: NodeIndex,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl DiscourseTree {
    /// Assembles a tree from its arena and root index.
    pub(crate) fn from_parts(nodes: Vec<TreeNode>, root_index: NodeIndex) -> Self {
        debug_assert!(root_index < nodes.len());
        DiscourseTree { nodes, root_index }
    }

    /// Returns the root node.
    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root_index]
    }

    /// Returns the index of the root node.
    pub fn root_index(&self) -> NodeIndex {
        self.root_index
    }

    /// Returns the node at `index`, or `None` if out of bounds.
    pub fn node(&self, index: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    /// Returns all nodes in arena order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Returns the number of nodes (leaves, internal nodes and root).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the number of internal nodes, including the root.
    pub fn num_internal(&self) -> usize {
        self.nodes.len() - self.num_leaves()
    }

    /// Returns the number of EDUs covered by the root span.
    pub fn num_edus(&self) -> usize {
        self.root().span().num_edus()
    }

    /// Returns the EDU indices of all leaves from left to right.
    pub fn leaf_indices(&self) -> Vec<EduIndex> {
        let mut edus = Vec::with_capacity(self.num_leaves());
        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            match node.children() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => edus.push(node.span().left),
            }
        }
        edus
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Every node index matches its position in the arena
    /// - Every node is reachable from the root exactly once
    /// - Leaves have no children; internal nodes have two in-bounds children
    /// - The children of an internal node are adjacent and together cover
    ///   exactly its span
    /// - The combination form agrees with the children's nuclearity and
    ///   the head EDU is the one of the nucleus-side child
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.index() != index {
                return false;
            }
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            if index >= self.nodes.len() || seen[index] {
                return false;
            }
            seen[index] = true;

            let node = &self.nodes[index];
            if !node.head_span().contains(node.head_edu()) {
                return false;
            }

            match node.children() {
                None => {
                    if !node.span().is_unit() || node.head_edu() != node.span().left {
                        return false;
                    }
                }
                Some((left, right)) => {
                    let (Some(l), Some(r)) = (self.node(left), self.node(right)) else {
                        return false;
                    };
                    if !l.span().is_followed_by(&r.span()) || l.span().join(&r.span()) != node.span() {
                        return false;
                    }
                    let form = CombinationForm::from_pair(l.nuclearity(), r.nuclearity());
                    if form != Some(node.form()) {
                        return false;
                    }
                    let head = if node.form().is_left_headed() { l } else { r };
                    if head.head_edu() != node.head_edu() {
                        return false;
                    }
                    stack.push(left);
                    stack.push(right);
                }
            }
        }

        seen.iter().all(|&s| s)
    }
}

impl std::ops::Index<NodeIndex> for DiscourseTree {
    type Output = TreeNode;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl DiscourseTree {
    /// Returns an iterator over the tree in breadth-first order, visiting
    /// the left child before the right child on every level.
    pub fn bfs_iter(&self) -> BreadthFirstIter<'_> {
        BreadthFirstIter::new(self)
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// For a tree rebuilt from a bracket file, the non-root nodes come out in
    /// the same order as the bracket records.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }
}

/// Iterator for breadth-first traversal with a FIFO work queue.
pub struct BreadthFirstIter<'a> {
    tree: &'a DiscourseTree,
    queue: VecDeque<NodeIndex>,
}

impl<'a> BreadthFirstIter<'a> {
    fn new(tree: &'a DiscourseTree) -> Self {
        let mut queue = VecDeque::with_capacity(tree.num_nodes());
        queue.push_back(tree.root_index);
        BreadthFirstIter { tree, queue }
    }
}

impl<'a> Iterator for BreadthFirstIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.queue.pop_front()?;
        let node = &self.tree[index];

        if let Some((left, right)) = node.children() {
            self.queue.push_back(left);
            self.queue.push_back(right);
        }

        Some(node)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PostOrderIter<'a> {
    tree: &'a DiscourseTree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a DiscourseTree) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(tree.root_index, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            match node.children() {
                Some((left, right)) if !children_visited => {
                    self.stack.push((index, true));
                    // Push right first, so left is processed first
                    self.stack.push((right, false));
                    self.stack.push((left, false));
                }
                _ => return Some(node),
            }
        }
        None
    }
}
