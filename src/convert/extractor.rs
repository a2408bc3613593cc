//! Flattening of a [DiscourseTree] into ROOT-anchored dependency triples.

use crate::convert::error::InvariantViolationError;
use crate::model::{CombinationForm, DependencyTriple, DiscourseTree};

/// Flattens a reconstructed tree into [DependencyTriple]s.
///
/// The first triple attaches the root's head EDU to ROOT. Then the tree is
/// traversed breadth-first (left before right) and every internal node
/// contributes one triple: the head EDU of its nucleus-side child governs the
/// head EDU of the other child, labeled with that child's relation. For
/// [NN](CombinationForm::NN) the right child modifies the left one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyExtractor;

impl DependencyExtractor {
    pub fn new() -> Self {
        DependencyExtractor
    }

    /// Returns the triples in traversal-discovery order, ROOT triple first.
    ///
    /// # Errors
    /// [InvariantViolationError] if an internal node has no children.
    pub fn flatten(&self, tree: &DiscourseTree) -> Result<Vec<DependencyTriple>, InvariantViolationError> {
        let mut triples = Vec::with_capacity(tree.num_internal() + 1);
        triples.push(DependencyTriple::root(tree.root().head_edu()));

        for node in tree.bfs_iter().filter(|n| !n.is_leaf()) {
            let (left, right) = node
                .children()
                .map(|(l, r)| (&tree[l], &tree[r]))
                .ok_or_else(|| InvariantViolationError {
                    index: node.index(),
                    span: node.span(),
                    reason: format!("internal node with form {} has no children", node.form()),
                })?;

            let (head, modifier) = match node.form() {
                CombinationForm::NS | CombinationForm::NN => (left, right),
                CombinationForm::SN => (right, left),
            };
            triples.push(DependencyTriple::new(head.head_edu(), modifier.head_edu(), modifier.relation()));
        }

        Ok(triples)
    }
}
