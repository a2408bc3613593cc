//! Stack machine rebuilding a [DiscourseTree] from bottom-up bracket records.

use crate::convert::error::MalformedTreeError;
use crate::model::{BracketRecord, CombinationForm, DiscourseTree, NodeIndex, Nuclearity, Span, TreeNode};
use tracing::{debug, trace};

// =#========================================================================#=
// BRACKET TREE BUILDER
// =#========================================================================#=
/// Reconstructs the binary discourse tree encoded by a sequence of
/// [BracketRecord]s.
///
/// Records are consumed in order with an explicit stack:
/// * A leaf record (unit span) is pushed as a leaf node.
/// * Any other record pops the right child, then the left child, derives
///   its [CombinationForm] and head from their nuclearity and is pushed.
///
/// Bracket files carry no record for the root; exactly two constituents
/// must remain on the stack at the end, and the root combining them is
/// synthesized without nuclearity or relation.
///
/// # Example
/// ```
/// use rstdep::convert::BracketTreeBuilder;
/// use rstdep::model::{BracketRecord, Nuclearity::*};
///
/// let records = vec![
///     BracketRecord::new((1, 1), Nucleus, Some("span")),
///     BracketRecord::new((2, 2), Satellite, Some("elaboration")),
///     BracketRecord::new((1, 2), Nucleus, Some("span")),
///     BracketRecord::new((3, 3), Satellite, Some("attribution")),
/// ];
/// let tree = BracketTreeBuilder::new().reconstruct(&records)?;
/// assert_eq!(tree.num_nodes(), 5);
/// assert_eq!(tree.root().head_edu(), 1);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketTreeBuilder {
    strict_spans: bool,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl BracketTreeBuilder {
    /// Creates a builder without span checking.
    pub fn new() -> Self {
        Self { strict_spans: false }
    }

    /// Enables span checking: the two children of every constituent must be
    /// adjacent and together cover exactly its span.
    pub fn with_strict_spans(mut self) -> Self {
        self.strict_spans = true;
        self
    }

    /// Returns `true` if span checking is enabled.
    pub fn is_strict(&self) -> bool {
        self.strict_spans
    }
}

// ============================================================================
// Reconstruction (pub)
// ============================================================================
impl BracketTreeBuilder {
    /// Rebuilds the tree encoded by `records`.
    ///
    /// # Returns
    /// * `Ok(DiscourseTree)` - The tree with the synthesized root last in the arena
    /// * `Err(MalformedTreeError)` - If `records` is empty, a pairing is
    ///   illegal, a record finds fewer than two constituents, the number of
    ///   residual constituents is not 2, or (strict mode) spans do not fit
    pub fn reconstruct(&self, records: &[BracketRecord]) -> Result<DiscourseTree, MalformedTreeError> {
        if records.is_empty() {
            return Err(MalformedTreeError::Empty);
        }

        let mut nodes: Vec<TreeNode> = Vec::with_capacity(records.len() + 1);
        let mut stack: Vec<NodeIndex> = Vec::new();

        for record in records {
            let index = nodes.len();
            let node = if record.is_leaf() {
                TreeNode::new_leaf(index, record.span, record.nuclearity, record.relation.clone())
            } else {
                let right = stack.pop();
                let left = stack.pop();
                let (Some(left), Some(right)) = (left, right) else {
                    return Err(MalformedTreeError::StackUnderflow { span: record.span });
                };
                self.combine(
                    &nodes,
                    index,
                    record.span,
                    Some(record.nuclearity),
                    record.relation.clone(),
                    (left, right),
                )?
            };
            trace!(index, span = %node.span(), form = %node.form(), "pushed constituent");
            nodes.push(node);
            stack.push(index);
        }

        let &[left, right] = stack.as_slice() else {
            return Err(MalformedTreeError::ResidualStack(stack.len()));
        };
        let root_index = nodes.len();
        let span = nodes[left].span().join(&nodes[right].span());
        let root = self.combine(&nodes, root_index, span, None, None, (left, right))?;
        nodes.push(root);

        debug!(
            num_records = records.len(),
            num_edus = span.num_edus(),
            head_edu = nodes[root_index].head_edu(),
            "reconstructed discourse tree"
        );
        Ok(DiscourseTree::from_parts(nodes, root_index))
    }

    /// Creates the internal node over `children` and derives its head.
    fn combine(
        &self,
        nodes: &[TreeNode],
        index: NodeIndex,
        span: Span,
        nuclearity: Option<Nuclearity>,
        relation: Option<String>,
        children: (NodeIndex, NodeIndex),
    ) -> Result<TreeNode, MalformedTreeError> {
        let (l, r) = (&nodes[children.0], &nodes[children.1]);

        if self.strict_spans && (!l.span().is_followed_by(&r.span()) || l.span().join(&r.span()) != span) {
            return Err(MalformedTreeError::SpanMismatch {
                span,
                left: l.span(),
                right: r.span(),
            });
        }

        let form = CombinationForm::from_pair(l.nuclearity(), r.nuclearity()).ok_or(
            MalformedTreeError::IllegalPairing {
                span,
                left: l.nuclearity(),
                right: r.nuclearity(),
            },
        )?;

        let (head_span, head_edu) = match form {
            CombinationForm::NS => (l.span(), l.head_edu()),
            CombinationForm::NN => (l.span().join(&r.span()), l.head_edu()),
            CombinationForm::SN => (r.span(), r.head_edu()),
        };

        Ok(TreeNode::new_internal(
            index, span, nuclearity, relation, children, form, head_span, head_edu,
        ))
    }
}

// =#========================================================================#=
// TESTS
// =#========================================================================#=
#[cfg(test)]
mod tests {
    use super::*;
    use Nuclearity::*;

    fn leaf(edu: usize, nuclearity: Nuclearity) -> BracketRecord {
        BracketRecord::new((edu, edu), nuclearity, Some("leaf"))
    }

    #[test]
    fn test_two_leaves_form_root() {
        for (left, right, form, head) in [
            (Nucleus, Satellite, CombinationForm::NS, 1),
            (Nucleus, Nucleus, CombinationForm::NN, 1),
            (Satellite, Nucleus, CombinationForm::SN, 2),
        ] {
            let tree = BracketTreeBuilder::new()
                .reconstruct(&[leaf(1, left), leaf(2, right)])
                .unwrap();
            let root = tree.root();
            assert_eq!(root.form(), form);
            assert_eq!(root.head_edu(), head);
            assert_eq!(root.span(), Span::new(1, 2));
            assert_eq!(root.nuclearity(), None);
            assert_eq!(root.relation(), None);
            assert!(tree.is_valid());
        }
    }

    #[test]
    fn test_head_span_follows_form() {
        let records = [
            leaf(1, Nucleus),
            leaf(2, Nucleus),
            BracketRecord::new((1, 2), Satellite, Some("background")),
            leaf(3, Nucleus),
        ];
        let tree = BracketTreeBuilder::new().reconstruct(&records).unwrap();
        let inner = &tree[2];
        assert_eq!(inner.form(), CombinationForm::NN);
        assert_eq!(inner.head_span(), Span::new(1, 2));
        assert_eq!(tree.root().form(), CombinationForm::SN);
        assert_eq!(tree.root().head_span(), Span::new(3, 3));
        assert_eq!(tree.root().head_edu(), 3);
    }

    #[test]
    fn test_illegal_pairing() {
        let err = BracketTreeBuilder::new()
            .reconstruct(&[leaf(1, Satellite), leaf(2, Satellite)])
            .unwrap_err();
        assert_eq!(
            err,
            MalformedTreeError::IllegalPairing {
                span: Span::new(1, 2),
                left: Some(Satellite),
                right: Some(Satellite),
            }
        );
    }

    #[test]
    fn test_stack_underflow() {
        let records = [leaf(1, Nucleus), BracketRecord::new((1, 2), Nucleus, None)];
        let err = BracketTreeBuilder::new().reconstruct(&records).unwrap_err();
        assert_eq!(err, MalformedTreeError::StackUnderflow { span: Span::new(1, 2) });
    }

    #[test]
    fn test_strict_spans_reject_gap() {
        let records = [leaf(1, Nucleus), leaf(3, Satellite)];
        assert!(BracketTreeBuilder::new().reconstruct(&records).is_ok());
        let err = BracketTreeBuilder::new()
            .with_strict_spans()
            .reconstruct(&records)
            .unwrap_err();
        assert!(matches!(err, MalformedTreeError::SpanMismatch { .. }));
    }
}
