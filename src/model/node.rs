//! Node module for discourse tree representation.

use crate::model::record::{EduIndex, Nuclearity, Span};
use std::fmt;

/// Index of a node in a [DiscourseTree](crate::model::DiscourseTree) (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// COMBINATION FORM
// =#========================================================================#=
/// Which side(s) of a binary split are Nucleus vs. Satellite.
///
/// Determines the rhetorical head of a constituent: the left child for
/// [NS](CombinationForm::NS) and [NN](CombinationForm::NN) (left-head
/// tie-break for multi-nuclear relations), the right child for
/// [SN](CombinationForm::SN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinationForm {
    /// Nucleus - Satellite
    NS,
    /// Nucleus - Nucleus (multi-nuclear)
    NN,
    /// Satellite - Nucleus
    SN,
}

impl CombinationForm {
    /// Derives the form from the nuclearity labels of the left and right child.
    ///
    /// Returns `None` for illegal pairings: two satellites, or a child
    /// without nuclearity.
    pub fn from_pair(left: Option<Nuclearity>, right: Option<Nuclearity>) -> Option<Self> {
        use Nuclearity::*;
        match (left?, right?) {
            (Nucleus, Satellite) => Some(CombinationForm::NS),
            (Nucleus, Nucleus) => Some(CombinationForm::NN),
            (Satellite, Nucleus) => Some(CombinationForm::SN),
            (Satellite, Satellite) => None,
        }
    }

    /// Returns `true` if the head sits in the left child.
    pub fn is_left_headed(&self) -> bool {
        !matches!(self, CombinationForm::SN)
    }

    /// Returns the form as a two-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            CombinationForm::NS => "NS",
            CombinationForm::NN => "NN",
            CombinationForm::SN => "SN",
        }
    }
}

impl fmt::Display for CombinationForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =#========================================================================#=
// TREE NODE
// =#========================================================================#=
/// A leaf EDU or an internal constituent of a discourse tree.
///
/// # Invariants
/// - `index` is the position of this node in the arena
/// - A leaf has no children, form [NN](CombinationForm::NN),
///   `head_span == span` and `head_edu == span.left == span.right`
/// - An internal node has two children and `head_edu` equals the
///   `head_edu` of the child on the nucleus side of `form`
/// - Only the synthesized root has no nuclearity
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    index: NodeIndex,
    span: Span,
    nuclearity: Option<Nuclearity>,
    relation: Option<String>,
    children: Option<(NodeIndex, NodeIndex)>,
    form: CombinationForm,
    head_span: Span,
    head_edu: EduIndex,
}

impl TreeNode {
    /// Creates a new leaf node for a single EDU.
    pub fn new_leaf(index: NodeIndex, span: Span, nuclearity: Nuclearity, relation: Option<String>) -> Self {
        TreeNode {
            index,
            span,
            nuclearity: Some(nuclearity),
            relation,
            children: None,
            form: CombinationForm::NN,
            head_span: span,
            head_edu: span.left,
        }
    }

    /// Creates a new internal node whose head information has already been
    /// derived from its children.
    #[allow(clippy::too_many_arguments)]
    pub fn new_internal(
        index: NodeIndex,
        span: Span,
        nuclearity: Option<Nuclearity>,
        relation: Option<String>,
        children: (NodeIndex, NodeIndex),
        form: CombinationForm,
        head_span: Span,
        head_edu: EduIndex,
    ) -> Self {
        TreeNode {
            index,
            span,
            nuclearity,
            relation,
            children: Some(children),
            form,
            head_span,
            head_edu,
        }
    }

    /// Returns the index of this node in the arena.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the EDU range covered by this node.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the nuclearity, `None` only for the synthesized root.
    pub fn nuclearity(&self) -> Option<Nuclearity> {
        self.nuclearity
    }

    /// Returns the rhetorical relation attached to this node.
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// Returns the (left, right) children if this is an internal node.
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        self.children
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Returns `true` if this node is the synthesized root.
    pub fn is_root(&self) -> bool {
        self.nuclearity.is_none()
    }

    /// Returns the combination form ([NN](CombinationForm::NN) for leaves).
    pub fn form(&self) -> CombinationForm {
        self.form
    }

    /// Returns the EDU range of this node's rhetorical head.
    pub fn head_span(&self) -> Span {
        self.head_span
    }

    /// Returns the EDU acting as this node's rhetorical head.
    pub fn head_edu(&self) -> EduIndex {
        self.head_edu
    }
}
