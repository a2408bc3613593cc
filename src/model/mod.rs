//! Data model for RST discourse trees and their dependency form.
//!
//! # Tree representation
//! Trees are represented by [DiscourseTree], which uses the arena pattern to
//! store [TreeNode]s referenced by [NodeIndex]. Every node is either a leaf
//! (a single EDU) or an internal constituent with exactly two children; the
//! root is synthesized from the last two constituents of a bracket file and
//! carries no nuclearity.
//!
//! # Head propagation
//! Each internal node has a [CombinationForm] derived from the nuclearity of
//! its children. The head EDU of a node is the head EDU of its nucleus-side
//! child: left for `NS` and `NN`, right for `SN`.
//!
//! # Dependencies
//! A tree flattens into [DependencyTriple]s, one per internal node plus the
//! ROOT attachment of the root's head EDU.

pub mod dependency;
pub mod node;
pub mod record;
pub mod tree;

pub use dependency::{DependencyTriple, Head, ROOT_RELATION};
pub use node::{CombinationForm, NodeIndex, TreeNode};
pub use record::{BracketRecord, EduIndex, Nuclearity, Span};
pub use tree::{BreadthFirstIter, DiscourseTree, PostOrderIter};
