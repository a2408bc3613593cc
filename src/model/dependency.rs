//! Flat dependency representation of a discourse tree.

use crate::model::record::EduIndex;
use std::fmt;

/// Relation label of the synthetic ROOT attachment.
pub const ROOT_RELATION: &str = "root";

/// Head side of a dependency: the synthetic ROOT or an EDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Head {
    Root,
    Edu(EduIndex),
}

impl Head {
    /// Returns the EDU index, or `None` for ROOT.
    pub fn edu(&self) -> Option<EduIndex> {
        match self {
            Head::Root => None,
            Head::Edu(edu) => Some(*edu),
        }
    }

    /// Returns `true` for the synthetic ROOT.
    pub fn is_root(&self) -> bool {
        matches!(self, Head::Root)
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Head::Root => f.write_str("ROOT"),
            Head::Edu(edu) => write!(f, "{edu}"),
        }
    }
}

/// One `(head, modifier, relation)` dependency between EDUs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyTriple {
    pub head: Head,
    pub modifier: EduIndex,
    pub relation: Option<String>,
}

impl DependencyTriple {
    /// Creates the ROOT attachment of `modifier`.
    pub fn root(modifier: EduIndex) -> Self {
        DependencyTriple {
            head: Head::Root,
            modifier,
            relation: Some(ROOT_RELATION.to_string()),
        }
    }

    /// Creates an EDU-to-EDU dependency.
    pub fn new(head: EduIndex, modifier: EduIndex, relation: Option<&str>) -> Self {
        DependencyTriple {
            head: Head::Edu(head),
            modifier,
            relation: relation.map(str::to_string),
        }
    }
}

impl fmt::Display for DependencyTriple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.head,
            self.modifier,
            self.relation.as_deref().unwrap_or("None")
        )
    }
}
