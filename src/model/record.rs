//! Bracket record types: one serialized constituent of an RST tree.

use std::fmt;

/// Index of an elementary discourse unit (EDU), 1-based.
pub type EduIndex = usize;

// =#========================================================================#=
// SPAN
// =#========================================================================#=
/// Inclusive range of EDU indices covered by a constituent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// First EDU index covered
    pub left: EduIndex,
    /// Last EDU index covered (inclusive)
    pub right: EduIndex,
}

impl Span {
    /// Creates a new span `(left, right)`.
    pub fn new(left: EduIndex, right: EduIndex) -> Self {
        Span { left, right }
    }

    /// Returns `true` if the span covers a single EDU.
    pub fn is_unit(&self) -> bool {
        self.left == self.right
    }

    /// Number of EDUs covered.
    pub fn num_edus(&self) -> usize {
        self.right.saturating_sub(self.left) + 1
    }

    /// Returns `true` if `edu` lies inside this span.
    pub fn contains(&self, edu: EduIndex) -> bool {
        self.left <= edu && edu <= self.right
    }

    /// Returns `true` if `other` starts right after this span ends.
    pub fn is_followed_by(&self, other: &Span) -> bool {
        self.right.checked_add(1) == Some(other.left)
    }

    /// Smallest span from the start of `self` to the end of `other`.
    pub fn join(&self, other: &Span) -> Span {
        Span::new(self.left, other.right)
    }
}

impl From<(EduIndex, EduIndex)> for Span {
    fn from((left, right): (EduIndex, EduIndex)) -> Self {
        Span::new(left, right)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.right)
    }
}

// =#========================================================================#=
// NUCLEARITY
// =#========================================================================#=
/// RST nuclearity role of a constituent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nuclearity {
    /// Structurally central span of a relation
    Nucleus,
    /// Span subordinate to a nucleus
    Satellite,
}

impl Nuclearity {
    /// Parses the exact labels `Nucleus` and `Satellite`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Nucleus" => Some(Nuclearity::Nucleus),
            "Satellite" => Some(Nuclearity::Satellite),
            _ => None,
        }
    }

    /// Returns the label as written in bracket files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Nuclearity::Nucleus => "Nucleus",
            Nuclearity::Satellite => "Satellite",
        }
    }
}

impl fmt::Display for Nuclearity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =#========================================================================#=
// BRACKET RECORD
// =#========================================================================#=
/// A single line of a bracket file: `((left, right), nuclearity, relation)`.
///
/// Records appear bottom-up: every non-leaf record's two children are the
/// two most recent records not yet consumed by another record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketRecord {
    /// EDUs covered by this constituent
    pub span: Span,
    /// Role of this constituent relative to its sibling
    pub nuclearity: Nuclearity,
    /// Rhetorical relation, if annotated
    pub relation: Option<String>,
}

impl BracketRecord {
    /// Creates a new record.
    pub fn new(span: impl Into<Span>, nuclearity: Nuclearity, relation: Option<&str>) -> Self {
        BracketRecord {
            span: span.into(),
            nuclearity,
            relation: relation.map(str::to_string),
        }
    }

    /// Returns `true` if this record describes a single EDU.
    pub fn is_leaf(&self) -> bool {
        self.span.is_unit()
    }
}
