//! Conversion of bracket records into discourse trees and dependencies.
//!
//! Two components do the work:
//! * [BracketTreeBuilder] rebuilds the binary [DiscourseTree] with a stack
//!   machine and propagates heads from nuclearity.
//! * [DependencyExtractor] flattens the tree breadth-first into
//!   [DependencyTriple]s anchored at ROOT.
//!
//! # Quick API
//! * [`convert_file`] / [`convert_str`] - bracket text to dependencies
//! * [`convert_records`] - parsed records to dependencies
//! * [`reconstruct`] / [`flatten`] - the two steps on their own
//!
//! # Errors
//! [ConversionError] distinguishes input errors ([ParsingError](crate::parser::ParsingError),
//! [MalformedTreeError]) from [InvariantViolationError]s, which signal bugs.

pub mod error;
pub mod extractor;
pub mod tree_builder;

pub use error::{ConversionError, InvariantViolationError, MalformedTreeError};
pub use extractor::DependencyExtractor;
pub use tree_builder::BracketTreeBuilder;

use crate::brackets;
use crate::model::{BracketRecord, DependencyTriple, DiscourseTree};
use std::path::Path;

// ============================================================================
// QUICK CONVERSION API (pub)
// ============================================================================
/// Rebuilds the tree of `records` with default settings.
pub fn reconstruct(records: &[BracketRecord]) -> Result<DiscourseTree, MalformedTreeError> {
    BracketTreeBuilder::new().reconstruct(records)
}

/// Flattens `tree` into dependency triples, ROOT triple first.
pub fn flatten(tree: &DiscourseTree) -> Result<Vec<DependencyTriple>, InvariantViolationError> {
    DependencyExtractor::new().flatten(tree)
}

/// Rebuilds and flattens the tree of `records`.
pub fn convert_records(records: &[BracketRecord]) -> Result<Vec<DependencyTriple>, ConversionError> {
    let tree = reconstruct(records)?;
    Ok(flatten(&tree)?)
}

/// Parses, rebuilds and flattens the bracket records of a string.
///
/// # Example
/// ```
/// use rstdep::convert::convert_str;
/// use rstdep::model::DependencyTriple;
///
/// let brackets = "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n";
/// let triples = convert_str(brackets)?;
/// assert_eq!(triples, vec![
///     DependencyTriple::root(1),
///     DependencyTriple::new(1, 2, Some("elaboration")),
/// ]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert_str<S: AsRef<str>>(brackets: S) -> Result<Vec<DependencyTriple>, ConversionError> {
    let records = brackets::parse_str(brackets)?;
    convert_records(&records)
}

/// Parses, rebuilds and flattens the bracket records of a file.
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Vec<DependencyTriple>, ConversionError> {
    let records = brackets::parse_file(path)?;
    convert_records(&records)
}
