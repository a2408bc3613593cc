//! Rstdep converts RST discourse trees, stored as bottom-up bracket files,
//! into labeled dependency structures over EDUs and assembles them into a
//! flat corpus for text classification.
//!
//! Core functionality provided:
//! - Brackets: A strict parser for bracket records
//!   `((left, right), 'Nucleus'|'Satellite', relation)`, one per line.
//! - Reconstruction: A stack machine rebuilds the binary
//!   [DiscourseTree](model::DiscourseTree) and propagates rhetorical heads
//!   from nuclearity (left child for `NS`/`NN`, right child for `SN`).
//! - Flattening: A breadth-first traversal turns the tree into
//!   [DependencyTriple](model::DependencyTriple)s anchored at ROOT.
//! - Corpus: Joins dependencies with segmentation files, builds word and
//!   relation vocabularies over the training split and writes/reads flat
//!   corpus files. Malformed documents are skipped and counted.
//!
//! Limitations:
//! - Only binary trees
//!
//! # Usage patterns
//! 1. Quick functions with default settings: [convert_str], [convert_file],
//!    and those in [crate::brackets] and [crate::convert].
//! 2. Configure a [BracketTreeBuilder](convert::BracketTreeBuilder) or a
//!    [CorpusBuilder](corpus::CorpusBuilder) for full control.
//!
//! ## Example Default Configuration
//! ```
//! use rstdep::convert_str;
//!
//! let brackets = "\
//! ((1, 1), 'Nucleus', 'span')
//! ((2, 2), 'Satellite', 'elaboration')
//! ((1, 2), 'Nucleus', 'span')
//! ((3, 3), 'Satellite', 'attribution')
//! ";
//! let triples = convert_str(brackets)?;
//! for triple in &triples {
//!     println!("{triple}"); // (ROOT, 1, root), (1, 3, attribution), (1, 2, elaboration)
//! }
//! assert_eq!(triples.len(), 3);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Example Corpus Configuration
//! ```no_run
//! use rstdep::corpus::CorpusBuilder;
//!
//! let corpus = CorpusBuilder::for_dir("data/yelp/parses")
//!     .with_suffix(".brackets25")
//!     .with_train_labels("data/yelp/train.labels")
//!     .with_test_labels("data/yelp/test.labels")
//!     .with_strict_spans()
//!     .build()?;
//!
//! corpus.write("data/yelp/out", "yelp")?;
//! println!("{}", corpus.summary());
//! # Ok::<(), rstdep::corpus::CorpusError>(())
//! ```

pub mod brackets;
pub mod convert;
pub mod corpus;
pub mod model;
pub mod parser;

use crate::convert::ConversionError;
use crate::model::{DependencyTriple, DiscourseTree};
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Converts the bracket records of a string into dependency triples using
/// default settings.
///
/// See [`convert::convert_str`] for full documentation.
pub fn convert_str<S: AsRef<str>>(brackets: S) -> Result<Vec<DependencyTriple>, ConversionError> {
    convert::convert_str(brackets)
}

/// Converts the bracket records of a file into dependency triples using
/// default settings.
///
/// See [`convert::convert_file`] for full documentation.
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Vec<DependencyTriple>, ConversionError> {
    convert::convert_file(path)
}

/// Parses a bracket file and rebuilds its [DiscourseTree] using default settings.
pub fn read_tree<P: AsRef<Path>>(path: P) -> Result<DiscourseTree, ConversionError> {
    let records = brackets::parse_file(path)?;
    Ok(convert::reconstruct(&records)?)
}
