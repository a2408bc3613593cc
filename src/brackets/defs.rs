//! Constants and definitions for bracket file parsing.

/// Default file suffix of bracket files
pub(crate) const DEFAULT_BRACKETS_SUFFIX: &str = ".brackets";

/// The only accepted null literal
pub(crate) const NULL_LITERAL: &str = "None";

/// Number of elements in a record tuple: span, nuclearity, relation
pub(crate) const RECORD_ARITY: usize = 3;

/// Maximum tuple nesting accepted while reading a literal
pub(crate) const MAX_LITERAL_DEPTH: usize = 4;

/// Initial capacity of the record buffer of one file
pub(crate) const DEFAULT_NUM_RECORDS_GUESS: usize = 64;
