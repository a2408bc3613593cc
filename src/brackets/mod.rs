//! Bracket file parser.
//!
//! A bracket file serializes one RST constituency tree bottom-up, one
//! record per line:
//!
//! ```text
//! ((1, 1), 'Nucleus', 'span')
//! ((2, 2), 'Satellite', 'elaboration')
//! ((1, 2), 'Nucleus', 'span')
//! ((3, 3), 'Satellite', 'elaboration')
//! ```
//!
//! The root itself has no record; its two children are the last two
//! unconsumed constituents.
//!
//! # Quick API
//! * [`parse_file`] - parses all records of a file
//! * [`parse_str`] - parses all records of a string
//!
//! # Full API
//! Create a [BracketParser] and provide data via a
//! [ByteParser](crate::parser::ByteParser):
//! * [`BracketParser::parse_all`] - parse all records until EOF
//! * [`BracketParser::into_iter`] - obtain an iterator over records

mod defs;
pub mod parser;

pub(crate) use defs::DEFAULT_BRACKETS_SUFFIX;
pub use parser::{BracketIterator, BracketParser};

use crate::model::BracketRecord;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses all bracket records of a file.
///
/// # Arguments
/// * `path` - Path to the bracket file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<BracketRecord>` - All records in file order
/// * [ParsingError] - If file reading fails or a record literal is malformed
///
/// # Example
/// ```no_run
/// use rstdep::brackets::parse_file;
///
/// let records = parse_file("train-1.brackets")?;
/// println!("Read {} constituents", records.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<BracketRecord>, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    BracketParser::new().parse_all(byte_parser)
}

/// Parses all bracket records of a string.
///
/// # Example
/// ```
/// use rstdep::brackets::parse_str;
/// use rstdep::model::Nuclearity;
///
/// let records = parse_str("((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', None)")?;
/// assert_eq!(records[1].nuclearity, Nuclearity::Satellite);
/// assert_eq!(records[1].relation, None);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(brackets: S) -> Result<Vec<BracketRecord>, ParsingError> {
    let byte_parser = ByteParser::for_str(brackets.as_ref());
    BracketParser::new().parse_all(byte_parser)
}
