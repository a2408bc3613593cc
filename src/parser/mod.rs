//! Basic low-level byte parser functionality.
//!
//! This module provides the primitives the bracket record parser is built
//! on, along with the [ParsingError] reported for malformed record literals.
pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use byte_source::{ByteSource, InMemoryByteSource};
pub use parsing_error::{ParsingError, ParsingErrorType};
