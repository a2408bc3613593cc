//! Error types for the bracket record parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading bracket record literals.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing bracket records.
#[derive(PartialEq, Eq, Debug, Clone, Error)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Unexpected end of input")]
    UnexpectedEOF,
    #[error("Unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("Unclosed string literal")]
    UnclosedString,
    #[error("Invalid integer literal - {0}")]
    InvalidInteger(String),
    #[error("Invalid bracket record - {0}")]
    InvalidRecord(String),
    #[error("Unknown nuclearity label '{0}'")]
    UnknownNuclearity(String),
    #[error("Trailing content after record")]
    TrailingContent,
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (line, position and surrounding bytes).
#[derive(Debug, Error)]
#[error("{kind} at line {line} (position {position}){}", format_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    line: usize,
    position: usize,
    context: String,
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            line: parser.line(),
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for UnexpectedChar, reading the offending byte
    /// from the parser (or UnexpectedEOF if there is none).
    pub fn unexpected_char<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        match parser.peek() {
            Some(b) => Self::from_parser(ParsingErrorType::UnexpectedChar(b as char), parser),
            None => Self::unexpected_eof(parser),
        }
    }

    /// Convenience constructor for UnclosedString
    pub fn unclosed_string<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnclosedString, parser)
    }

    /// Convenience constructor for InvalidInteger
    pub fn invalid_integer<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidInteger(msg), parser)
    }

    /// Convenience constructor for InvalidRecord
    pub fn invalid_record<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidRecord(msg), parser)
    }

    /// Convenience constructor for UnknownNuclearity
    pub fn unknown_nuclearity<S: ByteSource>(parser: &ByteParser<S>, label: String) -> Self {
        Self::from_parser(ParsingErrorType::UnknownNuclearity(label), parser)
    }

    /// Convenience constructor for TrailingContent
    pub fn trailing_content<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::TrailingContent, parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the (1-based) line where the error occurred
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the byte position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorType::IoError(err.to_string()),
            line: 0,
            position: 0,
            context: String::new(),
        }
    }
}
