//! Error types of tree reconstruction and dependency extraction.

use crate::model::{Nuclearity, Span};
use crate::parser::ParsingError;
use thiserror::Error;

/// A bracket sequence that does not encode a valid binary tree.
///
/// Input error: the document is rejected as a whole, no partial tree is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTreeError {
    #[error("bracket sequence contains no records")]
    Empty,

    #[error("illegal nuclearity pairing ({}, {}) below {span}", label(.left), label(.right))]
    IllegalPairing {
        span: Span,
        left: Option<Nuclearity>,
        right: Option<Nuclearity>,
    },

    #[error("record {span} needs two constituents but the stack holds fewer")]
    StackUnderflow { span: Span },

    #[error("expected 2 residual constituents for the root, found {0}")]
    ResidualStack(usize),

    #[error("span {span} does not match its children {left} and {right}")]
    SpanMismatch { span: Span, left: Span, right: Span },
}

fn label(nuclearity: &Option<Nuclearity>) -> &'static str {
    nuclearity.map_or("None", |n| n.as_str())
}

/// An internal node reached dependency extraction in an impossible state.
///
/// Signals disagreement between builder and extractor, never bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violated at node {index} with span {span}: {reason}")]
pub struct InvariantViolationError {
    pub index: usize,
    pub span: Span,
    pub reason: String,
}

/// Any failure of converting one bracket file into dependencies.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Parse(#[from] ParsingError),

    #[error(transparent)]
    Malformed(#[from] MalformedTreeError),

    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolationError),
}

impl ConversionError {
    /// Returns `true` for errors caused by the input document, which a batch
    /// run skips and counts; `false` for programming errors.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ConversionError::InvariantViolation(_))
    }
}
