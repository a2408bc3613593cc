//! Error type of corpus assembly.

use crate::convert::ConversionError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, assembling, writing or reading a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}, line {line}: {reason}", .path.display())]
    Segmentation { path: PathBuf, line: usize, reason: String },

    #[error("{}, line {line}: invalid label '{value}'", .path.display())]
    Labels { path: PathBuf, line: usize, value: String },

    #[error("unexpected document name '{0}', expected '<set>-<index>'")]
    FileName(String),

    #[error("no label at index {index} for document {name}")]
    MissingLabel { name: String, index: usize },

    #[error("document {name}: {reason}")]
    EduMismatch { name: String, reason: String },

    #[error("document {name}: {source}")]
    Conversion {
        name: String,
        #[source]
        source: ConversionError,
    },

    #[error("relation '{0}' is not in the relation vocabulary")]
    MissingRelation(String),

    #[error("{}, line {line}: {reason}", .path.display())]
    Format { path: PathBuf, line: usize, reason: String },
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by a single input document, which a
    /// batch run skips and counts instead of aborting.
    pub fn is_input_error(&self) -> bool {
        match self {
            CorpusError::Segmentation { .. }
            | CorpusError::FileName(_)
            | CorpusError::MissingLabel { .. }
            | CorpusError::EduMismatch { .. } => true,
            CorpusError::Conversion { source, .. } => source.is_input_error(),
            CorpusError::Io { .. }
            | CorpusError::Labels { .. }
            | CorpusError::MissingRelation(_)
            | CorpusError::Format { .. } => false,
        }
    }
}
