//! Document label files: one 1-based integer label per line, plain or
//! gzip-compressed.

use crate::corpus::error::CorpusError;
use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

/// Leading bytes of every gzip stream
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Labels of one split, indexed by document index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    values: Vec<usize>,
}

impl Labels {
    /// Reads a label file, decompressing it if it is gzip-compressed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let content = read_text(path).map_err(|e| CorpusError::io(path, e))?;
        let labels = Self::parse(&content, path)?;
        info!(num_labels = labels.len(), path = %path.display(), "loaded labels");
        Ok(labels)
    }

    /// Parses label file content; `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, CorpusError> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(Labels::default());
        }

        let values = content
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                let value = line.trim();
                match value.parse::<usize>() {
                    Ok(label) if label >= 1 => Ok(label),
                    _ => Err(CorpusError::Labels {
                        path: path.to_path_buf(),
                        line: line_idx + 1,
                        value: value.to_string(),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Labels { values })
    }

    /// Returns the 0-based label of the document with `index`.
    pub fn label_of(&self, index: usize) -> Option<usize> {
        self.values.get(index).map(|label| label - 1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Reads `path` as UTF-8 text; gzip streams are detected by their magic bytes.
fn read_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut content = String::new();
        GzDecoder::new(bytes.as_slice()).read_to_string(&mut content)?;
        Ok(content)
    } else {
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_shifted_to_zero() {
        let labels = Labels::parse("5\n1\n3\n\n", Path::new("train.labels")).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.label_of(0), Some(4));
        assert_eq!(labels.label_of(1), Some(0));
        assert_eq!(labels.label_of(3), None);
    }

    #[test]
    fn test_zero_label_rejected() {
        let err = Labels::parse("2\n0\n", Path::new("train.labels")).unwrap_err();
        assert!(matches!(err, CorpusError::Labels { line: 2, .. }));
    }
}
