//! Loader for EDU segmentation files (`.merge`).
//!
//! Each non-empty line describes one token with tab-separated columns. The
//! token text sits in the third column and the 1-based EDU index in the
//! last one:
//!
//! ```text
//! 1	1	The	the	DT	...	1
//! 1	2	food	food	NN	...	1
//! 1	3	was	be	VBD	...	2
//! ```

use crate::corpus::error::CorpusError;
use crate::model::EduIndex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Column holding the token text
const TOKEN_COLUMN: usize = 2;

/// Raw text of every EDU of one document, keyed by EDU index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    edus: BTreeMap<EduIndex, String>,
}

impl Segmentation {
    /// Reads a segmentation file.
    ///
    /// # Arguments
    /// * `path` - The `.merge` file
    /// * `lowercase` - Whether tokens are lowercased
    pub fn from_file<P: AsRef<Path>>(path: P, lowercase: bool) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
        Self::parse(&content, lowercase, path)
    }

    /// Parses the content of a segmentation file; `path` is only used in errors.
    pub fn parse(content: &str, lowercase: bool, path: &Path) -> Result<Self, CorpusError> {
        let mut edus: BTreeMap<EduIndex, String> = BTreeMap::new();

        for (line_idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let error = |reason: String| CorpusError::Segmentation {
                path: path.to_path_buf(),
                line: line_idx + 1,
                reason,
            };

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() <= TOKEN_COLUMN {
                return Err(error(format!("expected at least {} columns", TOKEN_COLUMN + 1)));
            }
            let last = columns[columns.len() - 1].trim();
            let edu: EduIndex = last
                .parse()
                .map_err(|_| error(format!("invalid EDU index '{last}'")))?;

            let token = if lowercase {
                columns[TOKEN_COLUMN].to_lowercase()
            } else {
                columns[TOKEN_COLUMN].to_string()
            };

            edus.entry(edu)
                .and_modify(|text| {
                    text.push(' ');
                    text.push_str(&token);
                })
                .or_insert(token);
        }

        Ok(Segmentation { edus })
    }

    /// Returns the text of `edu`, tokens joined by single spaces.
    pub fn text(&self, edu: EduIndex) -> Option<&str> {
        self.edus.get(&edu).map(String::as_str)
    }

    /// Returns the number of EDUs.
    pub fn num_edus(&self) -> usize {
        self.edus.len()
    }

    /// Returns `true` if no EDU was found.
    pub fn is_empty(&self) -> bool {
        self.edus.is_empty()
    }

    /// Iterates over `(edu, text)` in ascending EDU order.
    pub fn iter(&self) -> impl Iterator<Item = (EduIndex, &str)> {
        self.edus.iter().map(|(&edu, text)| (edu, text.as_str()))
    }

    /// Consumes the segmentation and returns its EDU texts in ascending order.
    pub fn into_texts(self) -> Vec<String> {
        self.edus.into_values().collect()
    }
}
