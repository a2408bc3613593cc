//! Reader for corpus files written by [CorpusWriter](crate::corpus::CorpusWriter).

use crate::corpus::defs::DOCUMENT_BOUNDARY;
use crate::corpus::error::CorpusError;
use crate::corpus::token::UNKNOWN_TOKEN;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One document read back from a corpus file.
///
/// EDUs are addressed by their 0-based `EIDX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDocument {
    pub name: String,
    pub label: Option<usize>,
    /// Tokens of every EDU; an EDU without tokens holds a single `UNK`
    pub edus: Vec<Vec<String>>,
    /// Parent EDU of every EDU, `None` for the root
    pub parents: Vec<Option<usize>>,
    /// Relation index of every EDU
    pub relations: Vec<usize>,
    /// Children of every EDU in file order
    pub children: Vec<Vec<usize>>,
    /// The EDU attached to ROOT
    pub root: usize,
    /// Bottom-up processing order: every EDU comes after all its descendants
    pub order: Vec<usize>,
}

impl CorpusDocument {
    pub fn num_edus(&self) -> usize {
        self.edus.len()
    }
}

/// Reads all documents of a corpus file.
///
/// # Errors
/// * [CorpusError::Io] - if the file cannot be read
/// * [CorpusError::Format] - if a line is malformed or a document's parent
///   indices do not form a tree
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<CorpusDocument>, CorpusError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    let documents = parse_corpus(&content, path)?;
    info!(num_docs = documents.len(), path = %path.display(), "read corpus");
    Ok(documents)
}

/// Parses the content of a corpus file; `path` is only used in errors.
pub fn parse_corpus(content: &str, path: &Path) -> Result<Vec<CorpusDocument>, CorpusError> {
    let mut documents = Vec::new();
    let mut pending = PendingDocument::default();

    // First line is the header
    for (line_idx, line) in content.lines().enumerate().skip(1) {
        let line_nr = line_idx + 1;
        let error = |reason: String| CorpusError::Format {
            path: path.to_path_buf(),
            line: line_nr,
            reason,
        };

        if line.is_empty() {
            continue;
        }

        if line.starts_with(DOCUMENT_BOUNDARY) {
            let mut items = line.split('\t').skip(1);
            let name = items
                .next()
                .ok_or_else(|| error("boundary line without document name".to_string()))?;
            let label = match items.next() {
                Some(label) => Some(
                    label
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| error(format!("invalid label '{label}'")))?,
                ),
                None => None,
            };

            let finished = std::mem::take(&mut pending);
            if finished.edus.is_empty() {
                warn!(name, "empty document");
            } else {
                documents.push(finished.finish(name, label).map_err(error)?);
            }
            continue;
        }

        let items: Vec<&str> = line.splitn(4, '\t').collect();
        let &[eidx, pidx, ridx, text] = items.as_slice() else {
            return Err(error(format!("expected 4 columns but found {}", items.len())));
        };
        let eidx: usize = eidx.parse().map_err(|_| error(format!("invalid EIDX '{eidx}'")))?;
        let pidx: i64 = pidx.parse().map_err(|_| error(format!("invalid PIDX '{pidx}'")))?;
        let ridx: usize = ridx.parse().map_err(|_| error(format!("invalid RIDX '{ridx}'")))?;

        if eidx != pending.edus.len() {
            return Err(error(format!("expected EIDX {} but found {eidx}", pending.edus.len())));
        }
        let parent = match pidx {
            -1 => None,
            p if p >= 0 => Some(p as usize),
            p => return Err(error(format!("invalid PIDX {p}"))),
        };

        let mut tokens: Vec<String> = text.split(' ').filter(|t| !t.is_empty()).map(str::to_string).collect();
        if tokens.is_empty() {
            tokens.push(UNKNOWN_TOKEN.to_string());
        }
        pending.edus.push(tokens);
        pending.parents.push(parent);
        pending.relations.push(ridx);
    }

    if !pending.edus.is_empty() {
        return Err(CorpusError::Format {
            path: path.to_path_buf(),
            line: content.lines().count(),
            reason: "last document is not closed by a boundary line".to_string(),
        });
    }

    Ok(documents)
}

/// EDU lines collected until the next boundary line.
#[derive(Debug, Default)]
struct PendingDocument {
    edus: Vec<Vec<String>>,
    parents: Vec<Option<usize>>,
    relations: Vec<usize>,
}

impl PendingDocument {
    /// Links children to parents and computes the bottom-up order: breadth
    /// first from the root, reversed.
    fn finish(self, name: &str, label: Option<usize>) -> Result<CorpusDocument, String> {
        let num_edus = self.edus.len();
        let mut children = vec![Vec::new(); num_edus];
        let mut root = None;
        for (eidx, parent) in self.parents.iter().enumerate() {
            match parent {
                None => {
                    root.get_or_insert(eidx);
                }
                Some(p) if *p < num_edus => children[*p].push(eidx),
                Some(p) => return Err(format!("document {name}: parent {p} of EDU {eidx} out of range")),
            }
        }
        let root = root.ok_or_else(|| format!("document {name}: no EDU is attached to ROOT"))?;

        let mut order = Vec::with_capacity(num_edus);
        let mut queue = VecDeque::from([root]);
        while let Some(eidx) = queue.pop_front() {
            order.push(eidx);
            queue.extend(children[eidx].iter().copied());
        }
        if order.len() != num_edus {
            return Err(format!("document {name}: parent indices do not form a tree"));
        }
        order.reverse();

        Ok(CorpusDocument {
            name: name.to_string(),
            label,
            edus: self.edus,
            parents: self.parents,
            relations: self.relations,
            children,
            root,
            order,
        })
    }
}
