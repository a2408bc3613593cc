//! Documents: EDU texts joined with the dependency structure of their tree.

use crate::corpus::error::CorpusError;
use crate::corpus::segmentation::Segmentation;
use crate::model::{DependencyTriple, EduIndex, Head};
use std::collections::BTreeMap;
use std::fmt;

// =#========================================================================#=
// DOCUMENT SET & NAME
// =#========================================================================#=
/// Split a document belongs to, taken from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSet {
    Train,
    Test,
}

impl DocumentSet {
    /// Parses `train` or `test`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "train" => Some(DocumentSet::Train),
            "test" => Some(DocumentSet::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSet::Train => "train",
            DocumentSet::Test => "test",
        }
    }
}

impl fmt::Display for DocumentSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a document name `<set>-<index>` (anything after the first `.` is
/// ignored) into its set name and index.
///
/// # Example
/// ```
/// use rstdep::corpus::parse_doc_name;
///
/// assert_eq!(parse_doc_name("train-12.brackets").unwrap(), ("train", 12));
/// assert!(parse_doc_name("train-12-b").is_err());
/// ```
pub fn parse_doc_name(name: &str) -> Result<(&str, usize), CorpusError> {
    let stem = name.split('.').next().unwrap_or(name);
    let mut parts = stem.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(set), Some(index), None) => index
            .parse()
            .map(|index| (set, index))
            .map_err(|_| CorpusError::FileName(name.to_string())),
        _ => Err(CorpusError::FileName(name.to_string())),
    }
}

// =#========================================================================#=
// DOCUMENT
// =#========================================================================#=
/// One document of the corpus.
///
/// Per-EDU data is stored in vectors where position `i` describes EDU `i + 1`.
/// Parents are 1-based EDU indices with `0` standing for ROOT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    set: DocumentSet,
    label: Option<usize>,
    texts: Vec<String>,
    parents: Vec<EduIndex>,
    relations: Vec<Option<String>>,
    depths: Vec<usize>,
}

impl Document {
    /// Joins a segmentation with the flattened dependency triples of the
    /// document's tree.
    ///
    /// Triples must come in breadth-first order (as produced by
    /// [DependencyExtractor](crate::convert::DependencyExtractor)), so that
    /// every head is attached before it governs other EDUs.
    ///
    /// # Errors
    /// [CorpusError::EduMismatch] if segmentation and tree do not describe
    /// the same EDUs `1..=N`.
    pub fn assemble(
        name: impl Into<String>,
        set: DocumentSet,
        label: Option<usize>,
        segmentation: Segmentation,
        triples: &[DependencyTriple],
    ) -> Result<Self, CorpusError> {
        let name = name.into();
        let mismatch = |reason: String| CorpusError::EduMismatch {
            name: name.clone(),
            reason,
        };

        let mut attached: BTreeMap<EduIndex, (EduIndex, Option<String>, usize)> = BTreeMap::new();
        for triple in triples {
            let (parent, depth) = match triple.head {
                Head::Root => (0, 1),
                Head::Edu(head) => {
                    let (_, _, head_depth) = attached
                        .get(&head)
                        .ok_or_else(|| mismatch(format!("head {head} governs before being attached")))?;
                    (head, head_depth + 1)
                }
            };
            attached.insert(triple.modifier, (parent, triple.relation.clone(), depth));
        }

        let num_edus = segmentation.num_edus();
        if attached.len() != num_edus {
            return Err(mismatch(format!(
                "segmentation has {num_edus} EDUs but tree attaches {}",
                attached.len()
            )));
        }
        for (position, (edu, _)) in segmentation.iter().enumerate() {
            if edu != position + 1 {
                return Err(mismatch(format!("segmentation skips EDU {}", position + 1)));
            }
            if !attached.contains_key(&edu) {
                return Err(mismatch(format!("EDU {edu} has no parent")));
            }
        }

        let mut parents = Vec::with_capacity(num_edus);
        let mut relations = Vec::with_capacity(num_edus);
        let mut depths = Vec::with_capacity(num_edus);
        for (parent, relation, depth) in attached.into_values() {
            parents.push(parent);
            relations.push(relation);
            depths.push(depth);
        }

        Ok(Document {
            name,
            set,
            label,
            texts: segmentation.into_texts(),
            parents,
            relations,
            depths,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&self) -> DocumentSet {
        self.set
    }

    /// Returns the 0-based document label, if labels were loaded.
    pub fn label(&self) -> Option<usize> {
        self.label
    }

    pub fn num_edus(&self) -> usize {
        self.texts.len()
    }

    /// Returns the EDU texts in ascending EDU order.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Returns the parent EDU of every EDU, `0` for the ROOT-attached one.
    pub fn parents(&self) -> &[EduIndex] {
        &self.parents
    }

    /// Returns the relation label of every EDU.
    pub fn relations(&self) -> &[Option<String>] {
        &self.relations
    }

    /// Returns the depth of every EDU in the dependency tree (ROOT child: 1).
    pub fn depths(&self) -> &[usize] {
        &self.depths
    }

    /// Returns the EDU attached to ROOT.
    pub fn root_edu(&self) -> Option<EduIndex> {
        self.parents.iter().position(|&p| p == 0).map(|i| i + 1)
    }
}
