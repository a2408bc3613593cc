//! Word and relation vocabularies.
//!
//! - [Vocabulary]: bidirectional word-to-index map
//! - [build_word_vocab]: frequency-ranked, thresholded token vocabulary
//! - [build_relation_vocab]: relation labels in first-seen order after `root`

use crate::corpus::defs::NULL_RELATION;
use crate::corpus::document::Document;
use crate::corpus::token::normalize_text;
use crate::model::ROOT_RELATION;
use std::collections::HashMap;

// =#========================================================================#=
// VOCABULARY
// =#========================================================================#=
/// Maps words to dense indices and back.
///
/// Words are deduplicated: inserting the same word twice returns the same
/// index. Indices are assigned in insertion order, starting at 0.
///
/// # Example
/// ```
/// use rstdep::corpus::Vocabulary;
///
/// let mut vocab = Vocabulary::new();
/// let idx_root = vocab.get_or_insert("root"); // 0
/// let idx_elab = vocab.get_or_insert("elaboration"); // 1
/// assert_eq!(vocab.get_or_insert("root"), idx_root);
/// assert_eq!(vocab.get_word(idx_elab), Some("elaboration"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Words in index order
    words: Vec<String>,
    /// Map from word to its index
    map: HashMap<String, usize>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty vocabulary with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Vocabulary {
            words: Vec::with_capacity(capacity),
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Gets the index of a word, inserting it if it doesn't exist.
    pub fn get_or_insert(&mut self, word: &str) -> usize {
        if let Some(&index) = self.map.get(word) {
            return index;
        }
        let index = self.words.len();
        self.words.push(word.to_string());
        self.map.insert(word.to_string(), index);
        index
    }

    /// Returns the index of `word`, if present.
    pub fn get_index(&self, word: &str) -> Option<usize> {
        self.map.get(word).copied()
    }

    /// Returns the word at `index`, if present.
    pub fn get_word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.map.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns all words in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocab = Vocabulary::new();
        for word in iter {
            vocab.get_or_insert(word.as_ref());
        }
        vocab
    }
}

// =#========================================================================#=
// CORPUS VOCABULARIES
// =#========================================================================#=
/// Builds the word vocabulary of `docs`.
///
/// Normalized tokens are ranked by count (descending, ties lexicographically)
/// and only the `threshold` most frequent are kept.
pub fn build_word_vocab(docs: &[Document], threshold: usize) -> Vocabulary {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for doc in docs {
        for text in doc.texts() {
            for token in normalize_text(text) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_unstable_by(|(w1, c1), (w2, c2)| c2.cmp(c1).then_with(|| w1.cmp(w2)));
    ranked.into_iter().take(threshold).map(|(word, _)| word).collect()
}

/// Builds the relation vocabulary of `docs`: `root` at index 0, then every
/// relation in first-seen order (documents in slice order, EDUs ascending).
///
/// Missing relations are entered as [NULL_RELATION].
pub fn build_relation_vocab(docs: &[Document]) -> Vocabulary {
    let mut vocab = Vocabulary::new();
    vocab.get_or_insert(ROOT_RELATION);
    for relation in docs.iter().flat_map(|doc| doc.relations()) {
        vocab.get_or_insert(relation.as_deref().unwrap_or(NULL_RELATION));
    }
    vocab
}
