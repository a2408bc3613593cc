//! Writer for flat corpus files.
//!
//! A corpus file starts with the header `EIDX\tPIDX\tRIDX\tEDU`, followed by
//! one line per EDU and a boundary line after each document:
//!
//! ```text
//! EIDX	PIDX	RIDX	EDU
//! 0	1	1	the food
//! 1	-1	0	was great
//! =============	train-0	4
//! ```
//!
//! `EIDX` is the 0-based EDU index, `PIDX` the 0-based parent EDU (`-1` for
//! the ROOT-attached EDU), `RIDX` the relation index and `EDU` the normalized
//! text with out-of-vocabulary tokens replaced by `UNK`.
//! EDUs attached without a relation label use the index of `None`.

use crate::corpus::builder::Corpus;
use crate::corpus::defs::{CORPUS_HEADER, DOCUMENT_BOUNDARY, INFO_PREFIX, NULL_RELATION, TEST_PREFIX, TRAIN_PREFIX};
use crate::corpus::document::Document;
use crate::corpus::error::CorpusError;
use crate::corpus::token::{UNKNOWN_TOKEN, normalize_text};
use crate::corpus::vocab::Vocabulary;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Token counts of one written split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStats {
    /// Tokens written, punctuation excluded
    pub tokens: usize,
    /// Tokens replaced by `UNK`
    pub unknown: usize,
}

impl TokenStats {
    /// Share of unknown tokens, `0.0` for an empty split.
    pub fn unknown_ratio(&self) -> f64 {
        if self.tokens == 0 {
            0.0
        } else {
            self.unknown as f64 / self.tokens as f64
        }
    }
}

/// Token counts of both splits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub train: TokenStats,
    pub test: TokenStats,
}

// =#========================================================================#=
// CORPUS WRITER
// =#========================================================================#=
/// Writes a [Corpus] as a set of files named after the corpus:
/// * `trn-<name>.txt` and `tst-<name>.txt` - documents of both splits
/// * `trn-<name>.w2v` - the normalized training EDUs, one per line
/// * `trn-<name>.vocab` - the word vocabulary in index order
/// * `info-<name>.txt` - split and vocabulary sizes
pub struct CorpusWriter {
    out_dir: PathBuf,
    name: String,
}

// ============================================================================
// API
// ============================================================================
impl CorpusWriter {
    pub fn new<P: AsRef<Path>>(out_dir: P, name: &str) -> Self {
        CorpusWriter {
            out_dir: out_dir.as_ref().to_path_buf(),
            name: name.to_string(),
        }
    }

    pub fn train_path(&self) -> PathBuf {
        self.path(TRAIN_PREFIX, "txt")
    }

    pub fn test_path(&self) -> PathBuf {
        self.path(TEST_PREFIX, "txt")
    }

    pub fn w2v_path(&self) -> PathBuf {
        self.path(TRAIN_PREFIX, "w2v")
    }

    pub fn vocab_path(&self) -> PathBuf {
        self.path(TRAIN_PREFIX, "vocab")
    }

    pub fn info_path(&self) -> PathBuf {
        self.path(INFO_PREFIX, "txt")
    }

    /// Writes all files, creating the output directory if needed.
    ///
    /// # Errors
    /// * [CorpusError::Io] - if a file cannot be written
    /// * [CorpusError::MissingRelation] - if an EDU needs the fallback
    ///   relation but it is not in the relation vocabulary
    pub fn write(&self, corpus: &Corpus) -> Result<WriteReport, CorpusError> {
        fs::create_dir_all(&self.out_dir).map_err(|e| CorpusError::io(&self.out_dir, e))?;

        let train = self.write_split(corpus, corpus.train(), &self.train_path(), Some(&self.w2v_path()))?;
        let test = self.write_split(corpus, corpus.test(), &self.test_path(), None)?;
        self.write_vocab(corpus.word_vocab())?;
        self.write_info(corpus)?;

        Ok(WriteReport { train, test })
    }
}

// ============================================================================
// File Writing
// ============================================================================
impl CorpusWriter {
    fn path(&self, prefix: &str, extension: &str) -> PathBuf {
        self.out_dir.join(format!("{prefix}-{}.{extension}", self.name))
    }

    fn write_split(
        &self,
        corpus: &Corpus,
        documents: &[Document],
        path: &Path,
        w2v_path: Option<&Path>,
    ) -> Result<TokenStats, CorpusError> {
        info!(path = %path.display(), num_docs = documents.len(), "writing documents");
        let io_err = |e: io::Error| CorpusError::io(path, e);

        let mut out = create(path)?;
        let mut w2v = w2v_path.map(create).transpose()?;
        let mut stats = TokenStats::default();

        writeln!(out, "{CORPUS_HEADER}").map_err(io_err)?;
        for doc in documents {
            let rows = doc.texts().iter().zip(doc.parents()).zip(doc.relations());
            for (eidx, ((text, &parent), relation)) in rows.enumerate() {
                let edu_text = refine_with_vocab(text, corpus.word_vocab(), &mut stats);
                let relation_index = relation_index(corpus, relation.as_deref())?;
                let parent_index = parent as i64 - 1;

                writeln!(out, "{eidx}\t{parent_index}\t{relation_index}\t{edu_text}").map_err(io_err)?;
                if let (Some(w2v), Some(w2v_path)) = (w2v.as_mut(), w2v_path) {
                    writeln!(w2v, "{edu_text}").map_err(|e| CorpusError::io(w2v_path, e))?;
                }
            }
            let boundary = match doc.label() {
                Some(label) => writeln!(out, "{DOCUMENT_BOUNDARY}\t{}\t{label}", doc.name()),
                None => writeln!(out, "{DOCUMENT_BOUNDARY}\t{}", doc.name()),
            };
            boundary.map_err(io_err)?;
        }
        out.flush().map_err(io_err)?;
        if let (Some(mut w2v), Some(w2v_path)) = (w2v, w2v_path) {
            w2v.flush().map_err(|e| CorpusError::io(w2v_path, e))?;
        }

        info!(
            tokens = stats.tokens,
            unknown = stats.unknown,
            ratio = stats.unknown_ratio(),
            "token counts"
        );
        Ok(stats)
    }

    fn write_vocab(&self, vocab: &Vocabulary) -> Result<(), CorpusError> {
        let path = self.vocab_path();
        let io_err = |e: io::Error| CorpusError::io(&path, e);

        let mut out = create(&path)?;
        for word in vocab.words() {
            writeln!(out, "{word}").map_err(io_err)?;
        }
        out.flush().map_err(io_err)?;
        info!(path = %path.display(), num_words = vocab.len(), "wrote vocabulary");
        Ok(())
    }

    fn write_info(&self, corpus: &Corpus) -> Result<(), CorpusError> {
        let path = self.info_path();
        let info = format!(
            "Size of the training examples: {}\n\
             Size of the test examples: {}\n\
             Size of the word vocab: {}\n\
             Size of the relation vocab: {}\n",
            corpus.train().len(),
            corpus.test().len(),
            corpus.word_vocab().len(),
            corpus.relation_vocab().len(),
        );
        fs::write(&path, info).map_err(|e| CorpusError::io(&path, e))
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, CorpusError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| CorpusError::io(path, e))
}

/// Normalizes `text` and replaces out-of-vocabulary tokens.
fn refine_with_vocab(text: &str, vocab: &Vocabulary, stats: &mut TokenStats) -> String {
    let tokens: Vec<String> = normalize_text(text)
        .map(|token| {
            stats.tokens += 1;
            if vocab.contains(&token) {
                token
            } else {
                stats.unknown += 1;
                UNKNOWN_TOKEN.to_string()
            }
        })
        .collect();
    tokens.join(" ")
}

/// Looks up `relation` (or [NULL_RELATION] if missing), falling back to the
/// corpus' fallback relation.
fn relation_index(corpus: &Corpus, relation: Option<&str>) -> Result<usize, CorpusError> {
    let vocab = corpus.relation_vocab();
    if let Some(index) = vocab.get_index(relation.unwrap_or(NULL_RELATION)) {
        return Ok(index);
    }
    vocab
        .get_index(corpus.fallback_relation())
        .ok_or_else(|| CorpusError::MissingRelation(corpus.fallback_relation().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refine_with_vocab() {
        let vocab: Vocabulary = ["the", "NUMBER"].into_iter().collect();
        let mut stats = TokenStats::default();
        let text = refine_with_vocab("the 3 pizzas , !", &vocab, &mut stats);
        assert_eq!(text, "the NUMBER UNK");
        assert_eq!(stats, TokenStats { tokens: 3, unknown: 1 });
    }

    #[test]
    fn test_file_names() {
        let writer = CorpusWriter::new("/out", "yelp");
        assert_eq!(writer.train_path(), PathBuf::from("/out/trn-yelp.txt"));
        assert_eq!(writer.w2v_path(), PathBuf::from("/out/trn-yelp.w2v"));
        assert_eq!(writer.info_path(), PathBuf::from("/out/info-yelp.txt"));
    }
}
