//! Batch conversion of a directory of bracket files into a [Corpus].

use crate::brackets::{self, DEFAULT_BRACKETS_SUFFIX};
use crate::convert::{BracketTreeBuilder, ConversionError, DependencyExtractor};
use crate::corpus::defs::{DEFAULT_FALLBACK_RELATION, DEFAULT_SEGMENTATION_SUFFIX, DEFAULT_VOCAB_THRESHOLD};
use crate::corpus::document::{Document, DocumentSet, parse_doc_name};
use crate::corpus::error::CorpusError;
use crate::corpus::labels::Labels;
use crate::corpus::segmentation::Segmentation;
use crate::corpus::vocab::{Vocabulary, build_relation_vocab, build_word_vocab};
use crate::corpus::writer::{CorpusWriter, WriteReport};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// =#========================================================================#=
// RUN SUMMARY
// =#========================================================================#=
/// A document rejected during a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Bracket files examined, including skipped ones
    pub processed: usize,
    /// Files rejected because of malformed input
    pub skipped: usize,
    /// Path and reason of every skipped file, in path order
    pub failures: Vec<SkippedFile>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "processed {} files, skipped {} files", self.processed, self.skipped)
    }
}

// =#========================================================================#=
// CORPUS
// =#========================================================================#=
/// Converted documents of both splits with the vocabularies of the
/// training split.
#[derive(Debug, Clone)]
pub struct Corpus {
    train: Vec<Document>,
    test: Vec<Document>,
    word_vocab: Vocabulary,
    relation_vocab: Vocabulary,
    fallback_relation: String,
    summary: RunSummary,
}

impl Corpus {
    /// Training documents ordered by name.
    pub fn train(&self) -> &[Document] {
        &self.train
    }

    /// Test documents ordered by name.
    pub fn test(&self) -> &[Document] {
        &self.test
    }

    pub fn word_vocab(&self) -> &Vocabulary {
        &self.word_vocab
    }

    pub fn relation_vocab(&self) -> &Vocabulary {
        &self.relation_vocab
    }

    /// Relation used for EDUs whose relation is not in the relation vocabulary.
    pub fn fallback_relation(&self) -> &str {
        &self.fallback_relation
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Writes the corpus files for `name` into `out_dir`.
    ///
    /// See [CorpusWriter] for the files produced.
    pub fn write<P: AsRef<Path>>(&self, out_dir: P, name: &str) -> Result<WriteReport, CorpusError> {
        CorpusWriter::new(out_dir, name).write(self)
    }
}

// =#========================================================================#=
// CORPUS BUILDER
// =#========================================================================#=
/// Builder to configure and run the conversion of a directory.
///
/// Every file ending in the bracket suffix is read, rebuilt into a tree,
/// flattened and joined with its segmentation file. Documents with malformed
/// input are logged, skipped and counted in the [RunSummary]; IO errors and
/// invariant violations abort the run.
///
/// # Example
/// ```no_run
/// use rstdep::corpus::CorpusBuilder;
///
/// let corpus = CorpusBuilder::for_dir("data/yelp/parses")
///     .with_suffix(".brackets25")
///     .with_train_labels("data/yelp/train.labels")
///     .with_test_labels("data/yelp/test.labels")
///     .with_vocab_threshold(10_000)
///     .build()?;
///
/// println!("{}", corpus.summary());
/// corpus.write("data/yelp/out", "yelp")?;
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CorpusBuilder {
    dir: PathBuf,
    suffix: String,
    segmentation_suffix: String,
    train_labels: Option<PathBuf>,
    test_labels: Option<PathBuf>,
    vocab_threshold: usize,
    lowercase: bool,
    strict_spans: bool,
    fallback_relation: String,
    parallel: bool,
}

// ============================================================================
// Building (pub)
// ============================================================================
impl CorpusBuilder {
    /// Creates a builder for the bracket files in `dir` with default settings:
    /// - Suffixes `.brackets` and `.merge`
    /// - No label files
    /// - Word vocabulary of at most 10000 entries
    /// - Lowercased tokens, no span checking
    /// - Fallback relation `elaboration`
    /// - Parallel processing
    pub fn for_dir<P: AsRef<Path>>(dir: P) -> Self {
        CorpusBuilder {
            dir: dir.as_ref().to_path_buf(),
            suffix: DEFAULT_BRACKETS_SUFFIX.to_string(),
            segmentation_suffix: DEFAULT_SEGMENTATION_SUFFIX.to_string(),
            train_labels: None,
            test_labels: None,
            vocab_threshold: DEFAULT_VOCAB_THRESHOLD,
            lowercase: true,
            strict_spans: false,
            fallback_relation: DEFAULT_FALLBACK_RELATION.to_string(),
            parallel: true,
        }
    }

    /// Sets the suffix identifying bracket files, e.g. `.brackets25`.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Sets the suffix replacing the bracket suffix to find segmentation files.
    pub fn with_segmentation_suffix(mut self, suffix: &str) -> Self {
        self.segmentation_suffix = suffix.to_string();
        self
    }

    /// Sets the label file of the training split.
    pub fn with_train_labels<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.train_labels = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the label file of the test split.
    pub fn with_test_labels<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.test_labels = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the maximal number of words kept in the word vocabulary.
    pub fn with_vocab_threshold(mut self, threshold: usize) -> Self {
        self.vocab_threshold = threshold;
        self
    }

    /// Sets whether EDU tokens are lowercased while loading.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Rejects documents whose constituent spans do not fit their children.
    pub fn with_strict_spans(mut self) -> Self {
        self.strict_spans = true;
        self
    }

    /// Sets the relation used for EDUs with unknown relations.
    pub fn with_fallback_relation(mut self, relation: &str) -> Self {
        self.fallback_relation = relation.to_string();
        self
    }

    /// Processes files one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Processes files in parallel, one task per file (default).
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Runs the conversion and builds the vocabularies.
    ///
    /// # Errors
    /// * [CorpusError::Io] - if the directory, a label file or a
    ///   segmentation file cannot be read
    /// * [CorpusError::Labels] - if a label file is malformed
    /// * [CorpusError::Conversion] - wrapping an invariant violation
    pub fn build(self) -> Result<Corpus, CorpusError> {
        let files = self.collect_files()?;
        info!(num_files = files.len(), dir = %self.dir.display(), "converting bracket files");

        let train_labels = self.train_labels.as_ref().map(Labels::from_file).transpose()?;
        let test_labels = self.test_labels.as_ref().map(Labels::from_file).transpose()?;
        let mut tree_builder = BracketTreeBuilder::new();
        if self.strict_spans {
            tree_builder = tree_builder.with_strict_spans();
        }
        let loader = DocumentLoader {
            tree_builder,
            suffix: &self.suffix,
            segmentation_suffix: &self.segmentation_suffix,
            lowercase: self.lowercase,
            train_labels: train_labels.as_ref(),
            test_labels: test_labels.as_ref(),
        };

        let outcomes: Vec<Result<Option<Document>, CorpusError>> = if self.parallel {
            files.par_iter().map(|path| loader.load(path)).collect()
        } else {
            files.iter().map(|path| loader.load(path)).collect()
        };

        let mut summary = RunSummary::default();
        let mut documents = Vec::with_capacity(files.len());
        for (path, outcome) in files.iter().zip(outcomes) {
            summary.processed += 1;
            match outcome {
                Ok(Some(document)) => documents.push(document),
                Ok(None) => {}
                Err(e) if e.is_input_error() => {
                    warn!(path = %path.display(), error = %e, "skipping document");
                    summary.skipped += 1;
                    summary.failures.push(SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        info!(processed = summary.processed, skipped = summary.skipped, "conversion finished");

        documents.sort_by(|a, b| a.name().cmp(b.name()));
        let (train, test): (Vec<_>, Vec<_>) = documents.into_iter().partition(|d| d.set() == DocumentSet::Train);

        let word_vocab = build_word_vocab(&train, self.vocab_threshold);
        let relation_vocab = build_relation_vocab(&train);
        info!(
            num_train = train.len(),
            num_test = test.len(),
            word_vocab = word_vocab.len(),
            relation_vocab = relation_vocab.len(),
            "built vocabularies"
        );

        Ok(Corpus {
            train,
            test,
            word_vocab,
            relation_vocab,
            fallback_relation: self.fallback_relation,
            summary,
        })
    }

    /// Lists all bracket files of the directory in path order.
    fn collect_files(&self) -> Result<Vec<PathBuf>, CorpusError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| CorpusError::io(&self.dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CorpusError::io(&self.dir, e))?.path();
            let is_match = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&self.suffix));
            if is_match && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

// =#========================================================================#=
// DOCUMENT LOADER
// =#========================================================================#=
/// Shared read-only state of one batch run.
struct DocumentLoader<'a> {
    tree_builder: BracketTreeBuilder,
    suffix: &'a str,
    segmentation_suffix: &'a str,
    lowercase: bool,
    train_labels: Option<&'a Labels>,
    test_labels: Option<&'a Labels>,
}

impl DocumentLoader<'_> {
    /// Converts one bracket file; `Ok(None)` for documents outside both splits.
    fn load(&self, path: &Path) -> Result<Option<Document>, CorpusError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CorpusError::FileName(path.display().to_string()))?;
        let stem = file_name.strip_suffix(self.suffix).unwrap_or(file_name);

        let (set_name, index) = parse_doc_name(stem)?;
        let Some(set) = DocumentSet::from_name(set_name) else {
            debug!(name = stem, "document belongs to neither train nor test");
            return Ok(None);
        };

        let conversion_error = |source: ConversionError| CorpusError::Conversion {
            name: stem.to_string(),
            source,
        };
        let records = brackets::parse_file(path).map_err(|e| conversion_error(e.into()))?;
        let tree = self
            .tree_builder
            .reconstruct(&records)
            .map_err(|e| conversion_error(e.into()))?;
        let triples = DependencyExtractor::new()
            .flatten(&tree)
            .map_err(|e| conversion_error(e.into()))?;

        let segmentation_path = path.with_file_name(format!("{stem}{}", self.segmentation_suffix));
        let segmentation = Segmentation::from_file(&segmentation_path, self.lowercase)?;

        let labels = match set {
            DocumentSet::Train => self.train_labels,
            DocumentSet::Test => self.test_labels,
        };
        let label = match labels {
            Some(labels) => Some(labels.label_of(index).ok_or_else(|| CorpusError::MissingLabel {
                name: stem.to_string(),
                index,
            })?),
            None => None,
        };

        debug!(name = stem, num_edus = tree.num_edus(), "converted document");
        Document::assemble(stem, set, label, segmentation, &triples).map(Some)
    }
}
