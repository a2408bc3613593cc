//! Corpus assembly: from a directory of parsed documents to flat, labeled
//! training files.
//!
//! For every bracket file `<set>-<index><suffix>` the tree is rebuilt and
//! flattened, then joined with the EDU texts of the segmentation file
//! `<set>-<index>.merge` into a [Document]. Documents of the `train` set
//! define the word and relation [Vocabulary]; both splits are then written
//! by a [CorpusWriter] and can be read back with [read_corpus].
//!
//! # Example
//! ```no_run
//! use rstdep::corpus::{CorpusBuilder, read_corpus};
//!
//! let corpus = CorpusBuilder::for_dir("parses")
//!     .with_train_labels("train.labels")
//!     .with_test_labels("test.labels")
//!     .build()?;
//! let report = corpus.write("out", "yelp")?;
//! println!("{}; UNK ratio {:.3}", corpus.summary(), report.train.unknown_ratio());
//!
//! let docs = read_corpus("out/trn-yelp.txt")?;
//! println!("first document has {} EDUs", docs[0].num_edus());
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod defs;
pub mod document;
pub mod error;
pub mod labels;
pub mod reader;
pub mod segmentation;
pub mod token;
pub mod vocab;
pub mod writer;

pub use builder::{Corpus, CorpusBuilder, RunSummary, SkippedFile};
pub use document::{Document, DocumentSet, parse_doc_name};
pub use error::CorpusError;
pub use labels::Labels;
pub use reader::{CorpusDocument, parse_corpus, read_corpus};
pub use segmentation::Segmentation;
pub use token::{NUMBER_TOKEN, UNKNOWN_TOKEN, normalize_text, normalize_token};
pub use vocab::{Vocabulary, build_relation_vocab, build_word_vocab};
pub use writer::{CorpusWriter, TokenStats, WriteReport};
