//! Constants and definitions for corpus assembly and corpus files.

/// Default file suffix of segmentation files
pub const DEFAULT_SEGMENTATION_SUFFIX: &str = ".merge";

/// Default maximal size of the word vocabulary
pub const DEFAULT_VOCAB_THRESHOLD: usize = 10_000;

/// Default relation for EDUs whose relation is unknown to the vocabulary
pub const DEFAULT_FALLBACK_RELATION: &str = "elaboration";

/// Vocabulary entry of EDUs attached without a relation label
pub const NULL_RELATION: &str = "None";

/// First line of every corpus file
pub(crate) const CORPUS_HEADER: &str = "EIDX\tPIDX\tRIDX\tEDU";

/// Marker opening the boundary line after each document
pub(crate) const DOCUMENT_BOUNDARY: &str = "=============";

/// Prefix of training split files
pub(crate) const TRAIN_PREFIX: &str = "trn";

/// Prefix of test split files
pub(crate) const TEST_PREFIX: &str = "tst";

/// Prefix of the corpus info file
pub(crate) const INFO_PREFIX: &str = "info";
