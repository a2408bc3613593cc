use rstdep::corpus::{CorpusBuilder, CorpusError, CorpusWriter, DocumentSet, Labels, TokenStats, read_corpus};
use std::fs;
use std::path::{Path, PathBuf};

fn corpus_dir() -> PathBuf {
    Path::new("tests").join("fixtures").join("corpus")
}

fn labeled_builder() -> CorpusBuilder {
    let dir = corpus_dir();
    CorpusBuilder::for_dir(&dir)
        .with_train_labels(dir.join("train.labels"))
        .with_test_labels(dir.join("test.labels"))
}

fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

// --- TESTS CORPUS BUILDING ---
#[test]
fn test_build_fixture_corpus() {
    let corpus = labeled_builder().build().unwrap();

    // dev-0 is outside both splits, train-2 and test-1 are malformed
    let summary = corpus.summary();
    assert_eq!(summary.processed, 6);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.to_string(), "processed 6 files, skipped 2 files");
    let failed: Vec<&str> = summary
        .failures
        .iter()
        .map(|f| f.path.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(failed, vec!["test-1.brackets", "train-2.brackets"]);
    assert!(summary.failures[0].reason.contains("expected 2 residual constituents"));
    assert!(summary.failures[1].reason.contains("illegal nuclearity pairing"));

    let train_names: Vec<&str> = corpus.train().iter().map(|d| d.name()).collect();
    let test_names: Vec<&str> = corpus.test().iter().map(|d| d.name()).collect();
    assert_eq!(train_names, vec!["train-0", "train-1"]);
    assert_eq!(test_names, vec!["test-0"]);
    assert_eq!(corpus.fallback_relation(), "elaboration");
}

#[test]
fn test_document_structure() {
    let corpus = labeled_builder().build().unwrap();

    let doc = &corpus.train()[0];
    assert_eq!(doc.set(), DocumentSet::Train);
    assert_eq!(doc.label(), Some(4));
    assert_eq!(doc.num_edus(), 4);
    assert_eq!(doc.texts()[0], "the pizza was great");
    assert_eq!(doc.texts()[3], "it costs 12 dollars !");
    assert_eq!(doc.parents(), &[0, 1, 4, 1]);
    assert_eq!(
        doc.relations(),
        &[
            Some("root".to_string()),
            Some("background".to_string()),
            Some("attribution".to_string()),
            Some("elaboration".to_string()),
        ]
    );
    assert_eq!(doc.depths(), &[1, 2, 3, 2]);
    assert_eq!(doc.root_edu(), Some(1));

    let doc = &corpus.train()[1];
    assert_eq!(doc.label(), Some(1));
    assert_eq!(doc.parents(), &[3, 1, 0]);
    assert_eq!(doc.root_edu(), Some(3));

    let doc = &corpus.test()[0];
    assert_eq!(doc.set(), DocumentSet::Test);
    assert_eq!(doc.label(), Some(2));
    assert_eq!(doc.parents(), &[2, 0]);
}

#[test]
fn test_vocabularies_from_train_split() {
    let corpus = labeled_builder().build().unwrap();

    let relations = corpus.relation_vocab();
    assert_eq!(
        relations.words(),
        &["root", "background", "attribution", "elaboration", "evaluation", "list"]
    );

    let words = corpus.word_vocab();
    assert_eq!(words.len(), 19);
    assert_eq!(&words.words()[..5], &["the", "was", "NUMBER", "again", "and"]);
    assert!(words.contains("staff"));
    assert!(!words.contains("pasta"));
    assert!(!words.contains("."));

    let corpus = labeled_builder().with_vocab_threshold(5).build().unwrap();
    assert_eq!(corpus.word_vocab().words(), &["the", "was", "NUMBER", "again", "and"]);
}

#[test]
fn test_sequential_matches_parallel() {
    let parallel = labeled_builder().parallel().build().unwrap();
    let sequential = labeled_builder().sequential().build().unwrap();

    assert_eq!(parallel.train(), sequential.train());
    assert_eq!(parallel.test(), sequential.test());
    assert_eq!(parallel.summary(), sequential.summary());
    assert_eq!(parallel.word_vocab().words(), sequential.word_vocab().words());
    assert_eq!(parallel.relation_vocab().words(), sequential.relation_vocab().words());
}

#[test]
fn test_keep_case() {
    let corpus = CorpusBuilder::for_dir(corpus_dir()).with_lowercase(false).build().unwrap();
    assert_eq!(corpus.train()[0].texts()[0], "The pizza was great");
    assert!(corpus.word_vocab().contains("The"));
    assert!(corpus.word_vocab().contains("the"));
}

#[test]
fn test_strict_spans_accept_fixtures() {
    let corpus = labeled_builder().with_strict_spans().build().unwrap();
    assert_eq!(corpus.summary().skipped, 2);
    assert_eq!(corpus.train().len(), 2);
}

#[test]
fn test_missing_label_is_skipped() {
    let labels = tempfile::NamedTempFile::new().unwrap();
    fs::write(labels.path(), "5\n").unwrap();

    let corpus = CorpusBuilder::for_dir(corpus_dir())
        .with_train_labels(labels.path())
        .build()
        .unwrap();
    assert_eq!(corpus.summary().skipped, 3);
    assert_eq!(corpus.train().len(), 1);
    assert_eq!(corpus.train()[0].label(), Some(4));
    // No test labels configured
    assert_eq!(corpus.test()[0].label(), None);
}

#[test]
fn test_malformed_label_file_aborts() {
    let labels = tempfile::NamedTempFile::new().unwrap();
    fs::write(labels.path(), "5\nfive\n").unwrap();

    let err = CorpusBuilder::for_dir(corpus_dir())
        .with_train_labels(labels.path())
        .build()
        .unwrap_err();
    match err {
        CorpusError::Labels { line, value, .. } => {
            assert_eq!(line, 2);
            assert_eq!(value, "five");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_gzip_label_file() {
    let plain = Labels::from_file(corpus_dir().join("train.labels")).unwrap();
    let gzip = Labels::from_file(corpus_dir().join("train.labels.gz")).unwrap();
    assert_eq!(gzip.len(), 3);
    assert_eq!(gzip, plain);

    let corpus = CorpusBuilder::for_dir(corpus_dir())
        .with_train_labels(corpus_dir().join("train.labels.gz"))
        .build()
        .unwrap();
    let labels: Vec<Option<usize>> = corpus.train().iter().map(|d| d.label()).collect();
    assert_eq!(labels, vec![Some(4), Some(1)]);
}

#[test]
fn test_gzip_label_file_detected_by_content() {
    let dir = tempfile::tempdir().unwrap();
    let renamed = dir.path().join("train.labels");
    fs::copy(corpus_dir().join("train.labels.gz"), &renamed).unwrap();
    assert_eq!(Labels::from_file(&renamed).unwrap().label_of(0), Some(4));

    // Truncated gzip stream
    let bytes = fs::read(corpus_dir().join("train.labels.gz")).unwrap();
    let truncated = dir.path().join("truncated.labels.gz");
    fs::write(&truncated, &bytes[..12]).unwrap();
    assert!(matches!(Labels::from_file(&truncated), Err(CorpusError::Io { .. })));
}

#[test]
fn test_missing_directory() {
    let err = CorpusBuilder::for_dir("tests/fixtures/missing").build().unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }));
    assert!(!err.is_input_error());
}

#[test]
fn test_edu_mismatch_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "train-0.brackets", "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n");
    write_file(dir.path(), "train-0.merge", "0\t1\tA\ta\tX\t1\n0\t1\tB\tb\tX\t2\n0\t1\tC\tc\tX\t3\n");
    write_file(dir.path(), "train-1.brackets", "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n");
    write_file(dir.path(), "train-1.merge", "0\t1\tA\ta\tX\t1\n0\t1\tB\tb\tX\t2\n");

    let corpus = CorpusBuilder::for_dir(dir.path()).build().unwrap();
    assert_eq!(corpus.summary().processed, 2);
    assert_eq!(corpus.summary().skipped, 1);
    assert!(corpus.summary().failures[0].reason.contains("train-0"));
    assert_eq!(corpus.train().len(), 1);
}

#[test]
fn test_huge_edu_index_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let brackets = format!(
        "((1, 1), 'Nucleus', 'span')\n(({max}, {max}), 'Satellite', 'elaboration')\n",
        max = usize::MAX
    );
    write_file(dir.path(), "train-0.brackets", &brackets);
    write_file(dir.path(), "train-0.merge", "0\t1\tA\ta\tX\t1\n0\t1\tB\tb\tX\t2\n");
    write_file(dir.path(), "train-1.brackets", "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n");
    write_file(dir.path(), "train-1.merge", "0\t1\tA\ta\tX\t1\n0\t1\tB\tb\tX\t2\n");

    for builder in [
        CorpusBuilder::for_dir(dir.path()).sequential(),
        CorpusBuilder::for_dir(dir.path()).with_strict_spans(),
    ] {
        let corpus = builder.build().unwrap();
        assert_eq!(corpus.summary().processed, 2);
        assert_eq!(corpus.summary().skipped, 1);
        assert!(corpus.summary().failures[0].path.ends_with("train-0.brackets"));
        assert_eq!(corpus.train().len(), 1);
    }
}

#[test]
fn test_missing_segmentation_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "train-0.brackets", "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n");

    let err = CorpusBuilder::for_dir(dir.path()).build().unwrap_err();
    match err {
        CorpusError::Io { path, .. } => assert!(path.ends_with("train-0.merge")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_custom_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "train-0.brackets25", "((1, 1), 'Satellite', 'attribution')\n((2, 2), 'Nucleus', 'span')\n");
    write_file(dir.path(), "train-0.seg", "0\t1\tI\ti\tX\t1\n0\t2\tagree\tagree\tX\t2\n");
    write_file(dir.path(), "train-1.brackets", "not a bracket file\n");

    let corpus = CorpusBuilder::for_dir(dir.path())
        .with_suffix(".brackets25")
        .with_segmentation_suffix(".seg")
        .build()
        .unwrap();
    assert_eq!(corpus.summary().processed, 1);
    assert_eq!(corpus.train()[0].parents(), &[2, 0]);
}

// --- TESTS CORPUS WRITING ---
#[test]
fn test_write_corpus_files() {
    let corpus = labeled_builder().build().unwrap();
    let out = tempfile::tempdir().unwrap();
    let report = corpus.write(out.path(), "yelp").unwrap();

    assert_eq!(report.train, TokenStats { tokens: 22, unknown: 0 });
    assert_eq!(report.test, TokenStats { tokens: 6, unknown: 4 });
    assert!((report.test.unknown_ratio() - 4.0 / 6.0).abs() < 1e-9);

    let writer = CorpusWriter::new(out.path(), "yelp");
    let train = fs::read_to_string(writer.train_path()).unwrap();
    assert_eq!(
        train,
        "EIDX\tPIDX\tRIDX\tEDU\n\
         0\t-1\t0\tthe pizza was great\n\
         1\t0\t1\tand cheap\n\
         2\t3\t2\tmy friend said\n\
         3\t0\t3\tit costs NUMBER dollars\n\
         =============\ttrain-0\t4\n\
         0\t2\t4\tthe service was slow\n\
         1\t0\t5\tthe staff rude\n\
         2\t-1\t0\tnever again\n\
         =============\ttrain-1\t1\n"
    );

    let test = fs::read_to_string(writer.test_path()).unwrap();
    assert_eq!(
        test,
        "EIDX\tPIDX\tRIDX\tEDU\n\
         0\t1\t2\tUNK UNK\n\
         1\t-1\t0\tthe UNK was UNK\n\
         =============\ttest-0\t2\n"
    );

    let w2v = fs::read_to_string(writer.w2v_path()).unwrap();
    assert_eq!(w2v.lines().count(), 7);
    assert_eq!(w2v.lines().next(), Some("the pizza was great"));

    let vocab = fs::read_to_string(writer.vocab_path()).unwrap();
    let vocab: Vec<&str> = vocab.lines().collect();
    assert_eq!(vocab.len(), 19);
    assert_eq!(&vocab[..3], &["the", "was", "NUMBER"]);

    let info = fs::read_to_string(writer.info_path()).unwrap();
    assert!(info.contains("Size of the training examples: 2\n"));
    assert!(info.contains("Size of the test examples: 1\n"));
    assert!(info.contains("Size of the word vocab: 19\n"));
    assert!(info.contains("Size of the relation vocab: 6\n"));
}

#[test]
fn test_write_without_labels() {
    let corpus = CorpusBuilder::for_dir(corpus_dir()).build().unwrap();
    let out = tempfile::tempdir().unwrap();
    corpus.write(out.path(), "plain").unwrap();

    let test = fs::read_to_string(CorpusWriter::new(out.path(), "plain").test_path()).unwrap();
    assert!(test.ends_with("=============\ttest-0\n"));
}

#[test]
fn test_fallback_relation() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "train-0.brackets", "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'elaboration')\n");
    write_file(dir.path(), "train-0.merge", "0\t1\tgood\tgood\tX\t1\n0\t2\tfood\tfood\tX\t2\n");
    write_file(dir.path(), "test-0.brackets", "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', 'contrast')\n");
    write_file(dir.path(), "test-0.merge", "0\t1\tgood\tgood\tX\t1\n0\t2\tbad\tbad\tX\t2\n");
    let out = tempfile::tempdir().unwrap();

    // Unknown "contrast" falls back to "elaboration"
    let corpus = CorpusBuilder::for_dir(dir.path()).build().unwrap();
    corpus.write(out.path(), "ok").unwrap();
    let test = fs::read_to_string(CorpusWriter::new(out.path(), "ok").test_path()).unwrap();
    assert!(test.contains("1\t0\t1\tUNK\n"));

    let corpus = CorpusBuilder::for_dir(dir.path())
        .with_fallback_relation("nonexistent")
        .build()
        .unwrap();
    let err = corpus.write(out.path(), "broken").unwrap_err();
    assert!(matches!(err, CorpusError::MissingRelation(ref r) if r == "nonexistent"));
}

#[test]
fn test_null_relation_has_own_index() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "train-0.brackets",
        "((1, 1), 'Nucleus', 'span')\n((2, 2), 'Satellite', None)\n((1, 2), 'Nucleus', 'span')\n((3, 3), 'Satellite', 'elaboration')\n",
    );
    write_file(dir.path(), "train-0.merge", "0\t1\tgood\tgood\tX\t1\n0\t2\tfood\tfood\tX\t2\n0\t3\there\there\tX\t3\n");
    let corpus = CorpusBuilder::for_dir(dir.path()).build().unwrap();
    assert_eq!(corpus.train()[0].relations()[1], None);
    assert_eq!(corpus.relation_vocab().words(), &["root", "None", "elaboration"]);

    let out = tempfile::tempdir().unwrap();
    corpus.write(out.path(), "null").unwrap();
    let train = fs::read_to_string(CorpusWriter::new(out.path(), "null").train_path()).unwrap();
    assert_eq!(
        train,
        "EIDX\tPIDX\tRIDX\tEDU\n\
         0\t-1\t0\tgood\n\
         1\t0\t1\tfood\n\
         2\t0\t2\there\n\
         =============\ttrain-0\n"
    );
}

// --- TESTS CORPUS READING ---
#[test]
fn test_read_written_corpus() {
    let corpus = labeled_builder().build().unwrap();
    let out = tempfile::tempdir().unwrap();
    corpus.write(out.path(), "yelp").unwrap();

    let docs = read_corpus(CorpusWriter::new(out.path(), "yelp").train_path()).unwrap();
    assert_eq!(docs.len(), 2);

    let doc = &docs[0];
    assert_eq!(doc.name, "train-0");
    assert_eq!(doc.label, Some(4));
    assert_eq!(doc.num_edus(), 4);
    assert_eq!(doc.edus[3], vec!["it", "costs", "NUMBER", "dollars"]);
    assert_eq!(doc.parents, vec![None, Some(0), Some(3), Some(0)]);
    assert_eq!(doc.relations, vec![0, 1, 2, 3]);
    assert_eq!(doc.children, vec![vec![1, 3], vec![], vec![], vec![2]]);
    assert_eq!(doc.root, 0);
    assert_eq!(doc.order, vec![2, 3, 1, 0]);

    let doc = &docs[1];
    assert_eq!(doc.root, 2);
    assert_eq!(doc.order, vec![1, 0, 2]);

    // Written documents agree with the in-memory corpus
    for (read, built) in docs.iter().zip(corpus.train()) {
        let parents: Vec<usize> = read.parents.iter().map(|p| p.map_or(0, |p| p + 1)).collect();
        assert_eq!(parents, built.parents());
    }
}

#[test]
fn test_read_unterminated_corpus() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "trn-bad.txt", "EIDX\tPIDX\tRIDX\tEDU\n0\t-1\t0\tthe food\n");
    let err = read_corpus(dir.path().join("trn-bad.txt")).unwrap_err();
    assert!(matches!(err, CorpusError::Format { line: 2, .. }));
}

#[test]
fn test_read_missing_corpus() {
    let err = read_corpus("tests/fixtures/missing.txt").unwrap_err();
    assert!(matches!(err, CorpusError::Io { .. }));
}
