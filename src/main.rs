use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rstdep::brackets;
use rstdep::convert::{BracketTreeBuilder, DependencyExtractor};
use rstdep::corpus::CorpusBuilder;
use rstdep::model::DiscourseTree;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "rstdep")]
#[command(bin_name = "rstdep")]
#[command(about = "Convert RST bracket trees into dependency corpora", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the dependency triples of a bracket file
    Convert {
        /// Reject constituents whose span does not fit their children
        #[arg(long)]
        strict: bool,

        file: PathBuf,
    },

    /// Print the reconstructed tree of a bracket file
    Inspect {
        #[arg(long)]
        strict: bool,

        file: PathBuf,
    },

    /// Convert a directory of bracket and segmentation files into a corpus
    Corpus {
        /// Directory with the bracket and segmentation files
        input: PathBuf,

        /// Directory receiving the corpus files
        output: PathBuf,

        /// Corpus name used in the output file names
        #[arg(short, long, default_value = "corpus")]
        name: String,

        #[arg(long, default_value = ".brackets")]
        suffix: String,

        #[arg(long)]
        train_labels: Option<PathBuf>,

        #[arg(long)]
        test_labels: Option<PathBuf>,

        /// Maximal size of the word vocabulary
        #[arg(long, default_value_t = 10_000)]
        vocab_size: usize,

        /// Keep the case of tokens
        #[arg(long)]
        keep_case: bool,

        #[arg(long)]
        strict: bool,

        #[arg(long, default_value = "elaboration")]
        fallback_relation: String,

        /// Process files one after another
        #[arg(long)]
        sequential: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "rstdep=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Convert { strict, file } => {
            let tree = read_tree(&file, strict)?;
            let triples = DependencyExtractor::new()
                .flatten(&tree)
                .with_context(|| format!("failed to flatten {}", file.display()))?;
            for triple in triples {
                println!("{triple}");
            }
        }
        Command::Inspect { strict, file } => {
            let tree = read_tree(&file, strict)?;
            println!(
                "{} EDUs, {} nodes, root head {}",
                tree.num_edus(),
                tree.num_nodes(),
                tree.root().head_edu()
            );
            for node in tree.post_order_iter() {
                println!(
                    "{:>4}  {:<10} {:<9} {:<20} form {}  head {} {}",
                    node.index(),
                    node.span().to_string(),
                    node.nuclearity().map_or("-", |n| n.as_str()),
                    node.relation().unwrap_or("-"),
                    node.form(),
                    node.head_edu(),
                    node.head_span(),
                );
            }
        }
        Command::Corpus {
            input,
            output,
            name,
            suffix,
            train_labels,
            test_labels,
            vocab_size,
            keep_case,
            strict,
            fallback_relation,
            sequential,
        } => {
            let mut builder = CorpusBuilder::for_dir(&input)
                .with_suffix(&suffix)
                .with_vocab_threshold(vocab_size)
                .with_lowercase(!keep_case)
                .with_fallback_relation(&fallback_relation);
            if let Some(path) = train_labels {
                builder = builder.with_train_labels(path);
            }
            if let Some(path) = test_labels {
                builder = builder.with_test_labels(path);
            }
            if strict {
                builder = builder.with_strict_spans();
            }
            if sequential {
                builder = builder.sequential();
            }

            let corpus = builder
                .build()
                .with_context(|| format!("failed to convert {}", input.display()))?;
            let report = corpus
                .write(&output, &name)
                .with_context(|| format!("failed to write corpus to {}", output.display()))?;

            println!("{}", corpus.summary());
            for failure in &corpus.summary().failures {
                println!("  skipped {}: {}", failure.path.display(), failure.reason);
            }
            println!(
                "train: {} docs, UNK ratio {:.4}; test: {} docs, UNK ratio {:.4}",
                corpus.train().len(),
                report.train.unknown_ratio(),
                corpus.test().len(),
                report.test.unknown_ratio()
            );
            if corpus.train().is_empty() && corpus.test().is_empty() {
                bail!("no documents converted from {}", input.display());
            }
        }
    }

    Ok(())
}

fn read_tree(file: &Path, strict: bool) -> Result<DiscourseTree> {
    let records = brackets::parse_file(file).with_context(|| format!("failed to parse {}", file.display()))?;
    let mut builder = BracketTreeBuilder::new();
    if strict {
        builder = builder.with_strict_spans();
    }
    builder
        .reconstruct(&records)
        .with_context(|| format!("malformed tree in {}", file.display()))
}
