//! Command-line demonstration of the MWE annotation stage.
//!
//! Usage:
//!   mwe-demo [--detector <name>] [--index-data <path>] [--input <doc.json>] [--json]
//!   mwe-demo --config <mwe.toml> [--input <doc.json>]
//!
//! Without `--input`, the built-in sample "She looked up the world record."
//! is annotated.

mod lexicon;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use layered_mwe::config::{DETECTOR_KEY, INDEX_DATA_KEY, UNDERSCORE_REPLACEMENT_KEY, VERBOSE_KEY};
use layered_mwe::{
    Annotator, AnnotatorConfig, ConfigError, Document, MweAnnotator, MweError, Sentence,
    SentenceDisplay, Token,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::lexicon::LexiconIndex;

const DEFAULT_INDEX: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mweindex.txt");

#[derive(Parser)]
#[command(name = "mwe-demo", about = "Annotate multi-word expressions in a tagged document")]
struct Args {
    /// Lexicon backing the detectors
    #[arg(long, default_value = DEFAULT_INDEX)]
    index_data: String,

    /// Detector preset: Consecutive, Exhaustive, ProperNouns, Complex or CompositeConsecutiveProperNouns
    #[arg(short, long, default_value = "Consecutive")]
    detector: String,

    /// Replacement for `_` and spaces in token text
    #[arg(long, default_value = "-")]
    underscore_replacement: String,

    /// Echo the configuration and every detected expression
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// TOML configuration file (replaces the four options above)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON document with sentences, tokens, POS tags and lemmas
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the annotated document as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mwe(#[from] MweError),

    #[error("failed to read document {}: {message}", .path.display())]
    Input { path: PathBuf, message: String },

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Args {
    /// The four options as a flat property map.
    fn properties(&self) -> HashMap<String, String> {
        HashMap::from([
            (VERBOSE_KEY.to_string(), self.verbose.to_string()),
            (
                UNDERSCORE_REPLACEMENT_KEY.to_string(),
                self.underscore_replacement.clone(),
            ),
            (INDEX_DATA_KEY.to_string(), self.index_data.clone()),
            (DETECTOR_KEY.to_string(), self.detector.clone()),
        ])
    }
}

/// The sample sentence, already tokenized, tagged and lemmatized.
fn sample_document() -> Document {
    let tokens = [
        ("She", "PRP", "she"),
        ("looked", "VBD", "look"),
        ("up", "RP", "up"),
        ("the", "DT", "the"),
        ("world", "NN", "world"),
        ("record", "NN", "record"),
        (".", ".", "."),
    ]
    .into_iter()
    .map(|(word, pos, lemma)| Token::new(word, pos, lemma))
    .collect();

    Document {
        text: Some("She looked up the world record.".to_string()),
        sentences: Some(vec![Sentence::new(tokens)]),
    }
}

fn read_document(args: &Args) -> Result<Document, DemoError> {
    match &args.input {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| DemoError::Input {
                path: path.clone(),
                message: e.to_string(),
            })?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(sample_document()),
    }
}

fn run(args: &Args) -> Result<(), DemoError> {
    let config = match &args.config {
        Some(path) => AnnotatorConfig::load(path)?,
        None => AnnotatorConfig::from_properties(&args.properties())?,
    };
    let mut annotator = MweAnnotator::load(config, LexiconIndex::new)?;

    let mut document = read_document(args)?;
    annotator.annotate(&mut document)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        for sentence in document.sentences() {
            println!("{}\n", SentenceDisplay::new(sentence));
        }
    }
    Ok(())
}

/// Log filter used when `RUST_LOG` is unset.
///
/// The library only emits `info` events when its configuration asks for
/// verbose output, so they stay enabled even without `--verbose`; that way a
/// `verbose = true` config file is honoured too.
fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn,layered_mwe=info")
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(args.verbose)),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut message = err.to_string();
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }
            tracing::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}
