#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Multi-word expression (MWE) annotation for layered-nlp pipelines.
//!
//! This crate provides an annotation stage that runs after tokenization,
//! part-of-speech tagging and lemmatization. It hands each sentence to an
//! external lexical-index-backed detector and writes the detected
//! expressions back onto the sentence and its tokens.
//!
//! ## Overview
//!
//! ```text
//! Document ─► Sentence ─► [DetectorToken] ─► Detector ─► [DetectedExpression]
//!                 ▲                                              │
//!                 └──────────── span alignment ◄─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Option parsing and validation
//! - [`index`] - The lexical index interface and scoped open/close
//! - [`detector`] - The five detector presets
//! - [`align`] - Mapping canonical forms back onto token spans
//! - [`annotator`] - The annotation stage itself
//! - [`document`] - Typed document, sentence and token model
//! - [`errors`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use layered_mwe::{AnnotatorConfig, MweAnnotator};
//!
//! let config = AnnotatorConfig::from_properties(&props)?;
//! let mut annotator = MweAnnotator::load(config, MyIndex::from_path)?;
//! annotator.annotate(&mut document)?;
//!
//! for sentence in document.sentences() {
//!     println!("{}", SentenceDisplay::new(sentence));
//! }
//! ```

pub mod align;
pub mod annotator;
pub mod config;
pub mod detector;
pub mod display;
pub mod document;
pub mod errors;
pub mod index;

pub use align::{components, find_span, resolve_labels, Alignment};
pub use annotator::{sanitize, Annotator, MweAnnotator, Requirement};
pub use config::{AnnotatorConfig, DEFAULT_PROPERTY_PREFIX};
pub use detector::{Detector, DetectorKind, UnknownDetector};
pub use display::SentenceDisplay;
pub use document::{DetectedExpression, DetectorToken, Document, Sentence, Token};
pub use errors::{ConfigError, MweError, MweResult};
pub use index::{IndexError, IndexSession, MweIndex};
