//! Error types for the MWE annotation stage.
//!
//! Every error is fatal for the document being processed: nothing is
//! retried and no partial result is kept.

use std::path::PathBuf;

use thiserror::Error;

use crate::detector::UnknownDetector;
use crate::index::IndexError;

/// Errors raised while building an [`AnnotatorConfig`](crate::AnnotatorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required option was not supplied.
    #[error("no `{key}` key found in configuration")]
    MissingKey { key: String },

    /// The replacement string would reintroduce the separator it replaces.
    #[error("the underscoreReplacement `{replacement}` contains an underscore character")]
    InvalidReplacement { replacement: String },

    /// The lexical index data does not exist on disk.
    #[error("index file {} does not exist", .path.display())]
    IndexNotFound { path: PathBuf },

    /// A configuration file could not be read.
    #[error("failed to read configuration {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    /// A configuration file could not be parsed.
    #[error("failed to parse configuration: {message}")]
    Parse { message: String },
}

/// Errors raised by [`MweAnnotator`](crate::MweAnnotator).
#[derive(Debug, Error)]
pub enum MweError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured detector name is not one of the presets.
    #[error(transparent)]
    InvalidDetector(#[from] UnknownDetector),

    /// The document reached this stage without the annotations it needs.
    #[error("unable to find {what} in document")]
    MissingAnnotation { what: String },

    /// The lexical index could not be loaded or opened.
    #[error("unable to open MWE index")]
    ResourceUnavailable(#[source] IndexError),

    /// The lexical index failed to close after processing.
    #[error("unable to close MWE index")]
    ResourceClose(#[source] IndexError),

    /// The detector failed while processing a sentence.
    #[error("MWE detection failed in sentence {sentence}")]
    Detection {
        sentence: usize,
        #[source]
        source: IndexError,
    },
}

impl MweError {
    /// Whether this error stems from the stage's configuration rather than
    /// from the document or the index.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MweError::Config(_) | MweError::InvalidDetector(_))
    }

    pub(crate) fn missing(what: impl Into<String>) -> Self {
        MweError::MissingAnnotation { what: what.into() }
    }
}

/// Result type for MWE annotation operations.
pub type MweResult<T> = Result<T, MweError>;
