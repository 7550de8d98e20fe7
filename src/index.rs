//! Interface to the external lexical index and its detectors.
//!
//! The index and the detection strategies it backs live outside this crate.
//! [`MweIndex`] is the narrow seam through which the annotation stage opens
//! the index, runs the primitive detectors and applies the filters used by
//! the composite presets.

use thiserror::Error;
use tracing::warn;

use crate::document::{DetectedExpression, DetectorToken};

/// Errors reported by an index implementation.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The index data could not be parsed.
    #[error("malformed index data at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A detector was run against an index that is not open.
    #[error("index is not open")]
    NotOpen,

    #[error("detection failed: {0}")]
    Detect(String),
}

/// A lexical index of multi-word expressions plus the detectors built on it.
///
/// Implementations are not expected to be safe for concurrent detection
/// calls; the stage owns the index exclusively while a document is processed.
pub trait MweIndex {
    /// Load whatever the detectors need. Called once per document.
    fn open(&mut self) -> Result<(), IndexError>;

    /// Release what [`open`](MweIndex::open) acquired.
    fn close(&mut self) -> Result<(), IndexError>;

    /// Expressions whose tokens are adjacent in the sentence.
    fn consecutive(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError>;

    /// Every expression the index can find, gaps allowed.
    fn exhaustive(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError>;

    /// Runs of proper nouns, which need no index lookup.
    fn proper_nouns(&self, tokens: &[DetectorToken])
        -> Result<Vec<DetectedExpression>, IndexError>;

    /// Keep only candidates whose inflection pattern the index has seen.
    fn inflection_pattern(
        &self,
        tokens: &[DetectorToken],
        found: Vec<DetectedExpression>,
    ) -> Result<Vec<DetectedExpression>, IndexError>;

    /// Keep only candidates more often used as an MWE than as free words.
    fn more_frequent_as_mwe(
        &self,
        tokens: &[DetectorToken],
        found: Vec<DetectedExpression>,
    ) -> Result<Vec<DetectedExpression>, IndexError>;
}

/// An open index, closed again when the session ends.
///
/// Call [`finish`](IndexSession::finish) on the success path to observe
/// close errors. If the session is dropped instead (an early return or a
/// panic while processing), the index is still closed and a close error is
/// only logged.
pub struct IndexSession<'a, I: MweIndex + ?Sized> {
    index: &'a mut I,
    open: bool,
}

impl<'a, I: MweIndex + ?Sized> IndexSession<'a, I> {
    pub fn open(index: &'a mut I) -> Result<Self, IndexError> {
        index.open()?;
        Ok(Self { index, open: true })
    }

    pub fn index(&self) -> &I {
        self.index
    }

    /// Close the index and report the outcome.
    pub fn finish(mut self) -> Result<(), IndexError> {
        self.open = false;
        self.index.close()
    }
}

impl<I: MweIndex + ?Sized> Drop for IndexSession<'_, I> {
    fn drop(&mut self) {
        if self.open {
            self.open = false;
            if let Err(err) = self.index.close() {
                warn!(error = %err, "failed to close MWE index");
            }
        }
    }
}
