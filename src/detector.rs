//! Detector presets.
//!
//! The stage supports a closed set of five detector configurations. Two of
//! them combine the index's primitive detectors:
//!
//! - `Complex`: proper nouns, then consecutive matches filtered by
//!   inflection pattern and then by MWE-vs-free-word frequency
//! - `CompositeConsecutiveProperNouns`: consecutive matches, then proper nouns
//!
//! Combined presets concatenate the results of their parts in that order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::document::{DetectedExpression, DetectorToken};
use crate::index::{IndexError, MweIndex};

/// The supported detector presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    Consecutive,
    Exhaustive,
    ProperNouns,
    Complex,
    CompositeConsecutiveProperNouns,
}

impl DetectorKind {
    pub const ALL: [DetectorKind; 5] = [
        DetectorKind::Consecutive,
        DetectorKind::Exhaustive,
        DetectorKind::ProperNouns,
        DetectorKind::Complex,
        DetectorKind::CompositeConsecutiveProperNouns,
    ];

    /// The configuration name of this preset.
    pub fn name(self) -> &'static str {
        match self {
            DetectorKind::Consecutive => "Consecutive",
            DetectorKind::Exhaustive => "Exhaustive",
            DetectorKind::ProperNouns => "ProperNouns",
            DetectorKind::Complex => "Complex",
            DetectorKind::CompositeConsecutiveProperNouns => "CompositeConsecutiveProperNouns",
        }
    }

    /// Human-readable list of supported names, e.g. for error messages.
    pub fn supported_names() -> String {
        let mut names = String::new();
        for (i, kind) in Self::ALL.iter().enumerate() {
            if i + 1 == Self::ALL.len() {
                names.push_str(" or ");
            } else if i > 0 {
                names.push_str(", ");
            }
            names.push('"');
            names.push_str(kind.name());
            names.push('"');
        }
        names
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A detector name outside the supported presets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid detector argument {name}, only {} are supported", DetectorKind::supported_names())]
pub struct UnknownDetector {
    pub name: String,
}

impl FromStr for DetectorKind {
    type Err = UnknownDetector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownDetector { name: s.to_string() })
    }
}

/// A preset bound to an open index.
pub struct Detector<'a, I: MweIndex + ?Sized> {
    kind: DetectorKind,
    index: &'a I,
}

impl<'a, I: MweIndex + ?Sized> Detector<'a, I> {
    pub fn new(index: &'a I, kind: DetectorKind) -> Self {
        Self { kind, index }
    }

    /// Build the detector named by `name`.
    pub fn from_name(index: &'a I, name: &str) -> Result<Self, UnknownDetector> {
        Ok(Self::new(index, name.parse()?))
    }

    pub fn kind(&self) -> DetectorKind {
        self.kind
    }

    /// Run the preset over one sentence's tokens.
    pub fn detect(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        let index = self.index;
        match self.kind {
            DetectorKind::Consecutive => index.consecutive(tokens),
            DetectorKind::Exhaustive => index.exhaustive(tokens),
            DetectorKind::ProperNouns => index.proper_nouns(tokens),
            DetectorKind::Complex => {
                let mut found = index.proper_nouns(tokens)?;
                let consecutive = index.consecutive(tokens)?;
                let inflected = index.inflection_pattern(tokens, consecutive)?;
                found.extend(index.more_frequent_as_mwe(tokens, inflected)?);
                Ok(found)
            }
            DetectorKind::CompositeConsecutiveProperNouns => {
                let mut found = index.consecutive(tokens)?;
                found.extend(index.proper_nouns(tokens)?);
                Ok(found)
            }
        }
    }
}

impl<I: MweIndex + ?Sized> fmt::Debug for Detector<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector").field("kind", &self.kind).finish()
    }
}
