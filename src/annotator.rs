//! The MWE annotation stage.
//!
//! For every sentence of an already tagged and lemmatized document the stage
//! runs the configured detector, stores the detected expressions on the
//! sentence and labels each token covered by an expression with that
//! expression's canonical form.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use tracing::{debug, info};

use crate::align::resolve_labels;
use crate::config::AnnotatorConfig;
use crate::detector::Detector;
use crate::document::{DetectedExpression, DetectorToken, Document, Sentence, Token};
use crate::errors::{MweError, MweResult};
use crate::index::{IndexError, IndexSession, MweIndex};

/// Annotation requirements used by a host pipeline to order its stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Requirement {
    Tokenize,
    SentenceSplit,
    PartOfSpeech,
    Lemma,
    /// Named-entity level annotation. MWE labels are published at this level.
    Ner,
}

/// A pipeline stage operating on whole documents.
pub trait Annotator {
    fn name(&self) -> &str;

    fn annotate(&mut self, document: &mut Document) -> MweResult<()>;

    /// Requirements this stage fulfils once it has run.
    fn requirements_satisfied(&self) -> BTreeSet<Requirement>;

    /// Requirements earlier stages must have fulfilled.
    fn requires(&self) -> BTreeSet<Requirement>;
}

/// Replace every `_` and every space in `text` with `replacement`.
///
/// The detector uses `_` to join the words of an expression and rejects
/// tokens with embedded spaces.
pub fn sanitize(text: &str, replacement: &str) -> String {
    text.replace('_', replacement).replace(' ', replacement)
}

/// Multi-word expression annotator backed by an [`MweIndex`].
pub struct MweAnnotator<I: MweIndex> {
    config: AnnotatorConfig,
    index: I,
}

impl<I: MweIndex> MweAnnotator<I> {
    pub fn new(config: AnnotatorConfig, index: I) -> Self {
        Self { config, index }
    }

    /// Build the index from `config.index_data` with `loader`.
    ///
    /// The index is only constructed here; it is opened per document.
    pub fn load<F>(config: AnnotatorConfig, loader: F) -> MweResult<Self>
    where
        F: FnOnce(&Path) -> Result<I, IndexError>,
    {
        let index = loader(&config.index_data).map_err(MweError::ResourceUnavailable)?;
        Ok(Self::new(config, index))
    }

    /// Parse `props` and load the index.
    pub fn from_properties<F>(props: &HashMap<String, String>, loader: F) -> MweResult<Self>
    where
        F: FnOnce(&Path) -> Result<I, IndexError>,
    {
        Self::load(AnnotatorConfig::from_properties(props)?, loader)
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Convert a sentence's tokens into the detector's input representation.
    ///
    /// Fails if a token lacks its part-of-speech tag or lemma.
    pub fn detector_tokens(&self, tokens: &[Token]) -> MweResult<Vec<DetectorToken>> {
        detector_tokens(&self.config, tokens)
    }
}

fn detector_tokens(config: &AnnotatorConfig, tokens: &[Token]) -> MweResult<Vec<DetectorToken>> {
    let replacement = &config.underscore_replacement;
    tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            let pos = token.pos.as_deref().ok_or_else(|| {
                MweError::missing(format!("part-of-speech tag of token {} `{}`", idx, token.word))
            })?;
            let lemma = token.lemma.as_deref().ok_or_else(|| {
                MweError::missing(format!("lemma of token {} `{}`", idx, token.word))
            })?;
            Ok(DetectorToken::new(
                sanitize(token.original_text(), replacement),
                pos,
                sanitize(lemma, replacement),
            ))
        })
        .collect()
}

fn sentence_expressions<D: MweIndex + ?Sized>(
    config: &AnnotatorConfig,
    detector: &Detector<'_, D>,
    sentence_idx: usize,
    sentence: &Sentence,
) -> MweResult<Vec<DetectedExpression>> {
    let tokens = detector_tokens(config, &sentence.tokens)?;
    let found = detector
        .detect(&tokens)
        .map_err(|source| MweError::Detection {
            sentence: sentence_idx,
            source,
        })?;
    if config.verbose {
        for expression in &found {
            info!(sentence = sentence_idx, %expression, "detected multi-word expression");
        }
    }
    Ok(found)
}

/// Whether `token` spells out `component`, by surface word or by lemma.
fn token_matches(replacement: &str, token: &Token, component: &str) -> bool {
    sanitize(&token.word, replacement) == component
        || token
            .lemma
            .as_deref()
            .map_or(false, |lemma| sanitize(lemma, replacement) == component)
}

/// Align `found` against the sentence, then write labels and the raw list.
fn label_sentence(config: &AnnotatorConfig, sentence: &mut Sentence, found: Vec<DetectedExpression>) {
    let replacement = config.underscore_replacement.as_str();
    let alignment = resolve_labels(&found, &sentence.tokens, |token, component| {
        token_matches(replacement, token, component)
    });
    if config.verbose {
        for expression in &alignment.unmatched {
            info!(form = %expression.form, "no token span for detected expression");
        }
    }
    for (position, label) in alignment.labels {
        sentence.tokens[position].mwe = Some(label);
    }
    sentence.mwes = Some(found);
}

impl<I: MweIndex> Annotator for MweAnnotator<I> {
    fn name(&self) -> &str {
        "mwe"
    }

    fn annotate(&mut self, document: &mut Document) -> MweResult<()> {
        let sentences = document
            .sentences
            .as_mut()
            .ok_or_else(|| MweError::missing("sentences/tokens"))?;

        let config = &self.config;
        let session = IndexSession::open(&mut self.index).map_err(MweError::ResourceUnavailable)?;
        {
            let detector = Detector::from_name(session.index(), &config.detector)?;
            debug!(detector = %detector.kind(), sentences = sentences.len(), "annotating document");
            for (idx, sentence) in sentences.iter_mut().enumerate() {
                let found = sentence_expressions(config, &detector, idx, sentence)?;
                label_sentence(config, sentence, found);
            }
        }
        session.finish().map_err(MweError::ResourceClose)
    }

    fn requirements_satisfied(&self) -> BTreeSet<Requirement> {
        BTreeSet::from([Requirement::Ner])
    }

    fn requires(&self) -> BTreeSet<Requirement> {
        BTreeSet::from([
            Requirement::Tokenize,
            Requirement::SentenceSplit,
            Requirement::PartOfSpeech,
            Requirement::Lemma,
        ])
    }
}
