//! Typed document model read and written by the annotation stage.
//!
//! Upstream stages fill in sentences, tokens, part-of-speech tags and
//! lemmas. This stage only writes [`Sentence::mwes`] and [`Token::mwe`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A document as seen by the MWE stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Raw text, if the host kept it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Sentence annotation. `None` until a sentence splitter has run.
    #[serde(default)]
    pub sentences: Option<Vec<Sentence>>,
}

impl Document {
    /// A document carrying only raw text, with no sentence annotation yet.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            sentences: None,
        }
    }

    /// A document with the given sentences attached.
    pub fn from_sentences(sentences: Vec<Sentence>) -> Self {
        Self {
            text: None,
            sentences: Some(sentences),
        }
    }

    pub fn has_sentences(&self) -> bool {
        self.sentences.is_some()
    }

    /// Iterate over sentences. Yields nothing if the annotation is absent.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter().flatten()
    }
}

/// One sentence: its tokens plus the expressions detected in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Vec<Token>,
    /// Expressions reported by the detector, verbatim and in detection order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mwes: Option<Vec<DetectedExpression>>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, mwes: None }
    }

    /// Expressions detected in this sentence, empty if the stage has not run.
    pub fn mwes(&self) -> &[DetectedExpression] {
        self.mwes.as_deref().unwrap_or(&[])
    }

    /// Labels of every token, in order.
    pub fn mwe_labels(&self) -> Vec<Option<&str>> {
        self.tokens.iter().map(|t| t.mwe.as_deref()).collect()
    }
}

/// A token with the annotations the MWE stage depends on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Normalized surface word.
    pub word: String,
    /// Text as it appeared in the source, when it differs from `word`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    /// Canonical form of the MWE this token belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mwe: Option<String>,
}

impl Token {
    /// A fully tagged token.
    pub fn new(word: impl Into<String>, pos: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            original_text: None,
            pos: Some(pos.into()),
            lemma: Some(lemma.into()),
            mwe: None,
        }
    }

    /// A token with no tags attached.
    pub fn untagged(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }

    pub fn with_original_text(mut self, original_text: impl Into<String>) -> Self {
        self.original_text = Some(original_text.into());
        self
    }

    /// Source text, falling back to the normalized word.
    pub fn original_text(&self) -> &str {
        self.original_text.as_deref().unwrap_or(&self.word)
    }
}

/// A token as handed to the detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectorToken {
    pub form: String,
    pub pos: String,
    pub lemma: String,
}

impl DetectorToken {
    pub fn new(form: impl Into<String>, pos: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            pos: pos.into(),
            lemma: lemma.into(),
        }
    }
}

impl fmt::Display for DetectorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.form, self.pos, self.lemma)
    }
}

/// An expression reported by the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedExpression {
    /// Canonical form, component words joined by `_` (e.g. `look_up`).
    pub form: String,
    /// Detector tokens making up the expression, in sentence order.
    #[serde(default)]
    pub tokens: Vec<DetectorToken>,
}

impl DetectedExpression {
    pub fn new(form: impl Into<String>, tokens: Vec<DetectorToken>) -> Self {
        Self {
            form: form.into(),
            tokens,
        }
    }
}

impl fmt::Display for DetectedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.form)?;
        f.write_str(" [")?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", token)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_text_falls_back_to_word() {
        let token = Token::new("cannot", "MD", "can");
        assert_eq!(token.original_text(), "cannot");

        let token = token.with_original_text("can't");
        assert_eq!(token.original_text(), "can't");
    }

    #[test]
    fn test_sentences_of_unannotated_document() {
        let doc = Document::from_text("She looked up the world record.");
        assert!(!doc.has_sentences());
        assert_eq!(doc.sentences().count(), 0);
    }

    #[test]
    fn test_expression_display() {
        let expr = DetectedExpression::new(
            "look_up",
            vec![
                DetectorToken::new("looked", "VBD", "look"),
                DetectorToken::new("up", "RP", "up"),
            ],
        );
        assert_eq!(expr.to_string(), "look_up [looked_VBD_look, up_RP_up]");
    }

    #[test]
    fn test_json_shape() {
        let doc = Document::from_sentences(vec![Sentence::new(vec![Token::new(
            "She", "PRP", "she",
        )])]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"sentences":[{"tokens":[{"word":"She","pos":"PRP","lemma":"she"}]}]}"#
        );

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
