//! A scripted index for exercising the annotation stage.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::{AnnotatorConfig, DetectedExpression, DetectorToken, IndexError, MweIndex, Token};

/// Returns a fixed list of forms per sentence and records how it was used.
#[derive(Default)]
pub struct ScriptedIndex {
    /// Forms reported for the n-th detection call.
    script: Vec<Vec<&'static str>>,
    /// Detection call that fails instead of answering.
    pub fail_at: Option<usize>,
    pub fail_open: bool,
    pub fail_close: bool,
    pub opened: usize,
    pub closed: usize,
    pub is_open: bool,
    calls: Cell<usize>,
    /// Detector input received, per call.
    pub seen: RefCell<Vec<Vec<DetectorToken>>>,
}

impl ScriptedIndex {
    pub fn new(script: Vec<Vec<&'static str>>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }

    fn answer(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        if !self.is_open {
            return Err(IndexError::NotOpen);
        }
        let call = self.calls.get();
        self.calls.set(call + 1);
        self.seen.borrow_mut().push(tokens.to_vec());

        if self.fail_at == Some(call) {
            return Err(IndexError::Detect(format!("scripted failure on call {}", call)));
        }

        let forms = self.script.get(call).cloned().unwrap_or_default();
        Ok(forms
            .into_iter()
            .map(|form| {
                let parts: Vec<&str> = form.split('_').collect();
                let covered = tokens
                    .iter()
                    .filter(|t| parts.iter().any(|part| *part == t.lemma))
                    .cloned()
                    .collect();
                DetectedExpression::new(form, covered)
            })
            .collect())
    }
}

impl MweIndex for ScriptedIndex {
    fn open(&mut self) -> Result<(), IndexError> {
        if self.fail_open {
            return Err(IndexError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "scripted open failure",
            )));
        }
        self.opened += 1;
        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), IndexError> {
        self.closed += 1;
        self.is_open = false;
        if self.fail_close {
            return Err(IndexError::Detect("scripted close failure".into()));
        }
        Ok(())
    }

    fn consecutive(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        self.answer(tokens)
    }

    fn exhaustive(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        self.answer(tokens)
    }

    fn proper_nouns(&self, _: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        Ok(Vec::new())
    }

    fn inflection_pattern(
        &self,
        _: &[DetectorToken],
        found: Vec<DetectedExpression>,
    ) -> Result<Vec<DetectedExpression>, IndexError> {
        Ok(found)
    }

    fn more_frequent_as_mwe(
        &self,
        _: &[DetectorToken],
        found: Vec<DetectedExpression>,
    ) -> Result<Vec<DetectedExpression>, IndexError> {
        Ok(found)
    }
}

pub fn config(detector: &str) -> AnnotatorConfig {
    AnnotatorConfig {
        verbose: false,
        underscore_replacement: "-".to_string(),
        index_data: PathBuf::from("mweindex.data"),
        detector: detector.to_string(),
    }
}

/// "She looked up the world record." with POS tags and lemmas.
pub fn looked_up() -> Vec<Token> {
    vec![
        Token::new("She", "PRP", "she"),
        Token::new("looked", "VBD", "look"),
        Token::new("up", "RP", "up"),
        Token::new("the", "DT", "the"),
        Token::new("world", "NN", "world"),
        Token::new("record", "NN", "record"),
        Token::new(".", ".", "."),
    ]
}

/// Tokens tagged with themselves as lemma.
pub fn plain(words: &[&str]) -> Vec<Token> {
    words.iter().map(|w| Token::new(*w, "NN", *w)).collect()
}

/// Log sink shared between a test and its subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|buf| buf.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with an `INFO` level subscriber and return what it logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}
