use std::collections::HashMap;

use super::support::{capture_logs, config, looked_up, ScriptedIndex};
use crate::config::{DETECTOR_KEY, INDEX_DATA_KEY, UNDERSCORE_REPLACEMENT_KEY, VERBOSE_KEY};
use crate::{Annotator, AnnotatorConfig, Document, MweAnnotator, Sentence};

fn properties(index: &tempfile::NamedTempFile, verbose: &str) -> HashMap<String, String> {
    HashMap::from([
        (VERBOSE_KEY.to_string(), verbose.to_string()),
        (UNDERSCORE_REPLACEMENT_KEY.to_string(), "-".to_string()),
        (INDEX_DATA_KEY.to_string(), index.path().display().to_string()),
        (DETECTOR_KEY.to_string(), "Complex".to_string()),
    ])
}

fn annotate_logged(verbose: bool, script: Vec<Vec<&'static str>>) -> String {
    let mut cfg = config("Consecutive");
    cfg.verbose = verbose;
    let mut annotator = MweAnnotator::new(cfg, ScriptedIndex::new(script));
    let mut doc = Document::from_sentences(vec![Sentence::new(looked_up())]);

    let (result, logs) = capture_logs(|| annotator.annotate(&mut doc));
    result.unwrap();
    assert_eq!(doc.sentences().next().unwrap().tokens[1].mwe.as_deref(), Some("look_up"));
    logs
}

#[test]
fn test_verbose_config_is_echoed() {
    let index = tempfile::NamedTempFile::new().unwrap();

    let (config, logs) = capture_logs(|| AnnotatorConfig::from_properties(&properties(&index, "true")));
    assert!(config.unwrap().verbose);
    assert!(logs.contains("verbose=true"), "{}", logs);
    assert!(logs.contains("underscore_replacement=-"), "{}", logs);
    assert!(logs.contains("detector=Complex"), "{}", logs);
    assert!(logs.contains(&format!("index_data={}", index.path().display())), "{}", logs);
}

#[test]
fn test_quiet_config_logs_nothing() {
    let index = tempfile::NamedTempFile::new().unwrap();

    let (config, logs) = capture_logs(|| AnnotatorConfig::from_properties(&properties(&index, "false")));
    assert!(!config.unwrap().verbose);
    assert_eq!(logs, "");
}

#[test]
fn test_verbose_detections_are_logged() {
    let logs = annotate_logged(true, vec![vec!["look_up", "look_record"]]);

    let detected: Vec<&str> = logs
        .lines()
        .filter(|line| line.contains("detected multi-word expression"))
        .collect();
    assert_eq!(detected.len(), 2, "{}", logs);
    assert!(detected[0].contains("look_up"), "{}", logs);
    assert!(detected[1].contains("look_record"), "{}", logs);

    assert!(logs.contains("no token span for detected expression"), "{}", logs);
    assert!(logs.contains("form=look_record"), "{}", logs);
}

#[test]
fn test_quiet_annotation_logs_nothing() {
    let logs = annotate_logged(false, vec![vec!["look_up", "look_record"]]);
    assert_eq!(logs, "");
}
