//! Annotator configuration.
//!
//! The stage takes four options:
//!
//! | Key | Required | Meaning |
//! |-----|----------|---------|
//! | `verbose` | no | echo configuration and detections through `tracing` |
//! | `underscoreReplacement` | yes | replaces `_` and ` ` in token text before detection |
//! | `indexData` | yes | path to the lexical index data |
//! | `detector` | yes | detector preset name, see [`DetectorKind`](crate::DetectorKind) |
//!
//! Options come from a flat property map (optionally prefixed, as host
//! pipelines namespace custom annotator options) or from a TOML file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::errors::ConfigError;

pub const VERBOSE_KEY: &str = "verbose";
pub const UNDERSCORE_REPLACEMENT_KEY: &str = "underscoreReplacement";
pub const INDEX_DATA_KEY: &str = "indexData";
pub const DETECTOR_KEY: &str = "detector";

/// Prefix under which host pipelines conventionally place this stage's options.
pub const DEFAULT_PROPERTY_PREFIX: &str = "customAnnotatorClass.mwe";

/// Validated, immutable configuration of the MWE stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatorConfig {
    pub verbose: bool,
    /// Never contains `_`.
    pub underscore_replacement: String,
    /// Exists at construction time.
    pub index_data: PathBuf,
    /// Preset name, validated when the detector is built.
    pub detector: String,
}

/// Options before validation. Every field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    verbose: Option<Verbose>,
    underscore_replacement: Option<String>,
    index_data: Option<String>,
    detector: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Verbose {
    Flag(bool),
    Text(String),
}

impl Verbose {
    fn enabled(&self) -> bool {
        match self {
            Verbose::Flag(flag) => *flag,
            Verbose::Text(text) => parse_bool(text),
        }
    }
}

/// Boolean-like option parsing: "true" in any case is true, anything else false.
fn parse_bool(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

impl AnnotatorConfig {
    /// Build from un-prefixed keys.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| props.get(key).cloned(), |key| key.to_string())
    }

    /// Build from keys namespaced as `<prefix>.<key>`.
    pub fn from_prefixed_properties(
        props: &HashMap<String, String>,
        prefix: &str,
    ) -> Result<Self, ConfigError> {
        let qualify = |key: &str| format!("{}.{}", prefix, key);
        Self::from_lookup(move |key| props.get(&qualify(key)).cloned(), qualify)
    }

    /// Build from the contents of a TOML file.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::validate(raw, |key| key.to_string())
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        qualify: impl Fn(&str) -> String,
    ) -> Result<Self, ConfigError> {
        let raw = RawConfig {
            verbose: lookup(VERBOSE_KEY).map(Verbose::Text),
            underscore_replacement: lookup(UNDERSCORE_REPLACEMENT_KEY),
            index_data: lookup(INDEX_DATA_KEY),
            detector: lookup(DETECTOR_KEY),
        };
        Self::validate(raw, qualify)
    }

    /// Checks run in a fixed order and stop at the first failure.
    fn validate(raw: RawConfig, qualify: impl Fn(&str) -> String) -> Result<Self, ConfigError> {
        let missing = |key: &str| ConfigError::MissingKey { key: qualify(key) };

        let verbose = raw.verbose.as_ref().map_or(false, Verbose::enabled);

        let underscore_replacement = raw
            .underscore_replacement
            .ok_or_else(|| missing(UNDERSCORE_REPLACEMENT_KEY))?;
        if underscore_replacement.contains('_') {
            return Err(ConfigError::InvalidReplacement {
                replacement: underscore_replacement,
            });
        }

        let index_data = PathBuf::from(raw.index_data.ok_or_else(|| missing(INDEX_DATA_KEY))?);
        if !index_data.exists() {
            let path = std::env::current_dir()
                .map(|cwd| cwd.join(&index_data))
                .unwrap_or(index_data);
            return Err(ConfigError::IndexNotFound { path });
        }

        let detector = raw.detector.ok_or_else(|| missing(DETECTOR_KEY))?;

        let config = Self {
            verbose,
            underscore_replacement,
            index_data,
            detector,
        };
        if config.verbose {
            config.echo();
        }
        Ok(config)
    }

    fn echo(&self) {
        info!(verbose = self.verbose, "mwe configuration");
        info!(underscore_replacement = %self.underscore_replacement);
        info!(index_data = %self.index_data.display());
        info!(detector = %self.detector);
    }
}
