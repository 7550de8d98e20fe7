//! A plain-text lexicon standing in for a real MWE index.
//!
//! One entry per line: a canonical form and an optional frequency, e.g.
//! `look_up 12`. Lines starting with `#` are comments. Matching is done on
//! lowercased lemmas; there is no inflection model, so the inflection filter
//! passes candidates through unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use layered_mwe::{DetectedExpression, DetectorToken, IndexError, MweIndex};
use tracing::debug;

const DEFAULT_FREQUENCY: u32 = 1;
const PROPER_NOUN_TAGS: &[&str] = &["NNP", "NNPS"];

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    form: String,
    components: Vec<String>,
    frequency: u32,
}

/// Lexicon file read on `open` and dropped on `close`.
#[derive(Debug)]
pub struct LexiconIndex {
    path: PathBuf,
    entries: Option<Vec<Entry>>,
}

impl LexiconIndex {
    /// Point at a lexicon file. Nothing is read until the index is opened.
    pub fn new(path: &Path) -> Result<Self, IndexError> {
        Ok(Self {
            path: path.to_path_buf(),
            entries: None,
        })
    }

    fn entries(&self) -> Result<&[Entry], IndexError> {
        self.entries.as_deref().ok_or(IndexError::NotOpen)
    }

    /// Entries matching the lemmas starting at `start`, longest first.
    fn matches_at<'e>(
        entries: &'e [Entry],
        lemmas: &[String],
        start: usize,
    ) -> Vec<&'e Entry> {
        let mut found: Vec<&Entry> = entries
            .iter()
            .filter(|entry| {
                let end = start + entry.components.len();
                end <= lemmas.len() && lemmas[start..end] == entry.components[..]
            })
            .collect();
        found.sort_by(|a, b| b.components.len().cmp(&a.components.len()));
        found
    }

    fn expression(entry: &Entry, tokens: &[DetectorToken], start: usize) -> DetectedExpression {
        let end = start + entry.components.len();
        DetectedExpression::new(entry.form.clone(), tokens[start..end].to_vec())
    }
}

fn lowercase_lemmas(tokens: &[DetectorToken]) -> Vec<String> {
    tokens.iter().map(|t| t.lemma.to_lowercase()).collect()
}

fn parse(content: &str) -> Result<Vec<Entry>, IndexError> {
    let mut entries = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let format_error = |message: &str| IndexError::Format {
            line: idx + 1,
            message: message.to_string(),
        };

        let mut fields = line.split_whitespace();
        let form = fields.next().ok_or_else(|| format_error("missing form"))?;
        let frequency = match fields.next() {
            Some(text) => text
                .parse()
                .map_err(|_| format_error(&format!("invalid frequency `{}`", text)))?,
            None => DEFAULT_FREQUENCY,
        };
        if fields.next().is_some() {
            return Err(format_error("trailing fields"));
        }

        let components: Vec<String> = form.split('_').map(str::to_lowercase).collect();
        if components.iter().any(String::is_empty) {
            return Err(format_error(&format!("empty component in `{}`", form)));
        }
        entries.push(Entry {
            form: form.to_string(),
            components,
            frequency,
        });
    }
    Ok(entries)
}

impl MweIndex for LexiconIndex {
    fn open(&mut self) -> Result<(), IndexError> {
        let content = fs::read_to_string(&self.path)?;
        let entries = parse(&content)?;
        debug!(path = %self.path.display(), entries = entries.len(), "lexicon opened");
        self.entries = Some(entries);
        Ok(())
    }

    fn close(&mut self) -> Result<(), IndexError> {
        self.entries = None;
        Ok(())
    }

    /// Leftmost-longest, non-overlapping matches.
    fn consecutive(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        let entries = self.entries()?;
        let lemmas = lowercase_lemmas(tokens);
        let mut found = Vec::new();
        let mut start = 0;
        while start < tokens.len() {
            match Self::matches_at(entries, &lemmas, start).first() {
                Some(entry) => {
                    found.push(Self::expression(entry, tokens, start));
                    start += entry.components.len();
                }
                None => start += 1,
            }
        }
        Ok(found)
    }

    /// Every match at every position, overlaps included.
    fn exhaustive(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        let entries = self.entries()?;
        let lemmas = lowercase_lemmas(tokens);
        Ok((0..tokens.len())
            .flat_map(|start| {
                Self::matches_at(entries, &lemmas, start)
                    .into_iter()
                    .map(move |entry| Self::expression(entry, tokens, start))
            })
            .collect())
    }

    fn proper_nouns(&self, tokens: &[DetectorToken]) -> Result<Vec<DetectedExpression>, IndexError> {
        let mut found = Vec::new();
        let mut run: Vec<DetectorToken> = Vec::new();
        for token in tokens.iter().chain(std::iter::once(&DetectorToken::new("", "", ""))) {
            if PROPER_NOUN_TAGS.contains(&token.pos.as_str()) {
                run.push(token.clone());
                continue;
            }
            if run.len() > 1 {
                let form = run
                    .iter()
                    .map(|t| t.form.as_str())
                    .collect::<Vec<_>>()
                    .join("_");
                found.push(DetectedExpression::new(form, std::mem::take(&mut run)));
            }
            run.clear();
        }
        Ok(found)
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
        let entries = self.entries()?;
        Ok(found
            .into_iter()
            .filter(|expression| {
                entries
                    .iter()
                    .find(|entry| entry.form == expression.form)
                    .map_or(true, |entry| entry.frequency > 0)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lexicon(lines: &[&str]) -> (NamedTempFile, LexiconIndex) {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        let index = LexiconIndex::new(file.path()).unwrap();
        (file, index)
    }

    fn tokens(tagged: &[(&str, &str, &str)]) -> Vec<DetectorToken> {
        tagged
            .iter()
            .map(|(form, pos, lemma)| DetectorToken::new(*form, *pos, *lemma))
            .collect()
    }

    fn forms(found: &[DetectedExpression]) -> Vec<&str> {
        found.iter().map(|e| e.form.as_str()).collect()
    }

    #[test]
    fn test_parse() {
        let entries = parse("# comment\n\nlook_up 12\nworld_record\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].components, ["look", "up"]);
        assert_eq!(entries[0].frequency, 12);
        assert_eq!(entries[1].frequency, DEFAULT_FREQUENCY);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse("look_up twelve").unwrap_err();
        assert!(matches!(err, IndexError::Format { line: 1, .. }));

        let err = parse("ok\nlook__up").unwrap_err();
        assert!(matches!(err, IndexError::Format { line: 2, .. }));

        assert!(parse("look_up 1 2").is_err());
    }

    #[test]
    fn test_requires_open() {
        let (_file, index) = lexicon(&["look_up"]);
        assert!(matches!(index.consecutive(&[]), Err(IndexError::NotOpen)));
    }

    #[test]
    fn test_consecutive_prefers_longest() {
        let (_file, mut index) = lexicon(&["kick_the_bucket", "kick_the", "the_bucket"]);
        index.open().unwrap();

        let sentence = tokens(&[
            ("He", "PRP", "he"),
            ("kicked", "VBD", "kick"),
            ("the", "DT", "the"),
            ("bucket", "NN", "bucket"),
        ]);
        let found = index.consecutive(&sentence).unwrap();
        assert_eq!(forms(&found), ["kick_the_bucket"]);
        assert_eq!(found[0].tokens.len(), 3);

        let found = index.exhaustive(&sentence).unwrap();
        assert_eq!(forms(&found), ["kick_the_bucket", "kick_the", "the_bucket"]);

        index.close().unwrap();
        assert!(index.consecutive(&sentence).is_err());
    }

    #[test]
    fn test_proper_nouns() {
        let (_file, index) = lexicon(&[]);
        let sentence = tokens(&[
            ("John", "NNP", "John"),
            ("Smith", "NNP", "Smith"),
            ("met", "VBD", "meet"),
            ("Paris", "NNP", "Paris"),
            ("New", "NNP", "New"),
            ("York", "NNP", "York"),
        ]);
        let found = index.proper_nouns(&sentence).unwrap();
        assert_eq!(forms(&found), ["John_Smith", "Paris_New_York"]);
    }

    #[test]
    fn test_frequency_filter() {
        let (_file, mut index) = lexicon(&["as_well 0", "give_up 3"]);
        index.open().unwrap();

        let sentence = tokens(&[
            ("gave", "VBD", "give"),
            ("up", "RP", "up"),
            ("as", "RB", "as"),
            ("well", "RB", "well"),
        ]);
        let found = index.consecutive(&sentence).unwrap();
        assert_eq!(forms(&found), ["give_up", "as_well"]);

        let kept = index.more_frequent_as_mwe(&sentence, found).unwrap();
        assert_eq!(forms(&kept), ["give_up"]);
    }
}
