use std::fmt::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::document::Sentence;

/// Renders a sentence with its MWE labels drawn under the tokens.
///
/// ```text
/// She  looked  up  the  world  record  .
///      ╰────────╯look_up
/// ```
///
/// Adjacent tokens carrying the same label are drawn as one span. The stage
/// never labels two adjacent runs with the same form: every occurrence of a
/// form aligns to its first span in the sentence.
pub struct SentenceDisplay<'a> {
    sentence: &'a Sentence,
}

impl<'a> SentenceDisplay<'a> {
    pub fn new(sentence: &'a Sentence) -> Self {
        Self { sentence }
    }

    /// Inclusive token ranges of each labelled run, left to right.
    fn labelled_runs(&self) -> Vec<(usize, usize, &'a str)> {
        let mut runs: Vec<(usize, usize, &'a str)> = Vec::new();
        for (idx, token) in self.sentence.tokens.iter().enumerate() {
            let label = match token.mwe.as_deref() {
                Some(label) => label,
                None => continue,
            };
            match runs.last_mut() {
                Some((_, end, last)) if *end + 1 == idx && *last == label => *end = idx,
                _ => runs.push((idx, idx, label)),
            }
        }
        runs
    }
}

impl<'a> fmt::Display for SentenceDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();

        let mut opening_line = String::new();
        for (idx, token) in self.sentence.tokens.iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(&token.word);
            token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
        }

        f.write_str(&opening_line)?;

        for (start, end, label) in self.labelled_runs() {
            f.write_char('\n')?;

            let start_char_idx = token_idx_to_start_display_char_idx[start];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = token_idx_to_end_display_char_idx[end];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(label)?;
        }

        Ok(())
    }
}
