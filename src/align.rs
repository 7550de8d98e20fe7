//! Mapping detected expressions back onto token spans.
//!
//! The detector reports each expression by its canonical form, its
//! component words joined by `_`. Alignment looks for the first contiguous
//! run of tokens matching those components in order.

use std::collections::BTreeMap;

use crate::document::DetectedExpression;

/// Split a canonical form into its component words.
///
/// Trailing empty components are dropped, so `look_` is the single word
/// `look`. Leading and inner empty components are kept and never match.
pub fn components(form: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = form.split('_').collect();
    while parts.len() > 1 && parts.last() == Some(&"") {
        parts.pop();
    }
    parts
}

/// Find the first contiguous run of `tokens` matching `components` in order.
///
/// Returns the inclusive token range. A token that breaks a partial match
/// resets the scan, and is not itself re-tried as the start of a new match.
pub fn find_span<T>(
    components: &[&str],
    tokens: &[T],
    matches: impl Fn(&T, &str) -> bool,
) -> Option<(usize, usize)> {
    if components.is_empty() || components.iter().any(|c| c.is_empty()) {
        return None;
    }

    let mut matched = 0;
    let mut start = None;
    for (i, token) in tokens.iter().enumerate() {
        if matches(token, components[matched]) {
            let span_start = *start.get_or_insert(i);
            matched += 1;
            if matched == components.len() {
                return Some((span_start, i));
            }
        } else {
            matched = 0;
            start = None;
        }
    }
    None
}

/// Token labels for one sentence, plus the expressions that found no span.
#[derive(Debug, Default)]
pub struct Alignment<'e> {
    pub labels: BTreeMap<usize, String>,
    pub unmatched: Vec<&'e DetectedExpression>,
}

/// Resolve every expression to token positions.
///
/// All ranges are collected before anything is written back, in detection
/// order, so a later expression overwrites an earlier one where they overlap.
/// Expressions that cannot be aligned are reported in
/// [`Alignment::unmatched`].
pub fn resolve_labels<'e, T>(
    expressions: &'e [DetectedExpression],
    tokens: &[T],
    matches: impl Fn(&T, &str) -> bool,
) -> Alignment<'e> {
    let mut alignment = Alignment::default();
    for expression in expressions {
        match find_span(&components(&expression.form), tokens, &matches) {
            Some((start, end)) => {
                for position in start..=end {
                    alignment.labels.insert(position, expression.form.clone());
                }
            }
            None => alignment.unmatched.push(expression),
        }
    }
    alignment
}
