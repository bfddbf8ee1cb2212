use std::ops::Range;

use crate::config::PatchOptions;

/// Resolves a proposed "old" fragment to a byte span in the current
/// source, tolerating the drift an LLM round-trip typically introduces.
///
/// Stages run in order and the first hit wins:
/// 1. exact substring match;
/// 2. quote-normalized (single vs double quotes swapped);
/// 3. whitespace-normalized (runs of whitespace collapsed to one space),
///    with the span recovered from the fragment's first and last tokens.
///
/// Stages 2 and 3 honor the [`PatchOptions`] toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchMatcher {
    options: PatchOptions,
}

impl PatchMatcher {
    pub fn new(options: PatchOptions) -> Self {
        Self { options }
    }

    /// Byte range of `old` within `source`, or `None` when no stage
    /// produces a match. Empty or whitespace-only fragments never match.
    pub fn find_span(&self, source: &str, old: &str) -> Option<Range<usize>> {
        if old.trim().is_empty() {
            return None;
        }

        if let Some(start) = source.find(old) {
            return Some(start..start + old.len());
        }

        if self.options.normalize_quotes {
            if let Some(span) = self.quote_normalized_span(source, old) {
                return Some(span);
            }
        }

        if self.options.normalize_whitespace {
            if let Some(span) = self.whitespace_normalized_span(source, old) {
                return Some(span);
            }
        }

        None
    }

    /// Try the fragment with its quote style flipped. Both directions are
    /// attempted since we cannot know which side diverged. The swap keeps
    /// byte length, so the span is exact.
    fn quote_normalized_span(&self, source: &str, old: &str) -> Option<Range<usize>> {
        for candidate in [old.replace('"', "'"), old.replace('\'', "\"")] {
            if candidate == old {
                continue;
            }
            if let Some(start) = source.find(&candidate) {
                return Some(start..start + candidate.len());
            }
        }
        None
    }

    /// Collapse whitespace runs on both sides and check containment; on a
    /// hit, recover the original span by anchoring on the fragment's first
    /// and last whitespace-delimited tokens.
    fn whitespace_normalized_span(&self, source: &str, old: &str) -> Option<Range<usize>> {
        let collapsed_old = collapse_whitespace(old);
        let collapsed_source = collapse_whitespace(source);
        if !collapsed_source.contains(&collapsed_old) {
            return None;
        }

        let mut tokens = old.split_whitespace();
        let first = tokens.next()?;
        let last = tokens.next_back();

        let start = source.find(first)?;
        match last {
            None => Some(start..start + first.len()),
            Some(last) => {
                let tail_from = start + first.len();
                let rel = source[tail_from..].find(last)?;
                let end = tail_from + rel + last.len();
                Some(start..end)
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
