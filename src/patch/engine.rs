use crate::config::PatchOptions;
use crate::error::AceError;
use crate::markup::body_close_offset;
use crate::types::{CodeChange, CodeDocument, PatchResult, SkippedChange, Suggestion};
use crate::Result;

use super::PatchMatcher;

/// Applies a batch of changes to a document, in order, against a private
/// working copy. Unmatched replacements are skipped and reported rather
/// than aborting the batch, and each change sees the effect of every
/// earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchEngine {
    matcher: PatchMatcher,
}

impl PatchEngine {
    pub fn new(options: PatchOptions) -> Self {
        Self {
            matcher: PatchMatcher::new(options),
        }
    }

    /// Apply `changes` to the document's HTML buffer. The input document
    /// is never modified; the result carries the patched copy together
    /// with which change ids applied and which were skipped.
    pub fn apply(&self, doc: &CodeDocument, changes: &[(String, CodeChange)]) -> PatchResult {
        let mut html = doc.html.clone();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for (id, change) in changes {
            if change.is_insertion() {
                insert_markup(&mut html, &change.new);
                applied.push(id.clone());
                continue;
            }

            // is_insertion guarantees old is present here
            let old = change.old.as_deref().unwrap_or_default();
            match self.matcher.find_span(&html, old) {
                Some(span) => {
                    html.replace_range(span, &change.new);
                    applied.push(id.clone());
                }
                None => skipped.push(SkippedChange {
                    id: id.clone(),
                    reason: "unmatched".to_string(),
                }),
            }
        }

        PatchResult {
            doc: CodeDocument {
                html,
                css: doc.css.clone(),
                js: doc.js.clone(),
            },
            applied,
            skipped,
        }
    }

    pub fn apply_suggestion(
        &self,
        doc: &CodeDocument,
        suggestion: &Suggestion,
    ) -> Result<PatchResult> {
        if suggestion.changes.is_empty() {
            return Err(AceError::suggestion("suggestion contains no changes"));
        }
        Ok(self.apply(doc, &suggestion.changes))
    }
}

/// New markup goes just before `</body>` when the document has one,
/// otherwise it is appended.
fn insert_markup(html: &mut String, fragment: &str) {
    match body_close_offset(html) {
        Some(offset) => html.insert_str(offset, fragment),
        None => html.push_str(fragment),
    }
}
