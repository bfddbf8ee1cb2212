//! Bounded linear undo/redo history over whole-document snapshots.
//!
//! The history is a list of versions plus a cursor. Committing while the
//! cursor is behind the tip discards the redo tail, so the timeline stays
//! linear. When the list outgrows its cap the oldest version is evicted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use similar::TextDiff;
use uuid::Uuid;

use crate::error::AceError;
use crate::types::CodeDocument;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionMetadata {
    pub author: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl Default for VersionMetadata {
    fn default() -> Self {
        Self {
            author: "system".to_string(),
            tags: Vec::new(),
            description: String::new(),
        }
    }
}

/// One immutable snapshot of all three buffers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub html: String,
    pub css: String,
    pub js: String,
    pub message: String,
    /// Short content fingerprint, for spotting identical snapshots.
    pub content_hash: String,
    pub metadata: VersionMetadata,
}

impl Version {
    fn new(doc: &CodeDocument, message: &str) -> Self {
        Self {
            id: short_id(),
            timestamp: Utc::now(),
            html: doc.html.clone(),
            css: doc.css.clone(),
            js: doc.js.clone(),
            message: message.to_string(),
            content_hash: content_hash(doc),
            metadata: VersionMetadata::default(),
        }
    }

    pub fn document(&self) -> CodeDocument {
        CodeDocument::new(self.html.clone(), self.css.clone(), self.js.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionHistory {
    versions: Vec<Version>,
    /// Index of the current version. Only meaningful when `versions` is
    /// non-empty.
    cursor: usize,
    max_history: usize,
}

impl Default for VersionHistory {
    fn default() -> Self {
        Self::new(crate::config::Config::default().max_history)
    }
}

impl VersionHistory {
    pub fn new(max_history: usize) -> Self {
        Self {
            versions: Vec::new(),
            cursor: 0,
            max_history: max_history.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.versions.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.versions.is_empty() && self.cursor + 1 < self.versions.len()
    }

    /// Record a snapshot as the new current version. Any redo tail beyond
    /// the cursor is discarded first; then the oldest version is evicted
    /// if the cap is exceeded. Returns the new version's id.
    pub fn commit(&mut self, doc: &CodeDocument, message: &str) -> String {
        if !self.versions.is_empty() {
            self.versions.truncate(self.cursor + 1);
        }

        let version = Version::new(doc, message);
        let id = version.id.clone();
        self.versions.push(version);
        self.cursor = self.versions.len() - 1;

        if self.versions.len() > self.max_history {
            self.versions.remove(0);
            self.cursor -= 1;
        }
        id
    }

    /// Step back one version. `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<CodeDocument> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.versions[self.cursor].document())
    }

    /// Step forward one version. `None` when already at the newest.
    pub fn redo(&mut self) -> Option<CodeDocument> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.versions[self.cursor].document())
    }

    pub fn current(&self) -> Option<&Version> {
        self.versions.get(self.cursor)
    }

    pub fn get(&self, id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Move the cursor to the named version without rewriting the
    /// timeline; undo and redo keep working around the restored point.
    pub fn restore(&mut self, id: &str) -> Result<CodeDocument> {
        let index = self
            .versions
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| AceError::History(format!("no such version: {id}")))?;
        self.cursor = index;
        Ok(self.versions[index].document())
    }

    pub fn clear(&mut self) {
        self.versions.clear();
        self.cursor = 0;
    }

    /// Unified per-buffer diff between two recorded versions.
    pub fn diff(&self, from_id: &str, to_id: &str) -> Result<String> {
        let from = self
            .get(from_id)
            .ok_or_else(|| AceError::History(format!("no such version: {from_id}")))?;
        let to = self
            .get(to_id)
            .ok_or_else(|| AceError::History(format!("no such version: {to_id}")))?;

        let mut out = String::new();
        for (label, old, new) in [
            ("html", &from.html, &to.html),
            ("css", &from.css, &to.css),
            ("js", &from.js, &to.js),
        ] {
            if old == new {
                continue;
            }
            let diff = TextDiff::from_lines(old.as_str(), new.as_str());
            let unified = diff
                .unified_diff()
                .header(&format!("{from_id}/{label}"), &format!("{to_id}/{label}"))
                .to_string();
            out.push_str(&unified);
        }
        Ok(out)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let history: VersionHistory = serde_json::from_str(raw)?;
        if history.max_history == 0 {
            return Err(AceError::History(
                "max_history must be at least 1".to_string(),
            ));
        }
        if !history.versions.is_empty() && history.cursor >= history.versions.len() {
            return Err(AceError::History(format!(
                "cursor {} out of range for {} versions",
                history.cursor,
                history.versions.len()
            )));
        }
        Ok(history)
    }
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn content_hash(doc: &CodeDocument) -> String {
    let mut hasher = Sha256::new();
    hasher.update(doc.html.as_bytes());
    hasher.update(doc.css.as_bytes());
    hasher.update(doc.js.as_bytes());
    format!("{:x}", hasher.finalize())[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> CodeDocument {
        CodeDocument::new(html, "", "")
    }

    fn history_with(htmls: &[&str]) -> VersionHistory {
        let mut history = VersionHistory::new(50);
        for html in htmls {
            history.commit(&doc(html), "edit");
        }
        history
    }

    #[test]
    fn commit_advances_cursor() {
        let history = history_with(&["a", "b", "c"]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().unwrap().html, "c");
    }

    #[test]
    fn undo_and_redo_walk_the_timeline() {
        let mut history = history_with(&["a", "b", "c"]);
        assert_eq!(history.undo().unwrap().html, "b");
        assert_eq!(history.undo().unwrap().html, "a");
        assert!(history.undo().is_none());
        assert_eq!(history.redo().unwrap().html, "b");
        assert_eq!(history.redo().unwrap().html, "c");
        assert!(history.redo().is_none());
    }

    #[test]
    fn commit_after_undo_discards_redo_tail() {
        let mut history = history_with(&["a", "b", "c"]);
        history.undo();
        history.undo();
        history.commit(&doc("d"), "fork");
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap().html, "d");
        assert!(history.redo().is_none());
        assert_eq!(history.undo().unwrap().html, "a");
    }

    #[test]
    fn capacity_evicts_oldest_and_keeps_cursor_valid() {
        let mut history = VersionHistory::new(3);
        for html in ["a", "b", "c", "d"] {
            history.commit(&doc(html), "edit");
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.versions()[0].html, "b");
        assert_eq!(history.current().unwrap().html, "d");
        assert_eq!(history.undo().unwrap().html, "c");
        assert_eq!(history.undo().unwrap().html, "b");
        assert!(history.undo().is_none());
    }

    #[test]
    fn restore_moves_cursor_without_truncating() {
        let mut history = history_with(&["a", "b", "c"]);
        let first = history.versions()[0].id.clone();
        let restored = history.restore(&first).unwrap();
        assert_eq!(restored.html, "a");
        assert_eq!(history.len(), 3);
        assert_eq!(history.redo().unwrap().html, "b");
    }

    #[test]
    fn restore_unknown_id_fails() {
        let mut history = history_with(&["a"]);
        assert!(history.restore("deadbeef").is_err());
    }

    #[test]
    fn identical_snapshots_share_a_content_hash() {
        let history = history_with(&["same", "other", "same"]);
        let versions = history.versions();
        assert_eq!(versions[0].content_hash, versions[2].content_hash);
        assert_ne!(versions[0].content_hash, versions[1].content_hash);
        assert_ne!(versions[0].id, versions[2].id);
    }

    #[test]
    fn diff_reports_changed_buffers_only() {
        let mut history = VersionHistory::new(10);
        let a = history.commit(&CodeDocument::new("<h1>Hi</h1>\n", "h1 {}\n", ""), "init");
        let b = history.commit(&CodeDocument::new("<h1>Hello</h1>\n", "h1 {}\n", ""), "edit");
        let diff = history.diff(&a, &b).unwrap();
        assert!(diff.contains("-<h1>Hi</h1>"));
        assert!(diff.contains("+<h1>Hello</h1>"));
        assert!(!diff.contains("css"));
    }

    #[test]
    fn json_round_trip_preserves_cursor() {
        let mut history = history_with(&["a", "b", "c"]);
        history.undo();
        let raw = history.to_json().unwrap();
        let mut restored = VersionHistory::from_json(&raw).unwrap();
        assert_eq!(restored.current().unwrap().html, "b");
        assert_eq!(restored.redo().unwrap().html, "c");
    }

    #[test]
    fn from_json_rejects_out_of_range_cursor() {
        let raw = r#"{"versions": [], "cursor": 2, "max_history": 5}"#;
        let history = VersionHistory::from_json(raw).unwrap();
        assert!(history.is_empty());

        let mut history = history_with(&["a"]);
        history.cursor = 0;
        let mut raw: serde_json::Value = serde_json::from_str(&history.to_json().unwrap()).unwrap();
        raw["cursor"] = serde_json::json!(7);
        assert!(VersionHistory::from_json(&raw.to_string()).is_err());
    }

    #[test]
    fn clear_resets_everything() {
        let mut history = history_with(&["a", "b"]);
        history.clear();
        assert!(history.is_empty());
        assert!(history.current().is_none());
        assert!(!history.can_undo());
    }
}
