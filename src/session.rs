//! Ties the pieces together: one document, its history, the analyzer
//! registry and the patch engine behind a single mutable handle.

use crate::analyzers::AnalyzerCoordinator;
use crate::config::Config;
use crate::history::VersionHistory;
use crate::patch::PatchEngine;
use crate::types::{AnalysisReport, CodeDocument, PatchResult, Suggestion};
use crate::Result;

pub struct Session {
    document: CodeDocument,
    history: VersionHistory,
    coordinator: AnalyzerCoordinator,
    engine: PatchEngine,
}

impl Session {
    /// Start a session on `document`; the starting state is committed so
    /// the very first edit can be undone.
    pub fn new(document: CodeDocument, config: &Config) -> Self {
        let mut history = VersionHistory::new(config.max_history);
        history.commit(&document, "Initial version");
        Self {
            document,
            history,
            coordinator: AnalyzerCoordinator::new(config),
            engine: PatchEngine::new(config.patch),
        }
    }

    pub fn document(&self) -> &CodeDocument {
        &self.document
    }

    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    pub async fn analyze(&self) -> AnalysisReport {
        self.coordinator.analyze_code(&self.document).await
    }

    pub fn analyze_blocking(&self) -> AnalysisReport {
        self.coordinator.analyze_code_blocking(&self.document)
    }

    /// Apply a suggestion to the current document and commit the result.
    /// Skipped changes do not fail the call; they are reported in the
    /// returned [`PatchResult`].
    pub fn apply(&mut self, suggestion: &Suggestion) -> Result<PatchResult> {
        let result = self.engine.apply_suggestion(&self.document, suggestion)?;
        self.document = result.doc.clone();
        let message = format!(
            "Applied {} of {} suggested changes",
            result.applied.len(),
            suggestion.changes.len()
        );
        self.history.commit(&self.document, &message);
        Ok(result)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(doc) => {
                self.document = doc;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(doc) => {
                self.document = doc;
                true
            }
            None => false,
        }
    }

    pub fn restore(&mut self, version_id: &str) -> Result<()> {
        self.document = self.history.restore(version_id)?;
        Ok(())
    }
}
