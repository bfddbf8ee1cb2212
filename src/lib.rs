//! AI Code Editor core library
//!
//! Heuristic quality analysis and patch application for HTML/CSS/JS
//! documents produced or edited by an LLM, plus bounded undo/redo
//! history over whole-document snapshots.
//!
//! # Module Overview
//!
//! - [`analyzers`] - heuristic analyzers and the coordinator that runs
//!   them with failure isolation
//! - [`patch`] - fuzzy matcher and patch engine for suggested changes
//! - [`history`] - bounded linear version history
//! - [`session`] - document + history + analyzers behind one handle
//! - [`config`] - configuration file support
//! - [`types`] - core data types and structures
//!
//! # Example
//!
//! ```no_run
//! use ace_lib::{CodeDocument, Config, Session, Suggestion};
//!
//! # async fn example() -> ace_lib::Result<()> {
//! let doc = CodeDocument::new("<html><body><h1>Hi</h1></body></html>", "", "");
//! let mut session = Session::new(doc, &Config::default());
//!
//! let report = session.analyze().await;
//! println!("overall score: {:.2}", report.overall_score);
//!
//! let suggestion: Suggestion = serde_json::from_str(
//!     r#"{"changes": {"c1": {"old": "<h1>Hi</h1>", "new": "<h1>Hello</h1>",
//!        "status": "retitle"}}, "preview": {"html": ""}}"#,
//! )?;
//! let result = session.apply(&suggestion)?;
//! assert_eq!(result.applied, vec!["c1"]);
//! session.undo();
//! # Ok(())
//! # }
//! ```

pub mod analyzers;
pub mod config;
pub mod error;
pub mod history;
pub mod markup;
pub mod patch;
pub mod session;
pub mod style;
pub mod types;

pub use analyzers::{default_analyzers, Analyzer, AnalyzerCoordinator, AnalyzerKind};
pub use config::{Config, PatchOptions};
pub use error::{AceError, ErrorCategory, ErrorPayload, Result};
pub use history::{Version, VersionHistory, VersionMetadata};
pub use patch::{PatchEngine, PatchMatcher};
pub use session::Session;
pub use types::{
    AnalysisReport, AnalysisResult, AnalyzerDetails, CodeChange, CodeDocument, Issue, PatchResult,
    Preview, Severity, SkippedChange, Suggestion,
};
