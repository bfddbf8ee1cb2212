//! Heuristic analyzers over html/css/js text.
//!
//! Each analyzer is a pure function of the document: no I/O, no shared
//! state. The coordinator fans them out with failure isolation and
//! aggregates the per-analyzer results into one report.

mod accessibility;
mod animation;
mod color;
mod coordinator;
mod interaction;
mod layout;
mod performance;
mod responsive;
mod typography;
mod validator;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AceError;
use crate::types::{AnalysisResult, CodeDocument};
use crate::Result;

pub use accessibility::AccessibilityAnalyzer;
pub use animation::AnimationAnalyzer;
pub use color::ColorAnalyzer;
pub use coordinator::AnalyzerCoordinator;
pub use interaction::InteractionAnalyzer;
pub use layout::LayoutAnalyzer;
pub use performance::PerformanceAnalyzer;
pub use responsive::ResponsiveAnalyzer;
pub use typography::TypographyAnalyzer;
pub use validator::CodeValidator;

/// The kind of analyzer, used as the result key in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    Accessibility,
    Validator,
    Performance,
    Responsive,
    Typography,
    Color,
    Layout,
    Interaction,
    Animation,
}

impl AnalyzerKind {
    pub const fn all() -> [AnalyzerKind; 9] {
        [
            AnalyzerKind::Accessibility,
            AnalyzerKind::Validator,
            AnalyzerKind::Performance,
            AnalyzerKind::Responsive,
            AnalyzerKind::Typography,
            AnalyzerKind::Color,
            AnalyzerKind::Layout,
            AnalyzerKind::Interaction,
            AnalyzerKind::Animation,
        ]
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AnalyzerKind::Accessibility => "accessibility",
                AnalyzerKind::Validator => "validator",
                AnalyzerKind::Performance => "performance",
                AnalyzerKind::Responsive => "responsive",
                AnalyzerKind::Typography => "typography",
                AnalyzerKind::Color => "color",
                AnalyzerKind::Layout => "layout",
                AnalyzerKind::Interaction => "interaction",
                AnalyzerKind::Animation => "animation",
            }
        )
    }
}

impl FromStr for AnalyzerKind {
    type Err = AceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "accessibility" => Ok(AnalyzerKind::Accessibility),
            "validator" => Ok(AnalyzerKind::Validator),
            "performance" => Ok(AnalyzerKind::Performance),
            "responsive" => Ok(AnalyzerKind::Responsive),
            "typography" => Ok(AnalyzerKind::Typography),
            "color" => Ok(AnalyzerKind::Color),
            "layout" => Ok(AnalyzerKind::Layout),
            "interaction" => Ok(AnalyzerKind::Interaction),
            "animation" => Ok(AnalyzerKind::Animation),
            _ => Err(AceError::Config(format!("Unknown analyzer kind: {}", s))),
        }
    }
}

/// Trait for implementing a heuristic analyzer.
///
/// `analyze` may return `Err` for genuinely unexpected conditions; the
/// coordinator converts any error (or panic, or timeout) into a degraded
/// zero-score result rather than letting it cross the public boundary.
pub trait Analyzer: Send + Sync {
    fn kind(&self) -> AnalyzerKind;
    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult>;
}

/// Returns the default registry of all analyzers.
pub fn default_analyzers() -> Vec<Arc<dyn Analyzer>> {
    vec![
        Arc::new(AccessibilityAnalyzer::default()),
        Arc::new(CodeValidator::default()),
        Arc::new(PerformanceAnalyzer::default()),
        Arc::new(ResponsiveAnalyzer::default()),
        Arc::new(TypographyAnalyzer::default()),
        Arc::new(ColorAnalyzer::default()),
        Arc::new(LayoutAnalyzer::default()),
        Arc::new(InteractionAnalyzer::default()),
        Arc::new(AnimationAnalyzer::default()),
    ]
}
