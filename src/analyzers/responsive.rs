use crate::markup::has_viewport_meta;
use crate::style::media_queries;
use crate::types::{
    AnalysisResult, AnalyzerDetails, CodeDocument, Issue, ResponsiveDetails, Severity,
};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

/// Responsive checks: viewport meta tag and media-query presence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsiveAnalyzer;

impl Analyzer for ResponsiveAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Responsive
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();
        let mut viewport_issues = Vec::new();

        if !has_viewport_meta(&doc.html) {
            viewport_issues.push("missing viewport meta".to_string());
            issues.push(Issue::new(
                Severity::High,
                "Missing viewport meta tag",
                "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">",
            ));
        }

        let breakpoints = media_queries(&doc.css);
        if breakpoints.is_empty() {
            issues.push(Issue::new(
                Severity::Medium,
                "No media queries found",
                "Add media queries for responsive design",
            ));
        }

        let overall = (1.0 - issues.len() as f32 * 0.2).max(0.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Responsive(ResponsiveDetails {
                breakpoints,
                viewport_issues,
            })))
    }
}
