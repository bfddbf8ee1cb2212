use std::collections::BTreeMap;

use crate::markup;
use crate::types::{
    AnalysisResult, AnalyzerDetails, CodeDocument, Issue, PerformanceDetails, Severity,
};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

/// Performance checks: per-resource byte budgets and image lazy loading.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceAnalyzer {
    pub max_css_bytes: usize,
    pub max_js_bytes: usize,
}

impl Default for PerformanceAnalyzer {
    fn default() -> Self {
        Self {
            max_css_bytes: 50_000,
            max_js_bytes: 100_000,
        }
    }
}

impl Analyzer for PerformanceAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Performance
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();

        let html_size = doc.html.len();
        let css_size = doc.css.len();
        let js_size = doc.js.len();

        if css_size > self.max_css_bytes {
            issues.push(Issue::new(
                Severity::Medium,
                "Large CSS file size",
                "Consider minifying CSS and removing unused styles",
            ));
        }

        if doc.has_js() && js_size > self.max_js_bytes {
            issues.push(Issue::new(
                Severity::High,
                "Large JavaScript file size",
                "Consider code splitting and minification",
            ));
        }

        for img in markup::tags(&doc.html, "img") {
            let lazy = img
                .attr("loading")
                .map(|v| v.eq_ignore_ascii_case("lazy"))
                .unwrap_or(false);
            if !lazy {
                issues.push(Issue::new(
                    Severity::Medium,
                    "Image missing lazy loading",
                    format!("Add loading=\"lazy\" to image: {}", img.raw),
                ));
            }
        }

        // size-based only; nothing here fetches or renders
        let total_size = html_size + css_size + js_size;
        let load_time = total_size as f32 / 1024.0 / 100.0;

        let mut resource_size = BTreeMap::new();
        resource_size.insert("html".to_string(), html_size);
        resource_size.insert("css".to_string(), css_size);
        resource_size.insert("js".to_string(), js_size);

        let overall = (1.0 - issues.len() as f32 * 0.2).max(0.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Performance(PerformanceDetails {
                load_time,
                resource_size,
            })))
    }
}
