use crate::markup;
use crate::style::{contrast_ratio, normalize_color};
use crate::types::{
    AccessibilityDetails, AnalysisResult, AnalyzerDetails, AriaIssue, CodeDocument, ContrastIssue,
    Issue, Severity,
};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

/// Structure/accessibility checks: alt text, ARIA labels, WCAG contrast.
#[derive(Debug, Clone, Copy)]
pub struct AccessibilityAnalyzer {
    pub contrast_threshold: f32,
}

impl Default for AccessibilityAnalyzer {
    fn default() -> Self {
        Self {
            contrast_threshold: 4.5,
        }
    }
}

impl AccessibilityAnalyzer {
    fn check_alt_text(&self, html: &str, issues: &mut Vec<Issue>, aria: &mut Vec<AriaIssue>) {
        for img in markup::tags(html, "img") {
            let has_alt = img.attr("alt").map(|v| !v.is_empty()).unwrap_or(false);
            if !has_alt {
                aria.push(AriaIssue {
                    element: "img".to_string(),
                    issue: "Missing alt text".to_string(),
                });
                issues.push(Issue::new(
                    Severity::High,
                    "Image missing alt text",
                    format!("Add alt text to image: {}", img.raw),
                ));
            }
        }
    }

    fn check_aria_labels(&self, html: &str, issues: &mut Vec<Issue>, aria: &mut Vec<AriaIssue>) {
        for element in markup::tags_of_any(html, &["button", "a", "input"]) {
            if !element.has_attr("aria-label") && !element.has_attr("aria-labelledby") {
                aria.push(AriaIssue {
                    element: element.name.clone(),
                    issue: "Missing ARIA label".to_string(),
                });
                issues.push(Issue::new(
                    Severity::Medium,
                    "Interactive element missing ARIA label",
                    format!("Add aria-label to {}", element.name),
                ));
            }
        }
    }

    fn check_contrast(
        &self,
        css: &str,
        issues: &mut Vec<Issue>,
        contrast_issues: &mut Vec<ContrastIssue>,
    ) {
        let text_color = crate::style::declarations(css, "color")
            .iter()
            .find_map(|v| normalize_color(v));
        let bg_color = crate::style::declarations(css, "background|background-color")
            .iter()
            .find_map(|v| normalize_color(v));

        if let (Some(text), Some(bg)) = (text_color, bg_color) {
            let contrast = contrast_ratio(&text, &bg);
            if contrast < self.contrast_threshold {
                contrast_issues.push(ContrastIssue {
                    colors: [text, bg],
                    contrast_ratio: contrast,
                });
                issues.push(Issue::new(
                    Severity::High,
                    "Insufficient color contrast",
                    "Increase contrast ratio to at least 4.5:1",
                ));
            }
        }
    }
}

impl Analyzer for AccessibilityAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Accessibility
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();
        let mut aria_issues = Vec::new();
        let mut contrast_issues = Vec::new();

        self.check_alt_text(&doc.html, &mut issues, &mut aria_issues);
        self.check_aria_labels(&doc.html, &mut issues, &mut aria_issues);
        self.check_contrast(&doc.css, &mut issues, &mut contrast_issues);

        let wcag_score = (1.0 - issues.len() as f32 * 0.2).max(0.0);

        Ok(AnalysisResult::new(wcag_score)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Accessibility(AccessibilityDetails {
                wcag_score,
                contrast_issues,
                aria_issues,
            })))
    }
}
