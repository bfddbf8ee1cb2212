use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::markup::tags_of_any;
use crate::style::count_fragment;
use crate::types::{
    AnalysisResult, AnalyzerDetails, CodeDocument, InteractionDetails, Issue, Severity,
};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

const INTERACTIVE: &[&str] = &["button", "a", "input", "select", "textarea"];

fn click_listener_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"addEventListener\(\s*['"]click['"]"#).expect("valid regex"))
}

fn keyboard_listener_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"addEventListener\(\s*['"]key"#).expect("valid regex"))
}

/// Interaction checks: hover/focus coverage and keyboard parity with
/// click handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionAnalyzer;

impl Analyzer for InteractionAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Interaction
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();
        let mut event_coverage = BTreeMap::new();

        let interactive = tags_of_any(&doc.html, INTERACTIVE).len();
        let hover_states = count_fragment(&doc.css, ":hover");
        let focus_states = count_fragment(&doc.css, ":focus");

        if hover_states < interactive {
            issues.push(Issue::new(
                Severity::Medium,
                "Missing hover states",
                "Add hover effects for interactive elements",
            ));
        }
        if focus_states < interactive {
            issues.push(Issue::new(
                Severity::High,
                "Missing focus states",
                "Add focus styles for accessibility",
            ));
        }

        if doc.has_js() {
            let click_events = click_listener_re().find_iter(&doc.js).count();
            let keyboard_events = keyboard_listener_re().find_iter(&doc.js).count();
            event_coverage.insert("click".to_string(), click_events);
            event_coverage.insert("keyboard".to_string(), keyboard_events);

            if keyboard_events < click_events {
                issues.push(Issue::new(
                    Severity::High,
                    "Insufficient keyboard support",
                    "Add keyboard event handlers for accessibility",
                ));
            }
        }

        let high_count = issues
            .iter()
            .filter(|i| i.severity == Severity::High)
            .count();
        let accessibility_score = (1.0 - high_count as f32 * 0.3).max(0.0);
        let feedback_score = if interactive == 0 {
            1.0
        } else {
            ((hover_states + focus_states) as f32 / (interactive * 2) as f32).min(1.0)
        };

        let overall = ((accessibility_score + feedback_score) / 2.0).clamp(0.0, 1.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Interaction(InteractionDetails {
                accessibility_score,
                feedback_score,
                event_coverage,
            })))
    }
}
