use crate::style::declarations;
use crate::types::{
    AnalysisResult, AnalyzerDetails, AnimationDetails, CodeDocument, Issue, Severity,
};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

/// Animation checks: duration budget, `transition: all`, hardware
/// acceleration hints.
#[derive(Debug, Clone, Copy)]
pub struct AnimationAnalyzer {
    /// Durations above this many seconds are flagged.
    pub max_duration_secs: f32,
}

impl Default for AnimationAnalyzer {
    fn default() -> Self {
        Self {
            max_duration_secs: 1.0,
        }
    }
}

/// Parse a CSS time value (`0.3s`, `300ms`) into seconds.
fn parse_duration_secs(value: &str) -> Option<f32> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(millis) = value.strip_suffix("ms") {
        return millis.trim().parse::<f32>().ok().map(|n| n / 1000.0);
    }
    if let Some(secs) = value.strip_suffix('s') {
        return secs.trim().parse::<f32>().ok();
    }
    None
}

impl Analyzer for AnimationAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Animation
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();
        let mut timing_functions = Vec::new();
        let mut durations: Vec<f32> = Vec::new();

        let animations = declarations(&doc.css, "animation");
        for animation in &animations {
            if let Some(duration) = animation.split_whitespace().nth(1).and_then(parse_duration_secs)
            {
                durations.push(duration);
                if duration > self.max_duration_secs {
                    issues.push(Issue::new(
                        Severity::Medium,
                        "Long animation duration",
                        "Keep animations under 1 second",
                    ));
                }
            }

            if animation.contains("ease") {
                timing_functions.push("ease".to_string());
            } else if animation.contains("linear") {
                timing_functions.push("linear".to_string());
            }
        }

        let transitions = declarations(&doc.css, "transition");
        for transition in &transitions {
            if transition.split_whitespace().any(|token| token == "all") {
                issues.push(Issue::new(
                    Severity::Medium,
                    "Transition on all properties",
                    "Specify exact properties to transition",
                ));
            }
        }

        if !doc.css.contains("transform") && (!animations.is_empty() || !transitions.is_empty()) {
            suggestions.push(Issue::new(
                Severity::Medium,
                "No hardware acceleration",
                "Use transform for better performance",
            ));
        }

        let performance_score = (1.0 - issues.len() as f32 * 0.2).clamp(0.0, 1.0);
        let duration_consistency = if durations.is_empty() {
            1.0
        } else {
            let mut sorted = durations.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            sorted.dedup_by(|a, b| (*a - *b).abs() < f32::EPSILON);
            sorted.len() as f32 / durations.len() as f32
        };

        let overall = ((performance_score + duration_consistency) / 2.0).clamp(0.0, 1.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_suggestions(suggestions)
            .with_details(AnalyzerDetails::Animation(AnimationDetails {
                performance_score,
                timing_functions,
                duration_consistency,
            })))
    }
}
