use crate::markup::{container_descendant_counts, max_container_depth};
use crate::style::{declarations, parse_size_value};
use crate::types::{AnalysisResult, AnalyzerDetails, CodeDocument, Issue, LayoutDetails, Severity};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

const CONTAINERS: &[&str] = &["div", "section", "main", "article"];

/// Layout checks: container balance, spacing-scale consistency, use of
/// modern layout primitives.
#[derive(Debug, Clone, Copy)]
pub struct LayoutAnalyzer {
    pub max_nesting: usize,
    /// Relative tolerance when testing whether a spacing value is a
    /// multiple of the base unit.
    pub base_tolerance: f32,
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self {
            max_nesting: 5,
            base_tolerance: 0.1,
        }
    }
}

fn balance_score(counts: &[usize]) -> f32 {
    if counts.is_empty() {
        return 1.0;
    }
    let avg = counts.iter().sum::<usize>() as f32 / counts.len() as f32;
    if avg <= 0.0 {
        return 1.0;
    }
    let max_diff = counts
        .iter()
        .map(|c| (*c as f32 - avg).abs())
        .fold(0.0f32, f32::max);
    (1.0 - max_diff / avg).clamp(0.0, 1.0)
}

/// Fraction of spacing values that are whole multiples of the smallest
/// observed value.
fn spacing_consistency(values: &[f32], tolerance: f32) -> f32 {
    let Some(base) = values
        .iter()
        .copied()
        .filter(|v| *v > 0.0)
        .reduce(f32::min)
    else {
        return 1.0;
    };
    let consistent = values
        .iter()
        .filter(|v| {
            let ratio = **v / base;
            (ratio - ratio.round()).abs() < tolerance
        })
        .count();
    consistent as f32 / values.len() as f32
}

impl Analyzer for LayoutAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Layout
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();

        let counts = container_descendant_counts(&doc.html, CONTAINERS);
        let balance = balance_score(&counts);

        let depth = max_container_depth(&doc.html, CONTAINERS);
        if depth > self.max_nesting {
            issues.push(Issue::new(
                Severity::Medium,
                format!("Deep container nesting ({depth} levels)"),
                "Reduce nesting depth to improve maintainability",
            ));
        }

        let spacing_values: Vec<f32> = declarations(&doc.css, "margin|padding")
            .iter()
            .filter_map(|v| parse_size_value(v))
            .collect();
        let spacing = spacing_consistency(&spacing_values, self.base_tolerance);

        let display_values = declarations(&doc.css, "display");
        let grid_alignment = if display_values
            .iter()
            .any(|v| v.contains("grid") || v.contains("flex"))
        {
            1.0
        } else {
            0.5
        };

        let overall = ((balance + spacing + grid_alignment) / 3.0).clamp(0.0, 1.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Layout(LayoutDetails {
                balance_score: balance,
                spacing_consistency: spacing,
                grid_alignment,
            })))
    }
}
