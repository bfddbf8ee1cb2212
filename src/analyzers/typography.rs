use std::collections::BTreeSet;

use crate::style::{declarations, parse_size_value};
use crate::types::{
    AnalysisResult, AnalyzerDetails, CodeDocument, Issue, Severity, SizeHierarchy,
    TypographyDetails,
};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

/// Typography checks: family count, size hierarchy, line height.
#[derive(Debug, Clone, Copy)]
pub struct TypographyAnalyzer {
    pub max_families: usize,
    pub min_size_spread: f32,
    /// Parsed pixel size separating heading sizes from body sizes.
    pub heading_threshold: f32,
}

impl Default for TypographyAnalyzer {
    fn default() -> Self {
        Self {
            max_families: 3,
            min_size_spread: 1.5,
            heading_threshold: 16.0,
        }
    }
}

fn font_families(css: &str) -> BTreeSet<String> {
    let mut families = BTreeSet::new();
    for value in declarations(css, "font-family") {
        for token in value.split(',') {
            let token = token.trim().trim_matches(|c| c == '\'' || c == '"').trim();
            if !token.is_empty() {
                families.insert(token.to_string());
            }
        }
    }
    families
}

impl Analyzer for TypographyAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Typography
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();

        let families = font_families(&doc.css);
        if families.len() > self.max_families {
            issues.push(Issue::new(
                Severity::Medium,
                "Too many font families",
                "Limit font families to 2-3 for better consistency",
            ));
        }

        let font_sizes: Vec<f32> = declarations(&doc.css, "font-size")
            .iter()
            .filter_map(|v| parse_size_value(v))
            .collect();

        if let (Some(min), Some(max)) = (
            font_sizes.iter().copied().reduce(f32::min),
            font_sizes.iter().copied().reduce(f32::max),
        ) {
            if min > 0.0 && max / min < self.min_size_spread {
                issues.push(Issue::new(
                    Severity::Medium,
                    "Limited size hierarchy",
                    "Create better visual hierarchy with more distinct font sizes",
                ));
            }
        }

        let line_heights: Vec<f32> = declarations(&doc.css, "line-height")
            .iter()
            .filter_map(|v| parse_size_value(v))
            .collect();
        let line_height_ratio = if line_heights.is_empty() {
            1.5
        } else {
            line_heights.iter().sum::<f32>() / line_heights.len() as f32
        };

        let font_consistency = if families.is_empty() {
            1.0
        } else {
            (1.0 - (families.len() as f32 - 1.0) * 0.2).clamp(0.0, 1.0)
        };

        let size_hierarchy = SizeHierarchy {
            heading: font_sizes
                .iter()
                .copied()
                .filter(|s| *s > self.heading_threshold)
                .collect(),
            body: font_sizes
                .iter()
                .copied()
                .filter(|s| *s <= self.heading_threshold)
                .collect(),
        };

        let overall = (1.0 - issues.len() as f32 * 0.2).max(0.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Typography(TypographyDetails {
                font_consistency,
                size_hierarchy,
                line_height_ratio,
            })))
    }
}
