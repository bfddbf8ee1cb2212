use std::collections::BTreeMap;

use crate::style::{color_harmony, declarations, normalize_color};
use crate::types::{AnalysisResult, AnalyzerDetails, CodeDocument, ColorDetails, Issue, Severity};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

/// Color palette checks: distinct-color count and hue harmony.
#[derive(Debug, Clone, Copy)]
pub struct ColorAnalyzer {
    pub max_palette: usize,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self { max_palette: 5 }
    }
}

const COLOR_PROPS: &str = "color|background|background-color|border|border-color";

impl Analyzer for ColorAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Color
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut issues = Vec::new();

        // first-seen order matters for the primary/secondary/accent picks
        let mut colors: Vec<String> = Vec::new();
        for value in declarations(&doc.css, COLOR_PROPS) {
            if let Some(normalized) = normalize_color(&value) {
                if !colors.contains(&normalized) {
                    colors.push(normalized);
                }
            }
        }

        if colors.len() > self.max_palette {
            issues.push(Issue::new(
                Severity::Medium,
                "Too many colors",
                "Limit color palette to 3-5 main colors",
            ));
        }

        let mut palette = BTreeMap::new();
        palette.insert(
            "primary".to_string(),
            colors.first().cloned().unwrap_or_else(|| "#000000".into()),
        );
        palette.insert(
            "secondary".to_string(),
            colors.get(1).cloned().unwrap_or_else(|| "#ffffff".into()),
        );
        palette.insert(
            "accent".to_string(),
            colors.get(2).cloned().unwrap_or_else(|| "#0000ff".into()),
        );

        let (harmony, harmony_score) = color_harmony(&colors);

        let overall = (1.0 - issues.len() as f32 * 0.2).max(0.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Color(ColorDetails {
                palette,
                harmony,
                harmony_score,
            })))
    }
}
