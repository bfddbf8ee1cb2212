//! Analyzer-specific result details.
//!
//! Each analyzer enriches its [`super::AnalysisResult`] with a small struct
//! of extra fields. The enum is untagged and flattened so the serialized
//! report shape is `{overall_score, issues, suggestions, ...extra fields}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Extra fields contributed by a concrete analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzerDetails {
    Accessibility(AccessibilityDetails),
    Typography(TypographyDetails),
    Color(ColorDetails),
    Layout(LayoutDetails),
    Interaction(InteractionDetails),
    Animation(AnimationDetails),
    Performance(PerformanceDetails),
    Responsive(ResponsiveDetails),
    Validation(ValidationDetails),
}

/// A text/background pair that fails the WCAG contrast threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastIssue {
    /// Normalized hex of the two colors, text first.
    pub colors: [String; 2],
    pub contrast_ratio: f32,
}

/// An element missing alt text or an ARIA label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AriaIssue {
    pub element: String,
    pub issue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityDetails {
    pub wcag_score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contrast_issues: Vec<ContrastIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aria_issues: Vec<AriaIssue>,
}

/// Font sizes bucketed by role. Values are parsed pixel sizes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizeHierarchy {
    #[serde(default)]
    pub heading: Vec<f32>,
    #[serde(default)]
    pub body: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypographyDetails {
    pub font_consistency: f32,
    pub size_hierarchy: SizeHierarchy,
    pub line_height_ratio: f32,
}

/// Palette harmony label derived from pairwise hue deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonyKind {
    Monochromatic,
    Analogous,
    Complementary,
    Custom,
}

impl fmt::Display for HarmonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HarmonyKind::Monochromatic => "monochromatic",
                HarmonyKind::Analogous => "analogous",
                HarmonyKind::Complementary => "complementary",
                HarmonyKind::Custom => "custom",
            }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorDetails {
    /// Primary/secondary/accent picks, hex-normalized.
    pub palette: BTreeMap<String, String>,
    pub harmony: HarmonyKind,
    pub harmony_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDetails {
    pub balance_score: f32,
    pub spacing_consistency: f32,
    pub grid_alignment: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDetails {
    pub accessibility_score: f32,
    pub feedback_score: f32,
    /// Event-listener counts by category (click/keyboard).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub event_coverage: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDetails {
    pub performance_score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timing_functions: Vec<String>,
    pub duration_consistency: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceDetails {
    /// Very rough load-time estimate in seconds, size-based only.
    pub load_time: f32,
    pub resource_size: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsiveDetails {
    /// Media-query breakpoint expressions found in the CSS.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakpoints: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub viewport_issues: Vec<String>,
}

/// A shallow structural or syntax finding from the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub html_errors: Vec<SyntaxError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_errors: Vec<SyntaxError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub js_errors: Vec<SyntaxError>,
}
