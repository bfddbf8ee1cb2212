//! Core types used throughout the ACE library.
//!
//! This module contains the fundamental data structures:
//! - [`CodeDocument`] - The html/css/js triple under edit
//! - [`Issue`] / [`Severity`] - A single heuristic finding
//! - [`AnalysisResult`] / [`AnalysisReport`] - Analyzer output
//! - [`CodeChange`] / [`Suggestion`] - LLM-proposed edits
//! - [`PatchResult`] - Outcome of applying a change batch

mod analyzer_results;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use analyzer_results::{
    AccessibilityDetails, AnalyzerDetails, AnimationDetails, AriaIssue, ColorDetails,
    ContrastIssue, HarmonyKind, InteractionDetails, LayoutDetails, PerformanceDetails,
    ResponsiveDetails, SizeHierarchy, SyntaxError, ValidationDetails, TypographyDetails,
};

/// The html/css/js triple that every core operation reads or transforms.
///
/// Callers own the current editing state; the library never mutates a
/// document in place. Patching returns a fresh document and version
/// snapshots capture immutable copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDocument {
    pub html: String,
    pub css: String,
    /// Empty string means "no script buffer".
    #[serde(default)]
    pub js: String,
}

impl CodeDocument {
    pub fn new(
        html: impl Into<String>,
        css: impl Into<String>,
        js: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    pub fn has_js(&self) -> bool {
        !self.js.trim().is_empty()
    }
}

/// Severity level of a heuristic finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Low => "low",
                Severity::Medium => "medium",
                Severity::High => "high",
                Severity::Critical => "critical",
            }
        )
    }
}

/// A single heuristic finding. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

impl Issue {
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Output of a single analyzer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Heuristic quality score, clamped to 0.0..=1.0.
    pub overall_score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Issue>,
    /// Analyzer-specific extra fields, flattened into the JSON object.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<AnalyzerDetails>,
}

impl AnalysisResult {
    pub fn new(overall_score: f32) -> Self {
        Self {
            overall_score: overall_score.clamp(0.0, 1.0),
            issues: Vec::new(),
            suggestions: Vec::new(),
            details: None,
        }
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Issue>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_details(mut self, details: AnalyzerDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// The zero-score substitute recorded when an analyzer fails.
    pub fn degraded(analyzer_name: &str, detail: &str) -> Self {
        Self::new(0.0).with_issues(vec![Issue::new(
            Severity::High,
            format!("{analyzer_name} analysis error: {detail}"),
            "Please check your code syntax",
        )])
    }
}

/// Aggregated result of running every registered analyzer once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Arithmetic mean of all recorded per-analyzer scores.
    pub overall_score: f32,
    #[serde(flatten)]
    pub results: BTreeMap<String, AnalysisResult>,
}

impl AnalysisReport {
    pub fn get(&self, analyzer_name: &str) -> Option<&AnalysisResult> {
        self.results.get(analyzer_name)
    }
}

/// A single proposed old -> new text substitution or insertion.
///
/// `old == None` signals an insertion (append just before the body close)
/// rather than a replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<String>,
    pub new: String,
    /// Short human description of what the change does.
    #[serde(default)]
    pub status: String,
}

impl CodeChange {
    pub fn replacement(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: Some(old.into()),
            new: new.into(),
            status: String::new(),
        }
    }

    pub fn insertion(new: impl Into<String>) -> Self {
        Self {
            old: None,
            new: new.into(),
            status: String::new(),
        }
    }

    /// An absent or empty `old` both mean "add this markup" rather than
    /// "replace that fragment".
    pub fn is_insertion(&self) -> bool {
        self.old.as_deref().map_or(true, |old| old.trim().is_empty())
    }
}

/// The unit the patch engine consumes: an id-keyed change map plus the
/// LLM's rendering of the full document after all changes.
///
/// JSON map iteration order is not a contract callers can rely on, so the
/// change map is kept as an ordered list of `(id, change)` pairs in the
/// order the keys appeared in the payload.
#[derive(Debug, Clone, Default)]
pub struct Suggestion {
    pub changes: Vec<(String, CodeChange)>,
    pub preview: Preview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub html: String,
}

impl Suggestion {
    pub fn get(&self, id: &str) -> Option<&CodeChange> {
        self.changes
            .iter()
            .find(|(change_id, _)| change_id == id)
            .map(|(_, change)| change)
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Raw<'a> {
            changes: ChangeMap<'a>,
            preview: &'a Preview,
        }
        struct ChangeMap<'a>(&'a [(String, CodeChange)]);
        impl Serialize for ChangeMap<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (id, change) in self.0 {
                    map.serialize_entry(id, change)?;
                }
                map.end()
            }
        }
        Raw {
            changes: ChangeMap(&self.changes),
            preview: &self.preview,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Suggestion {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            changes: OrderedChanges,
            #[serde(default)]
            preview: Preview,
        }
        struct OrderedChanges(Vec<(String, CodeChange)>);
        impl<'de> Deserialize<'de> for OrderedChanges {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                struct MapVisitor;
                impl<'de> Visitor<'de> for MapVisitor {
                    type Value = OrderedChanges;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("a map of change id to change object")
                    }

                    fn visit_map<A: MapAccess<'de>>(
                        self,
                        mut access: A,
                    ) -> std::result::Result<Self::Value, A::Error> {
                        let mut entries =
                            Vec::with_capacity(access.size_hint().unwrap_or(0));
                        while let Some((id, change)) =
                            access.next_entry::<String, CodeChange>()?
                        {
                            entries.push((id, change));
                        }
                        Ok(OrderedChanges(entries))
                    }
                }
                deserializer.deserialize_map(MapVisitor)
            }
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Suggestion {
            changes: raw.changes.0,
            preview: raw.preview,
        })
    }
}

/// Outcome of applying a batch of changes to a document.
///
/// `doc` reflects partial success: a skipped change is an independent
/// miss, not a rollback trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchResult {
    pub doc: CodeDocument,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedChange>,
}

/// A change the engine could not place, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedChange {
    pub id: String,
    pub reason: String,
}
