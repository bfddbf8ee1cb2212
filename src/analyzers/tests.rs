use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AceError;
use crate::types::{AnalysisResult, AnalyzerDetails, CodeDocument, HarmonyKind, Severity};
use crate::Result;

use super::{
    default_analyzers, AccessibilityAnalyzer, Analyzer, AnalyzerCoordinator, AnalyzerKind,
    AnimationAnalyzer, ColorAnalyzer, InteractionAnalyzer, PerformanceAnalyzer,
    ResponsiveAnalyzer, TypographyAnalyzer,
};

fn doc(html: &str, css: &str, js: &str) -> CodeDocument {
    CodeDocument::new(html, css, js)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Registry and kinds

#[test]
fn analyzer_kind_display_round_trips() {
    for kind in AnalyzerKind::all() {
        let parsed = AnalyzerKind::from_str(&kind.to_string()).unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn analyzer_kind_rejects_unknown_names() {
    let err = AnalyzerKind::from_str("sentiment").unwrap_err();
    assert!(matches!(err, AceError::Config(_)));
    assert!(err.to_string().contains("sentiment"));
}

#[test]
fn default_registry_covers_every_kind() {
    let analyzers = default_analyzers();
    assert_eq!(analyzers.len(), AnalyzerKind::all().len());
    let mut kinds: Vec<AnalyzerKind> = analyzers.iter().map(|a| a.kind()).collect();
    kinds.sort_by_key(|k| k.to_string());
    kinds.dedup();
    assert_eq!(kinds.len(), AnalyzerKind::all().len());
}

// ---------------------------------------------------------------------------
// Accessibility

#[test]
fn accessibility_flags_missing_alt_text() {
    let result = AccessibilityAnalyzer::default()
        .analyze(&doc("<img src='a.png'>", "", ""))
        .unwrap();

    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].severity, Severity::High);
    assert_eq!(result.issues[0].message, "Image missing alt text");
    assert_close(result.overall_score, 0.8);

    match result.details {
        Some(AnalyzerDetails::Accessibility(details)) => {
            assert_close(details.wcag_score, 0.8);
            assert_eq!(details.aria_issues.len(), 1);
            assert_eq!(details.aria_issues[0].element, "img");
        }
        other => panic!("expected accessibility details, got {other:?}"),
    }
}

#[test]
fn accessibility_accepts_labelled_markup() {
    let html = "<img src='a.png' alt='logo'><button aria-label='Close'>x</button>";
    let result = AccessibilityAnalyzer::default()
        .analyze(&doc(html, "", ""))
        .unwrap();
    assert!(result.issues.is_empty());
    assert_close(result.overall_score, 1.0);
}

#[test]
fn accessibility_flags_unlabelled_interactive_elements() {
    let result = AccessibilityAnalyzer::default()
        .analyze(&doc("<button>Go</button><a href='#'>link</a>", "", ""))
        .unwrap();
    assert_eq!(result.issues.len(), 2);
    assert!(result
        .issues
        .iter()
        .all(|i| i.severity == Severity::Medium
            && i.message == "Interactive element missing ARIA label"));
}

#[test]
fn accessibility_flags_low_contrast() {
    let css = "body { color: #777777; background: #888888; }";
    let result = AccessibilityAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].message, "Insufficient color contrast");

    match result.details {
        Some(AnalyzerDetails::Accessibility(details)) => {
            assert_eq!(details.contrast_issues.len(), 1);
            assert!(details.contrast_issues[0].contrast_ratio < 4.5);
        }
        other => panic!("expected accessibility details, got {other:?}"),
    }
}

#[test]
fn accessibility_passes_high_contrast() {
    let css = "body { color: #000000; background: #ffffff; }";
    let result = AccessibilityAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert!(result.issues.is_empty());
}

// ---------------------------------------------------------------------------
// Typography

#[test]
fn typography_flags_too_many_families() {
    let css = "h1 { font-family: Arial; } p { font-family: Georgia; } \
               li { font-family: Verdana; } em { font-family: Courier; }";
    let result = TypographyAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert!(result
        .issues
        .iter()
        .any(|i| i.message == "Too many font families"));

    match result.details {
        Some(AnalyzerDetails::Typography(details)) => {
            // 4 families -> 1 - 3 * 0.2
            assert_close(details.font_consistency, 0.4);
        }
        other => panic!("expected typography details, got {other:?}"),
    }
}

#[test]
fn typography_flags_flat_size_hierarchy() {
    let css = "h1 { font-size: 18px; } p { font-size: 16px; }";
    let result = TypographyAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].message, "Limited size hierarchy");
    assert_close(result.overall_score, 0.8);
}

#[test]
fn typography_classifies_heading_and_body_sizes() {
    let css = "h1 { font-size: 2rem; } p { font-size: 14px; }";
    let result = TypographyAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert!(result.issues.is_empty());

    match result.details {
        Some(AnalyzerDetails::Typography(details)) => {
            assert_eq!(details.size_hierarchy.heading, vec![32.0]);
            assert_eq!(details.size_hierarchy.body, vec![14.0]);
            // no line-height declared, default ratio
            assert_close(details.line_height_ratio, 1.5);
        }
        other => panic!("expected typography details, got {other:?}"),
    }
}

#[test]
fn typography_averages_line_heights() {
    let css = "p { line-height: 1.4; } h1 { line-height: 1.8; }";
    let result = TypographyAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    match result.details {
        Some(AnalyzerDetails::Typography(details)) => {
            assert_close(details.line_height_ratio, 1.6);
        }
        other => panic!("expected typography details, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Color

#[test]
fn color_flags_oversized_palette() {
    let css = "a { color: #ff0000; } b { color: #00ff00; } c { color: #0000ff; } \
               d { color: #ffff00; } e { color: #ff00ff; } f { color: #00ffff; }";
    let result = ColorAnalyzer::default().analyze(&doc("", css, "")).unwrap();
    assert!(result.issues.iter().any(|i| i.message == "Too many colors"));
    assert!(result.overall_score <= 0.8);
}

#[test]
fn color_palette_uses_first_seen_order() {
    let css = "a { color: #112233; } b { background: #445566; } c { border-color: #778899; }";
    let result = ColorAnalyzer::default().analyze(&doc("", css, "")).unwrap();
    match result.details {
        Some(AnalyzerDetails::Color(details)) => {
            assert_eq!(details.palette["primary"], "#112233");
            assert_eq!(details.palette["secondary"], "#445566");
            assert_eq!(details.palette["accent"], "#778899");
        }
        other => panic!("expected color details, got {other:?}"),
    }
}

#[test]
fn color_palette_falls_back_to_defaults() {
    let result = ColorAnalyzer::default().analyze(&doc("", "", "")).unwrap();
    match result.details {
        Some(AnalyzerDetails::Color(details)) => {
            assert_eq!(details.palette["primary"], "#000000");
            assert_eq!(details.palette["secondary"], "#ffffff");
            assert_eq!(details.palette["accent"], "#0000ff");
        }
        other => panic!("expected color details, got {other:?}"),
    }
}

#[test]
fn color_single_hue_scores_monochromatic() {
    let css = "a { color: #ff0000; } b { background: #cc0000; }";
    let result = ColorAnalyzer::default().analyze(&doc("", css, "")).unwrap();
    match result.details {
        Some(AnalyzerDetails::Color(details)) => {
            assert_eq!(details.harmony, HarmonyKind::Monochromatic);
            assert_close(details.harmony_score, 1.0);
        }
        other => panic!("expected color details, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Interaction

#[test]
fn interaction_flags_missing_hover_and_focus() {
    let html = "<button>a</button><button>b</button>";
    let result = InteractionAnalyzer
        .analyze(&doc(html, "", ""))
        .unwrap();
    let messages: Vec<&str> = result.issues.iter().map(|i| i.message.as_str()).collect();
    assert!(messages.contains(&"Missing hover states"));
    assert!(messages.contains(&"Missing focus states"));

    match result.details {
        Some(AnalyzerDetails::Interaction(details)) => {
            // one high issue (focus)
            assert_close(details.accessibility_score, 0.7);
            assert_close(details.feedback_score, 0.0);
        }
        other => panic!("expected interaction details, got {other:?}"),
    }
}

#[test]
fn interaction_full_coverage_is_clean() {
    let html = "<button>a</button>";
    let css = "button:hover { color: red; } button:focus { outline: 2px solid; }";
    let result = InteractionAnalyzer.analyze(&doc(html, css, "")).unwrap();
    assert!(result.issues.is_empty());
    assert_close(result.overall_score, 1.0);
}

#[test]
fn interaction_flags_keyboard_gap() {
    let js = "el.addEventListener('click', go); el.addEventListener('click', stop);";
    let result = InteractionAnalyzer.analyze(&doc("", "", js)).unwrap();
    assert!(result
        .issues
        .iter()
        .any(|i| i.message == "Insufficient keyboard support"));

    match result.details {
        Some(AnalyzerDetails::Interaction(details)) => {
            assert_eq!(details.event_coverage["click"], 2);
            assert_eq!(details.event_coverage["keyboard"], 0);
        }
        other => panic!("expected interaction details, got {other:?}"),
    }
}

#[test]
fn interaction_keyboard_parity_is_clean() {
    let js = "el.addEventListener('click', go); el.addEventListener('keydown', go);";
    let result = InteractionAnalyzer.analyze(&doc("", "", js)).unwrap();
    assert!(result.issues.is_empty());
}

// ---------------------------------------------------------------------------
// Animation

#[test]
fn animation_flags_long_durations() {
    let css = ".spin { animation: spin 2.5s linear; }";
    let result = AnimationAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert!(result
        .issues
        .iter()
        .any(|i| i.message == "Long animation duration"));
}

#[test]
fn animation_flags_transition_all() {
    let css = "a { transition: all 0.3s ease; }";
    let result = AnimationAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert!(result
        .issues
        .iter()
        .any(|i| i.message == "Transition on all properties"));
}

#[test]
fn animation_suggests_transform_without_failing() {
    let css = "a { transition: opacity 0.3s ease; }";
    let result = AnimationAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    assert!(result.issues.is_empty());
    assert!(result
        .suggestions
        .iter()
        .any(|s| s.message == "No hardware acceleration"));
}

#[test]
fn animation_duration_consistency_counts_distinct_values() {
    let css = ".a { animation: a 0.3s ease; } .b { animation: b 0.3s ease; } \
               .c { animation: c 0.6s ease; }";
    let result = AnimationAnalyzer::default()
        .analyze(&doc("", css, ""))
        .unwrap();
    match result.details {
        Some(AnalyzerDetails::Animation(details)) => {
            // 2 distinct of 3 total
            assert_close(details.duration_consistency, 2.0 / 3.0);
        }
        other => panic!("expected animation details, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Performance

#[test]
fn performance_flags_missing_lazy_loading() {
    let html = "<img src='a.png' alt='a'><img src='b.png' alt='b' loading=\"lazy\">";
    let result = PerformanceAnalyzer::default()
        .analyze(&doc(html, "", ""))
        .unwrap();
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].message, "Image missing lazy loading");
}

#[test]
fn performance_flags_oversized_buffers() {
    let analyzer = PerformanceAnalyzer {
        max_css_bytes: 10,
        max_js_bytes: 10,
    };
    let result = analyzer
        .analyze(&doc("", "body { margin: 0; }", "console.log(1);"))
        .unwrap();
    let messages: Vec<&str> = result.issues.iter().map(|i| i.message.as_str()).collect();
    assert!(messages.contains(&"Large CSS file size"));
    assert!(messages.contains(&"Large JavaScript file size"));
}

#[test]
fn performance_reports_resource_sizes() {
    let result = PerformanceAnalyzer::default()
        .analyze(&doc("<p>x</p>", "p {}", ""))
        .unwrap();
    match result.details {
        Some(AnalyzerDetails::Performance(details)) => {
            assert_eq!(details.resource_size["html"], 8);
            assert_eq!(details.resource_size["css"], 4);
            assert_eq!(details.resource_size["js"], 0);
        }
        other => panic!("expected performance details, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Responsive

#[test]
fn responsive_flags_missing_viewport_and_queries() {
    let result = ResponsiveAnalyzer.analyze(&doc("<html></html>", "", "")).unwrap();
    assert_eq!(result.issues.len(), 2);
    assert_close(result.overall_score, 0.6);
}

#[test]
fn responsive_collects_breakpoints() {
    let html = "<meta name=\"viewport\" content=\"width=device-width\">";
    let css = "@media (max-width: 600px) { body { margin: 0; } }";
    let result = ResponsiveAnalyzer.analyze(&doc(html, css, "")).unwrap();
    assert!(result.issues.is_empty());
    match result.details {
        Some(AnalyzerDetails::Responsive(details)) => {
            assert_eq!(details.breakpoints.len(), 1);
            assert!(details.breakpoints[0].contains("max-width: 600px"));
        }
        other => panic!("expected responsive details, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Coordinator: isolation, timeouts, aggregation

struct FailingAnalyzer(AnalyzerKind);

impl Analyzer for FailingAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        self.0
    }
    fn analyze(&self, _doc: &CodeDocument) -> Result<AnalysisResult> {
        Err(AceError::analysis("synthetic failure"))
    }
}

struct PanickingAnalyzer(AnalyzerKind);

impl Analyzer for PanickingAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        self.0
    }
    fn analyze(&self, _doc: &CodeDocument) -> Result<AnalysisResult> {
        panic!("synthetic panic");
    }
}

struct SleepyAnalyzer(AnalyzerKind, Duration);

impl Analyzer for SleepyAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        self.0
    }
    fn analyze(&self, _doc: &CodeDocument) -> Result<AnalysisResult> {
        std::thread::sleep(self.1);
        Ok(AnalysisResult::new(1.0))
    }
}

struct FixedScoreAnalyzer(AnalyzerKind, f32);

impl Analyzer for FixedScoreAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        self.0
    }
    fn analyze(&self, _doc: &CodeDocument) -> Result<AnalysisResult> {
        Ok(AnalysisResult::new(self.1))
    }
}

#[tokio::test]
async fn failing_analyzer_degrades_without_poisoning_others() {
    let coordinator = AnalyzerCoordinator::with_analyzers(
        vec![
            Arc::new(FailingAnalyzer(AnalyzerKind::Color)),
            Arc::new(FixedScoreAnalyzer(AnalyzerKind::Layout, 1.0)),
        ],
        Duration::from_secs(5),
    );
    let report = coordinator.analyze_code(&doc("<p></p>", "", "")).await;

    assert_eq!(report.results.len(), 2);
    let degraded = report.get("color").unwrap();
    assert_close(degraded.overall_score, 0.0);
    assert_eq!(degraded.issues.len(), 1);
    assert_eq!(degraded.issues[0].severity, Severity::High);
    assert!(degraded.issues[0].message.starts_with("color analysis error:"));
    assert_eq!(degraded.issues[0].suggestion, "Please check your code syntax");

    assert_close(report.get("layout").unwrap().overall_score, 1.0);
    assert_close(report.overall_score, 0.5);
}

#[tokio::test]
async fn panicking_analyzer_degrades() {
    let coordinator = AnalyzerCoordinator::with_analyzers(
        vec![
            Arc::new(PanickingAnalyzer(AnalyzerKind::Typography)),
            Arc::new(FixedScoreAnalyzer(AnalyzerKind::Layout, 0.5)),
        ],
        Duration::from_secs(5),
    );
    let report = coordinator.analyze_code(&doc("", "", "")).await;

    let degraded = report.get("typography").unwrap();
    assert_close(degraded.overall_score, 0.0);
    assert!(degraded.issues[0]
        .message
        .starts_with("typography analysis error:"));
    assert_close(report.get("layout").unwrap().overall_score, 0.5);
}

#[tokio::test]
async fn slow_analyzer_times_out() {
    let coordinator = AnalyzerCoordinator::with_analyzers(
        vec![
            Arc::new(SleepyAnalyzer(
                AnalyzerKind::Animation,
                Duration::from_millis(500),
            )),
            Arc::new(FixedScoreAnalyzer(AnalyzerKind::Layout, 1.0)),
        ],
        Duration::from_millis(20),
    );
    let report = coordinator.analyze_code(&doc("", "", "")).await;

    let degraded = report.get("animation").unwrap();
    assert_close(degraded.overall_score, 0.0);
    assert_eq!(
        degraded.issues[0].message,
        "animation analysis error: timed out"
    );
    assert_close(report.get("layout").unwrap().overall_score, 1.0);
}

#[tokio::test]
async fn all_analyzers_failing_still_yields_full_report() {
    let analyzers: Vec<Arc<dyn Analyzer>> = AnalyzerKind::all()
        .into_iter()
        .map(|kind| Arc::new(FailingAnalyzer(kind)) as Arc<dyn Analyzer>)
        .collect();
    let coordinator = AnalyzerCoordinator::with_analyzers(analyzers, Duration::from_secs(5));
    let report = coordinator.analyze_code(&doc("", "", "")).await;

    assert_eq!(report.results.len(), AnalyzerKind::all().len());
    assert_close(report.overall_score, 0.0);
    for kind in AnalyzerKind::all() {
        let result = report.get(&kind.to_string()).unwrap();
        assert_close(result.overall_score, 0.0);
        assert!(!result.issues.is_empty());
    }
}

#[tokio::test]
async fn empty_registry_reports_error_entry() {
    let coordinator = AnalyzerCoordinator::with_analyzers(Vec::new(), Duration::from_secs(5));
    let report = coordinator.analyze_code(&doc("", "", "")).await;

    assert_close(report.overall_score, 0.0);
    let error = report.get("error").unwrap();
    assert_eq!(
        error.issues[0].message,
        "Analysis error: no analyzers registered"
    );
}

#[test]
fn blocking_variant_catches_panics() {
    let coordinator = AnalyzerCoordinator::with_analyzers(
        vec![
            Arc::new(PanickingAnalyzer(AnalyzerKind::Color)),
            Arc::new(FixedScoreAnalyzer(AnalyzerKind::Layout, 1.0)),
        ],
        Duration::from_secs(5),
    );
    let report = coordinator.analyze_code_blocking(&doc("", "", ""));

    let degraded = report.get("color").unwrap();
    assert_close(degraded.overall_score, 0.0);
    assert!(degraded.issues[0].message.contains("panicked"));
    assert_close(report.get("layout").unwrap().overall_score, 1.0);
}

#[tokio::test]
async fn full_registry_runs_on_realistic_document() {
    let html = r#"<html><head><meta name="viewport" content="width=device-width"></head>
        <body><h1>Title</h1><img src="a.png" alt="a" loading="lazy"></body></html>"#;
    let css = "body { color: #222222; background: #ffffff; font-size: 16px; } \
               h1 { font-size: 32px; } @media (max-width: 600px) { h1 { font-size: 24px; } }";
    let coordinator = AnalyzerCoordinator::default();
    let report = coordinator.analyze_code(&doc(html, css, "")).await;

    assert_eq!(report.results.len(), AnalyzerKind::all().len());
    assert!(report.overall_score > 0.5);
    for kind in AnalyzerKind::all() {
        assert!(report.get(&kind.to_string()).is_some(), "missing {kind}");
    }
}

#[test]
fn report_json_is_keyed_by_analyzer_name() {
    let coordinator = AnalyzerCoordinator::default();
    let report = coordinator.analyze_code_blocking(&doc("<p>hi</p>", "", ""));
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["overall_score"].is_number());
    for kind in AnalyzerKind::all() {
        let entry = &json[kind.to_string()];
        assert!(
            entry["overall_score"].is_number(),
            "expected flattened entry for {kind}"
        );
    }
    // analyzer-specific detail fields sit directly on the entry
    assert!(json["accessibility"]["wcag_score"].is_number());
    assert!(json["color"]["palette"].is_object());
}
