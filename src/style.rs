//! Pure text-metric helpers over raw CSS: size parsing, color
//! normalization, WCAG contrast and palette harmony.
//!
//! Analyzers share these instead of pulling in a full CSS parser; the
//! heuristics only ever need declaration values, not a cascade.

use std::sync::OnceLock;

use palette::{FromColor, Hsv, Srgb};
use regex::Regex;

use crate::types::HarmonyKind;

fn size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([-+]?[0-9]*\.?[0-9]+)([a-z%]*)$").expect("valid regex"))
}

fn rgb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba?\((\d+),\s*(\d+),\s*(\d+)(?:,\s*[\d.]+)?\)$").expect("valid regex")
    })
}

/// Parse a CSS size value into approximate pixels.
///
/// Relative units are resolved against the 16px browser default; unitless
/// numbers pass through (covers `line-height: 1.5`).
pub fn parse_size_value(value: &str) -> Option<f32> {
    let value = value.trim().to_ascii_lowercase();
    let caps = size_re().captures(&value)?;
    let number: f32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    let pixels = match unit {
        "" | "px" => number,
        "rem" | "em" => number * 16.0,
        "%" => number / 100.0 * 16.0,
        "pt" => number * 1.333,
        _ => number,
    };
    Some(pixels)
}

/// Normalize a CSS color value to lowercase `#rrggbb` hex.
///
/// Handles `#RGB`, `#RRGGBB`, `rgb()`/`rgba()` (alpha discarded) and a
/// small named-color set. Returns `None` for anything it cannot read,
/// which analyzers treat as "not a color" rather than an error.
pub fn normalize_color(color: &str) -> Option<String> {
    let color = color.trim().to_ascii_lowercase();
    if color.is_empty() {
        return None;
    }

    if let Some(hex) = color.strip_prefix('#') {
        return match hex.len() {
            3 if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                let mut expanded = String::with_capacity(7);
                expanded.push('#');
                for c in hex.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                Some(expanded)
            }
            6 if hex.chars().all(|c| c.is_ascii_hexdigit()) => Some(format!("#{hex}")),
            _ => None,
        };
    }

    if let Some(caps) = rgb_re().captures(&color) {
        let channel = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let (r, g, b) = (channel(1)?, channel(2)?, channel(3)?);
        if r > 255 || g > 255 || b > 255 {
            return None;
        }
        return Some(format!("#{r:02x}{g:02x}{b:02x}"));
    }

    named_color(&color).map(str::to_string)
}

fn named_color(name: &str) -> Option<&'static str> {
    let hex = match name {
        "black" => "#000000",
        "white" => "#ffffff",
        "red" => "#ff0000",
        "green" => "#00ff00",
        "blue" => "#0000ff",
        "gray" | "grey" => "#808080",
        "yellow" => "#ffff00",
        "orange" => "#ffa500",
        "purple" => "#800080",
        _ => return None,
    };
    Some(hex)
}

fn hex_to_srgb(hex: &str) -> Option<Srgb> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Srgb::new(
        byte(0..2)? as f32 / 255.0,
        byte(2..4)? as f32 / 255.0,
        byte(4..6)? as f32 / 255.0,
    ))
}

/// WCAG relative luminance of a `#rrggbb` color.
pub fn relative_luminance(hex: &str) -> Option<f32> {
    let linear = hex_to_srgb(hex)?.into_linear();
    Some(0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue)
}

/// WCAG contrast ratio between two `#rrggbb` colors.
///
/// Falls back to 1.0 (no contrast) on unparseable input, matching the
/// fail-safe posture of the analyzers.
pub fn contrast_ratio(color1: &str, color2: &str) -> f32 {
    let (Some(l1), Some(l2)) = (relative_luminance(color1), relative_luminance(color2)) else {
        return 1.0;
    };
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// Classify a palette by its average pairwise hue delta (hue scaled to
/// 0..1), returning the harmony label and its heuristic score.
pub fn color_harmony(colors: &[String]) -> (HarmonyKind, f32) {
    if colors.len() < 2 {
        return (HarmonyKind::Monochromatic, 1.0);
    }

    let hues: Vec<f32> = colors
        .iter()
        .filter_map(|c| hex_to_srgb(c))
        .map(|srgb| {
            let hsv = Hsv::from_color(srgb);
            hsv.hue.into_positive_degrees() / 360.0
        })
        .collect();

    if hues.len() < 2 {
        return (HarmonyKind::Monochromatic, 1.0);
    }

    let mut diff_sum = 0.0f32;
    let mut diff_count = 0usize;
    for (i, h1) in hues.iter().enumerate() {
        for h2 in &hues[i + 1..] {
            diff_sum += (h1 - h2).abs();
            diff_count += 1;
        }
    }
    let avg_diff = diff_sum / diff_count as f32;

    if avg_diff < 0.1 {
        (HarmonyKind::Monochromatic, 1.0)
    } else if avg_diff > 0.3 && avg_diff < 0.4 {
        (HarmonyKind::Complementary, 0.8)
    } else if avg_diff > 0.15 && avg_diff < 0.25 {
        (HarmonyKind::Analogous, 0.9)
    } else {
        (HarmonyKind::Custom, 0.7)
    }
}

/// Extract the values of every `prop: value;` declaration in the CSS.
///
/// `prop` is matched as a property-name prefix alternation, e.g.
/// `"color|background|border"`.
pub fn declarations(css: &str, props: &str) -> Vec<String> {
    let pattern = format!(r"(?:{props}):\s*([^;{{}}]+);");
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };
    re.captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Count occurrences of a fixed fragment (`:hover`, `transition: all`).
pub fn count_fragment(css: &str, fragment: &str) -> usize {
    css.matches(fragment).count()
}

/// Media-query conditions found in the CSS, e.g. `(max-width: 600px)`.
pub fn media_queries(css: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"@media([^{]+)\{").expect("valid regex"));
    re.captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
