//! Lightweight HTML tag scanning.
//!
//! The analyzers only need tag/attribute presence and rough structure, so
//! this is a tolerant regex tokenizer rather than a spec-compliant parser.
//! Malformed markup degrades to "fewer matches", never to an error.

use std::sync::OnceLock;

use regex::Regex;

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)([^>]*)>").expect("valid regex"))
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([a-zA-Z-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("valid regex")
    })
}

/// An opening tag found in the source, with its raw text and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub raw: String,
    attrs: String,
    pub offset: usize,
}

impl Tag {
    /// Attribute value by (case-insensitive) name. Bare attributes like
    /// `disabled` return an empty string.
    pub fn attr(&self, name: &str) -> Option<String> {
        for caps in attr_re().captures_iter(&self.attrs) {
            let key = caps.get(1)?.as_str();
            if key.eq_ignore_ascii_case(name) {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                return Some(value.to_string());
            }
        }
        if bare_attr_present(&self.attrs, name) {
            return Some(String::new());
        }
        None
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }
}

fn bare_attr_present(attrs: &str, name: &str) -> bool {
    attrs
        .split_whitespace()
        .any(|token| token.eq_ignore_ascii_case(name))
}

/// All opening tags with the given name (case-insensitive).
pub fn tags(html: &str, name: &str) -> Vec<Tag> {
    tag_re()
        .captures_iter(html)
        .filter_map(|caps| {
            let closing = !caps.get(1)?.as_str().is_empty();
            let tag_name = caps.get(2)?.as_str();
            if closing || !tag_name.eq_ignore_ascii_case(name) {
                return None;
            }
            let full = caps.get(0)?;
            Some(Tag {
                name: tag_name.to_ascii_lowercase(),
                raw: full.as_str().to_string(),
                attrs: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
                offset: full.start(),
            })
        })
        .collect()
}

/// Whether an opening tag with the given name exists anywhere.
pub fn has_tag(html: &str, name: &str) -> bool {
    !tags(html, name).is_empty()
}

/// Opening tags matching any of several names, in document order.
pub fn tags_of_any(html: &str, names: &[&str]) -> Vec<Tag> {
    tag_re()
        .captures_iter(html)
        .filter_map(|caps| {
            let closing = !caps.get(1)?.as_str().is_empty();
            let tag_name = caps.get(2)?.as_str();
            if closing || !names.iter().any(|n| tag_name.eq_ignore_ascii_case(n)) {
                return None;
            }
            let full = caps.get(0)?;
            Some(Tag {
                name: tag_name.to_ascii_lowercase(),
                raw: full.as_str().to_string(),
                attrs: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
                offset: full.start(),
            })
        })
        .collect()
}

/// Whether a `<meta name="viewport">` tag is present.
pub fn has_viewport_meta(html: &str) -> bool {
    tags(html, "meta").iter().any(|tag| {
        tag.attr("name")
            .map(|v| v.eq_ignore_ascii_case("viewport"))
            .unwrap_or(false)
    })
}

/// Byte offset of the `</body>` close tag, for insertions.
pub fn body_close_offset(html: &str) -> Option<usize> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)</body\s*>").expect("valid regex"));
    re.find(html).map(|m| m.start())
}

/// Per-container descendant element counts for layout balance, computed by
/// matching open/close tags with a stack. Containers are the block-level
/// grouping elements (`div`, `section`, `main`, `article`).
pub fn container_descendant_counts(html: &str, containers: &[&str]) -> Vec<usize> {
    struct Open {
        is_container: bool,
        descendants: usize,
    }

    let mut stack: Vec<Open> = Vec::new();
    let mut counts = Vec::new();

    for caps in tag_re().captures_iter(html) {
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        if VOID_ELEMENTS.contains(&name.as_str()) {
            for open in stack.iter_mut() {
                open.descendants += 1;
            }
            continue;
        }
        if closing {
            // tolerate stray closes by popping only when something is open
            if let Some(open) = stack.pop() {
                if open.is_container {
                    counts.push(open.descendants);
                }
            }
            continue;
        }
        for open in stack.iter_mut() {
            open.descendants += 1;
        }
        stack.push(Open {
            is_container: containers.iter().any(|c| *c == name),
            descendants: 0,
        });
    }

    // unclosed containers still count
    for open in stack {
        if open.is_container {
            counts.push(open.descendants);
        }
    }
    counts
}

/// Maximum nesting depth reached by container elements.
pub fn max_container_depth(html: &str, containers: &[&str]) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;

    for caps in tag_re().captures_iter(html) {
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        if !containers.iter().any(|c| *c == name) {
            continue;
        }
        if closing {
            depth = depth.saturating_sub(1);
        } else {
            depth += 1;
            max_depth = max_depth.max(depth);
        }
    }
    max_depth
}
