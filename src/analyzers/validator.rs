use crate::markup::has_tag;
use crate::types::{
    AnalysisResult, AnalyzerDetails, CodeDocument, Issue, Severity, SyntaxError, ValidationDetails,
};
use crate::Result;

use super::{Analyzer, AnalyzerKind};

/// Shallow structural/syntax sanity: document skeleton, brace and paren
/// balance. Not a real parser, just enough to catch truncated LLM output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeValidator;

fn balance_errors(text: &str, open: char, close: char, what: &str) -> Option<SyntaxError> {
    let opens = text.chars().filter(|c| *c == open).count();
    let closes = text.chars().filter(|c| *c == close).count();
    if opens > closes {
        Some(SyntaxError {
            kind: "syntax".to_string(),
            message: format!("Unmatched opening {what}"),
        })
    } else if closes > opens {
        Some(SyntaxError {
            kind: "syntax".to_string(),
            message: format!("Unmatched closing {what}"),
        })
    } else {
        None
    }
}

impl Analyzer for CodeValidator {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Validator
    }

    fn analyze(&self, doc: &CodeDocument) -> Result<AnalysisResult> {
        let mut html_errors = Vec::new();
        let mut css_errors = Vec::new();
        let mut js_errors = Vec::new();

        for tag in ["html", "head", "body"] {
            if !has_tag(&doc.html, tag) {
                html_errors.push(SyntaxError {
                    kind: "structure".to_string(),
                    message: format!("Missing {tag} tag"),
                });
            }
        }

        if let Some(err) = balance_errors(&doc.css, '{', '}', "brace") {
            css_errors.push(err);
        }

        if doc.has_js() {
            if let Some(err) = balance_errors(&doc.js, '(', ')', "parenthesis") {
                js_errors.push(err);
            }
        }

        let issues: Vec<Issue> = html_errors
            .iter()
            .chain(css_errors.iter())
            .chain(js_errors.iter())
            .map(|error| Issue::new(Severity::High, error.message.clone(), "Fix syntax error"))
            .collect();

        let overall = (1.0 - issues.len() as f32 * 0.2).max(0.0);

        Ok(AnalysisResult::new(overall)
            .with_issues(issues)
            .with_details(AnalyzerDetails::Validation(ValidationDetails {
                html_errors,
                css_errors,
                js_errors,
            })))
    }
}
