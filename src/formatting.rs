use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ace_lib::{AceError, AnalysisReport, ErrorPayload, PatchResult};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Top-level CLI output shapes.
#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AceOutput {
    Analyze(AnalysisReport),
    Apply(ApplyOutput),
    Error(ErrorOutput),
}

#[derive(Serialize)]
pub struct ApplyOutput {
    pub applied: Vec<String>,
    pub skipped: Vec<ace_lib::SkippedChange>,
    /// Patched HTML; present only when no --out-dir was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Serialize)]
pub struct ErrorOutput {
    pub error: ErrorPayload,
}

impl ApplyOutput {
    pub fn new(result: &PatchResult, out_dir: Option<PathBuf>) -> Self {
        Self {
            applied: result.applied.clone(),
            skipped: result.skipped.clone(),
            html: out_dir.is_none().then(|| result.doc.html.clone()),
            out_dir,
        }
    }
}

/// Write output in the requested format.
pub fn write_output(
    body: &AceOutput,
    format: OutputFormat,
    output: Option<&Path>,
) -> std::io::Result<()> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(body)
            .unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string()),
        OutputFormat::Text => format_text(body),
    };
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}

/// Render an error and return the fatal exit code.
pub fn render_error(err: AceError, format: OutputFormat, output: Option<&Path>) -> ExitCode {
    let body = AceOutput::Error(ErrorOutput {
        error: err.to_payload(),
    });
    if let Err(write_err) = write_output(&body, format, output) {
        eprintln!("Failed to write error output: {write_err}");
    }
    ExitCode::from(2)
}

/// Format output for human consumption.
pub fn format_text(body: &AceOutput) -> String {
    match body {
        AceOutput::Analyze(report) => {
            let mut buf = String::new();
            writeln!(buf, "Overall score: {:.2}", report.overall_score).ok();
            for (name, result) in &report.results {
                writeln!(buf, "- {:14} {:.2}", name, result.overall_score).ok();
                for issue in &result.issues {
                    writeln!(buf, "    [{}] {}", issue.severity, issue.message).ok();
                }
            }
            buf
        }
        AceOutput::Apply(out) => {
            let mut buf = String::new();
            writeln!(
                buf,
                "Applied {} change(s), skipped {}",
                out.applied.len(),
                out.skipped.len()
            )
            .ok();
            for skip in &out.skipped {
                writeln!(buf, "- skipped {}: {}", skip.id, skip.reason).ok();
            }
            if let Some(dir) = &out.out_dir {
                writeln!(buf, "Wrote patched buffers to {}", dir.display()).ok();
            } else if let Some(html) = &out.html {
                writeln!(buf, "{html}").ok();
            }
            buf
        }
        AceOutput::Error(out) => {
            let mut buf = String::new();
            writeln!(buf, "[ERROR] {}", out.error.message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {remediation}").ok();
            }
            buf
        }
    }
}
