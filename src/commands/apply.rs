use std::path::PathBuf;
use std::process::ExitCode;

use ace_lib::{AceError, PatchEngine, Suggestion};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output, AceOutput, ApplyOutput};

use super::{load_config, load_document};

/// Run the apply command.
#[allow(clippy::too_many_arguments)]
pub async fn run_apply(
    config_path: Option<PathBuf>,
    verbose: bool,
    html: PathBuf,
    css: Option<PathBuf>,
    js: Option<PathBuf>,
    suggestion: PathBuf,
    out_dir: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let doc = match load_document(&html, css.as_deref(), js.as_deref()) {
        Ok(doc) => doc,
        Err(err) => return render_error(err, format, output.as_deref()),
    };
    let suggestion: Suggestion = match std::fs::read_to_string(&suggestion)
        .map_err(AceError::Io)
        .and_then(|raw| Ok(serde_json::from_str(&raw)?))
    {
        Ok(s) => s,
        Err(err) => return render_error(err, format, output.as_deref()),
    };

    if verbose {
        eprintln!("Applying {} change(s)\u{2026}", suggestion.changes.len());
    }
    let engine = PatchEngine::new(config.patch);
    let result = match engine.apply_suggestion(&doc, &suggestion) {
        Ok(result) => result,
        Err(err) => return render_error(err, format, output.as_deref()),
    };

    if let Some(dir) = &out_dir {
        if let Err(err) = write_buffers(dir, &result.doc) {
            return render_error(err, format, output.as_deref());
        }
    }

    let body = AceOutput::Apply(ApplyOutput::new(&result, out_dir));
    if let Err(err) = write_output(&body, format, output.as_deref()) {
        return render_error(AceError::Io(err), format, None);
    }
    ExitCode::SUCCESS
}

fn write_buffers(dir: &std::path::Path, doc: &ace_lib::CodeDocument) -> ace_lib::Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join("index.html"), &doc.html)?;
    if !doc.css.trim().is_empty() {
        std::fs::write(dir.join("style.css"), &doc.css)?;
    }
    if doc.has_js() {
        std::fs::write(dir.join("script.js"), &doc.js)?;
    }
    Ok(())
}
