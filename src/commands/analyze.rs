use std::path::PathBuf;
use std::process::ExitCode;

use ace_lib::{AceError, AnalyzerCoordinator};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output, AceOutput};

use super::{load_config, load_document};

/// Run the analyze command.
pub async fn run_analyze(
    config_path: Option<PathBuf>,
    verbose: bool,
    html: PathBuf,
    css: Option<PathBuf>,
    js: Option<PathBuf>,
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

    let coordinator = AnalyzerCoordinator::new(&config);
    if verbose {
        eprintln!(
            "Running {} analyzers (timeout {:?} each)\u{2026}",
            coordinator.analyzer_count(),
            config.analyzer_timeout()
        );
    }
    let report = coordinator.analyze_code(&doc).await;

    if let Err(err) = write_output(&AceOutput::Analyze(report), format, output.as_deref()) {
        return render_error(AceError::Io(err), format, None);
    }
    ExitCode::SUCCESS
}
