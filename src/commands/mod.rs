mod analyze;
mod apply;

use std::path::Path;

use ace_lib::{CodeDocument, Config, Result};

pub use analyze::run_analyze;
pub use apply::run_apply;

pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Assemble a document from the given files. Missing css/js flags mean an
/// empty buffer, not an error.
pub(crate) fn load_document(
    html: &Path,
    css: Option<&Path>,
    js: Option<&Path>,
) -> Result<CodeDocument> {
    let html = std::fs::read_to_string(html)?;
    let css = match css {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };
    let js = match js {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };
    Ok(CodeDocument::new(html, css, js))
}
