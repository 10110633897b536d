//! Markdown output writing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Output path for a converted document.
#[must_use]
pub fn output_path(out_dir: &Path, celex: &str) -> PathBuf {
    out_dir.join(format!("{celex}.md"))
}

/// Write converted Markdown to `<out_dir>/<CELEX>.md`, creating the
/// directory if needed.
///
/// # Errors
/// Returns an IO error if the directory or file cannot be written.
pub fn save_markdown(content: &str, celex: &str, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = output_path(out_dir, celex);
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Saved Markdown");
    Ok(path)
}
