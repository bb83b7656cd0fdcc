use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tabula_core::contracts::{Dataset, TabulaAttachment};

/// Reads a file into an attachment named after the file, so the MIME type can be guessed from it.
pub fn load_attachment(path: &Path) -> Result<TabulaAttachment> {
    let data = fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    if data.is_empty() {
        bail!("{} is empty", path.display());
    }
    let name = path.file_name().map(|n| n.to_string_lossy().to_string());
    Ok(TabulaAttachment::new(data, name))
}

pub fn load_context(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read context file {}", path.display()))
}

pub fn render_dataset(rows: &Dataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn write_dataset(path: &Path, rows: &Dataset) -> Result<()> {
    let rendered = render_dataset(rows)?;
    fs::write(path, rendered).with_context(|| format!("could not write {}", path.display()))
}
