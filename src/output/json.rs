use std::fs;
use std::path::Path;

use crate::assemble::Discography;
use crate::error::{Error, Result};

pub(super) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}

pub fn render_json(discography: &Discography) -> Result<String> {
    let mut json = serde_json::to_string_pretty(discography)?;
    json.push('\n');
    Ok(json)
}

/// Write the discography document, creating its directory if needed.
pub fn write_json(path: &Path, discography: &Discography) -> Result<()> {
    ensure_parent(path)?;
    let json = render_json(discography)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), "wrote discography");
    Ok(())
}
