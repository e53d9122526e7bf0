use std::fs;
use std::path::Path;

use crate::error::InputReadError;

const BOM: &str = "\u{feff}";

/// Reads an export from disk as UTF-8, discarding a leading byte-order mark.
pub fn read_clippings_file(path: &Path) -> Result<String, InputReadError> {
    let bytes = fs::read(path).map_err(|source| InputReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let content = String::from_utf8(bytes).map_err(|source| InputReadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = content.len(), "read clippings file");

    Ok(match content.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => content,
    })
}
