//! Style File Storage
//!
//! Reads and writes style documents as JSON files. Loading validates the
//! document shape before anything reaches the engine; a file that fails
//! validation is never loaded.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::error::{Result, StyleError};
use crate::style::StyleDocument;

/// File name used when a style has no name.
pub const DEFAULT_EXPORT_NAME: &str = "map-style";

/// Read raw JSON from disk without validating it.
pub fn read_style_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| StyleError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Load and validate a style document.
///
/// Fails with [`StyleError::Validation`] listing every shape problem.
pub fn load_style(path: &Path) -> Result<StyleDocument> {
    let raw = read_style_json(path)?;
    let document = StyleDocument::from_validated_json(raw)?;
    info!(
        "Loaded style '{}' with {} layers from {}",
        document.name.as_deref().unwrap_or(DEFAULT_EXPORT_NAME),
        document.layer_count(),
        path.display()
    );
    Ok(document)
}

/// Write a style document as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save_style(path: &Path, document: &StyleDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StyleError::FileWriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content).map_err(|e| StyleError::FileWriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Saved style to {}", path.display());
    Ok(())
}

/// Download file name for a document: `<name>.json`.
pub fn export_file_name(document: &StyleDocument) -> String {
    let name = document
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_EXPORT_NAME);
    format!("{}.json", name)
}

/// Path for exporting `document` into `dir`.
pub fn export_path(dir: &Path, document: &StyleDocument) -> PathBuf {
    dir.join(export_file_name(document))
}
