//! Persisting preference edits back to a TOML file
//!
//! Only the `[preferences]` table is replaced; every other table in the file
//! is kept as it was.

use recall_application::Preferences;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Existing config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Write `preferences` into the `[preferences]` table of the file at `path`,
/// creating the file and its parent directories when missing.
pub fn save_preferences(path: &Path, preferences: &Preferences) -> Result<(), ConfigWriteError> {
    let mut document: toml::Table = match std::fs::read_to_string(path) {
        Ok(text) => text.parse()?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => return Err(e.into()),
    };

    let encoded = toml::Value::try_from(preferences)?;
    document.insert("preferences".to_string(), encoded);

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(&document)?)?;
    debug!("Saved preferences to {}", path.display());
    Ok(())
}
