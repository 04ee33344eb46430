//! JSON file adapter for the local bank store
//!
//! The bank is one JSON object of `stem -> record`. Writes go through a
//! sibling temp file and a rename so a crash never leaves a truncated bank.

use recall_application::{LocalBankStore, StoreError};
use recall_domain::{AnswerBank, Provenance};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Local bank stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileBankStore {
    path: PathBuf,
}

impl JsonFileBankStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LocalBankStore for JsonFileBankStore {
    fn load(&self) -> Result<AnswerBank, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No local bank at {}", self.path.display());
                return Ok(AnswerBank::new());
            }
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(AnswerBank::new());
        }

        let parsed = AnswerBank::from_json(&text, Provenance::Local)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        if !parsed.rejected.is_empty() {
            warn!(
                "Ignoring {} undecodable entries in {}",
                parsed.rejected.len(),
                self.path.display()
            );
        }
        Ok(parsed.bank)
    }

    fn save(&self, bank: &AnswerBank) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        std::fs::write(&temp, bank.to_json_pretty())?;
        std::fs::rename(&temp, &self.path)?;
        debug!("Saved {} entries to {}", bank.len(), self.path.display());
        Ok(())
    }
}
