//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Local bank file. Defaults to `<data dir>/quiz-recall/bank.json`.
    pub bank_path: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured path, or the platform default
    pub fn resolved_bank_path(&self) -> Option<PathBuf> {
        self.bank_path.clone().or_else(Self::default_bank_path)
    }

    pub fn default_bank_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("quiz-recall").join("bank.json"))
    }
}
