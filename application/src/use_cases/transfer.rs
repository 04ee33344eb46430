//! Bank Transfer use case
//!
//! Import and export of the local bank as a JSON document.

use crate::ports::bank_store::{LocalBankStore, StoreError};
use recall_domain::{AnswerBank, DomainError, Provenance};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Import rejected: {0}")]
    Invalid(#[from] DomainError),

    #[error("Local bank error: {0}")]
    Store(#[from] StoreError),
}

/// Result of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub stored: usize,
    /// Keys whose records could not be decoded
    pub rejected: Vec<String>,
}

pub struct BankTransferUseCase {
    store: Arc<dyn LocalBankStore>,
}

impl BankTransferUseCase {
    pub fn new(store: Arc<dyn LocalBankStore>) -> Self {
        Self { store }
    }

    /// Replace the local bank with the entries of `json`.
    ///
    /// The document must be a JSON object. Entries that fail to decode are
    /// skipped and listed in the summary; the rest are stored.
    pub fn import_json(&self, json: &str) -> Result<ImportSummary, TransferError> {
        let parsed = AnswerBank::from_json(json, Provenance::Local)?;
        for key in &parsed.rejected {
            warn!("Skipping undecodable entry: {}", key);
        }
        self.store.save(&parsed.bank)?;
        info!("Imported {} entries", parsed.bank.len());
        Ok(ImportSummary {
            stored: parsed.bank.len(),
            rejected: parsed.rejected,
        })
    }

    /// Pretty JSON of the current local bank
    pub fn export_json(&self) -> Result<String, TransferError> {
        Ok(self.store.load()?.to_json_pretty())
    }
}
