//! Local answer bank store port
//!
//! The durable key/value slot holding the user's own answer bank. Read at
//! the start of every pass, written by learning mode and imports.

use recall_domain::AnswerBank;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from the local bank store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored bank is malformed: {0}")]
    Malformed(String),
}

/// Durable storage for the local answer bank
pub trait LocalBankStore: Send + Sync {
    /// Load the bank. A store that was never written yields an empty bank.
    fn load(&self) -> Result<AnswerBank, StoreError>;

    /// Replace the stored bank
    fn save(&self, bank: &AnswerBank) -> Result<(), StoreError>;
}

/// In-memory store, for tests and `--no-store` runs
#[derive(Debug, Default)]
pub struct InMemoryBankStore {
    bank: Mutex<AnswerBank>,
}

impl InMemoryBankStore {
    pub fn new(bank: AnswerBank) -> Self {
        Self {
            bank: Mutex::new(bank),
        }
    }

    /// Snapshot of the current contents
    pub fn snapshot(&self) -> AnswerBank {
        self.bank
            .lock()
            .map(|bank| bank.clone())
            .unwrap_or_default()
    }
}

impl LocalBankStore for InMemoryBankStore {
    fn load(&self) -> Result<AnswerBank, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, bank: &AnswerBank) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.bank.lock() {
            *slot = bank.clone();
        }
        Ok(())
    }
}
