//! Reader for captured answer-endpoint responses
//!
//! A capture file holds either one JSON document or one response body per
//! line (JSON lines). Every body is fed to a [`HarvestLog`], which keeps the
//! latest answer per normalized title.

use recall_domain::{AnswerBank, HarvestLog};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capture contains no JSON response")]
    NoResponses,
}

/// Accumulated harvest from one or more capture files
#[derive(Debug, Default)]
pub struct HarvestCapture {
    log: HarvestLog,
    responses: usize,
}

impl HarvestCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a capture file and fold its responses into this harvest
    pub fn read_file(&mut self, path: &Path) -> Result<usize, HarvestError> {
        let text = std::fs::read_to_string(path)?;
        let learned = self.read_str(&text)?;
        debug!("Harvested {} answers from {}", learned, path.display());
        Ok(learned)
    }

    /// Fold captured responses from text; returns how many answers were seen
    pub fn read_str(&mut self, text: &str) -> Result<usize, HarvestError> {
        if let Ok(document) = serde_json::from_str::<Value>(text) {
            self.responses += 1;
            return Ok(self.log.observe(&document));
        }

        let mut parsed = 0;
        let mut learned = 0;
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => {
                    parsed += 1;
                    learned += self.log.observe(&value);
                }
                Err(e) => warn!("Capture line {}: not JSON ({})", line_no + 1, e),
            }
        }

        if parsed == 0 {
            return Err(HarvestError::NoResponses);
        }
        self.responses += parsed;
        Ok(learned)
    }

    /// Number of response bodies read
    pub fn responses(&self) -> usize {
        self.responses
    }

    pub fn bank(&self) -> &AnswerBank {
        self.log.bank()
    }

    pub fn into_bank(self) -> AnswerBank {
        self.log.into_bank()
    }
}
