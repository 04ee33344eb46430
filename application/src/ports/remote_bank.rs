//! Remote answer bank port
//!
//! A shared bank published as a JSON document. Any failure here means "no
//! remote contribution" to the caller; the error only feeds the log.

use async_trait::async_trait;
use recall_domain::AnswerBank;
use thiserror::Error;

/// Errors that can occur while fetching a remote bank
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("Timeout")]
    Timeout,

    #[error("Response is not an answer bank: {0}")]
    Malformed(String),
}

/// Source of the shared answer bank
#[async_trait]
pub trait RemoteBankSource: Send + Sync {
    /// Fetch and decode the bank published at `url`
    async fn fetch(&self, url: &str) -> Result<AnswerBank, FetchError>;
}
