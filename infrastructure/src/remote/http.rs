//! HTTP adapter for the shared answer bank
//!
//! A plain GET of a JSON document. Non-2xx statuses, network failures and
//! bodies that are not a JSON object all surface as [`FetchError`].

use async_trait::async_trait;
use recall_application::{FetchError, RemoteBankSource};
use recall_domain::{AnswerBank, Provenance};
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

const USER_AGENT: &str = concat!("quiz-recall/", env!("CARGO_PKG_VERSION"));

/// Fetches the remote bank with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpRemoteBank {
    client: reqwest::Client,
}

impl HttpRemoteBank {
    /// Build a client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Decode a response body into a bank stamped as remote
pub(crate) fn decode_body(body: &str) -> Result<AnswerBank, FetchError> {
    let parsed = AnswerBank::from_json(body, Provenance::Remote)
        .map_err(|e| FetchError::Malformed(e.to_string()))?;
    if !parsed.rejected.is_empty() {
        warn!(
            "Remote bank: ignoring {} undecodable entries",
            parsed.rejected.len()
        );
    }
    Ok(parsed.bank)
}

#[async_trait]
impl RemoteBankSource for HttpRemoteBank {
    async fn fetch(&self, url: &str) -> Result<AnswerBank, FetchError> {
        debug!("Fetching remote bank from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestFailed(e.to_string())
            }
        })?;
        if body.len() > MAX_BODY_SIZE {
            return Err(FetchError::Malformed(format!(
                "response too large: {} bytes",
                body.len()
            )));
        }

        decode_body(&String::from_utf8_lossy(&body))
    }
}
