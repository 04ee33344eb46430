//! Run Pass use case
//!
//! One resolution pass over the page: gather banks, merge them, resolve and
//! apply every discovered question, and tally the outcomes.
//!
//! Only question discovery can fail the pass. An unreadable local store or an
//! unreachable remote bank degrades to an empty contribution.

use crate::config::Preferences;
use crate::ports::bank_store::LocalBankStore;
use crate::ports::progress::{NoProgress, PassNotifier};
use crate::ports::quiz_page::{BlockMark, PageError, QuizPage};
use crate::ports::remote_bank::{FetchError, RemoteBankSource};
use crate::use_cases::reconcile::Reconciler;
use recall_domain::{
    AnswerBank, BankLayers, BankSource, PassReport, ResolutionOutcome, resolve,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a pass
#[derive(Error, Debug)]
pub enum RunPassError {
    #[error("Question discovery failed: {0}")]
    Discovery(#[from] PageError),
}

/// Input for the RunPass use case
#[derive(Debug, Clone)]
pub struct RunPassInput {
    pub preferences: Preferences,
    /// Answers harvested during this session
    pub harvested: AnswerBank,
    /// Whether to consult the remote bank at all
    pub use_remote: bool,
}

impl RunPassInput {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            harvested: AnswerBank::new(),
            use_remote: true,
        }
    }

    pub fn with_harvested(mut self, harvested: AnswerBank) -> Self {
        self.harvested = harvested;
        self
    }

    pub fn without_remote(mut self) -> Self {
        self.use_remote = false;
        self
    }
}

/// Sizes of the contributing banks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BankSizes {
    pub local: usize,
    pub remote: Option<usize>,
    pub harvested: usize,
    pub merged: usize,
}

/// Output of a pass
#[derive(Debug, Clone)]
pub struct RunPassOutput {
    pub report: PassReport,
    pub banks: BankSizes,
    /// Blocks discovered on the page, including unprocessable ones
    pub discovered: usize,
}

/// Use case for running one resolution pass
pub struct RunPassUseCase {
    page: Arc<dyn QuizPage>,
    store: Arc<dyn LocalBankStore>,
    remote: Option<Arc<dyn RemoteBankSource>>,
}

impl RunPassUseCase {
    pub fn new(page: Arc<dyn QuizPage>, store: Arc<dyn LocalBankStore>) -> Self {
        Self {
            page,
            store,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteBankSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunPassInput) -> Result<RunPassOutput, RunPassError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunPassInput,
        progress: &dyn PassNotifier,
    ) -> Result<RunPassOutput, RunPassError> {
        let prefs = &input.preferences;

        let readiness = prefs.readiness_delay();
        if !readiness.is_zero() {
            debug!("Waiting {:?} for the page to settle", readiness);
            tokio::time::sleep(readiness).await;
        }

        let local = self.load_local();
        let remote = if input.use_remote {
            self.fetch_remote(prefs).await
        } else {
            None
        };

        let merged = BankLayers::new()
            .with(BankSource::Local, &local)
            .with_optional(BankSource::Remote, remote.as_ref())
            .with(BankSource::Harvested, &input.harvested)
            .merge(prefs.precedence());

        let banks = BankSizes {
            local: local.len(),
            remote: remote.as_ref().map(AnswerBank::len),
            harvested: input.harvested.len(),
            merged: merged.len(),
        };
        info!(
            "Banks: local {}, remote {}, harvested {}, merged {}",
            banks.local,
            banks
                .remote
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            banks.harvested,
            banks.merged
        );

        let blocks = self.page.discover().await?;
        let discovered = blocks.len();
        info!("Discovered {} question blocks", discovered);
        progress.on_pass_start(blocks.iter().filter(|b| b.is_processable()).count());

        let reconciler = Reconciler::new(Arc::clone(&self.page), prefs.settle_interval());
        let mut report = PassReport::new();

        for block in &blocks {
            let outcome = resolve(block, &merged, prefs.fuzzy_threshold);

            let applied = match &outcome {
                ResolutionOutcome::Hit(resolution) if prefs.auto_apply => {
                    Some(reconciler.apply(block, &resolution.answer).await.is_success())
                }
                ResolutionOutcome::Miss => {
                    self.mark(block.index, BlockMark::Miss).await;
                    None
                }
                ResolutionOutcome::Inconsistent(reason) => {
                    debug!("Block {}: {}", block.index, reason);
                    self.mark(block.index, BlockMark::Inconsistent).await;
                    None
                }
                _ => None,
            };

            if let Some(entry) =
                report.record(&block.raw_stem, block.declared_type, &outcome, applied)
            {
                progress.on_detail(entry);
            }
        }

        info!(
            "Pass complete: {} hit, {} miss, {} inconsistent",
            report.hit, report.miss, report.inconsistent
        );
        progress.on_pass_complete(&report);

        Ok(RunPassOutput {
            report,
            banks,
            discovered,
        })
    }

    fn load_local(&self) -> AnswerBank {
        match self.store.load() {
            Ok(bank) => bank,
            Err(e) => {
                warn!("Local bank unavailable, continuing without it: {}", e);
                AnswerBank::new()
            }
        }
    }

    async fn fetch_remote(&self, prefs: &Preferences) -> Option<AnswerBank> {
        let remote = self.remote.as_ref()?;
        let url = prefs.bank_url()?;

        let result = match tokio::time::timeout(prefs.remote_timeout(), remote.fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        };

        match result {
            Ok(bank) => {
                debug!("Fetched {} remote entries from {}", bank.len(), url);
                Some(bank)
            }
            Err(e) => {
                warn!("Remote bank unavailable, continuing without it: {}", e);
                None
            }
        }
    }

    async fn mark(&self, block: usize, mark: BlockMark) {
        if let Err(e) = self.page.mark_block(block, mark).await {
            debug!("Block {}: marking failed: {}", block, e);
        }
    }
}
