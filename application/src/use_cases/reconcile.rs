//! Reconcile use case
//!
//! Drives the page controls of one block toward a resolved answer.
//!
//! ```text
//! Single:  locate ─► scroll ─► activate (or wrapper) ─► dispatch ×5 ─► mark
//! Multi:   snapshot ─► Checking ─► Unchecking ─► Done
//! ```
//!
//! Multi toggles run strictly one after another with a settling interval in
//! between. Nothing is retried and state is not re-read after toggling.

use crate::ports::quiz_page::{ControlState, PageError, QuizPage, SyntheticEvent};
use recall_domain::{Letter, QuestionBlock, ResolvedAnswer};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Toggles needed to move a multi-choice block to the desired set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TogglePlan {
    /// Desired but currently unchecked, in display order
    pub to_check: Vec<Letter>,
    /// Checked but not desired, in display order
    pub to_uncheck: Vec<Letter>,
}

impl TogglePlan {
    /// Compute the plan from a control snapshot
    pub fn compute(controls: &[ControlState], desired: &BTreeSet<Letter>) -> Self {
        let mut plan = Self::default();
        for control in controls {
            match (desired.contains(&control.letter), control.checked) {
                (true, false) => plan.to_check.push(control.letter),
                (false, true) => plan.to_uncheck.push(control.letter),
                _ => {}
            }
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.to_check.is_empty() && self.to_uncheck.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_check.len() + self.to_uncheck.len()
    }
}

/// What an apply call did to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// At least one control was activated
    Applied,
    /// The controls already matched the answer; nothing was toggled
    AlreadySatisfied,
    /// The controls could not be located or read
    Unavailable,
}

impl ApplyOutcome {
    /// Whether the page now reflects the answer
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Applies resolved answers to the page
pub struct Reconciler<P: QuizPage + ?Sized> {
    page: Arc<P>,
    settle_interval: Duration,
}

impl<P: QuizPage + ?Sized> Reconciler<P> {
    pub fn new(page: Arc<P>, settle_interval: Duration) -> Self {
        Self {
            page,
            settle_interval,
        }
    }

    /// Apply any resolved answer
    pub async fn apply(&self, block: &QuestionBlock, answer: &ResolvedAnswer) -> ApplyOutcome {
        match answer {
            ResolvedAnswer::Single(letter) => self.apply_single(block, *letter).await,
            ResolvedAnswer::Multi(letters) => self.apply_multi(block, letters).await,
        }
    }

    /// Select one option. Unavailable when the control does not exist.
    pub async fn apply_single(&self, block: &QuestionBlock, letter: Letter) -> ApplyOutcome {
        let controls = match self.page.controls(block.index).await {
            Ok(controls) => controls,
            Err(e) => {
                warn!("Block {}: cannot read controls: {}", block.index, e);
                return ApplyOutcome::Unavailable;
            }
        };
        if !controls.iter().any(|c| c.letter == letter) {
            debug!("Block {}: no control for {}", block.index, letter);
            return ApplyOutcome::Unavailable;
        }

        if let Err(e) = self.page.scroll_into_view(block.index, letter).await {
            debug!("Block {}: scroll failed: {}", block.index, e);
        }
        if let Err(e) = self.activate(block.index, letter).await {
            warn!("Block {}: activation of {} failed: {}", block.index, letter, e);
        }
        for event in SyntheticEvent::SEQUENCE {
            if let Err(e) = self.page.dispatch(block.index, letter, event).await {
                debug!(
                    "Block {}: {} on {} failed: {}",
                    block.index,
                    event.as_str(),
                    letter,
                    e
                );
            }
        }
        if let Err(e) = self.page.mark_option(block.index, letter, true).await {
            debug!("Block {}: marking {} failed: {}", block.index, letter, e);
        }
        ApplyOutcome::Applied
    }

    /// Bring a multi-choice block to exactly `desired`.
    ///
    /// A block already in the desired state is `AlreadySatisfied` and sees no
    /// interaction at all.
    pub async fn apply_multi(
        &self,
        block: &QuestionBlock,
        desired: &BTreeSet<Letter>,
    ) -> ApplyOutcome {
        let controls = match self.page.controls(block.index).await {
            Ok(controls) => controls,
            Err(e) => {
                warn!("Block {}: cannot read controls: {}", block.index, e);
                return ApplyOutcome::Unavailable;
            }
        };
        if controls.is_empty() {
            return ApplyOutcome::Unavailable;
        }

        let plan = TogglePlan::compute(&controls, desired);
        debug!(
            "Block {}: check {:?}, uncheck {:?}",
            block.index, plan.to_check, plan.to_uncheck
        );
        if plan.is_empty() {
            return ApplyOutcome::AlreadySatisfied;
        }

        for letter in &plan.to_check {
            self.toggle(block.index, *letter, true).await;
        }
        for letter in &plan.to_uncheck {
            self.toggle(block.index, *letter, false).await;
        }
        ApplyOutcome::Applied
    }

    async fn toggle(&self, block: usize, letter: Letter, checked: bool) {
        if let Err(e) = self.activate(block, letter).await {
            warn!("Block {}: toggle of {} failed: {}", block, letter, e);
        }
        if let Err(e) = self.page.mark_option(block, letter, checked).await {
            debug!("Block {}: marking {} failed: {}", block, letter, e);
        }
        tokio::time::sleep(self.settle_interval).await;
    }

    async fn activate(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        match self.page.activate(block, letter).await {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("Block {}: falling back to wrapper for {}: {}", block, letter, e);
                self.page.activate_wrapper(block, letter).await
            }
        }
    }
}
