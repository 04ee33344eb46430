//! Quiz page port
//!
//! The page owns the live control state; this engine can only read it and
//! issue interactions. Implementations range from a real browser session to
//! the HTML snapshot adapter in the infrastructure layer.
//!
//! # Addressing
//!
//! Blocks are addressed by [`QuestionBlock::index`](recall_domain::QuestionBlock),
//! controls within a block by their option [`Letter`].

use async_trait::async_trait;
use recall_domain::{Letter, QuestionBlock};
use thiserror::Error;

/// Errors from page interactions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Question block {0} not found")]
    BlockNotFound(usize),

    #[error("Control {letter} not found in block {block}")]
    ControlNotFound { block: usize, letter: Letter },

    #[error("Interaction rejected: {0}")]
    Rejected(String),

    #[error("Page unavailable: {0}")]
    Unavailable(String),
}

/// Observed state of one option control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub letter: Letter,
    pub checked: bool,
}

/// Events dispatched after a native activation, for frameworks that listen
/// on different event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticEvent {
    PointerDown,
    MouseDown,
    Click,
    Input,
    Change,
}

impl SyntheticEvent {
    /// Full sequence, in dispatch order
    pub const SEQUENCE: [SyntheticEvent; 5] = [
        SyntheticEvent::PointerDown,
        SyntheticEvent::MouseDown,
        SyntheticEvent::Click,
        SyntheticEvent::Input,
        SyntheticEvent::Change,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SyntheticEvent::PointerDown => "pointerdown",
            SyntheticEvent::MouseDown => "mousedown",
            SyntheticEvent::Click => "click",
            SyntheticEvent::Input => "input",
            SyntheticEvent::Change => "change",
        }
    }
}

/// Visual marking of a whole block that could not be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMark {
    Miss,
    Inconsistent,
}

/// Question discovery and control interaction
#[async_trait]
pub trait QuizPage: Send + Sync {
    /// Scan the page for question blocks. Called fresh on every pass.
    async fn discover(&self) -> Result<Vec<QuestionBlock>, PageError>;

    /// Current state of every option control of a block, in display order
    async fn controls(&self, block: usize) -> Result<Vec<ControlState>, PageError>;

    async fn scroll_into_view(&self, block: usize, letter: Letter) -> Result<(), PageError>;

    /// Native activation of the control itself
    async fn activate(&self, block: usize, letter: Letter) -> Result<(), PageError>;

    /// Activate the nearest clickable wrapper of the control
    async fn activate_wrapper(&self, block: usize, letter: Letter) -> Result<(), PageError>;

    async fn dispatch(
        &self,
        block: usize,
        letter: Letter,
        event: SyntheticEvent,
    ) -> Result<(), PageError>;

    /// Set or clear the "applied" highlight of a control
    async fn mark_option(&self, block: usize, letter: Letter, marked: bool)
    -> Result<(), PageError>;

    async fn mark_block(&self, block: usize, mark: BlockMark) -> Result<(), PageError>;
}
