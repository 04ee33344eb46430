//! Application layer for quiz-recall
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::Preferences;
pub use ports::{
    bank_store::{InMemoryBankStore, LocalBankStore, StoreError},
    config_accessor::{ConfigAccessError, ConfigAccessorPort, ConfigValue},
    progress::{CompositeNotifier, NoProgress, PassNotifier},
    quiz_page::{BlockMark, ControlState, PageError, QuizPage, SyntheticEvent},
    remote_bank::{FetchError, RemoteBankSource},
};
pub use use_cases::learn::{LearnAnswersUseCase, LearnError, LearnOutput, learn_block};
pub use use_cases::reconcile::{ApplyOutcome, Reconciler, TogglePlan};
pub use use_cases::run_pass::{
    BankSizes, RunPassError, RunPassInput, RunPassOutput, RunPassUseCase,
};
pub use use_cases::transfer::{BankTransferUseCase, ImportSummary, TransferError};
