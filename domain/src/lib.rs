//! Domain layer for quiz-recall
//!
//! This crate contains the answer-resolution engine: pure functions and
//! value objects with no I/O.
//!
//! # Core Concepts
//!
//! ## Stem
//!
//! The normalized question text. It is both the storage key of an
//! [`AnswerBank`] and the lookup key during resolution, so normalization is
//! idempotent.
//!
//! ## Resolution
//!
//! ```text
//! QuestionBlock ──normalize──► stem ──find_match──► candidate ──validate──► ResolutionOutcome
//!                                        ▲
//!                      merge(local, remote, harvested)
//! ```

pub mod bank;
pub mod config;
pub mod core;
pub mod harvest;
pub mod matching;
pub mod question;
pub mod resolution;
pub mod text;

// Re-export commonly used types
pub use bank::{
    AnswerBank, AnswerRecord, AnswerValue, BankLayers, BankPrecedence, BankSource, ParsedBank,
    Provenance, QuestionType, merge,
};
pub use config::OutputFormat;
pub use crate::core::{
    error::{DomainError, validate_threshold},
    letter::Letter,
    string::truncate,
};
pub use harvest::{HarvestLog, HarvestedAnswer, harvest_response};
pub use matching::{MatchCandidate, MatchReason, find_match, jaccard, stem_similarity};
pub use question::{QuestionBlock, QuestionOption, detect_type};
pub use resolution::{
    DetailEntry, DetailKind, InconsistencyReason, PassReport, Resolution, ResolutionOutcome,
    ResolvedAnswer, resolve,
};
pub use text::{normalize, tokenize};
