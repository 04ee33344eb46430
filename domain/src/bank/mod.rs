//! Answer banks
//!
//! An [`AnswerBank`] maps a normalized stem to the [`AnswerRecord`] known for
//! it. Three sources feed the engine:
//!
//! | Source | Lifetime | Origin |
//! |--------|----------|--------|
//! | Local | durable | user-curated, learning mode, imports |
//! | Remote | per load | JSON document at a configured URL |
//! | Harvested | per session | answers observed in captured responses |
//!
//! [`merge`] combines them into a single read-only bank for one pass.

pub mod answer_bank;
pub mod merge;
pub mod record;

pub use answer_bank::{AnswerBank, ParsedBank};
pub use merge::{BankLayers, BankPrecedence, BankSource, merge};
pub use record::{AnswerRecord, AnswerValue, Provenance, QuestionType};
