//! Resolution outcome types

use crate::bank::{AnswerRecord, QuestionType};
use crate::core::letter::{Letter, join_letters};
use crate::matching::MatchReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A validated answer ready to be applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedAnswer {
    Single(Letter),
    Multi(BTreeSet<Letter>),
}

impl std::fmt::Display for ResolvedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedAnswer::Single(letter) => write!(f, "{}", letter),
            ResolvedAnswer::Multi(letters) => f.write_str(&join_letters(letters, "、")),
        }
    }
}

/// Why a matched record could not be used for the live question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InconsistencyReason {
    TypeMismatch {
        key: String,
        expected: QuestionType,
        found: QuestionType,
    },
    InvalidSingleAnswer {
        key: String,
        answer: String,
    },
    EmptyAnswerSet {
        key: String,
    },
    MissingOptions {
        key: String,
        letters: Vec<Letter>,
    },
}

impl InconsistencyReason {
    /// Short category label
    pub fn summary(&self) -> &'static str {
        match self {
            InconsistencyReason::TypeMismatch { .. } => "type mismatch",
            InconsistencyReason::InvalidSingleAnswer { .. } => "invalid or unavailable answer",
            InconsistencyReason::EmptyAnswerSet { .. } => "empty/invalid answer set",
            InconsistencyReason::MissingOptions { .. } => {
                "answer letters not present among options"
            }
        }
    }
}

impl std::fmt::Display for InconsistencyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InconsistencyReason::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "{}: bank key «{}» is {}, page shows {}",
                self.summary(),
                key,
                found,
                expected
            ),
            InconsistencyReason::InvalidSingleAnswer { key, answer } => write!(
                f,
                "{}: bank key «{}» answers «{}»",
                self.summary(),
                key,
                answer
            ),
            InconsistencyReason::EmptyAnswerSet { key } => {
                write!(f, "{}: bank key «{}»", self.summary(), key)
            }
            InconsistencyReason::MissingOptions { key, letters } => write!(
                f,
                "{}: bank key «{}» needs {}",
                self.summary(),
                key,
                join_letters(letters, "、")
            ),
        }
    }
}

/// A successful resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Bank key that matched
    pub key: String,
    pub record: AnswerRecord,
    pub reason: MatchReason,
    pub answer: ResolvedAnswer,
}

/// Result of resolving one question block
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Hit(Resolution),
    Miss,
    Inconsistent(InconsistencyReason),
    /// Empty stem; excluded from every tally
    NotProcessable,
}

impl ResolutionOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ResolutionOutcome::Hit(_))
    }
}
