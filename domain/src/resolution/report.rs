//! Pass report: counters plus one detail entry per processed question

use super::outcome::{Resolution, ResolutionOutcome};
use crate::bank::QuestionType;
use serde::{Deserialize, Serialize};

/// Category of a detail entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Hit,
    Miss,
    Inconsistent,
    /// Resolved, but the control could not be confirmed toggled
    ApplicationFailure,
}

impl DetailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailKind::Hit => "hit",
            DetailKind::Miss => "miss",
            DetailKind::Inconsistent => "inconsistent",
            DetailKind::ApplicationFailure => "application_failure",
        }
    }
}

/// One line of the status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub kind: DetailKind,
    /// Raw stem as shown on the page
    pub stem: String,
    pub message: String,
}

/// Aggregated result of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub hit: usize,
    pub miss: usize,
    pub inconsistent: usize,
    pub details: Vec<DetailEntry>,
}

impl PassReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of tallied questions
    pub fn total(&self) -> usize {
        self.hit + self.miss + self.inconsistent
    }

    /// Number of hits whose application failed
    pub fn application_failures(&self) -> usize {
        self.details
            .iter()
            .filter(|d| d.kind == DetailKind::ApplicationFailure)
            .count()
    }

    /// Tally one outcome and return the detail entry it produced.
    ///
    /// `applied` is `None` when auto-apply is off, otherwise whether the
    /// reconciler reported success. A hit always counts as a hit; a failed
    /// application only changes the detail kind. `NotProcessable` leaves the
    /// report untouched.
    pub fn record(
        &mut self,
        raw_stem: &str,
        declared_type: QuestionType,
        outcome: &ResolutionOutcome,
        applied: Option<bool>,
    ) -> Option<&DetailEntry> {
        let (kind, message) = match outcome {
            ResolutionOutcome::NotProcessable => return None,
            ResolutionOutcome::Miss => {
                self.miss += 1;
                (
                    DetailKind::Miss,
                    format!("not found in any answer bank ({})", declared_type),
                )
            }
            ResolutionOutcome::Inconsistent(reason) => {
                self.inconsistent += 1;
                (DetailKind::Inconsistent, reason.to_string())
            }
            ResolutionOutcome::Hit(resolution) => {
                self.hit += 1;
                let summary = hit_summary(resolution);
                match applied {
                    Some(false) => (
                        DetailKind::ApplicationFailure,
                        format!("{}, but the control could not be toggled", summary),
                    ),
                    _ => (DetailKind::Hit, summary),
                }
            }
        };

        self.details.push(DetailEntry {
            kind,
            stem: raw_stem.to_string(),
            message,
        });
        self.details.last()
    }
}

fn hit_summary(resolution: &Resolution) -> String {
    format!(
        "matched ({}, key «{}»), answer {}",
        resolution.reason, resolution.key, resolution.answer
    )
}
