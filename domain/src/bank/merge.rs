//! Bank merging under a configurable precedence

use super::answer_bank::AnswerBank;
use super::record::AnswerRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named answer source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankSource {
    Local,
    Remote,
    Harvested,
}

impl BankSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankSource::Local => "local",
            BankSource::Remote => "remote",
            BankSource::Harvested => "harvested",
        }
    }
}

/// Which side wins when the same stem appears in several sources.
///
/// Remote always outranks local; the setting only decides where harvested
/// answers sit relative to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BankPrecedence {
    /// Harvested > remote > local
    #[default]
    HarvestedFirst,
    /// Local/remote > harvested
    LocalFirst,
}

impl BankPrecedence {
    pub fn from_flag(harvest_precedence: bool) -> Self {
        if harvest_precedence {
            BankPrecedence::HarvestedFirst
        } else {
            BankPrecedence::LocalFirst
        }
    }

    /// Rank of a source; a higher rank overwrites a lower one.
    pub fn rank(&self, source: BankSource) -> u8 {
        match (self, source) {
            (BankPrecedence::HarvestedFirst, BankSource::Local) => 0,
            (BankPrecedence::HarvestedFirst, BankSource::Remote) => 1,
            (BankPrecedence::HarvestedFirst, BankSource::Harvested) => 2,
            (BankPrecedence::LocalFirst, BankSource::Harvested) => 0,
            (BankPrecedence::LocalFirst, BankSource::Local) => 1,
            (BankPrecedence::LocalFirst, BankSource::Remote) => 2,
        }
    }
}

/// Ordered list of named sources to merge.
///
/// Keys enumerate in layer order (first layer's keys first) regardless of
/// precedence, so switching precedence changes which record a key resolves
/// to but never the order the matcher scans keys in.
#[derive(Debug, Default)]
pub struct BankLayers<'a> {
    layers: Vec<(BankSource, &'a AnswerBank)>,
}

impl<'a> BankLayers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: BankSource, bank: &'a AnswerBank) -> Self {
        self.layers.push((source, bank));
        self
    }

    pub fn with_optional(self, source: BankSource, bank: Option<&'a AnswerBank>) -> Self {
        match bank {
            Some(bank) => self.with(source, bank),
            None => self,
        }
    }

    /// Merge all layers into a new bank. Inputs are left untouched.
    pub fn merge(&self, precedence: BankPrecedence) -> AnswerBank {
        let mut ranked: IndexMap<&str, (u8, &AnswerRecord)> = IndexMap::new();
        for (source, bank) in &self.layers {
            let rank = precedence.rank(*source);
            for (stem, record) in bank.iter() {
                match ranked.get_mut(stem) {
                    Some(slot) if rank >= slot.0 => *slot = (rank, record),
                    Some(_) => {}
                    None => {
                        ranked.insert(stem, (rank, record));
                    }
                }
            }
        }
        ranked
            .into_iter()
            .map(|(stem, (_, record))| (stem.to_string(), record.clone()))
            .collect()
    }
}

/// Merge the three answer sources into one lookup bank.
///
/// A missing remote bank contributes nothing. With `precedence_harvested`
/// harvested entries overwrite local/remote ones on key collision; otherwise
/// local/remote entries win.
pub fn merge(
    local: &AnswerBank,
    remote: Option<&AnswerBank>,
    harvested: &AnswerBank,
    precedence_harvested: bool,
) -> AnswerBank {
    BankLayers::new()
        .with(BankSource::Local, local)
        .with_optional(BankSource::Remote, remote)
        .with(BankSource::Harvested, harvested)
        .merge(BankPrecedence::from_flag(precedence_harvested))
}
