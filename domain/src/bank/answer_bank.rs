//! Insertion-ordered answer bank

use super::record::{AnswerRecord, Provenance};
use crate::core::error::DomainError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from normalized stem to answer record.
///
/// Enumeration order is insertion order and is significant: the inclusion
/// and fuzzy tiers of the matcher break ties by first-seen key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerBank {
    entries: IndexMap<String, AnswerRecord>,
}

/// Result of decoding a bank document leniently
#[derive(Debug, Clone, Default)]
pub struct ParsedBank {
    pub bank: AnswerBank,
    /// Keys whose value was not a valid record
    pub rejected: Vec<String>,
}

impl AnswerBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON object of `stem -> record`, stamping every record with
    /// `provenance`.
    ///
    /// Fails only when the document is not a JSON object; individual entries
    /// that do not decode are reported in [`ParsedBank::rejected`] and
    /// skipped.
    pub fn from_json(text: &str, provenance: Provenance) -> Result<ParsedBank, DomainError> {
        let raw: IndexMap<String, serde_json::Value> =
            serde_json::from_str(text).map_err(|e| DomainError::MalformedBank(e.to_string()))?;
        Ok(Self::from_entries(raw, provenance))
    }

    fn from_entries(raw: IndexMap<String, serde_json::Value>, provenance: Provenance) -> ParsedBank {
        let mut parsed = ParsedBank::default();
        for (key, value) in raw {
            match serde_json::from_value::<AnswerRecord>(value) {
                Ok(record) => {
                    parsed
                        .bank
                        .insert(key, record.with_provenance(provenance));
                }
                Err(_) => parsed.rejected.push(key),
            }
        }
        parsed
    }

    /// Encode as pretty-printed JSON (provenance is not persisted)
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Insert or replace a record. A replaced key keeps its original position.
    pub fn insert(&mut self, stem: impl Into<String>, record: AnswerRecord) -> Option<AnswerRecord> {
        self.entries.insert(stem.into(), record)
    }

    pub fn get(&self, stem: &str) -> Option<&AnswerRecord> {
        self.entries.get(stem)
    }

    /// Look up a record together with the bank's own copy of the key
    pub fn get_key_value(&self, stem: &str) -> Option<(&str, &AnswerRecord)> {
        self.entries.get_key_value(stem).map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_key(&self, stem: &str) -> bool {
        self.entries.contains_key(stem)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, AnswerRecord)> for AnswerBank {
    fn from_iter<I: IntoIterator<Item = (String, AnswerRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
