//! Answer record types

use crate::core::letter::Letter;
use serde::{Deserialize, Serialize};

/// Question kind, as declared by a bank record or detected on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Exactly one option is correct (radio buttons)
    Single,
    /// One or more options are correct (checkboxes)
    Multi,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multi => "multi",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    #[default]
    Local,
    Remote,
    Harvested,
}

/// Answer exactly as stored in a bank.
///
/// Not validated on decode. A record whose answer does not fit the live
/// question surfaces as an inconsistency during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    One(String),
    Many(Vec<String>),
}

/// One bank entry: `{"type": "single", "answer": "B"}` or
/// `{"type": "multi", "answer": ["A", "C"]}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub answer: AnswerValue,
    /// Stamped by whichever source loaded the record; not persisted
    #[serde(skip)]
    pub provenance: Provenance,
}

impl AnswerRecord {
    pub fn new(kind: QuestionType, answer: AnswerValue) -> Self {
        Self {
            kind,
            answer,
            provenance: Provenance::default(),
        }
    }

    /// Create a single-choice record
    pub fn single(letter: Letter) -> Self {
        Self::new(QuestionType::Single, AnswerValue::One(letter.to_string()))
    }

    /// Create a multi-choice record; letters are stored sorted and deduplicated
    pub fn multi(letters: impl IntoIterator<Item = Letter>) -> Self {
        let mut letters: Vec<Letter> = letters.into_iter().collect();
        letters.sort();
        letters.dedup();
        Self::new(
            QuestionType::Multi,
            AnswerValue::Many(letters.iter().map(|l| l.to_string()).collect()),
        )
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Render the stored answer for display
    pub fn answer_display(&self) -> String {
        match &self.answer {
            AnswerValue::One(s) => s.clone(),
            AnswerValue::Many(items) => items.join("、"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(s: &str) -> Letter {
        Letter::parse(s).unwrap()
    }

    #[test]
    fn test_deserialize_single() {
        let record: AnswerRecord =
            serde_json::from_str(r#"{"type":"single","answer":"B"}"#).unwrap();
        assert_eq!(record.kind, QuestionType::Single);
        assert_eq!(record.answer, AnswerValue::One("B".to_string()));
        assert_eq!(record.provenance, Provenance::Local);
    }

    #[test]
    fn test_deserialize_multi() {
        let record: AnswerRecord =
            serde_json::from_str(r#"{"type":"multi","answer":["A","C"]}"#).unwrap();
        assert_eq!(record.kind, QuestionType::Multi);
        assert_eq!(
            record.answer,
            AnswerValue::Many(vec!["A".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = serde_json::from_str::<AnswerRecord>(r#"{"type":"judge","answer":"A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_omits_provenance() {
        let record = AnswerRecord::single(letter("B")).with_provenance(Provenance::Harvested);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"type":"single","answer":"B"}"#);
    }

    #[test]
    fn test_multi_sorted_and_deduplicated() {
        let record = AnswerRecord::multi([letter("C"), letter("A"), letter("C")]);
        assert_eq!(
            record.answer,
            AnswerValue::Many(vec!["A".to_string(), "C".to_string()])
        );
        assert_eq!(record.answer_display(), "A、C");
    }
}
