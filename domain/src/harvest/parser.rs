//! Harvested response parsing

use crate::bank::{AnswerBank, AnswerRecord, AnswerValue, Provenance, QuestionType};
use crate::core::letter::Letter;
use crate::text::normalize;
use serde_json::Value;

const TITLE_FIELD: &str = "title";
const ANSWER_FIELDS: &[&str] = &["rightAnswer", "right_answer", "answer"];

/// One question observed in a harvested response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedAnswer {
    pub title: String,
    /// Distinct letters in order of first appearance
    pub letters: Vec<Letter>,
}

impl HarvestedAnswer {
    /// Extract answer letters from a right-answer string (`"a,c"` → `A`, `C`)
    pub fn from_answer_text(title: impl Into<String>, answer: &str) -> Self {
        let mut letters = Vec::new();
        for letter in answer.to_uppercase().chars().filter_map(Letter::new) {
            if !letters.contains(&letter) {
                letters.push(letter);
            }
        }
        Self {
            title: title.into(),
            letters,
        }
    }

    /// Zero or one letter is a single-choice answer, two or more a multi-choice one
    pub fn question_type(&self) -> QuestionType {
        if self.letters.len() >= 2 {
            QuestionType::Multi
        } else {
            QuestionType::Single
        }
    }

    pub fn to_record(&self) -> AnswerRecord {
        let record = match self.question_type() {
            QuestionType::Single => AnswerRecord::new(
                QuestionType::Single,
                AnswerValue::One(self.letters.first().map(|l| l.to_string()).unwrap_or_default()),
            ),
            QuestionType::Multi => AnswerRecord::multi(self.letters.iter().copied()),
        };
        record.with_provenance(Provenance::Harvested)
    }
}

/// Walk a captured response and collect every object that carries a string
/// `title` and a string right-answer field.
pub fn harvest_response(value: &Value) -> Vec<HarvestedAnswer> {
    let mut found = Vec::new();
    collect(value, &mut found);
    found
}

fn collect(value: &Value, found: &mut Vec<HarvestedAnswer>) {
    match value {
        Value::Object(map) => {
            let title = map.get(TITLE_FIELD).and_then(Value::as_str);
            let answer = ANSWER_FIELDS
                .iter()
                .find_map(|field| map.get(*field).and_then(Value::as_str));
            if let (Some(title), Some(answer)) = (title, answer) {
                found.push(HarvestedAnswer::from_answer_text(title, answer));
            }
            for child in map.values() {
                collect(child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, found);
            }
        }
        _ => {}
    }
}

/// Session-scoped accumulation of harvested answers
#[derive(Debug, Clone, Default)]
pub struct HarvestLog {
    bank: AnswerBank,
}

impl HarvestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every answer found in one response. Later observations of the
    /// same stem replace earlier ones. Returns how many entries were stored.
    pub fn observe(&mut self, response: &Value) -> usize {
        let mut stored = 0;
        for answer in harvest_response(response) {
            let stem = normalize(&answer.title);
            if stem.is_empty() {
                continue;
            }
            self.bank.insert(stem, answer.to_record());
            stored += 1;
        }
        stored
    }

    pub fn bank(&self) -> &AnswerBank {
        &self.bank
    }

    pub fn into_bank(self) -> AnswerBank {
        self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn letters(s: &str) -> Vec<Letter> {
        s.chars().filter_map(Letter::new).collect()
    }

    #[test]
    fn test_letters_from_answer_text() {
        let answer = HarvestedAnswer::from_answer_text("t", "a,c,A");
        assert_eq!(answer.letters, letters("AC"));
        assert_eq!(answer.question_type(), QuestionType::Multi);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(
            HarvestedAnswer::from_answer_text("t", "B").question_type(),
            QuestionType::Single
        );
        let none = HarvestedAnswer::from_answer_text("t", "正确");
        assert!(none.letters.is_empty());
        assert_eq!(none.question_type(), QuestionType::Single);
        assert_eq!(none.to_record().answer, AnswerValue::One(String::new()));
    }

    #[test]
    fn test_repeated_letter_is_single() {
        let answer = HarvestedAnswer::from_answer_text("t", "BB");
        assert_eq!(answer.question_type(), QuestionType::Single);
        assert_eq!(answer.to_record().answer, AnswerValue::One("B".into()));
    }

    #[test]
    fn test_harvest_nested_response() {
        let response = json!({
            "code": 0,
            "data": {
                "paper": {
                    "questions": [
                        {"id": 1, "title": "【单选】1.下列说法正确的是（ ）", "rightAnswer": "B"},
                        {"id": 2, "title": "2.哪些属于宗教团体", "rightAnswer": "A,C,D"},
                        {"id": 3, "title": "无答案"}
                    ]
                }
            }
        });
        let found = harvest_response(&response);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].letters, letters("B"));
        assert_eq!(found[1].letters, letters("ACD"));
    }

    #[test]
    fn test_log_keys_are_normalized() {
        let mut log = HarvestLog::new();
        let stored = log.observe(&json!([
            {"title": "【单选】1.下列说法正确的是（ ）", "right_answer": "c"},
            {"title": "  ", "rightAnswer": "A"}
        ]));
        assert_eq!(stored, 1);
        let record = log.bank().get("下列说法正确的是").unwrap();
        assert_eq!(record.answer, AnswerValue::One("C".into()));
        assert_eq!(record.provenance, Provenance::Harvested);
    }

    #[test]
    fn test_log_later_observation_wins() {
        let mut log = HarvestLog::new();
        log.observe(&json!({"title": "题干", "rightAnswer": "A"}));
        log.observe(&json!({"title": "题干", "rightAnswer": "B"}));
        assert_eq!(log.bank().len(), 1);
        assert_eq!(log.into_bank().get("题干").unwrap().answer_display(), "B");
    }
}
