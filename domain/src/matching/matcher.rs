//! Three-tier stem matcher

use super::similarity::jaccard;
use crate::bank::{AnswerBank, AnswerRecord};
use crate::text::tokenize;
use serde::{Deserialize, Serialize};

/// How a bank key was matched to a stem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "score", rename_all = "lowercase")]
pub enum MatchReason {
    Exact,
    Inclusion,
    Fuzzy(f64),
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchReason::Exact => write!(f, "exact"),
            MatchReason::Inclusion => write!(f, "inclusion"),
            MatchReason::Fuzzy(score) => write!(f, "fuzzy:{:.2}", score),
        }
    }
}

/// A bank entry selected for a stem
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate<'a> {
    pub key: &'a str,
    pub record: &'a AnswerRecord,
    pub reason: MatchReason,
}

/// Find the best bank entry for a normalized stem.
///
/// Returns `None` for an empty stem or when no tier matches. The inclusion
/// tier returns the first containing key in enumeration order, with no
/// preference for longer keys. The fuzzy tier keeps the first key reaching
/// the best score.
pub fn find_match<'a>(
    stem: &str,
    bank: &'a AnswerBank,
    threshold: f64,
) -> Option<MatchCandidate<'a>> {
    if stem.is_empty() {
        return None;
    }

    if let Some((key, record)) = bank.get_key_value(stem) {
        return Some(MatchCandidate {
            key,
            record,
            reason: MatchReason::Exact,
        });
    }

    if let Some((key, record)) = bank
        .iter()
        .find(|(key, _)| !key.is_empty() && (stem.contains(*key) || key.contains(stem)))
    {
        return Some(MatchCandidate {
            key,
            record,
            reason: MatchReason::Inclusion,
        });
    }

    let stem_tokens = tokenize(stem);
    let mut best: Option<(&str, &AnswerRecord)> = None;
    let mut best_score = 0.0;
    for (key, record) in bank.iter() {
        let score = jaccard(&stem_tokens, &tokenize(key));
        if score > best_score && score >= threshold {
            best_score = score;
            best = Some((key, record));
        }
    }

    best.map(|(key, record)| MatchCandidate {
        key,
        record,
        reason: MatchReason::Fuzzy(best_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{AnswerValue, QuestionType};

    fn record(answer: &str) -> AnswerRecord {
        AnswerRecord::new(QuestionType::Single, AnswerValue::One(answer.to_string()))
    }

    fn bank(keys: &[(&str, &str)]) -> AnswerBank {
        keys.iter()
            .map(|(k, a)| (k.to_string(), record(a)))
            .collect()
    }

    #[test]
    fn test_exact_regardless_of_threshold() {
        let bank = bank(&[("下列说法正确的是", "B"), ("说法", "C")]);
        for threshold in [0.01, 0.5, 0.99] {
            let found = find_match("下列说法正确的是", &bank, threshold).unwrap();
            assert_eq!(found.reason, MatchReason::Exact);
            assert_eq!(found.key, "下列说法正确的是");
        }
    }

    #[test]
    fn test_empty_stem_never_matches() {
        let bank = bank(&[("", "A"), ("题干", "B")]);
        assert!(find_match("", &bank, 0.1).is_none());
    }

    #[test]
    fn test_inclusion_key_inside_stem() {
        let bank = bank(&[("宗教活动场所的设立", "A")]);
        let found = find_match("申请宗教活动场所的设立应当向哪个部门提出", &bank, 0.9).unwrap();
        assert_eq!(found.reason, MatchReason::Inclusion);
        assert_eq!(found.key, "宗教活动场所的设立");
    }

    #[test]
    fn test_inclusion_stem_inside_key() {
        let bank = bank(&[("宗教团体章程应当包括哪些事项", "A")]);
        let found = find_match("宗教团体章程", &bank, 0.9).unwrap();
        assert_eq!(found.reason, MatchReason::Inclusion);
    }

    #[test]
    fn test_inclusion_first_found_wins() {
        let bank = bank(&[("宗教", "A"), ("宗教团体", "B")]);
        let found = find_match("宗教团体登记", &bank, 0.9).unwrap();
        assert_eq!(found.key, "宗教");
        assert_eq!(found.record.answer_display(), "A");
    }

    #[test]
    fn test_inclusion_skips_empty_key() {
        let bank = bank(&[("", "A")]);
        assert!(find_match("题干", &bank, 0.9).is_none());
    }

    #[test]
    fn test_fuzzy_above_threshold() {
        // tokens: {宗教团体, 登记管理, 办法} vs {宗教团体, 登记管理}
        let bank = bank(&[("宗教团体和登记管理", "A")]);
        let found = find_match("宗教团体与登记管理的办法", &bank, 0.5).unwrap();
        match found.reason {
            MatchReason::Fuzzy(score) => assert!((score - 2.0 / 3.0).abs() < 1e-9),
            other => panic!("expected fuzzy, got {other:?}"),
        }
    }

    #[test]
    fn test_fuzzy_below_threshold_is_none() {
        let bank = bank(&[("宗教团体和登记管理", "A")]);
        assert!(find_match("宗教团体与登记管理的办法", &bank, 0.9).is_none());
    }

    #[test]
    fn test_fuzzy_tie_keeps_first_seen() {
        let bank = bank(&[("宗教团体和民族团结", "A"), ("宗教团体和社会和谐", "B")]);
        // both share one of three tokens with the stem
        let found = find_match("宗教团体与依法治理", &bank, 0.3).unwrap();
        assert_eq!(found.key, "宗教团体和民族团结");
    }

    #[test]
    fn test_no_candidate() {
        let bank = bank(&[("完全不同的题目", "A")]);
        assert!(find_match("另一个问题", &bank, 0.5).is_none());
        assert!(find_match("另一个问题", &AnswerBank::new(), 0.5).is_none());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(MatchReason::Exact.to_string(), "exact");
        assert_eq!(MatchReason::Fuzzy(0.666).to_string(), "fuzzy:0.67");
    }
}
