//! Question resolver

use super::outcome::{InconsistencyReason, Resolution, ResolutionOutcome, ResolvedAnswer};
use crate::bank::{AnswerBank, AnswerRecord, AnswerValue, QuestionType};
use crate::core::letter::Letter;
use crate::matching::find_match;
use crate::question::QuestionBlock;
use std::collections::BTreeSet;

/// Resolve one question block against the merged bank.
///
/// Pure: the caller decides whether and how to apply a hit.
pub fn resolve(block: &QuestionBlock, merged: &AnswerBank, threshold: f64) -> ResolutionOutcome {
    if !block.is_processable() {
        return ResolutionOutcome::NotProcessable;
    }

    let Some(candidate) = find_match(&block.normalized_stem, merged, threshold) else {
        return ResolutionOutcome::Miss;
    };

    let key = candidate.key.to_string();
    if candidate.record.kind != block.declared_type {
        return ResolutionOutcome::Inconsistent(InconsistencyReason::TypeMismatch {
            key,
            expected: block.declared_type,
            found: candidate.record.kind,
        });
    }

    let answer = match block.declared_type {
        QuestionType::Single => validate_single(block, candidate.record, &key),
        QuestionType::Multi => validate_multi(block, candidate.record, &key),
    };

    match answer {
        Ok(answer) => ResolutionOutcome::Hit(Resolution {
            key,
            record: candidate.record.clone(),
            reason: candidate.reason,
            answer,
        }),
        Err(reason) => ResolutionOutcome::Inconsistent(reason),
    }
}

fn validate_single(
    block: &QuestionBlock,
    record: &AnswerRecord,
    key: &str,
) -> Result<ResolvedAnswer, InconsistencyReason> {
    let raw = match &record.answer {
        AnswerValue::One(s) => s.to_uppercase(),
        AnswerValue::Many(items) => items.join(",").to_uppercase(),
    };
    match Letter::parse(&raw) {
        Some(letter) if block.has_option(letter) => Ok(ResolvedAnswer::Single(letter)),
        _ => Err(InconsistencyReason::InvalidSingleAnswer {
            key: key.to_string(),
            answer: raw,
        }),
    }
}

fn validate_multi(
    block: &QuestionBlock,
    record: &AnswerRecord,
    key: &str,
) -> Result<ResolvedAnswer, InconsistencyReason> {
    let empty = || InconsistencyReason::EmptyAnswerSet {
        key: key.to_string(),
    };
    let AnswerValue::Many(items) = &record.answer else {
        return Err(empty());
    };

    let letters = items
        .iter()
        .map(|item| Letter::parse(&item.to_uppercase()))
        .collect::<Option<BTreeSet<_>>>()
        .ok_or_else(empty)?;
    if letters.is_empty() {
        return Err(empty());
    }

    let missing: Vec<Letter> = letters
        .iter()
        .copied()
        .filter(|letter| !block.has_option(*letter))
        .collect();
    if !missing.is_empty() {
        return Err(InconsistencyReason::MissingOptions {
            key: key.to_string(),
            letters: missing,
        });
    }

    Ok(ResolvedAnswer::Multi(letters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchReason;

    fn letter(s: &str) -> Letter {
        Letter::parse(s).unwrap()
    }

    fn block(stem: &str, kind: QuestionType, letters: &[&str]) -> QuestionBlock {
        letters.iter().fold(QuestionBlock::new(0, stem, kind), |b, l| {
            b.with_option(letter(l), format!("option {l}"))
        })
    }

    fn bank_with(key: &str, record: AnswerRecord) -> AnswerBank {
        std::iter::once((key.to_string(), record)).collect()
    }

    fn one(kind: QuestionType, answer: &str) -> AnswerRecord {
        AnswerRecord::new(kind, AnswerValue::One(answer.to_string()))
    }

    fn many(kind: QuestionType, answers: &[&str]) -> AnswerRecord {
        AnswerRecord::new(
            kind,
            AnswerValue::Many(answers.iter().map(|s| s.to_string()).collect()),
        )
    }

    #[test]
    fn test_single_exact_hit() {
        let bank = bank_with("下列说法正确的是", one(QuestionType::Single, "B"));
        let block = block(
            "【单选】1.下列说法正确的是（ ）",
            QuestionType::Single,
            &["A", "B", "C", "D"],
        );
        match resolve(&block, &bank, 0.9) {
            ResolutionOutcome::Hit(hit) => {
                assert_eq!(hit.reason, MatchReason::Exact);
                assert_eq!(hit.answer, ResolvedAnswer::Single(letter("B")));
                assert_eq!(hit.key, "下列说法正确的是");
            }
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn test_single_lowercase_answer_accepted() {
        let bank = bank_with("题干", one(QuestionType::Single, "c"));
        let block = block("题干", QuestionType::Single, &["A", "B", "C"]);
        assert!(resolve(&block, &bank, 0.9).is_hit());
    }

    #[test]
    fn test_empty_stem_not_processable() {
        let bank = bank_with("", one(QuestionType::Single, "A"));
        let block = block("【单选】（ ）", QuestionType::Single, &["A"]);
        assert_eq!(resolve(&block, &bank, 0.5), ResolutionOutcome::NotProcessable);
    }

    #[test]
    fn test_miss() {
        let bank = bank_with("别的题", one(QuestionType::Single, "A"));
        let block = block("题干内容", QuestionType::Single, &["A"]);
        assert_eq!(resolve(&block, &bank, 0.9), ResolutionOutcome::Miss);
    }

    #[test]
    fn test_type_mismatch() {
        let bank = bank_with("题干", many(QuestionType::Multi, &["A", "B"]));
        let block = block("题干", QuestionType::Single, &["A", "B"]);
        match resolve(&block, &bank, 0.9) {
            ResolutionOutcome::Inconsistent(reason) => {
                assert_eq!(reason.summary(), "type mismatch");
            }
            other => panic!("expected inconsistent, got {other:?}"),
        }
    }

    #[test]
    fn test_single_invalid_or_unavailable() {
        let block = block("题干", QuestionType::Single, &["A", "B"]);
        for answer in ["E", "AB", "", "1"] {
            let bank = bank_with("题干", one(QuestionType::Single, answer));
            match resolve(&block, &bank, 0.9) {
                ResolutionOutcome::Inconsistent(reason) => {
                    assert_eq!(reason.summary(), "invalid or unavailable answer", "{answer}")
                }
                other => panic!("expected inconsistent for {answer:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_multi_hit_deduplicated() {
        let bank = bank_with("题干", many(QuestionType::Multi, &["c", "A", "C"]));
        let block = block("题干", QuestionType::Multi, &["A", "B", "C"]);
        match resolve(&block, &bank, 0.9) {
            ResolutionOutcome::Hit(hit) => assert_eq!(
                hit.answer,
                ResolvedAnswer::Multi([letter("A"), letter("C")].into_iter().collect())
            ),
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_letters_missing_from_options() {
        let bank = bank_with("题干", many(QuestionType::Multi, &["A", "C"]));
        let block = block("题干", QuestionType::Multi, &["A", "B"]);
        match resolve(&block, &bank, 0.9) {
            ResolutionOutcome::Inconsistent(reason) => {
                assert_eq!(reason.summary(), "answer letters not present among options");
                assert_eq!(
                    reason,
                    InconsistencyReason::MissingOptions {
                        key: "题干".to_string(),
                        letters: vec![letter("C")],
                    }
                );
            }
            other => panic!("expected inconsistent, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_empty_or_invalid_set() {
        let block = block("题干", QuestionType::Multi, &["A", "B"]);
        let records = [
            many(QuestionType::Multi, &[]),
            many(QuestionType::Multi, &["A", "AB"]),
            one(QuestionType::Multi, "A"),
        ];
        for record in records {
            let bank = bank_with("题干", record);
            match resolve(&block, &bank, 0.9) {
                ResolutionOutcome::Inconsistent(reason) => {
                    assert_eq!(reason.summary(), "empty/invalid answer set")
                }
                other => panic!("expected inconsistent, got {other:?}"),
            }
        }
    }
}
