//! Learn Answers use case
//!
//! Records the selections currently shown on the page into the local bank,
//! keyed by normalized stem. Used after a reviewed attempt where the page
//! displays the correct choices.

use crate::ports::bank_store::{LocalBankStore, StoreError};
use crate::ports::progress::{NoProgress, PassNotifier};
use crate::ports::quiz_page::{ControlState, PageError, QuizPage};
use recall_domain::{AnswerRecord, Provenance, QuestionBlock, QuestionType};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LearnError {
    #[error("Question discovery failed: {0}")]
    Discovery(#[from] PageError),

    #[error("Local bank error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnOutput {
    /// Entries written (new or overwritten)
    pub learned: usize,
    /// Of those, entries that replaced an existing record
    pub replaced: usize,
    /// Blocks with an empty stem or no selection
    pub skipped: usize,
}

/// Build a record from the current selection of a block.
///
/// Single-choice blocks take the first checked control; multi-choice blocks
/// take every checked control. No selection yields `None`.
pub fn learn_block(block: &QuestionBlock, controls: &[ControlState]) -> Option<AnswerRecord> {
    if !block.is_processable() {
        return None;
    }
    let mut checked = controls.iter().filter(|c| c.checked).map(|c| c.letter);
    let record = match block.declared_type {
        QuestionType::Single => AnswerRecord::single(checked.next()?),
        QuestionType::Multi => {
            let letters: Vec<_> = checked.collect();
            if letters.is_empty() {
                return None;
            }
            AnswerRecord::multi(letters)
        }
    };
    Some(record.with_provenance(Provenance::Local))
}

pub struct LearnAnswersUseCase {
    page: Arc<dyn QuizPage>,
    store: Arc<dyn LocalBankStore>,
}

impl LearnAnswersUseCase {
    pub fn new(page: Arc<dyn QuizPage>, store: Arc<dyn LocalBankStore>) -> Self {
        Self { page, store }
    }

    pub async fn execute(&self) -> Result<LearnOutput, LearnError> {
        self.execute_with_progress(&NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        progress: &dyn PassNotifier,
    ) -> Result<LearnOutput, LearnError> {
        let mut bank = self.store.load()?;
        let blocks = self.page.discover().await?;
        let mut output = LearnOutput::default();

        for block in &blocks {
            let controls = self.page.controls(block.index).await?;
            let Some(record) = learn_block(block, &controls) else {
                debug!("Block {}: nothing to learn", block.index);
                output.skipped += 1;
                continue;
            };

            progress.on_learned(&block.raw_stem, &record.answer_display());
            if bank.insert(block.normalized_stem.clone(), record).is_some() {
                output.replaced += 1;
            }
            output.learned += 1;
        }

        if output.learned > 0 {
            self.store.save(&bank)?;
        }
        info!(
            "Learned {} answers ({} replaced, {} skipped)",
            output.learned, output.replaced, output.skipped
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::bank_store::InMemoryBankStore;
    use crate::use_cases::mock_page::MockPage;
    use recall_domain::{AnswerBank, AnswerValue, Letter};

    fn letter(s: &str) -> Letter {
        Letter::parse(s).unwrap()
    }

    fn controls(states: &[(&str, bool)]) -> Vec<ControlState> {
        states
            .iter()
            .map(|(l, checked)| ControlState {
                letter: letter(l),
                checked: *checked,
            })
            .collect()
    }

    #[test]
    fn test_learn_single() {
        let block = QuestionBlock::new(0, "1. 题目？", QuestionType::Single);
        let record = learn_block(&block, &controls(&[("A", false), ("B", true)])).unwrap();
        assert_eq!(record.answer, AnswerValue::One("B".into()));
    }

    #[test]
    fn test_learn_multi_sorted() {
        let block = QuestionBlock::new(0, "题目", QuestionType::Multi);
        let record =
            learn_block(&block, &controls(&[("C", true), ("A", true), ("B", false)])).unwrap();
        assert_eq!(
            record.answer,
            AnswerValue::Many(vec!["A".into(), "C".into()])
        );
    }

    #[test]
    fn test_learn_skips_empty() {
        let block = QuestionBlock::new(0, "题目", QuestionType::Multi);
        assert!(learn_block(&block, &controls(&[("A", false)])).is_none());

        let blank = QuestionBlock::new(0, "【单选】", QuestionType::Single);
        assert!(learn_block(&blank, &controls(&[("A", true)])).is_none());
    }

    #[tokio::test]
    async fn test_execute_writes_store() {
        let blocks = vec![
            QuestionBlock::new(0, "1. 地球是圆的", QuestionType::Single)
                .with_option(letter("A"), "对")
                .with_option(letter("B"), "错"),
            QuestionBlock::new(1, "未作答", QuestionType::Single).with_option(letter("A"), "对"),
        ];
        let page = Arc::new(MockPage::new(blocks));
        page.set_checked(0, letter("A"), true);
        let store = Arc::new(InMemoryBankStore::new(AnswerBank::new()));

        let output = LearnAnswersUseCase::new(page, store.clone())
            .execute()
            .await
            .unwrap();

        assert_eq!(output.learned, 1);
        assert_eq!(output.skipped, 1);
        let saved = store.snapshot();
        assert_eq!(
            saved.get("地球是圆的").map(|r| r.answer.clone()),
            Some(AnswerValue::One("A".into()))
        );
    }
}
