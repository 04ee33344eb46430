//! Scripted quiz page shared by the use case tests

use crate::ports::quiz_page::{BlockMark, ControlState, PageError, QuizPage, SyntheticEvent};
use async_trait::async_trait;
use recall_domain::{Letter, QuestionBlock, QuestionType};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Scroll(usize, Letter),
    Activate(usize, Letter),
    ActivateWrapper(usize, Letter),
    Dispatch(usize, Letter, SyntheticEvent),
    Mark(usize, Letter, bool),
    MarkBlock(usize, BlockMark),
}

pub struct MockPage {
    blocks: Vec<QuestionBlock>,
    checked: Mutex<HashMap<usize, BTreeSet<Letter>>>,
    log: Mutex<Vec<Interaction>>,
    activated_at: Mutex<Vec<(usize, Letter, Instant)>>,
    reject_native: bool,
    fail_discovery: bool,
    hide_controls: bool,
}

impl MockPage {
    pub fn new(blocks: Vec<QuestionBlock>) -> Self {
        Self {
            blocks,
            checked: Mutex::new(HashMap::new()),
            log: Mutex::new(Vec::new()),
            activated_at: Mutex::new(Vec::new()),
            reject_native: false,
            fail_discovery: false,
            hide_controls: false,
        }
    }

    pub fn rejecting_native(mut self) -> Self {
        self.reject_native = true;
        self
    }

    pub fn failing_discovery(mut self) -> Self {
        self.fail_discovery = true;
        self
    }

    /// Blocks are discovered but expose no controls
    pub fn without_controls(mut self) -> Self {
        self.hide_controls = true;
        self
    }

    pub fn set_checked(&self, block: usize, letter: Letter, checked: bool) {
        let mut state = self.checked.lock().unwrap();
        let set = state.entry(block).or_default();
        if checked {
            set.insert(letter);
        } else {
            set.remove(&letter);
        }
    }

    pub fn checked(&self, block: usize) -> BTreeSet<Letter> {
        self.checked
            .lock()
            .unwrap()
            .get(&block)
            .cloned()
            .unwrap_or_default()
    }

    pub fn log(&self) -> Vec<Interaction> {
        self.log.lock().unwrap().clone()
    }

    pub fn activations(&self, block: usize) -> Vec<Letter> {
        self.log()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::Activate(b, l) | Interaction::ActivateWrapper(b, l) if b == block => {
                    Some(l)
                }
                _ => None,
            })
            .collect()
    }

    /// Activated letters of a block with the instant each click landed
    pub fn activation_times(&self, block: usize) -> Vec<(Letter, Instant)> {
        self.activated_at
            .lock()
            .unwrap()
            .iter()
            .filter(|(b, _, _)| *b == block)
            .map(|(_, l, at)| (*l, *at))
            .collect()
    }

    pub fn block_marks(&self) -> Vec<(usize, BlockMark)> {
        self.log()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::MarkBlock(b, mark) => Some((b, mark)),
                _ => None,
            })
            .collect()
    }

    fn find(&self, block: usize) -> Result<&QuestionBlock, PageError> {
        self.blocks
            .iter()
            .find(|b| b.index == block)
            .ok_or(PageError::BlockNotFound(block))
    }

    fn click(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        let found = self.find(block)?;
        if !found.has_option(letter) {
            return Err(PageError::ControlNotFound { block, letter });
        }
        let mut state = self.checked.lock().unwrap();
        let set = state.entry(block).or_default();
        match found.declared_type {
            QuestionType::Single => {
                set.clear();
                set.insert(letter);
            }
            QuestionType::Multi => {
                if !set.remove(&letter) {
                    set.insert(letter);
                }
            }
        }
        self.activated_at
            .lock()
            .unwrap()
            .push((block, letter, Instant::now()));
        Ok(())
    }

    fn push(&self, interaction: Interaction) {
        self.log.lock().unwrap().push(interaction);
    }
}

#[async_trait]
impl QuizPage for MockPage {
    async fn discover(&self) -> Result<Vec<QuestionBlock>, PageError> {
        if self.fail_discovery {
            return Err(PageError::Unavailable("page not loaded".to_string()));
        }
        Ok(self.blocks.clone())
    }

    async fn controls(&self, block: usize) -> Result<Vec<ControlState>, PageError> {
        let found = self.find(block)?;
        if self.hide_controls {
            return Ok(Vec::new());
        }
        let checked = self.checked(block);
        Ok(found
            .letters()
            .map(|letter| ControlState {
                letter,
                checked: checked.contains(&letter),
            })
            .collect())
    }

    async fn scroll_into_view(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        self.push(Interaction::Scroll(block, letter));
        Ok(())
    }

    async fn activate(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        if self.reject_native {
            return Err(PageError::Rejected("native click blocked".to_string()));
        }
        self.click(block, letter)?;
        self.push(Interaction::Activate(block, letter));
        Ok(())
    }

    async fn activate_wrapper(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        self.click(block, letter)?;
        self.push(Interaction::ActivateWrapper(block, letter));
        Ok(())
    }

    async fn dispatch(
        &self,
        block: usize,
        letter: Letter,
        event: SyntheticEvent,
    ) -> Result<(), PageError> {
        self.push(Interaction::Dispatch(block, letter, event));
        Ok(())
    }

    async fn mark_option(
        &self,
        block: usize,
        letter: Letter,
        marked: bool,
    ) -> Result<(), PageError> {
        self.push(Interaction::Mark(block, letter, marked));
        Ok(())
    }

    async fn mark_block(&self, block: usize, mark: BlockMark) -> Result<(), PageError> {
        self.push(Interaction::MarkBlock(block, mark));
        Ok(())
    }
}
