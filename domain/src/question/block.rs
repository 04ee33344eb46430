//! Question block value object

use crate::bank::QuestionType;
use crate::core::letter::Letter;
use crate::text::normalize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SINGLE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【\s*单选\s*】").expect("single marker pattern is valid"));

static MULTI_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【\s*多选\s*】").expect("multi marker pattern is valid"));

/// Detect the declared question type from a container's text.
///
/// Containers carrying neither marker are not questions this engine handles.
pub fn detect_type(container_text: &str) -> Option<QuestionType> {
    if SINGLE_MARKER.is_match(container_text) {
        Some(QuestionType::Single)
    } else if MULTI_MARKER.is_match(container_text) {
        Some(QuestionType::Multi)
    } else {
        None
    }
}

/// One selectable option of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub letter: Letter,
    pub text: String,
}

/// A question as discovered on the page during one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBlock {
    /// Position of the container on the page, used to address its controls
    pub index: usize,
    pub raw_stem: String,
    pub normalized_stem: String,
    pub declared_type: QuestionType,
    /// Options in display order, letters unique
    pub options: Vec<QuestionOption>,
}

impl QuestionBlock {
    pub fn new(index: usize, raw_stem: impl Into<String>, declared_type: QuestionType) -> Self {
        let raw_stem = raw_stem.into();
        let normalized_stem = normalize(&raw_stem);
        Self {
            index,
            raw_stem,
            normalized_stem,
            declared_type,
            options: Vec::new(),
        }
    }

    /// Add an option. A repeated letter keeps its first position and takes
    /// the newer text.
    pub fn with_option(mut self, letter: Letter, text: impl Into<String>) -> Self {
        self.push_option(letter, text);
        self
    }

    pub fn push_option(&mut self, letter: Letter, text: impl Into<String>) {
        let text = text.into();
        match self.options.iter_mut().find(|o| o.letter == letter) {
            Some(existing) => existing.text = text,
            None => self.options.push(QuestionOption { letter, text }),
        }
    }

    pub fn has_option(&self, letter: Letter) -> bool {
        self.options.iter().any(|o| o.letter == letter)
    }

    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.options.iter().map(|o| o.letter)
    }

    /// Whether this block can be resolved at all
    pub fn is_processable(&self) -> bool {
        !self.normalized_stem.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(s: &str) -> Letter {
        Letter::parse(s).unwrap()
    }

    #[test]
    fn test_detect_type() {
        assert_eq!(detect_type("【单选】1.题干"), Some(QuestionType::Single));
        assert_eq!(detect_type("【 多选 】2.题干"), Some(QuestionType::Multi));
        assert_eq!(detect_type("【判断】3.题干"), None);
        assert_eq!(detect_type("单选 题干"), None);
    }

    #[test]
    fn test_new_normalizes_stem() {
        let block = QuestionBlock::new(0, "【单选】1.下列说法正确的是（ ）", QuestionType::Single);
        assert_eq!(block.normalized_stem, "下列说法正确的是");
        assert!(block.is_processable());
    }

    #[test]
    fn test_empty_stem_not_processable() {
        let block = QuestionBlock::new(0, "  【单选】 ", QuestionType::Single);
        assert!(!block.is_processable());
    }

    #[test]
    fn test_duplicate_letter_keeps_position() {
        let block = QuestionBlock::new(0, "题干", QuestionType::Single)
            .with_option(letter("A"), "甲")
            .with_option(letter("B"), "乙")
            .with_option(letter("A"), "丙");
        assert_eq!(block.letters().collect::<Vec<_>>(), vec![letter("A"), letter("B")]);
        assert_eq!(block.options[0].text, "丙");
        assert!(block.has_option(letter("B")));
        assert!(!block.has_option(letter("C")));
    }
}
