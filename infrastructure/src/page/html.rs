//! HTML snapshot adapter for the quiz page
//!
//! Parses a saved quiz page with `scraper` and mirrors its option controls in
//! memory. Radio groups keep at most one checked control; checkboxes toggle
//! independently. Every interaction is recorded so callers can inspect or
//! replay what a pass did.
//!
//! # Markup
//!
//! ```text
//! .item-view                         one question, text carries 【单选】 or 【多选】
//! ├── .w-full                        stem
//! └── label.el-radio | label.el-checkbox
//!     └── input.el-radio__original[type=radio] | input.el-checkbox__original[type=checkbox]
//!                                    value = option letter
//! ```

use async_trait::async_trait;
use recall_application::{BlockMark, ControlState, PageError, QuizPage, SyntheticEvent};
use recall_domain::{Letter, QuestionBlock, QuestionType, detect_type};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tracing::debug;

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| selector(".item-view"));
static STEM: LazyLock<Selector> = LazyLock::new(|| selector(".w-full"));
static RADIO_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("label.el-radio"));
static CHECKBOX_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("label.el-checkbox"));
static RADIO_INPUT: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"input.el-radio__original[type="radio"]"#));
static CHECKBOX_INPUT: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"input.el-checkbox__original[type="checkbox"]"#));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// One recorded interaction with the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageInteraction {
    Scroll { block: usize, letter: Letter },
    Activate { block: usize, letter: Letter },
    ActivateWrapper { block: usize, letter: Letter },
    Dispatch { block: usize, letter: Letter, event: SyntheticEvent },
    MarkOption { block: usize, letter: Letter, marked: bool },
    MarkBlock { block: usize, mark: BlockMark },
}

#[derive(Debug, Clone)]
struct Control {
    letter: Letter,
    checked: bool,
    disabled: bool,
    marked: bool,
}

#[derive(Debug, Clone)]
struct Block {
    question: QuestionBlock,
    controls: Vec<Control>,
    mark: Option<BlockMark>,
}

#[derive(Debug, Default)]
struct PageState {
    blocks: Vec<Block>,
    log: Vec<PageInteraction>,
}

impl PageState {
    fn block(&self, index: usize) -> Result<&Block, PageError> {
        self.blocks
            .iter()
            .find(|b| b.question.index == index)
            .ok_or(PageError::BlockNotFound(index))
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut Block, PageError> {
        self.blocks
            .iter_mut()
            .find(|b| b.question.index == index)
            .ok_or(PageError::BlockNotFound(index))
    }

    fn control_mut(&mut self, index: usize, letter: Letter) -> Result<&mut Control, PageError> {
        self.block_mut(index)?
            .controls
            .iter_mut()
            .find(|c| c.letter == letter)
            .ok_or(PageError::ControlNotFound {
                block: index,
                letter,
            })
    }

    fn click(&mut self, index: usize, letter: Letter) -> Result<(), PageError> {
        let block = self.block_mut(index)?;
        let control = block
            .controls
            .iter()
            .find(|c| c.letter == letter)
            .ok_or(PageError::ControlNotFound {
                block: index,
                letter,
            })?;
        if control.disabled {
            return Err(PageError::Rejected(format!("control {} is disabled", letter)));
        }

        match block.question.declared_type {
            QuestionType::Single => {
                for control in &mut block.controls {
                    control.checked = control.letter == letter;
                }
            }
            QuestionType::Multi => {
                for control in block.controls.iter_mut().filter(|c| c.letter == letter) {
                    control.checked = !control.checked;
                }
            }
        }
        Ok(())
    }
}

/// Quiz page backed by a parsed HTML snapshot
#[derive(Debug, Default)]
pub struct HtmlQuizPage {
    state: Mutex<PageState>,
}

impl HtmlQuizPage {
    /// Parse a page from its HTML source
    pub fn from_html(html: &str) -> Self {
        let blocks = parse_blocks(html);
        debug!("Parsed {} question blocks", blocks.len());
        Self {
            state: Mutex::new(PageState {
                blocks,
                log: Vec::new(),
            }),
        }
    }

    /// Read and parse a saved page
    pub async fn load(path: &Path) -> Result<Self, PageError> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PageError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_html(&html))
    }

    /// Every interaction issued so far, in order
    pub fn interactions(&self) -> Vec<PageInteraction> {
        self.lock().map(|s| s.log.clone()).unwrap_or_default()
    }

    /// Checked letters of every block, in display order
    pub fn selections(&self) -> Vec<(usize, Vec<Letter>)> {
        self.lock()
            .map(|s| {
                s.blocks
                    .iter()
                    .map(|b| {
                        let checked = b
                            .controls
                            .iter()
                            .filter(|c| c.checked)
                            .map(|c| c.letter)
                            .collect();
                        (b.question.index, checked)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Mark left on a block by the last pass, if any
    pub fn block_mark(&self, index: usize) -> Option<BlockMark> {
        self.lock()
            .ok()
            .and_then(|s| s.block(index).ok().and_then(|b| b.mark))
    }

    /// Whether the "applied" highlight is set on a control
    pub fn is_marked(&self, index: usize, letter: Letter) -> bool {
        self.lock().is_ok_and(|s| {
            s.block(index).is_ok_and(|b| {
                b.controls
                    .iter()
                    .any(|c| c.letter == letter && c.marked)
            })
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, PageState>, PageError> {
        self.state
            .lock()
            .map_err(|_| PageError::Unavailable("page state poisoned".to_string()))
    }
}

/// Extract question blocks in document order.
///
/// Containers without a type marker are skipped. Options whose input is
/// missing or carries no usable letter are dropped.
fn parse_blocks(html: &str) -> Vec<Block> {
    let document = Html::parse_document(html);
    let mut blocks = Vec::new();

    for container in document.select(&CONTAINER) {
        let text: String = container.text().collect();
        let Some(kind) = detect_type(&text) else {
            continue;
        };

        let raw_stem = container
            .select(&STEM)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let (labels, inputs) = match kind {
            QuestionType::Single => (&*RADIO_LABEL, &*RADIO_INPUT),
            QuestionType::Multi => (&*CHECKBOX_LABEL, &*CHECKBOX_INPUT),
        };

        let mut question = QuestionBlock::new(blocks.len(), raw_stem, kind);
        let mut controls: Vec<Control> = Vec::new();
        for label in container.select(labels) {
            let Some(input) = label.select(inputs).next() else {
                continue;
            };
            let Some(letter) = input.value().attr("value").and_then(|v| Letter::parse(v.trim()))
            else {
                continue;
            };
            question.push_option(letter, option_text(label));

            let checked = input.value().attr("checked").is_some() || has_class(label, "is-checked");
            let disabled =
                input.value().attr("disabled").is_some() || has_class(label, "is-disabled");
            match controls.iter_mut().find(|c| c.letter == letter) {
                Some(existing) => {
                    existing.checked = checked;
                    existing.disabled = disabled;
                }
                None => controls.push(Control {
                    letter,
                    checked,
                    disabled,
                    marked: false,
                }),
            }
        }

        blocks.push(Block {
            question,
            controls,
            mark: None,
        });
    }

    blocks
}

fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Label text with a leading `X.` marker removed
fn option_text(label: ElementRef) -> String {
    let text: String = label.text().collect();
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), Some('.')) if c.is_ascii_uppercase() => chars.as_str().trim().to_string(),
        _ => trimmed.to_string(),
    }
}

#[async_trait]
impl QuizPage for HtmlQuizPage {
    async fn discover(&self) -> Result<Vec<QuestionBlock>, PageError> {
        let state = self.lock()?;
        Ok(state.blocks.iter().map(|b| b.question.clone()).collect())
    }

    async fn controls(&self, block: usize) -> Result<Vec<ControlState>, PageError> {
        let state = self.lock()?;
        Ok(state
            .block(block)?
            .controls
            .iter()
            .map(|c| ControlState {
                letter: c.letter,
                checked: c.checked,
            })
            .collect())
    }

    async fn scroll_into_view(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        let mut state = self.lock()?;
        state.control_mut(block, letter)?;
        state.log.push(PageInteraction::Scroll { block, letter });
        Ok(())
    }

    async fn activate(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        let mut state = self.lock()?;
        state.click(block, letter)?;
        state.log.push(PageInteraction::Activate { block, letter });
        Ok(())
    }

    async fn activate_wrapper(&self, block: usize, letter: Letter) -> Result<(), PageError> {
        let mut state = self.lock()?;
        state.click(block, letter)?;
        state.log.push(PageInteraction::ActivateWrapper { block, letter });
        Ok(())
    }

    async fn dispatch(
        &self,
        block: usize,
        letter: Letter,
        event: SyntheticEvent,
    ) -> Result<(), PageError> {
        let mut state = self.lock()?;
        state.control_mut(block, letter)?;
        state.log.push(PageInteraction::Dispatch {
            block,
            letter,
            event,
        });
        Ok(())
    }

    async fn mark_option(
        &self,
        block: usize,
        letter: Letter,
        marked: bool,
    ) -> Result<(), PageError> {
        let mut state = self.lock()?;
        state.control_mut(block, letter)?.marked = marked;
        state.log.push(PageInteraction::MarkOption {
            block,
            letter,
            marked,
        });
        Ok(())
    }

    async fn mark_block(&self, block: usize, mark: BlockMark) -> Result<(), PageError> {
        let mut state = self.lock()?;
        state.block_mut(block)?.mark = Some(mark);
        state.log.push(PageInteraction::MarkBlock { block, mark });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <div class="item-view">
    <span>【单选】</span>
    <div class="w-full">1. 地球是什么形状的？</div>
    <label class="el-radio"><input class="el-radio__original" type="radio" value="A">A. 方的</label>
    <label class="el-radio is-checked"><input class="el-radio__original" type="radio" value="B">B. 圆的</label>
  </div>
  <div class="item-view"><div class="w-full">说明文字</div></div>
  <div class="item-view">
    <span>【 多选 】</span>
    <div class="w-full">2. 下列哪些是颜色</div>
    <label class="el-checkbox"><input class="el-checkbox__original" type="checkbox" value="A" checked>A. 红</label>
    <label class="el-checkbox"><input class="el-checkbox__original" type="checkbox" value="B">B. 桌子</label>
    <label class="el-checkbox"><input class="el-checkbox__original" type="checkbox" value="C">C. 蓝</label>
    <label class="el-checkbox"><input class="el-checkbox__original" type="checkbox" value="">无效</label>
  </div>
</body></html>
"#;

    fn letter(s: &str) -> Letter {
        Letter::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_discover_blocks() {
        let page = HtmlQuizPage::from_html(PAGE);
        let blocks = page.discover().await.unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[0].declared_type, QuestionType::Single);
        assert_eq!(blocks[0].raw_stem, "1. 地球是什么形状的？");
        assert_eq!(blocks[0].normalized_stem, "地球是什么形状的");
        assert_eq!(blocks[0].options[1].text, "圆的");

        assert_eq!(blocks[1].index, 1);
        assert_eq!(blocks[1].declared_type, QuestionType::Multi);
        assert_eq!(
            blocks[1].letters().collect::<Vec<_>>(),
            vec![letter("A"), letter("B"), letter("C")]
        );
    }

    #[tokio::test]
    async fn test_initial_state() {
        let page = HtmlQuizPage::from_html(PAGE);
        let controls = page.controls(0).await.unwrap();
        assert!(!controls[0].checked);
        assert!(controls[1].checked);
        assert_eq!(page.selections()[1].1, vec![letter("A")]);
    }

    #[tokio::test]
    async fn test_radio_exclusive() {
        let page = HtmlQuizPage::from_html(PAGE);
        page.activate(0, letter("A")).await.unwrap();
        assert_eq!(page.selections()[0].1, vec![letter("A")]);

        page.activate(0, letter("A")).await.unwrap();
        assert_eq!(page.selections()[0].1, vec![letter("A")]);
    }

    #[tokio::test]
    async fn test_checkbox_toggles() {
        let page = HtmlQuizPage::from_html(PAGE);
        page.activate(1, letter("C")).await.unwrap();
        page.activate_wrapper(1, letter("A")).await.unwrap();
        assert_eq!(page.selections()[1].1, vec![letter("C")]);
        assert_eq!(
            page.interactions(),
            vec![
                PageInteraction::Activate { block: 1, letter: letter("C") },
                PageInteraction::ActivateWrapper { block: 1, letter: letter("A") },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_control() {
        let page = HtmlQuizPage::from_html(PAGE);
        assert!(matches!(
            page.activate(0, letter("D")).await,
            Err(PageError::ControlNotFound { .. })
        ));
        assert!(matches!(
            page.controls(7).await,
            Err(PageError::BlockNotFound(7))
        ));
        assert!(page.interactions().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_control_rejected() {
        let page = HtmlQuizPage::from_html(
            r#"<div class="item-view">【单选】<div class="w-full">题</div>
            <label class="el-radio is-disabled"><input class="el-radio__original" type="radio" value="A" disabled>A. 甲</label>
            </div>"#,
        );
        assert!(matches!(
            page.activate(0, letter("A")).await,
            Err(PageError::Rejected(_))
        ));
        assert!(page.selections()[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_marks() {
        let page = HtmlQuizPage::from_html(PAGE);
        page.mark_block(1, BlockMark::Inconsistent).await.unwrap();
        page.mark_option(0, letter("B"), true).await.unwrap();

        assert_eq!(page.block_mark(1), Some(BlockMark::Inconsistent));
        assert_eq!(page.block_mark(0), None);
        assert!(page.is_marked(0, letter("B")));
        assert!(!page.is_marked(0, letter("A")));
    }

    #[test]
    fn test_block_without_stem() {
        let blocks = parse_blocks(r#"<div class="item-view">【单选】</div>"#);
        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].question.is_processable());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = HtmlQuizPage::load(Path::new("/nonexistent/quiz.html")).await;
        assert!(matches!(result, Err(PageError::Unavailable(_))));
    }
}
