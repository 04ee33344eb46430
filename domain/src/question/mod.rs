//! Question blocks discovered on a page

pub mod block;

pub use block::{QuestionBlock, QuestionOption, detect_type};
