//! Quiz page adapters

mod html;

pub use html::{HtmlQuizPage, PageInteraction};
