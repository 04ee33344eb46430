//! Harvested answers
//!
//! The host page fetches graded question data from its own backend. A
//! captured response body of that endpoint carries, per question, a title
//! and the right-answer string. [`harvest_response`] extracts those pairs;
//! [`HarvestLog`] accumulates them into a session bank.

pub mod parser;

pub use parser::{HarvestLog, HarvestedAnswer, harvest_response};
