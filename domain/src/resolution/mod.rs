//! Answer resolution
//!
//! [`resolve`] turns a [`QuestionBlock`](crate::question::QuestionBlock) plus a
//! merged bank into a [`ResolutionOutcome`]; [`PassReport`] tallies outcomes
//! for the status surface.

pub mod outcome;
pub mod report;
pub mod resolver;

pub use outcome::{InconsistencyReason, Resolution, ResolutionOutcome, ResolvedAnswer};
pub use report::{DetailEntry, DetailKind, PassReport};
pub use resolver::resolve;
