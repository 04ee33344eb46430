//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod learn;
pub mod reconcile;
pub mod run_pass;
pub mod transfer;

#[cfg(test)]
pub(crate) mod mock_page;
