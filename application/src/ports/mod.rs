//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod bank_store;
pub mod config_accessor;
pub mod progress;
pub mod quiz_page;
pub mod remote_bank;
