//! Core domain concepts shared across all subdomains.
//!
//! - [`letter::Letter`]: an option letter (`A`..=`Z`)
//! - [`error::DomainError`]: domain-level errors
//! - [`string::truncate`]: display truncation

pub mod error;
pub mod letter;
pub mod string;
