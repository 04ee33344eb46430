//! Stem text processing
//!
//! - [`normalizer::normalize`] turns a raw on-page stem into the canonical
//!   key used for both storage and lookup.
//! - [`tokenizer::tokenize`] splits a normalized stem into a token set that is
//!   only ever used as a similarity signal.

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::normalize;
pub use tokenizer::tokenize;
