//! Stem matching against a merged bank
//!
//! Three tiers, first hit wins:
//!
//! ```text
//! stem ──► Exact (bank[stem]) ──► Inclusion (key ⊂ stem ∨ stem ⊂ key) ──► Fuzzy (Jaccard ≥ threshold)
//! ```

pub mod matcher;
pub mod similarity;

pub use matcher::{MatchCandidate, MatchReason, find_match};
pub use similarity::{jaccard, stem_similarity};
