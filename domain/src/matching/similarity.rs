//! Token-set similarity

use crate::text::tokenize;
use std::collections::BTreeSet;

/// Jaccard similarity `|a ∩ b| / |a ∪ b|`; an empty union scores 0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Similarity of two normalized stems, each tokenized independently
pub fn stem_similarity(a: &str, b: &str) -> f64 {
    jaccard(&tokenize(a), &tokenize(b))
}
