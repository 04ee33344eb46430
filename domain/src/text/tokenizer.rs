//! Lightweight tokenization for fuzzy matching

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Closed vocabulary of function words and boilerplate phrases that separate
/// meaningful fragments of a stem.
const MARKERS: &[&str] = &[
    "新时代", "下列", "关于", "哪些", "那些", "以下", "正确", "说法", "内容", "必须", "基本",
    "方略", "治藏", "的", "是", "与", "和", "及", "于", "对", "在", "为", "把",
];

static MARKER_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = MARKERS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("marker alternation is valid")
});

/// Split a normalized stem into a deduplicated token set.
///
/// Markers are discarded, as are fragments of one character or less.
/// Input with nothing tokenizable yields an empty set.
pub fn tokenize(normalized: &str) -> BTreeSet<String> {
    MARKER_SPLIT
        .split(normalized)
        .filter(|fragment| fragment.chars().count() > 1)
        .map(str::to_string)
        .collect()
}
