//! Stem normalization

use regex::Regex;
use std::sync::LazyLock;

/// Whitespace runs, including zero-width and exotic Unicode spaces that
/// `\s` does not cover.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\u{00A0}\u{1680}\u{180E}\u{2000}-\u{200D}\u{202F}\u{205F}\u{3000}\u{FEFF}]+")
        .expect("whitespace pattern is valid")
});

/// Bracketed category tags such as `【单选】`.
static CATEGORY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【.*?】").expect("tag pattern is valid"));

/// A leading ordinal: Arabic or CJK numerals followed by a separator.
static LEADING_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9一二三四五六七八九十百千]+[.)、．]").expect("ordinal pattern is valid")
});

/// Empty parenthetical pairs in either width, e.g. `（ ）` or `()`.
static EMPTY_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[（(][ 　]*[)）]").expect("parens pattern is valid"));

static QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[“”"『』]"#).expect("quote pattern is valid"));

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[：:。！？!?，,；;…]").expect("punctuation pattern is valid"));

/// Any digits or dots still left at the front once the ordinal is gone.
static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9.]+").expect("digit pattern is valid"));

/// Canonicalize raw question text into a stable lookup key.
///
/// Total and deterministic: whitespace-only input yields an empty string.
/// Tag removal runs before ordinal stripping so no separator is left
/// orphaned. The removal steps are repeated until nothing changes, which
/// keeps the function idempotent even when one removal exposes another
/// (`"(，)"` only becomes an empty pair after the comma is gone).
///
/// ```
/// use recall_domain::text::normalize;
///
/// assert_eq!(normalize("【单选】1.下列说法正确的是（ ）"), "下列说法正确的是");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut current = WHITESPACE.replace_all(raw, "").into_owned();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_once(s: &str) -> String {
    let s = CATEGORY_TAG.replace_all(s, "");
    let s = LEADING_ORDINAL.replace(&s, "");
    let s = EMPTY_PARENS.replace_all(&s, "");
    let s = QUOTES.replace_all(&s, "");
    let s = PUNCTUATION.replace_all(&s, "");
    LEADING_DIGITS.replace(&s, "").into_owned()
}
