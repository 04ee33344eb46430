//! Option letter value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single option letter (`A`..=`Z`) identifying one control of a question.
///
/// Letters are case-normalized on construction, so `b` and `B` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Letter(char);

impl Letter {
    /// Create a letter from a character, uppercasing ASCII input.
    pub fn new(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Self(upper))
    }

    /// Parse a string that must consist of exactly one letter.
    ///
    /// Surrounding whitespace is not tolerated; callers reading option
    /// values from markup trim them first.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Letter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::InvalidLetter(s.to_string()))
    }
}

impl TryFrom<String> for Letter {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Letter> for String {
    fn from(letter: Letter) -> Self {
        letter.0.to_string()
    }
}

/// Join letters for display, e.g. `A、C`.
pub fn join_letters<'a>(letters: impl IntoIterator<Item = &'a Letter>, sep: &str) -> String {
    letters
        .into_iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases() {
        assert_eq!(Letter::parse("b").map(Letter::as_char), Some('B'));
        assert_eq!(Letter::parse("D").map(Letter::as_char), Some('D'));
    }

    #[test]
    fn test_parse_rejects_non_letters() {
        assert!(Letter::parse("").is_none());
        assert!(Letter::parse("AB").is_none());
        assert!(Letter::parse("1").is_none());
        assert!(Letter::parse(" A").is_none());
        assert!(Letter::parse("Ａ").is_none());
    }

    #[test]
    fn test_from_str_error() {
        let err = "XY".parse::<Letter>().unwrap_err();
        assert_eq!(err, DomainError::InvalidLetter("XY".to_string()));
    }

    #[test]
    fn test_serde_as_string() {
        let letter = Letter::parse("C").unwrap();
        assert_eq!(serde_json::to_string(&letter).unwrap(), "\"C\"");
        let back: Letter = serde_json::from_str("\"c\"").unwrap();
        assert_eq!(back, letter);
        assert!(serde_json::from_str::<Letter>("\"CC\"").is_err());
    }

    #[test]
    fn test_join_letters() {
        let letters = [Letter::parse("A").unwrap(), Letter::parse("C").unwrap()];
        assert_eq!(join_letters(&letters, "、"), "A、C");
    }
}
