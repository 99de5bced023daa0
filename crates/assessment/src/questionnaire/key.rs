use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identity of one answer: section id plus the question's original
/// position inside that section. Presentation order never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnswerKey {
    pub section_id: u32,
    pub index: usize,
}

impl AnswerKey {
    pub const fn new(section_id: u32, index: usize) -> Self {
        Self { section_id, index }
    }

    /// Lenient parse of the `"<section>-<index>"` wire form; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (section, index) = raw.trim().split_once('-')?;
        if section.is_empty() || index.is_empty() {
            return None;
        }
        if !section.bytes().all(|b| b.is_ascii_digit()) || !index.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        Some(Self {
            section_id: section.parse().ok()?,
            index: index.parse().ok()?,
        })
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section_id, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a <section>-<index> answer key")]
pub struct InvalidAnswerKey(pub String);

impl FromStr for AnswerKey {
    type Err = InvalidAnswerKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidAnswerKey(s.to_string()))
    }
}
