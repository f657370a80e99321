//! Word kind - the drill role a word currently plays.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::WordError;

/// Classification of a word's drill role.
///
/// `Standard` is the base pool; the other kinds mark auxiliary slots and
/// wrappers layered on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    /// Ordinary vocabulary word from the base pool
    #[default]
    Standard,
    /// Word the learner asked to see again and again
    Repeat,
    /// Random filler drawn from the whole vocabulary
    Random,
    /// Ebbinghaus-interval review slot
    Review,
    /// Transient wrapper that will leave the pool on its own
    Temporary,
}

impl WordKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WordKind::Standard => "standard",
            WordKind::Repeat => "repeat",
            WordKind::Random => "random",
            WordKind::Review => "review",
            WordKind::Temporary => "temporary",
        }
    }

    /// The kinds that own a dedicated auxiliary pool.
    pub fn slot_kinds() -> [WordKind; 3] {
        [WordKind::Repeat, WordKind::Random, WordKind::Review]
    }
}

impl std::fmt::Display for WordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WordKind {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(WordKind::Standard),
            "repeat" => Ok(WordKind::Repeat),
            "random" => Ok(WordKind::Random),
            "review" => Ok(WordKind::Review),
            "temporary" => Ok(WordKind::Temporary),
            other => Err(WordError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            WordKind::Standard,
            WordKind::Repeat,
            WordKind::Random,
            WordKind::Review,
            WordKind::Temporary,
        ] {
            assert_eq!(kind.as_str().parse::<WordKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_parse_rejects_unknown() {
        assert!(matches!(
            "ebbinghaus".parse::<WordKind>(),
            Err(WordError::UnknownKind(_))
        ));
    }
}
