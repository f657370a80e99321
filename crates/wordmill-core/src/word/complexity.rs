//! Complexity - the ordered difficulty tier of a word.
//!
//! Each tier carries a fixed selection weight; the weighted pick strategy
//! reads these directly, so a Challenging word is 500 times more likely to
//! come up than an Elementary one, all else being equal. Challenging is
//! additionally privileged: the weighted strategy parks freshly picked
//! Challenging words deep in the anti-repeat queue so they resurface in a
//! cluster instead of scattering.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::WordError;

/// Difficulty tier of a vocabulary word, ordered by selection weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Known cold, weight 1
    Elementary,
    /// Weight 10
    Simple,
    /// Weight 50
    Easy,
    /// Weight 100
    #[default]
    Normal,
    /// Weight 200
    Tough,
    /// Weight 400
    Complex,
    /// Weight 500, the single privileged tier
    Challenging,
}

impl Complexity {
    /// All tiers, ascending by weight.
    pub const ORDERED: [Complexity; 7] = [
        Complexity::Elementary,
        Complexity::Simple,
        Complexity::Easy,
        Complexity::Normal,
        Complexity::Tough,
        Complexity::Complex,
        Complexity::Challenging,
    ];

    /// Selection weight of this tier.
    pub fn weight(&self) -> i64 {
        match self {
            Complexity::Elementary => 1,
            Complexity::Simple => 10,
            Complexity::Easy => 50,
            Complexity::Normal => 100,
            Complexity::Tough => 200,
            Complexity::Complex => 400,
            Complexity::Challenging => 500,
        }
    }

    /// Whether this tier gets special anti-repeat queue placement.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Complexity::Challenging)
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Elementary => "elementary",
            Complexity::Simple => "simple",
            Complexity::Easy => "easy",
            Complexity::Normal => "normal",
            Complexity::Tough => "tough",
            Complexity::Complex => "complex",
            Complexity::Challenging => "challenging",
        }
    }

    fn rank(&self) -> usize {
        Self::ORDERED
            .iter()
            .position(|c| c == self)
            .expect("every tier is in ORDERED")
    }

    /// One tier easier, saturating at Elementary.
    pub fn step_down(&self) -> Complexity {
        Self::ORDERED[self.rank().saturating_sub(1)]
    }

    /// Two tiers harder, saturating at Challenging. A word the learner got
    /// wrong jumps two tiers so it resurfaces much sooner.
    pub fn step_up(&self) -> Complexity {
        let index = (self.rank() + 2).min(Self::ORDERED.len() - 1);
        Self::ORDERED[index]
    }

    /// True when this tier is at least as hard as `other`.
    pub fn is_not_easier_than(&self, other: Complexity) -> bool {
        self.weight() >= other.weight()
    }

    /// True when this tier is at most as hard as `other`.
    pub fn is_not_harder_than(&self, other: Complexity) -> bool {
        self.weight() <= other.weight()
    }

    /// The tier whose weight is closest to `weight`. Used to map an
    /// average weight over a set of words back onto a tier.
    pub fn closest(weight: i64) -> Complexity {
        let mut best = Complexity::Elementary;
        let mut min = i64::MAX;

        for tier in Self::ORDERED {
            let diff = (tier.weight() - weight).abs();
            if diff < min {
                min = diff;
                best = tier;
            }
        }

        best
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elementary" => Ok(Complexity::Elementary),
            "simple" => Ok(Complexity::Simple),
            "easy" => Ok(Complexity::Easy),
            "normal" => Ok(Complexity::Normal),
            "tough" => Ok(Complexity::Tough),
            "complex" => Ok(Complexity::Complex),
            "challenging" => Ok(Complexity::Challenging),
            other => Err(WordError::UnknownComplexity(other.to_string())),
        }
    }
}
