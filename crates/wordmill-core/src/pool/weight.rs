//! Weighters - pure functions mapping (word, now) to a selection weight.
//!
//! A weighter never stores per-word state; everything it needs is read off
//! the word at pick time. Independent signals (difficulty, staleness,
//! recency of introduction) are combined by summing two weighters with
//! [`CompoundWeighter`].

use chrono::{DateTime, Duration, Utc};

use crate::clock;
use crate::word::{Complexity, Word, WordKind};

/// Multiplier applied to the staleness bonus of recently introduced bundles.
const RECENT_BUNDLE_FACTOR: i64 = 5;

/// Pure selection-weight function.
pub trait Weighter {
    /// Weight of `word` at instant `now`. Never negative.
    fn weight(&self, word: &dyn Word, now: DateTime<Utc>) -> i64;
}

// ============================================================================
// COMPLEXITY
// ============================================================================

/// Maps a word's difficulty tier to its weight.
///
/// Pool-backed slots have no tier of their own: repeat slots count as
/// Tough (they exist to resurface hard words), every other slot counts
/// as Normal.
#[derive(Debug, Default)]
pub struct ComplexityWeighter;

impl Weighter for ComplexityWeighter {
    fn weight(&self, word: &dyn Word, _now: DateTime<Utc>) -> i64 {
        if word.is_single_concrete() {
            return word.complexity().weight();
        }

        if word.kind() == WordKind::Repeat {
            return Complexity::Tough.weight();
        }

        Complexity::Normal.weight()
    }
}

// ============================================================================
// STALENESS
// ============================================================================

/// Steps a word's weight up by `bonus` for every whole `duration` elapsed
/// since its last pick. Zero until a full duration has passed; always zero
/// for pool-backed slots.
#[derive(Debug)]
pub struct DurationWeighter {
    duration_ms: i64,
    bonus: i64,
}

impl DurationWeighter {
    /// Create a staleness weighter.
    ///
    /// # Panics
    ///
    /// Panics when `duration` is not positive; a non-positive step is a
    /// caller bug, not a recoverable state.
    pub fn new(duration: Duration, bonus: i64) -> Self {
        let duration_ms = duration.num_milliseconds();
        assert!(duration_ms > 0, "duration weighter step must be positive");
        Self { duration_ms, bonus }
    }

    fn elapsed_steps(&self, word: &dyn Word, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - word.last_picked()).num_milliseconds();
        if elapsed <= 0 {
            return 0;
        }
        elapsed / self.duration_ms
    }
}

impl Weighter for DurationWeighter {
    fn weight(&self, word: &dyn Word, now: DateTime<Utc>) -> i64 {
        if !word.is_single_concrete() {
            return 0;
        }
        self.elapsed_steps(word, now) * self.bonus
    }
}

// ============================================================================
// STALENESS, RECENCY-BOOSTED
// ============================================================================

/// [`DurationWeighter`] whose result is multiplied by 5 for words whose
/// bundle was introduced within the rolling six-month recency window.
/// Keeps fresh vocabulary circulating while it still needs reinforcement.
#[derive(Debug)]
pub struct RecentDurationWeighter {
    inner: DurationWeighter,
}

impl RecentDurationWeighter {
    /// Create a recency-boosted staleness weighter.
    ///
    /// # Panics
    ///
    /// Panics when `duration` is not positive.
    pub fn new(duration: Duration, bonus: i64) -> Self {
        Self {
            inner: DurationWeighter::new(duration, bonus),
        }
    }
}

impl Weighter for RecentDurationWeighter {
    fn weight(&self, word: &dyn Word, now: DateTime<Utc>) -> i64 {
        let base = self.inner.weight(word, now);
        let cutoff = clock::recency_cutoff(now);
        match word.bundle() {
            Some(bundle) if bundle > cutoff => base * RECENT_BUNDLE_FACTOR,
            _ => base,
        }
    }
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Sum of two weighters. Nest to combine more than two signals.
pub struct CompoundWeighter {
    first: Box<dyn Weighter>,
    second: Box<dyn Weighter>,
}

impl CompoundWeighter {
    /// Combine two weighters by addition.
    pub fn new(first: Box<dyn Weighter>, second: Box<dyn Weighter>) -> Self {
        Self { first, second }
    }
}

impl Weighter for CompoundWeighter {
    fn weight(&self, word: &dyn Word, now: DateTime<Utc>) -> i64 {
        self.first.weight(word, now) + self.second.weight(word, now)
    }
}

// ============================================================================
// TESTS
// ============================================================================
