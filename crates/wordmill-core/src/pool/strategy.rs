//! Pick strategies - how one word is removed from the ready list.
//!
//! A strategy owns two decisions: which candidate leaves the ready list
//! (and with what probability), and where a freshly picked word lands in
//! the anti-repeat queue. The pool orchestrates; the strategy decides.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::VecDeque;

use super::weight::{
    ComplexityWeighter, CompoundWeighter, DurationWeighter, RecentDurationWeighter, Weighter,
};
use crate::word::{Complexity, WordRef};

/// Queue length below which privileged placement is not worth doing.
const PRIVILEGED_MIN_QUEUE: usize = 5;

/// Outcome of one strategy pick: the removed word and the probability
/// with which it was chosen from the candidate list.
pub struct Picked {
    /// The word removed from the ready list.
    pub word: WordRef,
    /// Probability of this choice, in `(0, 1]`.
    pub probability: f64,
}

/// Stateful selection strategy over a mutable candidate list.
pub trait PickStrategy {
    /// Remove and return one word from `ready`.
    ///
    /// `ready` must not be empty; an empty list is the pool-level
    /// precondition violation and panics.
    fn pick(&mut self, ready: &mut Vec<WordRef>, now: DateTime<Utc>) -> Picked;

    /// Place a freshly picked word into the anti-repeat queue.
    /// Default placement is the tail.
    fn insert_into_queue(&self, queue: &mut VecDeque<WordRef>, word: WordRef) {
        queue.push_back(word);
    }
}

fn uniform_pick(ready: &mut Vec<WordRef>) -> Picked {
    let len = ready.len();
    let probability = 1.0 / len as f64;
    let index = rand::rng().random_range(0..len);
    Picked {
        word: ready.remove(index),
        probability,
    }
}

// ============================================================================
// UNIFORM
// ============================================================================

/// Uniformly random selection; tail insertion.
#[derive(Debug, Default)]
pub struct UniformStrategy;

impl PickStrategy for UniformStrategy {
    fn pick(&mut self, ready: &mut Vec<WordRef>, _now: DateTime<Utc>) -> Picked {
        uniform_pick(ready)
    }
}

// ============================================================================
// WEIGHTED
// ============================================================================

/// Cumulative-weight sampling driven by a [`Weighter`].
///
/// Weights are recomputed per pick, so staleness bonuses move with the
/// clock. `rand`'s integer ranges are rejection-sampled, which gives the
/// unbiased draw over `[0, total)` this sampling needs. When every weight
/// is zero the strategy degrades to a uniform pick and reports the uniform
/// probability `1/len`.
pub struct WeightedStrategy {
    weighter: Box<dyn Weighter>,
}

impl WeightedStrategy {
    /// Create a weighted strategy over the given weighter.
    pub fn new(weighter: Box<dyn Weighter>) -> Self {
        Self { weighter }
    }
}

impl PickStrategy for WeightedStrategy {
    fn pick(&mut self, ready: &mut Vec<WordRef>, now: DateTime<Utc>) -> Picked {
        let weights: Vec<i64> = ready
            .iter()
            .map(|word| self.weighter.weight(word.as_ref(), now))
            .collect();
        let total: i64 = weights.iter().sum();

        if total == 0 {
            tracing::debug!(candidates = ready.len(), "all weights zero, uniform fallback");
            return uniform_pick(ready);
        }

        let mut draw = rand::rng().random_range(0..total);
        for (index, weight) in weights.iter().enumerate() {
            if draw < *weight {
                return Picked {
                    word: ready.remove(index),
                    probability: *weight as f64 / total as f64,
                };
            }
            draw -= *weight;
        }

        // Unreachable while weights stay non-negative
        tracing::error!(total, "cumulative weight walk overran its total");
        Picked {
            word: ready.remove(0),
            probability: 1.0,
        }
    }

    /// Privileged words picked from a long enough queue are parked two
    /// thirds of the way in, after any privileged entries already sitting
    /// there, so consecutive privileged picks resurface as one cluster.
    fn insert_into_queue(&self, queue: &mut VecDeque<WordRef>, word: WordRef) {
        if word.complexity().is_privileged() && queue.len() >= PRIVILEGED_MIN_QUEUE {
            let mut index = queue.len() * 2 / 3;
            while index < queue.len() && queue[index].complexity().is_privileged() {
                index += 1;
            }
            queue.insert(index, word);
        } else {
            queue.push_back(word);
        }
    }
}

// ============================================================================
// PRESETS
// ============================================================================

/// Uniform selection.
pub fn uniform() -> Box<dyn PickStrategy> {
    Box::new(UniformStrategy)
}

/// Weighted selection over an arbitrary weighter.
pub fn weighted(weighter: Box<dyn Weighter>) -> Box<dyn PickStrategy> {
    Box::new(WeightedStrategy::new(weighter))
}

/// Difficulty plus a staleness bonus stepping every `duration`.
pub fn standard(duration: Duration, bonus: i64) -> Box<dyn PickStrategy> {
    weighted(Box::new(CompoundWeighter::new(
        Box::new(ComplexityWeighter),
        Box::new(DurationWeighter::new(duration, bonus)),
    )))
}

/// Like [`standard`], with the staleness bonus boosted for fresh bundles.
pub fn recent_standard(duration: Duration, bonus: i64) -> Box<dyn PickStrategy> {
    weighted(Box::new(CompoundWeighter::new(
        Box::new(ComplexityWeighter),
        Box::new(RecentDurationWeighter::new(duration, bonus)),
    )))
}

/// The base-pool default for daily drilling: difficulty plus an Easy-sized
/// bonus every five hours.
pub fn standard_everyday() -> Box<dyn PickStrategy> {
    standard(Duration::hours(5), Complexity::Easy.weight())
}

/// Strategy of the repeat-slot auxiliary pool.
pub fn repeat_slots() -> Box<dyn PickStrategy> {
    standard(Duration::days(1), Complexity::Normal.weight())
}

/// Strategy of the review-slot auxiliary pool (short Ebbinghaus interval).
pub fn review_slots() -> Box<dyn PickStrategy> {
    standard(Duration::hours(3), Complexity::Easy.weight())
}

/// Strategy of the random-slot auxiliary pool; favors fresh bundles.
pub fn random_slots() -> Box<dyn PickStrategy> {
    recent_standard(Duration::days(1), Complexity::Easy.weight())
}

// ============================================================================
// TESTS
// ============================================================================
