//! Per-session registry of auxiliary pools.
//!
//! A [`SlotFactory`] owns one auxiliary pool per slot kind (repeat, random,
//! review), each pre-wired with that kind's selection strategy. The host
//! creates one factory per drill session, asks it for slot words to mix
//! into the base pool, and routes repeat promotions and deletions through
//! it so every auxiliary pool stays consistent.

use chrono::{DateTime, Utc};
use std::rc::Rc;

use super::{SlotWord, WordKind, WordRef};
use crate::clock;
use crate::diag::DiagnosticSink;
use crate::pool::{strategy, Pool};

/// Registry of the auxiliary pools behind pool-backed slots.
pub struct SlotFactory {
    repeat: Pool,
    random: Pool,
    review: Pool,
}

impl Default for SlotFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotFactory {
    /// Factory with one empty, strategy-wired pool per slot kind.
    pub fn new() -> Self {
        Self {
            repeat: Pool::with_strategy(strategy::repeat_slots()),
            random: Pool::with_strategy(strategy::random_slots()),
            review: Pool::with_strategy(strategy::review_slots()),
        }
    }

    /// The auxiliary pool behind a slot kind; `None` for kinds that have
    /// no pool (concrete words never live in the factory).
    pub fn pool(&self, kind: WordKind) -> Option<&Pool> {
        match kind {
            WordKind::Repeat => Some(&self.repeat),
            WordKind::Random => Some(&self.random),
            WordKind::Review => Some(&self.review),
            _ => None,
        }
    }

    /// Build slot words of one kind over a freshly seeded auxiliary pool.
    ///
    /// The kind's pool is cleared and re-seeded from `candidates`. Returns
    /// no slots when fewer than two candidates survive seeding (a slot
    /// over a near-empty pool would just echo one word), and never more
    /// than `1 + size / 3` of them, whatever `amount` asks for.
    pub fn draw_slots(
        &self,
        kind: WordKind,
        amount: usize,
        candidates: impl IntoIterator<Item = WordRef>,
        now: DateTime<Utc>,
    ) -> Vec<WordRef> {
        let Some(pool) = self.pool(kind) else {
            tracing::warn!(%kind, "kind has no auxiliary pool, no slots drawn");
            return Vec::new();
        };

        pool.clear();
        Self::seed_pool(candidates, pool, now);

        if pool.size() < 2 {
            return Vec::new();
        }

        let amount = amount.min(1 + pool.size() / 3);
        tracing::debug!(%kind, amount, pool_size = pool.size(), "drawing slots");

        (0..amount)
            .map(|_| {
                let slot: WordRef = Rc::new(SlotWord::new(kind, pool.clone()));
                slot
            })
            .collect()
    }

    /// Seed a pool, routing words already picked this drill day into the
    /// anti-repeat queue (oldest pick first) so a freshly loaded session
    /// continues where the previous one left off instead of re-asking this
    /// morning's words right away.
    pub fn seed_pool(words: impl IntoIterator<Item = WordRef>, pool: &Pool, now: DateTime<Utc>) {
        let (mut today, rest): (Vec<WordRef>, Vec<WordRef>) = words
            .into_iter()
            .partition(|word| clock::picked_today(word.last_picked(), now));
        today.sort_by_key(|word| word.last_picked());

        pool.add_all(rest);
        pool.add_all_to_queue(today);
        pool.rebalance();
    }

    /// Move a concrete word into the repeat rotation. It enters the repeat
    /// pool through the queue (it was just drilled, no need to resurface
    /// it immediately) and leaves the random pool.
    pub fn promote_repeat(&self, word: &WordRef) {
        self.repeat.add_to_queue(Rc::clone(word));
        self.random.remove(word);
    }

    /// Take a concrete word out of the repeat rotation, returning it to
    /// the random pool through the queue.
    pub fn demote_repeat(&self, word: &WordRef) {
        self.repeat.remove(word);
        self.random.add_to_queue(Rc::clone(word));
    }

    /// Remove a word from every auxiliary pool it may sit in.
    pub fn remove_everywhere(&self, word: &WordRef) {
        self.repeat.remove(word);
        self.random.remove(word);
        self.review.remove(word);
    }

    /// Render every non-empty auxiliary pool to the sink. The random pool
    /// is reported by size only; its full listing is rarely interesting.
    pub fn dump(&self, sink: &dyn DiagnosticSink) {
        if !self.random.is_empty() {
            sink.post(&format!("Random word pool size: {}", self.random.size()));
        }
        if !self.repeat.is_empty() {
            self.repeat.dump(sink, Some("Repeat word pool"));
        }
        if !self.review.is_empty() {
            self.review.dump(sink, Some("Review word pool"));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
