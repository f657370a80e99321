//! Pool Module
//!
//! The word container at the heart of the engine. A pool keeps its words
//! in two disjoint collections:
//!
//! - `ready` - eligible for selection
//! - `queue` - recently picked, temporarily ineligible (anti-repeat)
//!
//! A pick moves exactly one word from `ready` into `queue` and, when the
//! queue is over its cap, one oldest queue entry back to `ready`, so the
//! pool's size never changes across a pick. The queue cap is
//! `min(size / 2, 1000)` and is recomputed after every structural change.
//!
//! [`Pool`] is a cheaply cloneable handle. The engine is single-threaded
//! and cooperative; sharing is `Rc<RefCell>`, and the one re-entrant path
//! (a conditioned word deleting itself from inside its own pool's pick)
//! is handled by releasing the borrow before word stats are updated.

pub mod strategy;
pub mod weight;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};

use crate::diag::DiagnosticSink;
use crate::word::{same_word, WordRef};
use strategy::PickStrategy;

/// Hard cap on the anti-repeat queue, whatever the pool size.
const MAX_QUEUE_CAP: usize = 1000;

/// Minimum width of the ready column in dumps.
const DUMP_MIN_COL_WIDTH: usize = 15;

/// Gap between dump columns.
const DUMP_COL_GAP: usize = 3;

// ============================================================================
// INNER STATE
// ============================================================================

struct PoolInner {
    strategy: Box<dyn PickStrategy>,
    ready: Vec<WordRef>,
    queue: VecDeque<WordRef>,
    max_queue_len: usize,
    last_probability: f64,
    drained: Option<Rc<dyn Fn()>>,
}

impl PoolInner {
    fn size(&self) -> usize {
        self.ready.len() + self.queue.len()
    }

    fn update_max_queue_len(&mut self) {
        self.max_queue_len = (self.size() / 2).min(MAX_QUEUE_CAP);
    }

    /// Recompute the cap and spill oldest queue entries until it holds.
    fn rebalance(&mut self) {
        self.update_max_queue_len();
        while self.queue.len() > self.max_queue_len {
            if let Some(word) = self.queue.pop_front() {
                self.ready.push(word);
            }
        }
    }
}

// ============================================================================
// POOL HANDLE
// ============================================================================

/// Shared handle to a word pool.
#[derive(Clone)]
pub struct Pool {
    inner: Rc<RefCell<PoolInner>>,
}

/// Non-owning pool handle, held by items that live inside the pool they
/// point at (a strong handle there would leak the whole cycle).
#[derive(Clone)]
pub struct WeakPool {
    inner: Weak<RefCell<PoolInner>>,
}

impl WeakPool {
    /// Upgrade back to a usable handle, if the pool is still alive.
    pub fn upgrade(&self) -> Option<Pool> {
        self.inner.upgrade().map(|inner| Pool { inner })
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    /// Empty pool with uniform selection.
    pub fn new() -> Self {
        Self::with_strategy(strategy::uniform())
    }

    /// Empty pool driven by the given strategy.
    pub fn with_strategy(strategy: Box<dyn PickStrategy>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PoolInner {
                strategy,
                ready: Vec::new(),
                queue: VecDeque::new(),
                max_queue_len: 0,
                last_probability: 1.0,
                drained: None,
            })),
        }
    }

    /// Swap the selection strategy.
    pub fn set_strategy(&self, strategy: Box<dyn PickStrategy>) {
        self.inner.borrow_mut().strategy = strategy;
    }

    /// Register the "pool drained" callback fired when a removal is
    /// refused because the pool is about to become useless.
    pub fn set_drained_action(&self, action: impl Fn() + 'static) {
        self.inner.borrow_mut().drained = Some(Rc::new(action));
    }

    /// Non-owning handle for items stored inside this pool.
    pub fn downgrade(&self) -> WeakPool {
        WeakPool {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Number of words in the pool, ready and queued together.
    pub fn size(&self) -> usize {
        self.inner.borrow().size()
    }

    /// True when the pool holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Append one word to the ready list.
    pub fn add(&self, word: WordRef) {
        let mut inner = self.inner.borrow_mut();
        inner.ready.push(word);
        inner.update_max_queue_len();
    }

    /// Append many words to the ready list.
    pub fn add_all(&self, words: impl IntoIterator<Item = WordRef>) {
        let mut inner = self.inner.borrow_mut();
        inner.ready.extend(words);
        inner.update_max_queue_len();
    }

    /// Append one word to the queue tail and rebalance.
    pub fn add_to_queue(&self, word: WordRef) {
        let mut inner = self.inner.borrow_mut();
        inner.queue.push_back(word);
        inner.rebalance();
    }

    /// Append many words to the queue tail without rebalancing; the
    /// caller decides when to [`rebalance`](Self::rebalance). Seeding
    /// relies on this to keep today's words queued in pick order.
    pub fn add_all_to_queue(&self, words: impl IntoIterator<Item = WordRef>) {
        self.inner.borrow_mut().queue.extend(words);
    }

    /// Insert a word into the queue at the position the active strategy
    /// chooses, then rebalance.
    pub fn insert_into_queue(&self, word: WordRef) {
        let inner = &mut *self.inner.borrow_mut();
        inner.strategy.insert_into_queue(&mut inner.queue, word);
        inner.rebalance();
    }

    /// Force a queue-cap recomputation and spill.
    pub fn rebalance(&self) {
        self.inner.borrow_mut().rebalance();
    }

    /// Pick the next word to drill.
    ///
    /// `previous` is the key of the previously shown word; slot words use
    /// it for collision avoidance. The picked word's stats are updated via
    /// `on_picked` after the pool's internal borrow is released, so
    /// conditioned words may delete themselves from this very pool while
    /// the pick completes.
    ///
    /// # Panics
    ///
    /// Panics when the pool is empty. An empty pool at pick time is a
    /// caller bug (the drained notification was ignored), not a state the
    /// engine degrades through.
    pub fn pick(&self, now: DateTime<Utc>, previous: Option<&str>) -> WordRef {
        let (word, strategy_probability) = {
            let inner = &mut *self.inner.borrow_mut();
            assert!(
                inner.size() > 0,
                "pick() on an empty pool: repopulate after the drained notification"
            );

            let picked = inner.strategy.pick(&mut inner.ready, now);
            inner
                .strategy
                .insert_into_queue(&mut inner.queue, Rc::clone(&picked.word));
            if inner.queue.len() > inner.max_queue_len {
                if let Some(oldest) = inner.queue.pop_front() {
                    inner.ready.push(oldest);
                }
            }
            (picked.word, picked.probability)
        };

        // Borrow released: the word may re-enter this pool (self-removal).
        let delegation_factor = word.on_picked(now, previous);
        self.inner.borrow_mut().last_probability = strategy_probability * delegation_factor;

        word
    }

    /// Probability with which the most recent pick was chosen, composed
    /// multiplicatively through any slot layers it went through.
    pub fn last_pick_probability(&self) -> f64 {
        self.inner.borrow().last_probability
    }

    /// Whether any single-concrete word in the pool has this key.
    /// Pool-backed slots are excluded; they have no key of their own.
    pub fn contains(&self, key: &str) -> bool {
        let inner = self.inner.borrow();
        inner
            .queue
            .iter()
            .chain(inner.ready.iter())
            .filter(|word| word.is_single_concrete())
            .any(|word| word.key() == key)
    }

    /// Remove a word from the pool.
    ///
    /// A pool of two or fewer words refuses the removal, fires the
    /// drained callback instead and returns false - the pool is asking to
    /// be repopulated rather than shrinking into uselessness. Returns
    /// false as well when the word is not in the pool.
    pub fn remove(&self, word: &WordRef) -> bool {
        {
            let inner = &mut *self.inner.borrow_mut();
            if inner.size() > 2 {
                if let Some(index) = inner.ready.iter().position(|w| same_word(w, word)) {
                    inner.ready.remove(index);
                    inner.rebalance();
                    return true;
                }
                if let Some(index) = inner.queue.iter().position(|w| same_word(w, word)) {
                    inner.queue.remove(index);
                    inner.rebalance();
                    return true;
                }
                return false;
            }
        }

        // Refused: notify outside the borrow so the callback may refill us
        let drained = self.inner.borrow().drained.clone();
        if let Some(action) = drained {
            action();
        }
        false
    }

    /// Drop every word and reset the queue cap.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.ready.clear();
        inner.queue.clear();
        inner.max_queue_len = 0;
    }

    /// Render a two-column ready/queue listing to the sink. Purely
    /// observational.
    pub fn dump(&self, sink: &dyn DiagnosticSink, label: Option<&str>) {
        let inner = self.inner.borrow();

        let width = inner
            .ready
            .iter()
            .map(|word| word.describe().len())
            .max()
            .unwrap_or(DUMP_MIN_COL_WIDTH - DUMP_COL_GAP)
            + DUMP_COL_GAP;
        let width = width.max(DUMP_MIN_COL_WIDTH);

        let digits = if inner.queue.is_empty() {
            1
        } else {
            inner.queue.len().ilog10() as usize + 1
        };

        let mut out = String::new();
        out.push_str(&format!("{:<width$}{}\n", "ready", "queue"));
        out.push_str(&format!("{:<width$}{}\n", "----------", "-----------"));

        let rows = inner.ready.len().max(inner.queue.len()).max(1);
        for row in 0..rows {
            let left = inner
                .ready
                .get(row)
                .map(|word| word.describe())
                .unwrap_or_default();
            let right = if let Some(word) = inner.queue.get(row) {
                format!("{:>digits$}: {}", row + 1, word.describe())
            } else if inner.queue.is_empty() && row == 0 {
                "{queue is empty}".to_string()
            } else {
                String::new()
            };
            out.push_str(&format!("{left:<width$}{right}\n"));
        }

        if let Some(label) = label {
            sink.post(label);
        }
        sink.post(&format!("{} words in the pool:", inner.size()));
        sink.post(out.trim_end());
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::BufferSink;
    use crate::word::{SlotWord, WordEntry};
    use std::cell::Cell;

    fn word(key: &str) -> WordRef {
        WordEntry::with_key(key, "").into_ref()
    }

    fn filled(n: usize) -> Pool {
        let pool = Pool::new();
        pool.add_all((0..n).map(|i| word(&format!("w{i}"))));
        pool
    }

    #[test]
    fn test_size_invariant_across_picks() {
        let pool = filled(7);
        for _ in 0..50 {
            let before = pool.size();
            pool.pick(Utc::now(), None);
            assert_eq!(pool.size(), before);
        }
    }

    #[test]
    #[should_panic(expected = "empty pool")]
    fn test_pick_on_empty_pool_panics() {
        Pool::new().pick(Utc::now(), None);
    }

    #[test]
    fn test_pick_updates_stats_and_probability() {
        let pool = filled(4);
        let picked = pool.pick(Utc::now(), None);

        assert_eq!(picked.times_picked(), 1);
        assert_eq!(pool.last_pick_probability(), 0.25);
    }

    #[test]
    fn test_queue_never_exceeds_cap() {
        let pool = filled(6); // cap = 3
        for _ in 0..20 {
            pool.pick(Utc::now(), None);
        }
        let inner = pool.inner.borrow();
        assert!(inner.queue.len() <= 3);
        assert_eq!(inner.ready.len() + inner.queue.len(), 6);
    }

    #[test]
    fn test_recent_pick_not_immediately_repicked() {
        // With 2 ready of 3 total, the queued word sits out the next pick
        let pool = filled(3);
        let first = pool.pick(Utc::now(), None);
        let second = pool.pick(Utc::now(), None);
        assert_ne!(first.key(), second.key());
    }

    #[test]
    fn test_add_to_queue_rebalances() {
        let pool = Pool::new();
        pool.add(word("ready"));
        pool.add_to_queue(word("queued"));

        // size 2 -> cap 1, so the queue may keep its single entry
        let inner = pool.inner.borrow();
        assert_eq!(inner.queue.len(), 1);
        assert_eq!(inner.ready.len(), 1);
    }

    #[test]
    fn test_remove_refused_when_nearly_empty() {
        let pool = filled(2);
        let victim = pool.inner.borrow().ready[0].clone();

        let drained = Rc::new(Cell::new(0));
        let flag = Rc::clone(&drained);
        pool.set_drained_action(move || flag.set(flag.get() + 1));

        assert!(!pool.remove(&victim));
        assert_eq!(pool.size(), 2);
        assert_eq!(drained.get(), 1);
    }

    #[test]
    fn test_remove_from_ready_and_queue() {
        let pool = filled(5);
        let picked = pool.pick(Utc::now(), None); // now in the queue
        assert!(pool.remove(&picked));
        assert_eq!(pool.size(), 4);

        let from_ready = pool.inner.borrow().ready[0].clone();
        assert!(pool.remove(&from_ready));
        assert_eq!(pool.size(), 3);

        // Already gone
        assert!(!pool.remove(&picked));
    }

    #[test]
    fn test_drained_callback_may_refill() {
        let pool = filled(2);
        let victim = pool.inner.borrow().ready[0].clone();

        let refill = pool.clone();
        pool.set_drained_action(move || {
            refill.add(word("reinforcement"));
        });

        assert!(!pool.remove(&victim));
        assert_eq!(pool.size(), 3);
    }

    #[test]
    fn test_contains_skips_slots() {
        let pool = filled(3);

        let aux = filled(2);
        pool.add(Rc::new(SlotWord::new(crate::word::WordKind::Random, aux)));

        assert!(pool.contains("w1"));
        assert!(!pool.contains("w0-from-aux"));
        // The slot currently delegates to an empty placeholder; its key
        // must not satisfy a contains probe
        assert!(!pool.contains(""));
    }

    #[test]
    fn test_clear() {
        let pool = filled(8);
        pool.pick(Utc::now(), None);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.inner.borrow().max_queue_len, 0);
    }

    #[test]
    fn test_dump_renders_columns() {
        let pool = filled(3);
        pool.pick(Utc::now(), None);

        let sink = BufferSink::new();
        pool.dump(&sink, Some("base pool"));

        let messages = sink.messages();
        assert_eq!(messages[0], "base pool");
        assert_eq!(messages[1], "3 words in the pool:");
        assert!(messages[2].contains("ready"));
        assert!(messages[2].contains("1: "));
    }

    #[test]
    fn test_dump_empty_queue_placeholder() {
        let pool = filled(2);
        let sink = BufferSink::new();
        pool.dump(&sink, None);
        assert!(sink.messages()[1].contains("{queue is empty}"));
    }
}
