//! Pool-backed slot words.
//!
//! A slot has no vocabulary content of its own. It sits in the base pool
//! like any other word, but every time it is picked it re-draws a delegate
//! from its auxiliary pool (repeat, random or review) and forwards all
//! reads and writes to that delegate until the next pick. One slot in the
//! base pool therefore stands for "one serving of that whole auxiliary
//! mode" without duplicating any pool logic.

use chrono::{DateTime, NaiveDate, Utc};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use super::{Complexity, Word, WordEntry, WordKind, WordRef};
use crate::pool::Pool;

/// Total draw attempts before a collision with the previous word is
/// accepted rather than retried.
const MAX_DRAW_ATTEMPTS: u32 = 4;

/// A word that re-draws its content from an auxiliary pool on every pick.
pub struct SlotWord {
    kind: WordKind,
    pool: Pool,
    current: RefCell<WordRef>,
    last_picked: Cell<DateTime<Utc>>,
    times_drawn: Cell<u32>,
}

impl SlotWord {
    /// Create a slot of the given kind over its auxiliary pool.
    ///
    /// Until the first pick the slot delegates to an empty placeholder
    /// entry.
    pub fn new(kind: WordKind, pool: Pool) -> Self {
        Self {
            kind,
            pool,
            current: RefCell::new(WordEntry::new().into_ref()),
            last_picked: Cell::new(DateTime::UNIX_EPOCH),
            times_drawn: Cell::new(0),
        }
    }

    /// The slot's declared kind, before repeat stickiness is applied.
    pub fn declared_kind(&self) -> WordKind {
        self.kind
    }

    fn current(&self) -> WordRef {
        self.current.borrow().clone()
    }

    /// Draw the next delegate, retrying a bounded number of times when the
    /// draw collides with the previously shown key. Returns the auxiliary
    /// pool's probability for the adopted draw.
    fn redraw(&self, now: DateTime<Utc>, previous: Option<&str>) -> f64 {
        for attempt in 1..=MAX_DRAW_ATTEMPTS {
            let drawn = self.pool.pick(now, previous);

            let collided = previous.is_some_and(|prev| drawn.key() == prev);
            *self.current.borrow_mut() = drawn;

            if !collided {
                break;
            }
            if attempt == MAX_DRAW_ATTEMPTS {
                // Accepted anyway; a repeat beats an endless loop
                tracing::warn!(
                    kind = %self.kind,
                    word = %self.current.borrow().key(),
                    "slot draw still collides after {MAX_DRAW_ATTEMPTS} attempts"
                );
            } else {
                tracing::debug!(
                    kind = %self.kind,
                    word = %self.current.borrow().key(),
                    attempt,
                    "slot draw collided with the previous word, retrying"
                );
            }
        }

        self.pool.last_pick_probability()
    }
}

impl Word for SlotWord {
    fn key(&self) -> String {
        self.current().key()
    }

    fn set_key(&self, key: &str) {
        self.current().set_key(key);
    }

    fn translation(&self) -> String {
        self.current().translation()
    }

    fn set_translation(&self, translation: &str) {
        self.current().set_translation(translation);
    }

    fn synonyms(&self) -> String {
        self.current().synonyms()
    }

    fn set_synonyms(&self, synonyms: &str) {
        self.current().set_synonyms(synonyms);
    }

    fn bundle(&self) -> Option<NaiveDate> {
        self.current().bundle()
    }

    fn set_bundle(&self, date: Option<NaiveDate>) {
        self.current().set_bundle(date);
    }

    fn audio(&self) -> Option<PathBuf> {
        self.current().audio()
    }

    fn set_audio(&self, audio: Option<PathBuf>) {
        self.current().set_audio(audio);
    }

    fn complexity(&self) -> Complexity {
        self.current().complexity()
    }

    fn set_complexity(&self, complexity: Complexity) {
        self.current().set_complexity(complexity);
    }

    /// Declared kind, except that a delegate marked Repeat always wins:
    /// repeat status stays visible through any decoration.
    fn kind(&self) -> WordKind {
        if self.current().kind() == WordKind::Repeat {
            WordKind::Repeat
        } else {
            self.kind
        }
    }

    fn set_kind(&self, kind: WordKind) {
        self.current().set_kind(kind);
    }

    /// The slot's own draw timestamp, not the delegate's.
    fn last_picked(&self) -> DateTime<Utc> {
        self.last_picked.get()
    }

    fn set_last_picked(&self, at: DateTime<Utc>) {
        self.last_picked.set(at);
        self.current().set_last_picked(at);
    }

    fn times_picked(&self) -> u32 {
        self.current().times_picked()
    }

    fn set_times_picked(&self, _n: u32) {
        // a slot's pick count belongs to whatever it currently delegates to
    }

    fn on_picked(&self, now: DateTime<Utc>, previous: Option<&str>) -> f64 {
        let factor = self.redraw(now, previous);
        self.last_picked.set(now);
        self.times_drawn.set(self.times_drawn.get() + 1);
        factor
    }

    fn is_single_concrete(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("{}-slot@{}", self.kind, self.times_drawn.get())
    }
}

// ============================================================================
// TESTS
// ============================================================================
