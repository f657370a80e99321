//! Conditioned words - wrappers that leave their pool on their own.
//!
//! A conditioned word wraps exactly one concrete word together with a
//! predicate over it. Every mutation is forwarded to the wrapped word and
//! then the predicate is re-checked; the first failure makes the wrapper
//! remove itself from its owning pool. Two flavors exist:
//!
//! - *self-deleting*: caller-supplied condition AND an internal pick
//!   budget of four servings ("show this hard word a few more times"),
//! - *complexity-gated*: stays only while the wrapped word is still at
//!   least as hard as a captured threshold.
//!
//! When the owning pool is down to two words the wrapper substitutes the
//! bare wrapped word into the pool before removing itself, so the pool
//! never collapses below the size its removal policy protects.

use chrono::{DateTime, NaiveDate, Utc};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use super::{Complexity, Word, WordKind, WordPredicate, WordRef};
use crate::diag::DiagnosticSink;
use crate::pool::{Pool, WeakPool};

/// Servings a self-deleting word gets before its pick budget runs out.
const SELF_DELETE_AFTER: u32 = 4;

/// Wrapper around one concrete word that self-removes from its pool when
/// its predicate stops holding.
pub struct ConditionedWord {
    inner: WordRef,
    owner: WeakPool,
    condition: RefCell<WordPredicate>,
    pick_limit: Option<u32>,
    picks: Cell<u32>,
    fired: Cell<bool>,
    sink: Option<Rc<dyn DiagnosticSink>>,
    me: Weak<ConditionedWord>,
}

impl ConditionedWord {
    /// Self-deleting wrapper: holds while `condition` holds (absent
    /// condition means always) and while fewer than four picks have been
    /// served. A sink, when given, receives a notice on deletion.
    pub fn self_deleting(
        inner: WordRef,
        pool: &Pool,
        condition: Option<WordPredicate>,
        sink: Option<Rc<dyn DiagnosticSink>>,
    ) -> Rc<Self> {
        Self::build(
            inner,
            pool,
            condition.unwrap_or_else(|| Box::new(|_| true)),
            Some(SELF_DELETE_AFTER),
            sink,
        )
    }

    /// Complexity-gated wrapper: holds while the wrapped word is not
    /// easier than `threshold`.
    pub fn complexity_gated(inner: WordRef, pool: &Pool, threshold: Complexity) -> Rc<Self> {
        Self::build(
            inner,
            pool,
            Box::new(move |word| word.complexity().is_not_easier_than(threshold)),
            None,
            None,
        )
    }

    fn build(
        inner: WordRef,
        pool: &Pool,
        condition: WordPredicate,
        pick_limit: Option<u32>,
        sink: Option<Rc<dyn DiagnosticSink>>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|me| Self {
            inner,
            owner: pool.downgrade(),
            condition: RefCell::new(condition),
            pick_limit,
            picks: Cell::new(0),
            fired: Cell::new(false),
            sink,
            me: me.clone(),
        })
    }

    /// Narrow the predicate with another condition (logical AND).
    pub fn and_condition(&self, other: impl Fn(&dyn Word) -> bool + 'static) {
        let previous = std::mem::replace(
            &mut *self.condition.borrow_mut(),
            Box::new(|_| true),
        );
        *self.condition.borrow_mut() = Box::new(move |word| other(word) && previous(word));
    }

    /// Picks served through this wrapper so far.
    pub fn picks_served(&self) -> u32 {
        self.picks.get()
    }

    fn holds(&self) -> bool {
        let within_budget = self
            .pick_limit
            .is_none_or(|limit| self.picks.get() < limit);
        within_budget && (self.condition.borrow())(self.inner.as_ref())
    }

    /// Re-evaluate the predicate after a mutation; on the first failure,
    /// leave the owning pool (substituting the bare word first when the
    /// pool is about to get too small).
    fn check(&self) {
        if self.fired.get() || self.holds() {
            return;
        }
        self.fired.set(true);

        let Some(pool) = self.owner.upgrade() else {
            return;
        };

        if pool.size() == 2 {
            pool.add(Rc::clone(&self.inner));
        }
        if let Some(me) = self.me.upgrade() {
            let handle: WordRef = me;
            pool.remove(&handle);
        }

        if let Some(sink) = &self.sink {
            sink.post(&format!(
                "Word «{}» has been deleted from the pool",
                self.inner.key()
            ));
        }
    }
}

impl Word for ConditionedWord {
    fn key(&self) -> String {
        self.inner.key()
    }

    fn set_key(&self, key: &str) {
        self.inner.set_key(key);
        self.check();
    }

    fn translation(&self) -> String {
        self.inner.translation()
    }

    fn set_translation(&self, translation: &str) {
        self.inner.set_translation(translation);
        self.check();
    }

    fn synonyms(&self) -> String {
        self.inner.synonyms()
    }

    fn set_synonyms(&self, synonyms: &str) {
        self.inner.set_synonyms(synonyms);
        self.check();
    }

    fn bundle(&self) -> Option<NaiveDate> {
        self.inner.bundle()
    }

    fn set_bundle(&self, date: Option<NaiveDate>) {
        self.inner.set_bundle(date);
        self.check();
    }

    fn audio(&self) -> Option<PathBuf> {
        self.inner.audio()
    }

    fn set_audio(&self, audio: Option<PathBuf>) {
        self.inner.set_audio(audio);
        self.check();
    }

    fn complexity(&self) -> Complexity {
        self.inner.complexity()
    }

    fn set_complexity(&self, complexity: Complexity) {
        self.inner.set_complexity(complexity);
        self.check();
    }

    /// Temporary, unless the wrapped word is a repeat word - repeat
    /// status stays visible through the wrapper.
    fn kind(&self) -> WordKind {
        if self.inner.kind() == WordKind::Repeat {
            WordKind::Repeat
        } else {
            WordKind::Temporary
        }
    }

    fn set_kind(&self, kind: WordKind) {
        self.inner.set_kind(kind);
        self.check();
    }

    fn last_picked(&self) -> DateTime<Utc> {
        self.inner.last_picked()
    }

    fn set_last_picked(&self, at: DateTime<Utc>) {
        self.inner.set_last_picked(at);
        self.check();
    }

    fn times_picked(&self) -> u32 {
        self.inner.times_picked()
    }

    fn set_times_picked(&self, n: u32) {
        self.inner.set_times_picked(n);
        self.check();
    }

    fn on_picked(&self, now: DateTime<Utc>, previous: Option<&str>) -> f64 {
        self.picks.set(self.picks.get() + 1);
        let factor = self.inner.on_picked(now, previous);
        self.check();
        factor
    }

    fn is_single_concrete(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        match self.pick_limit {
            Some(_) => format!("{}@{}", self.inner.key(), self.picks.get()),
            None => {
                let tier = self.inner.complexity().as_str();
                format!("{}@{}", self.inner.key(), &tier[..2])
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
