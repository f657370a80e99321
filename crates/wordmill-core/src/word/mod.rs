//! Word Module
//!
//! Everything the engine knows about a single vocabulary item:
//! - [`Word`] - the capability trait all item flavors implement
//! - [`WordEntry`] - a concrete vocabulary record
//! - [`SlotWord`] - a pool-backed slot that re-draws its delegate on every pick
//! - [`ConditionedWord`] - a wrapper that leaves its pool when a predicate fails
//! - [`SlotFactory`] - the per-session registry of auxiliary pools
//!
//! Items are shared, mutable value holders: the pool, the factory and the
//! caller that just received a pick may all alias the same word. The engine
//! is single-threaded (one pick or mutation in flight at a time), so the
//! sharing model is `Rc<dyn Word>` with interior mutability inside each
//! implementation. Mutation is funneled through the trait's setters so the
//! wrappers can observe it.

mod complexity;
mod conditioned;
mod entry;
mod factory;
mod kind;
mod slot;

pub use complexity::Complexity;
pub use conditioned::ConditionedWord;
pub use entry::{WordEntry, WordRecord};
pub use factory::SlotFactory;
pub use kind::WordKind;
pub use slot::SlotWord;

use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;
use std::rc::Rc;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Word data error
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum WordError {
    /// Unknown word kind name
    #[error("Unknown word kind: {0}")]
    UnknownKind(String),
    /// Unknown complexity tier name
    #[error("Unknown complexity tier: {0}")]
    UnknownComplexity(String),
    /// A record arrived without a key
    #[error("Word record has an empty key")]
    EmptyKey,
}

// ============================================================================
// CAPABILITY TRAIT
// ============================================================================

/// Shared handle to any word flavor.
pub type WordRef = Rc<dyn Word>;

/// Predicate over a word, used by conditioned wrappers.
pub type WordPredicate = Box<dyn Fn(&dyn Word) -> bool>;

/// The capability every drill item exposes.
///
/// Accessors take `&self`; implementations hold their state in cells.
/// Wrappers forward each call to the item they decorate and may react to
/// mutations (a conditioned word re-checks its predicate after every
/// setter), which is why mutation must go through these methods rather
/// than struct fields.
pub trait Word {
    /// Stable textual key; unique across a vocabulary.
    fn key(&self) -> String;
    /// Replace the key. Normalized to trimmed lowercase.
    fn set_key(&self, key: &str);

    /// Native-language translation.
    fn translation(&self) -> String;
    /// Replace the translation. Normalized to trimmed lowercase.
    fn set_translation(&self, translation: &str);

    /// Synonym list, free-form.
    fn synonyms(&self) -> String;
    /// Replace the synonyms. Normalized to trimmed lowercase.
    fn set_synonyms(&self, synonyms: &str);

    /// Date of the bundle the word was introduced in.
    fn bundle(&self) -> Option<NaiveDate>;
    /// Set the bundle date.
    fn set_bundle(&self, date: Option<NaiveDate>);

    /// Cached pronunciation audio, attached lazily by the host.
    fn audio(&self) -> Option<PathBuf>;
    /// Attach or clear the pronunciation audio.
    fn set_audio(&self, audio: Option<PathBuf>);

    /// Current difficulty tier.
    fn complexity(&self) -> Complexity;
    /// Change the difficulty tier.
    fn set_complexity(&self, complexity: Complexity);

    /// Current drill role.
    fn kind(&self) -> WordKind;
    /// Change the drill role.
    fn set_kind(&self, kind: WordKind);

    /// When the word was last picked; `UNIX_EPOCH` if never.
    fn last_picked(&self) -> DateTime<Utc>;
    /// Overwrite the last-picked timestamp.
    fn set_last_picked(&self, at: DateTime<Utc>);

    /// How many times the word has been picked.
    fn times_picked(&self) -> u32;
    /// Overwrite the pick counter.
    fn set_times_picked(&self, n: u32);

    /// Notify the word it has been picked.
    ///
    /// `previous` is the key of the previously shown word, used by slots
    /// for collision avoidance. Returns the delegation probability factor
    /// this item contributes: 1.0 for concrete words, the auxiliary pool's
    /// pick probability for slots. The pool multiplies its own strategy
    /// probability by this factor, so nested decoration composes
    /// multiplicatively layer by layer with no ambient state.
    fn on_picked(&self, now: DateTime<Utc>, previous: Option<&str>) -> f64;

    /// False for pool-backed slots, true for everything that stands for
    /// exactly one concrete record. Drives key-based dedup in
    /// [`Pool::contains`](crate::pool::Pool::contains).
    fn is_single_concrete(&self) -> bool;

    /// Short label for pool dumps.
    fn describe(&self) -> String;
}

/// Identity comparison for shared word handles.
pub(crate) fn same_word(a: &WordRef, b: &WordRef) -> bool {
    Rc::ptr_eq(a, b)
}
