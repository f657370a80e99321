//! # Wordmill Core
//!
//! Word-selection engine for a personal vocabulary drill. The engine owns
//! the question "which word comes next?" and nothing else - no storage, no
//! rendering, no scheduling of the drill itself.
//!
//! - **Pool**: ready words plus an anti-repeat queue; a pick never changes
//!   the pool's size
//! - **Strategies**: uniform or cumulative-weight sampling with pluggable
//!   [`Weighter`]s (difficulty, staleness, bundle recency)
//! - **Slots**: pool-backed words that re-draw their content from an
//!   auxiliary pool (repeat / random / review) on every pick
//! - **Conditioned words**: wrappers that remove themselves from their
//!   pool when a predicate stops holding or a pick budget runs out
//! - **Probability tracking**: every pick reports the probability it was
//!   chosen with, composed multiplicatively through nested slots
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wordmill_core::prelude::*;
//! use chrono::Utc;
//!
//! let pool = Pool::with_strategy(strategy::standard_everyday());
//! pool.add(WordEntry::with_key("serendipity", "glücksfund").into_ref());
//! pool.add(WordEntry::with_key("lucid", "klar").into_ref());
//! pool.add(WordEntry::with_key("gregarious", "gesellig").into_ref());
//!
//! let word = pool.pick(Utc::now(), None);
//! println!("{} ({:.0}%)", word.key(), pool.last_pick_probability() * 100.0);
//! ```
//!
//! The engine is single-threaded by design: one drill session, one pick in
//! flight at a time. Handles are `Rc`-based and none of the types are
//! `Send`.

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod clock;
pub mod diag;
pub mod pool;
pub mod word;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Word types
pub use word::{
    Complexity, ConditionedWord, SlotFactory, SlotWord, Word, WordEntry, WordError, WordKind,
    WordPredicate, WordRecord, WordRef,
};

// Pool and selection
pub use pool::strategy::{self, PickStrategy, Picked, UniformStrategy, WeightedStrategy};
pub use pool::weight::{
    ComplexityWeighter, CompoundWeighter, DurationWeighter, RecentDurationWeighter, Weighter,
};
pub use pool::{Pool, WeakPool};

// Diagnostics
pub use diag::{BufferSink, DiagnosticSink};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::strategy;
    pub use crate::{
        Complexity, ConditionedWord, Pool, SlotFactory, SlotWord, Word, WordEntry, WordKind,
        WordRecord, WordRef,
    };
}
