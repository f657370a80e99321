//! Concrete vocabulary record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use super::{Complexity, Word, WordError, WordKind, WordRef};

// ============================================================================
// WORD ENTRY
// ============================================================================

/// A single concrete vocabulary word.
///
/// State lives in cells so the entry can be mutated through a shared
/// [`WordRef`] handle; the engine is single-threaded, so no locking.
#[derive(Debug, Default)]
pub struct WordEntry {
    key: RefCell<String>,
    translation: RefCell<String>,
    synonyms: RefCell<String>,
    bundle: Cell<Option<NaiveDate>>,
    audio: RefCell<Option<PathBuf>>,
    complexity: Cell<Complexity>,
    kind: Cell<WordKind>,
    last_picked: Cell<DateTime<Utc>>,
    times_picked: Cell<u32>,
}

impl WordEntry {
    /// Empty entry: kind Standard, complexity Normal, never picked.
    pub fn new() -> Self {
        Self {
            last_picked: Cell::new(DateTime::UNIX_EPOCH),
            ..Self::default()
        }
    }

    /// Entry with a key and translation already set (normalized).
    pub fn with_key(key: &str, translation: &str) -> Self {
        let entry = Self::new();
        entry.set_key(key);
        entry.set_translation(translation);
        entry
    }

    /// Build an entry from a plain record coming out of persistence.
    pub fn from_record(record: WordRecord) -> Result<Self, WordError> {
        if record.key.trim().is_empty() {
            return Err(WordError::EmptyKey);
        }

        let entry = Self::new();
        entry.set_key(&record.key);
        entry.set_translation(&record.translation);
        entry.set_synonyms(&record.synonyms);
        entry.set_bundle(record.bundle);
        entry.complexity.set(record.complexity);
        entry.kind.set(record.kind);
        entry.last_picked.set(record.last_picked);
        entry.times_picked.set(record.times_picked);
        Ok(entry)
    }

    /// Snapshot the entry as a plain record for persistence.
    pub fn record(&self) -> WordRecord {
        WordRecord {
            key: self.key(),
            translation: self.translation(),
            synonyms: self.synonyms(),
            bundle: self.bundle(),
            complexity: self.complexity(),
            kind: self.kind(),
            last_picked: self.last_picked(),
            times_picked: self.times_picked(),
        }
    }

    /// Move the entry behind a shared trait handle.
    pub fn into_ref(self) -> WordRef {
        Rc::new(self)
    }
}

impl Word for WordEntry {
    fn key(&self) -> String {
        self.key.borrow().clone()
    }

    fn set_key(&self, key: &str) {
        *self.key.borrow_mut() = key.trim().to_lowercase();
        // the cached audio belongs to the old spelling
        *self.audio.borrow_mut() = None;
    }

    fn translation(&self) -> String {
        self.translation.borrow().clone()
    }

    fn set_translation(&self, translation: &str) {
        *self.translation.borrow_mut() = translation.trim().to_lowercase();
    }

    fn synonyms(&self) -> String {
        self.synonyms.borrow().clone()
    }

    fn set_synonyms(&self, synonyms: &str) {
        *self.synonyms.borrow_mut() = synonyms.trim().to_lowercase();
    }

    fn bundle(&self) -> Option<NaiveDate> {
        self.bundle.get()
    }

    fn set_bundle(&self, date: Option<NaiveDate>) {
        self.bundle.set(date);
    }

    fn audio(&self) -> Option<PathBuf> {
        self.audio.borrow().clone()
    }

    fn set_audio(&self, audio: Option<PathBuf>) {
        *self.audio.borrow_mut() = audio;
    }

    fn complexity(&self) -> Complexity {
        self.complexity.get()
    }

    fn set_complexity(&self, complexity: Complexity) {
        self.complexity.set(complexity);
    }

    fn kind(&self) -> WordKind {
        self.kind.get()
    }

    fn set_kind(&self, kind: WordKind) {
        self.kind.set(kind);
    }

    fn last_picked(&self) -> DateTime<Utc> {
        self.last_picked.get()
    }

    fn set_last_picked(&self, at: DateTime<Utc>) {
        self.last_picked.set(at);
    }

    fn times_picked(&self) -> u32 {
        self.times_picked.get()
    }

    fn set_times_picked(&self, n: u32) {
        self.times_picked.set(n);
    }

    fn on_picked(&self, now: DateTime<Utc>, _previous: Option<&str>) -> f64 {
        self.times_picked.set(self.times_picked.get() + 1);
        self.last_picked.set(now);
        1.0
    }

    fn is_single_concrete(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        self.key()
    }
}

// ============================================================================
// PLAIN RECORD
// ============================================================================

/// Plain serializable snapshot of a [`WordEntry`].
///
/// This is the shape the engine exchanges with persistence collaborators;
/// the engine itself never reads or writes storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    /// Unique textual key
    pub key: String,
    /// Native-language translation
    #[serde(default)]
    pub translation: String,
    /// Free-form synonym list
    #[serde(default)]
    pub synonyms: String,
    /// Bundle (introduction batch) date
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bundle: Option<NaiveDate>,
    /// Difficulty tier
    #[serde(default)]
    pub complexity: Complexity,
    /// Drill role
    #[serde(default)]
    pub kind: WordKind,
    /// Last pick timestamp; epoch when never picked
    #[serde(default = "epoch")]
    pub last_picked: DateTime<Utc>,
    /// Total picks so far
    #[serde(default)]
    pub times_picked: u32,
}

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_normalize() {
        let entry = WordEntry::new();
        entry.set_key("  Serendipity ");
        entry.set_translation(" GLÜCKSFUND ");
        entry.set_synonyms(" Fluke; Chance ");

        assert_eq!(entry.key(), "serendipity");
        assert_eq!(entry.translation(), "glücksfund");
        assert_eq!(entry.synonyms(), "fluke; chance");
    }

    #[test]
    fn test_set_key_drops_cached_audio() {
        let entry = WordEntry::with_key("ephemeral", "flüchtig");
        entry.set_audio(Some(PathBuf::from("/tmp/ephemeral.mp3")));
        entry.set_key("evanescent");
        assert!(entry.audio().is_none());
    }

    #[test]
    fn test_on_picked_updates_stats() {
        let entry = WordEntry::with_key("gregarious", "gesellig");
        let now = Utc::now();

        assert_eq!(entry.times_picked(), 0);
        assert_eq!(entry.last_picked(), DateTime::UNIX_EPOCH);

        let factor = entry.on_picked(now, Some("previous"));
        assert_eq!(factor, 1.0);
        assert_eq!(entry.times_picked(), 1);
        assert_eq!(entry.last_picked(), now);
    }

    #[test]
    fn test_record_roundtrip() {
        let entry = WordEntry::with_key("lucid", "klar");
        entry.set_complexity(Complexity::Tough);
        entry.set_bundle(NaiveDate::from_ymd_opt(2026, 5, 1));
        entry.set_times_picked(7);

        let json = serde_json::to_string(&entry.record()).unwrap();
        let back: WordRecord = serde_json::from_str(&json).unwrap();
        let restored = WordEntry::from_record(back).unwrap();

        assert_eq!(restored.key(), "lucid");
        assert_eq!(restored.complexity(), Complexity::Tough);
        assert_eq!(restored.times_picked(), 7);
        assert_eq!(restored.bundle(), NaiveDate::from_ymd_opt(2026, 5, 1));
    }

    #[test]
    fn test_from_record_rejects_empty_key() {
        let record = WordRecord {
            key: "   ".to_string(),
            translation: String::new(),
            synonyms: String::new(),
            bundle: None,
            complexity: Complexity::Normal,
            kind: WordKind::Standard,
            last_picked: DateTime::UNIX_EPOCH,
            times_picked: 0,
        };
        assert!(matches!(
            WordEntry::from_record(record),
            Err(WordError::EmptyKey)
        ));
    }
}
