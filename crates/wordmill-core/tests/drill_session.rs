//! End-to-end drill session over the public API: a base pool mixing
//! concrete words, factory-drawn slots and a self-deleting wrapper.

use chrono::{Duration, Utc};
use std::rc::Rc;

use wordmill_core::{
    strategy, Complexity, ConditionedWord, Pool, SlotFactory, SlotWord, Word, WordEntry, WordKind,
    WordRef,
};

fn entry(key: &str, complexity: Complexity) -> WordRef {
    let word = WordEntry::with_key(key, &format!("{key}-übersetzung"));
    word.set_complexity(complexity);
    word.into_ref()
}

fn vocabulary(prefix: &str, n: usize) -> Vec<WordRef> {
    let tiers = Complexity::ORDERED;
    (0..n)
        .map(|i| entry(&format!("{prefix}-{i}"), tiers[i % tiers.len()]))
        .collect()
}

#[test]
fn session_pool_size_is_stable_and_never_stutters() {
    let now = Utc::now();

    let factory = SlotFactory::new();
    let slots = factory.draw_slots(WordKind::Review, 2, vocabulary("review", 9), now);
    assert_eq!(slots.len(), 2);

    let pool = Pool::with_strategy(strategy::standard_everyday());
    pool.add_all(vocabulary("base", 20));
    pool.add_all(slots);
    let size = pool.size();

    let mut previous: Option<String> = None;
    let mut clock = now;
    for _ in 0..200 {
        clock += Duration::minutes(1);
        let word = pool.pick(clock, previous.as_deref());
        let key = word.key();

        assert_eq!(pool.size(), size);
        assert!(!key.is_empty());
        // Anti-repeat: the queue blocks concrete repicks and slots re-draw
        // around the previous key
        if let Some(prev) = &previous {
            assert_ne!(&key, prev, "same word shown twice in a row");
        }

        let p = pool.last_pick_probability();
        assert!(p > 0.0 && p <= 1.0, "probability out of range: {p}");
        previous = Some(key);
    }
}

#[test]
fn probability_composes_through_a_slot_layer() {
    let now = Utc::now();
    let aux_keys = ["a", "b", "c", "d"];

    // A first pick on a fresh uniform pool of four is exactly 1/4; going
    // through the slot multiplies in the auxiliary pool's own 1/4
    let mut saw_slot = false;
    let mut saw_concrete = false;
    for _ in 0..200 {
        let aux = Pool::new(); // uniform
        aux.add_all(aux_keys.map(|k| entry(k, Complexity::Normal)));

        let pool = Pool::new(); // uniform
        pool.add_all(["x", "y", "z"].map(|k| entry(k, Complexity::Normal)));
        let slot: WordRef = Rc::new(SlotWord::new(WordKind::Review, aux));
        pool.add(slot);

        let word = pool.pick(now, None);
        if aux_keys.contains(&word.key().as_str()) {
            assert_eq!(pool.last_pick_probability(), 0.0625);
            saw_slot = true;
        } else {
            assert_eq!(pool.last_pick_probability(), 0.25);
            saw_concrete = true;
        }
        if saw_slot && saw_concrete {
            return;
        }
    }
    panic!("200 first picks never exercised both paths");
}

#[test]
fn self_deleting_word_leaves_mid_session() {
    let now = Utc::now();

    let pool = Pool::new();
    pool.add_all(vocabulary("base", 6));
    let wrapped = ConditionedWord::self_deleting(
        entry("stubborn", Complexity::Challenging),
        &pool,
        None,
        None,
    );
    let handle: WordRef = wrapped;
    pool.add(handle);
    assert_eq!(pool.size(), 7);

    let mut clock = now;
    for _ in 0..500 {
        clock += Duration::minutes(1);
        pool.pick(clock, None);
        if !pool.contains("stubborn") {
            assert_eq!(pool.size(), 6);
            return;
        }
    }
    panic!("the pick budget never ran out in 500 picks");
}

#[test]
fn slot_servings_land_on_auxiliary_words() {
    let now = Utc::now();

    let candidates = vocabulary("repeat", 9);
    let factory = SlotFactory::new();
    let slots = factory.draw_slots(WordKind::Repeat, 3, candidates.iter().cloned(), now);

    let pool = Pool::new();
    pool.add_all(slots);
    pool.add_all(vocabulary("base", 3));

    let mut clock = now;
    for _ in 0..30 {
        clock += Duration::minutes(1);
        pool.pick(clock, None);
    }

    // Every serving of a slot was drawn from (and recorded on) a candidate
    let servings: u32 = candidates.iter().map(|word| word.times_picked()).sum();
    assert!(servings > 0, "no slot was ever picked in 30 draws");
}
