use std::collections::HashSet;

use pokermachine_engine::cards::Card;
use pokermachine_engine::errors::GameError;
use pokermachine_engine::shoe::Shoe;

#[test]
fn rebuilt_shoe_holds_packs_times_52() {
    let mut shoe = Shoe::new_with_seed(10, 42);
    shoe.rebuild_and_shuffle();
    assert_eq!(shoe.active_len(), 520);
    assert_eq!(shoe.discard_len(), 0);
    assert_eq!(shoe.available(), 520);
}

#[test]
fn one_pack_shoe_has_52_unique_identities() {
    let mut shoe = Shoe::new_with_seed(1, 42);
    shoe.rebuild_and_shuffle();
    let cards = shoe.draw(52).expect("a full pack should be drawable");
    let set: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(set.len(), 52, "every card identity must be unique");
    assert_eq!(
        shoe.draw(1),
        Err(GameError::ShoeExhausted {
            requested: 1,
            available: 0
        })
    );
}

#[test]
fn duplicate_values_exist_across_packs() {
    let mut shoe = Shoe::new_with_seed(2, 9);
    shoe.rebuild_and_shuffle();
    let cards = shoe.draw(104).expect("both packs should be drawable");
    // Identities all distinct, but each (suit, rank) value appears twice
    let identities: HashSet<Card> = cards.iter().copied().collect();
    assert_eq!(identities.len(), 104);
    let values: HashSet<(_, _)> = cards.iter().map(|c| (c.suit, c.rank)).collect();
    assert_eq!(values.len(), 52);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut a = Shoe::new_with_seed(10, 12345);
    let mut b = Shoe::new_with_seed(10, 12345);
    a.rebuild_and_shuffle();
    b.rebuild_and_shuffle();
    let x = a.draw(10).unwrap();
    let y = b.draw(10).unwrap();
    assert_eq!(x, y, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut a = Shoe::new_with_seed(10, 1);
    let mut b = Shoe::new_with_seed(10, 2);
    a.rebuild_and_shuffle();
    b.rebuild_and_shuffle();
    let x = a.draw(10).unwrap();
    let y = b.draw(10).unwrap();
    assert_ne!(
        x, y,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn population_is_conserved_across_draw_discard_cycles() {
    let mut shoe = Shoe::new_with_seed(10, 7);
    shoe.rebuild_and_shuffle();
    for _ in 0..200 {
        let cards = shoe.draw(5).unwrap();
        assert_eq!(shoe.available() + cards.len(), 520);
        shoe.discard(&cards);
        assert_eq!(shoe.available(), 520);
    }
}

#[test]
fn draw_recycles_discards_when_active_runs_dry() {
    let mut shoe = Shoe::new_with_seed(1, 99);
    shoe.rebuild_and_shuffle();
    let first = shoe.draw(50).unwrap();
    shoe.discard(&first);
    assert_eq!(shoe.active_len(), 2);
    assert_eq!(shoe.discard_len(), 50);

    // Crossing the recycle boundary: the two never-discarded cards must come
    // out before anything recycled does
    let survivors: HashSet<Card> = {
        let discarded: HashSet<Card> = first.iter().copied().collect();
        let mut all = Shoe::new_with_seed(1, 99);
        all.rebuild_and_shuffle();
        all.draw(52)
            .unwrap()
            .into_iter()
            .filter(|c| !discarded.contains(c))
            .collect()
    };
    let next = shoe.draw(5).expect("recycle should cover the draw");
    assert!(survivors.contains(&next[0]));
    assert!(survivors.contains(&next[1]));
    assert_eq!(shoe.available(), 47);
    assert_eq!(shoe.discard_len(), 0);
}

#[test]
fn draw_fails_when_circulation_cannot_cover_it() {
    let mut shoe = Shoe::new_with_seed(1, 3);
    shoe.rebuild_and_shuffle();
    assert_eq!(
        shoe.draw(53),
        Err(GameError::ShoeExhausted {
            requested: 53,
            available: 52
        })
    );
    // A failed draw takes nothing
    assert_eq!(shoe.available(), 52);
}

#[test]
fn ensure_capacity_rebuilds_only_below_threshold() {
    let mut shoe = Shoe::new_with_seed(1, 5);
    shoe.rebuild_and_shuffle();
    assert!(!shoe.ensure_capacity(15), "52 in circulation is plenty");
    assert_eq!(shoe.active_len(), 52);

    let _ = shoe.draw(40).unwrap();
    assert_eq!(shoe.available(), 12);
    assert!(shoe.ensure_capacity(15), "12 left must force a rebuild");
    assert_eq!(shoe.available(), 52);
    assert_eq!(shoe.discard_len(), 0);
}

#[test]
fn ensure_capacity_counts_discards_as_circulation() {
    let mut shoe = Shoe::new_with_seed(1, 5);
    shoe.rebuild_and_shuffle();
    let drawn = shoe.draw(45).unwrap();
    shoe.discard(&drawn[..40]);
    assert_eq!(shoe.active_len(), 7);
    assert_eq!(shoe.discard_len(), 40);
    assert!(
        !shoe.ensure_capacity(15),
        "discards count toward circulation"
    );
    assert_eq!(shoe.discard_len(), 40);
}
