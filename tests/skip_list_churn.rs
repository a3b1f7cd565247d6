use biased_search::{BiasedSkipList, RandomSource};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use test_log::test;

const ITEM_COUNT: usize = 1_000;

#[test]
fn skip_list_membership_under_churn() {
    let mut rng = SmallRng::seed_from_u64(123);
    let mut list = BiasedSkipList::with_rng(20, RandomSource::seeded(123)).expect("valid level");

    let keys: Vec<String> = (0..ITEM_COUNT).map(|_| nanoid::nanoid!(8)).collect();

    for (i, key) in keys.iter().enumerate() {
        let weight = rng.random_range(0..10u64);
        list.insert(key.clone(), i, weight);
    }

    assert_eq!(ITEM_COUNT, list.len());
    assert!(list.check_invariants());

    // Erase the contiguous middle half
    for key in keys.iter().take(750).skip(250) {
        assert!(list.remove(key).is_some());
    }

    assert_eq!(ITEM_COUNT / 2, list.len());
    assert!(list.check_invariants());

    for (i, key) in keys.iter().enumerate() {
        if (250..750).contains(&i) {
            assert_eq!(None, list.get(key));
        } else {
            assert_eq!(Some(&i), list.get(key));
        }
    }
}

#[test]
fn skip_list_round_trip() {
    let mut list = BiasedSkipList::new(16).expect("valid level");

    list.insert("a", 1, 1);
    assert_eq!(Some(&1), list.get(&"a"));

    assert_eq!(Some(1), list.remove(&"a"));
    assert_eq!(None, list.get(&"a"));
    assert!(list.is_empty());
}

#[test]
fn skip_list_duplicate_insert_is_noop() {
    let mut list = BiasedSkipList::new(16).expect("valid level");

    list.insert("a", 1, 1);
    list.insert("a", 2, 100);

    assert_eq!(Some(&1), list.get(&"a"));
    assert_eq!(1, list.len());
}

#[test]
fn skip_list_remove_absent_is_noop() {
    let mut list = BiasedSkipList::new(16).expect("valid level");

    list.insert("a", 1, 1);
    assert_eq!(None, list.remove(&"b"));
    assert_eq!(1, list.len());
}
