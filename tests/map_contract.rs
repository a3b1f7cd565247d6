use biased_search::{
    default_hash, AdaptiveHashTable, AnyMap, BiasedHashTable, BiasedSkipList, BiasedTreap, Map,
    RandomSource, SplayTree,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeMap;
use test_log::test;

const OP_COUNT: usize = 2_000;
const KEY_SPACE: u64 = 64;

fn engines() -> Vec<(&'static str, AnyMap<String, u64>)> {
    vec![
        (
            "treap",
            AnyMap::Treap(BiasedTreap::with_rng(false, RandomSource::seeded(1))),
        ),
        (
            "adaptive treap",
            AnyMap::Treap(BiasedTreap::with_rng(true, RandomSource::seeded(2))),
        ),
        (
            "skip list",
            AnyMap::SkipList(
                BiasedSkipList::with_rng(20, RandomSource::seeded(3)).expect("valid level"),
            ),
        ),
        (
            "open hash table",
            AnyMap::OpenTable(BiasedHashTable::new(8, default_hash).expect("valid capacity")),
        ),
        (
            "chained hash table",
            AnyMap::ChainedTable(AdaptiveHashTable::new(8, default_hash).expect("valid capacity")),
        ),
        ("splay tree", AnyMap::Splay(SplayTree::new())),
        ("ordered", AnyMap::Ordered(BTreeMap::new())),
    ]
}

#[test]
fn all_engines_obey_round_trip_laws() {
    for (name, mut map) in engines() {
        let k = || "k".to_owned();

        map.insert(k(), 1, 7);
        assert_eq!(Some(&1), map.get(&k()), "{name}: insert then get");

        map.insert(k(), 2, 9);
        assert_eq!(Some(&1), map.get(&k()), "{name}: duplicate insert is a no-op");
        assert_eq!(1, map.len(), "{name}: duplicate insert changes len");

        assert_eq!(Some(1), map.remove(&k()), "{name}: remove returns value");
        assert_eq!(None, map.get(&k()), "{name}: get after remove");
        assert!(map.is_empty(), "{name}: empty after remove");

        map.insert(k(), 3, 1);
        assert_eq!(Some(&3), map.get(&k()), "{name}: reinsert after remove");
    }
}

#[test]
fn all_engines_match_reference_semantics() {
    // Same seeded operation stream against every engine; every lookup and
    // the final length must match the BTreeMap reference
    for (name, mut map) in engines() {
        let mut reference = BTreeMap::<String, u64>::new();
        let mut rng = SmallRng::seed_from_u64(0xb1a5);

        for op in 0..OP_COUNT {
            let key = format!("key-{}", rng.random_range(0..KEY_SPACE));

            match rng.random_range(0..3u8) {
                0 => {
                    let weight = rng.random_range(0..100u64);
                    map.insert(key.clone(), op as u64, weight);
                    reference.entry(key).or_insert(op as u64);
                }
                1 => {
                    assert_eq!(
                        reference.get(&key),
                        map.get(&key),
                        "{name}: lookup mismatch at op {op}",
                    );
                }
                _ => {
                    assert_eq!(
                        reference.remove(&key),
                        map.remove(&key),
                        "{name}: remove mismatch at op {op}",
                    );
                }
            }
        }

        assert_eq!(reference.len(), map.len(), "{name}: final length");
    }
}

#[test]
fn nop_engine_discards_everything() {
    let mut map: AnyMap<String, u64> = AnyMap::Nop;

    map.insert("a".to_owned(), 1, 1);
    assert_eq!(None, map.get(&"a".to_owned()));
    assert_eq!(None, map.remove(&"a".to_owned()));
    assert_eq!(0, map.len());
    assert!(map.is_empty());
}
