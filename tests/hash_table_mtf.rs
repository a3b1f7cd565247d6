use biased_search::{default_hash, AdaptiveHashTable, Error};
use test_log::test;

fn collide(_key: &String) -> u64 {
    0
}

#[test]
fn mtf_rejects_zero_capacity() {
    assert_eq!(
        Err(Error::InvalidParameter("initial_capacity")),
        AdaptiveHashTable::<String, u64>::new(0, default_hash).map(|_| ()),
    );
}

#[test]
fn mtf_promotes_accessed_key_to_bucket_head() {
    let mut table = AdaptiveHashTable::new(16, collide).expect("valid capacity");

    for i in 0..10u64 {
        table.insert(format!("k{i}"), i);
    }

    // Freshly inserted entries sit at the head; access an old one twice
    let key = "k9".to_owned();
    assert_eq!(Some(&9), table.get(&key));
    assert_eq!(Some(&9), table.get(&key));

    assert_eq!(Some(&key), table.bucket_head_key(&key));
}

#[test]
fn mtf_rotates_mid_chain_hit() {
    let mut table = AdaptiveHashTable::new(16, collide).expect("valid capacity");

    for i in 0..5u64 {
        table.insert(format!("k{i}"), i);
    }

    // k4 was inserted last, so k1 is buried mid-chain
    let key = "k1".to_owned();
    assert_eq!(Some(&1), table.get(&key));
    assert_eq!(Some(&key), table.bucket_head_key(&key));

    // Everything else is still reachable
    for i in 0..5u64 {
        assert_eq!(Some(&i), table.get(&format!("k{i}")));
    }
}

#[test]
fn mtf_duplicate_insert_is_noop() {
    let mut table = AdaptiveHashTable::new(16, collide).expect("valid capacity");

    table.insert("a".to_owned(), 1u64);
    table.insert("a".to_owned(), 2);

    assert_eq!(Some(&1), table.get(&"a".to_owned()));
    assert_eq!(1, table.len());
}

#[test]
fn mtf_remove_head_and_chain() {
    let mut table = AdaptiveHashTable::new(16, collide).expect("valid capacity");

    for i in 0..4u64 {
        table.insert(format!("k{i}"), i);
    }

    // Head (most recent insert)
    assert_eq!(Some(3), table.remove(&"k3".to_owned()));
    // Chain middle
    assert_eq!(Some(1), table.remove(&"k1".to_owned()));
    // Absent
    assert_eq!(None, table.remove(&"k9".to_owned()));

    assert_eq!(2, table.len());
    assert_eq!(Some(&0), table.get(&"k0".to_owned()));
    assert_eq!(Some(&2), table.get(&"k2".to_owned()));
    assert_eq!(None, table.get(&"k1".to_owned()));
}

#[test]
fn mtf_grows_under_load() {
    let mut table = AdaptiveHashTable::new(8, default_hash).expect("valid capacity");

    for i in 0..100u64 {
        table.insert(format!("key-{i}"), i);
    }

    assert_eq!(100, table.len());
    assert!(table.capacity() >= 128);

    for i in 0..100u64 {
        assert_eq!(Some(&i), table.get(&format!("key-{i}")));
    }
}
