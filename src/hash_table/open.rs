// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Open-addressed hash table with weight-biased placement.
//!
//! Probe sequences are kept sorted by descending weight, like Robin Hood
//! hashing keyed by weight instead of probe distance: inserting a heavy
//! key shifts the lighter tail of its cluster one step forward, so heavy
//! keys sit early in their probe sequence and are found in few probes.

use crate::{
    error::{Error, Result},
    map::{Map, Weight},
};
use log::debug;

struct Bucket<K, V> {
    key: K,
    value: V,
    weight: Weight,
}

enum Slot<K, V> {
    Vacant,
    /// Erased slot; lookups probe past it, rehash discards it.
    Tombstone,
    Occupied(Bucket<K, V>),
}

/// Map placing heavier keys closer to their hash slot.
///
/// Needs a caller-supplied hash function; [`crate::default_hash`] works
/// for byte-like keys.
pub struct BiasedHashTable<K, V> {
    slots: Vec<Slot<K, V>>,
    /// Occupied slots.
    live: usize,
    /// Occupied plus tombstoned slots; drives the rehash trigger so
    /// clusters of tombstones cannot degrade probing indefinitely.
    used: usize,
    hash: fn(&K) -> u64,
}

impl<K, V> BiasedHashTable<K, V> {
    /// Creates a table with the given number of slots.
    ///
    /// # Errors
    ///
    /// Fails if `initial_capacity` is zero.
    pub fn new(initial_capacity: usize, hash: fn(&K) -> u64) -> Result<Self> {
        if initial_capacity == 0 {
            return Err(Error::InvalidParameter("initial_capacity"));
        }

        Ok(Self {
            slots: (0..initial_capacity).map(|_| Slot::Vacant).collect(),
            live: 0,
            used: 0,
            hash,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index(&self, key: &K) -> usize {
        ((self.hash)(key) % self.slots.len() as u64) as usize
    }

    fn slot(&self, idx: usize) -> &Slot<K, V> {
        self.slots.get(idx).expect("slot should exist")
    }

    fn slot_mut(&mut self, idx: usize) -> &mut Slot<K, V> {
        self.slots.get_mut(idx).expect("slot should exist")
    }
}

impl<K: Eq, V> BiasedHashTable<K, V> {
    fn find_slot(&self, key: &K) -> Option<usize> {
        let cap = self.slots.len();
        let home = self.index(key);

        for offset in 0..cap {
            let idx = (home + offset) % cap;
            match self.slot(idx) {
                Slot::Vacant => return None,
                Slot::Tombstone => {}
                Slot::Occupied(bucket) => {
                    if bucket.key == *key {
                        return Some(idx);
                    }
                }
            }
        }

        None
    }

    /// Claims a slot for the bucket, keeping every probe sequence sorted
    /// by descending weight. The rehash trigger keeps at least one slot
    /// vacant, so both scans terminate.
    fn place(&mut self, key: K, value: V, weight: Weight) {
        let cap = self.slots.len();

        // Probe past residents that dominate the new weight; equal-weight
        // cohorts keep insertion order
        let mut claim = self.index(&key);
        loop {
            match self.slot(claim) {
                Slot::Vacant | Slot::Tombstone => break,
                Slot::Occupied(bucket) if bucket.weight >= weight => {
                    claim = (claim + 1) % cap;
                }
                Slot::Occupied(_) => break,
            }
        }

        // Free slot that absorbs the shifted tail of the cluster
        let mut end = claim;
        while matches!(self.slot(end), Slot::Occupied(_)) {
            end = (end + 1) % cap;
        }

        if matches!(self.slot(end), Slot::Vacant) {
            self.used += 1;
        }

        let mut dst = end;
        while dst != claim {
            let src = (dst + cap - 1) % cap;
            let moved = std::mem::replace(self.slot_mut(src), Slot::Vacant);
            *self.slot_mut(dst) = moved;
            dst = src;
        }

        *self.slot_mut(claim) = Slot::Occupied(Bucket { key, value, weight });
    }

    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        debug!(
            "growing hash table from {} to {new_capacity} slots",
            self.slots.len(),
        );

        let old = std::mem::replace(
            &mut self.slots,
            (0..new_capacity).map(|_| Slot::Vacant).collect(),
        );
        self.used = 0;

        for slot in old {
            if let Slot::Occupied(bucket) = slot {
                self.place(bucket.key, bucket.value, bucket.weight);
            }
        }
    }

    /// Inserts a key with the given weight.
    ///
    /// Re-inserting a present key is a no-op.
    pub fn insert(&mut self, key: K, value: V, weight: Weight) {
        if self.find_slot(&key).is_some() {
            return;
        }

        if (self.used + 1) * 10 > self.slots.len() * 9 {
            self.grow();
        }

        self.place(key, value, weight.max(1));
        self.live += 1;
    }

    /// Looks up a key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.find_slot(key)?;
        match self.slot(idx) {
            Slot::Occupied(bucket) => Some(&bucket.value),
            _ => None,
        }
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.find_slot(key)?;
        match std::mem::replace(self.slot_mut(idx), Slot::Tombstone) {
            Slot::Occupied(bucket) => {
                self.live -= 1;
                Some(bucket.value)
            }
            // find_slot only returns occupied slots
            _ => None,
        }
    }

    /// Checks that every present key's probe sequence is a run of
    /// present keys with weight at least its own.
    ///
    /// Only meaningful for insert-only histories; erasing punches
    /// tombstone holes that relax the property until the next rehash.
    #[doc(hidden)]
    #[must_use]
    pub fn check_probe_invariant(&self) -> bool {
        let cap = self.slots.len();

        for idx in 0..cap {
            let Slot::Occupied(bucket) = self.slot(idx) else {
                continue;
            };

            let mut probe = self.index(&bucket.key);
            while probe != idx {
                match self.slot(probe) {
                    Slot::Occupied(earlier) if earlier.weight >= bucket.weight => {}
                    _ => return false,
                }
                probe = (probe + 1) % cap;
            }
        }

        true
    }
}

impl<K: Eq, V> Map<K, V> for BiasedHashTable<K, V> {
    fn insert(&mut self, key: K, value: V, weight: Weight) {
        Self::insert(self, key, value, weight);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Self::remove(self, key)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}
