// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Chained hash table with a move-to-front discipline.
//!
//! Buckets are a head slot plus a singly linked overflow chain. Every hit
//! rotates the found entry to the head of its chain, so frequently
//! accessed keys drift toward the front without carrying an explicit
//! weight.

use crate::{
    error::{Error, Result},
    map::{Map, Weight},
};
use log::debug;

struct Link<K, V> {
    key: K,
    value: V,
    next: Option<Box<Link<K, V>>>,
}

struct BucketHead<K, V> {
    key: K,
    value: V,
    chain: Option<Box<Link<K, V>>>,
}

/// Map that adapts to the access pattern instead of explicit weights.
///
/// Needs a caller-supplied hash function; [`crate::default_hash`] works
/// for byte-like keys.
pub struct AdaptiveHashTable<K, V> {
    buckets: Vec<Option<BucketHead<K, V>>>,
    len: usize,
    hash: fn(&K) -> u64,
}

impl<K, V> AdaptiveHashTable<K, V> {
    /// Creates a table with the given number of buckets.
    ///
    /// # Errors
    ///
    /// Fails if `initial_capacity` is zero.
    pub fn new(initial_capacity: usize, hash: fn(&K) -> u64) -> Result<Self> {
        if initial_capacity == 0 {
            return Err(Error::InvalidParameter("initial_capacity"));
        }

        Ok(Self {
            buckets: (0..initial_capacity).map(|_| None).collect(),
            len: 0,
            hash,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index(&self, key: &K) -> usize {
        ((self.hash)(key) % self.buckets.len() as u64) as usize
    }

    /// Writes the entry into the head slot, displacing the prior head
    /// into a fresh link at the front of the chain.
    fn push_front(&mut self, key: K, value: V) {
        let idx = self.index(&key);
        let slot = self.buckets.get_mut(idx).expect("bucket should exist");

        match slot {
            None => {
                *slot = Some(BucketHead {
                    key,
                    value,
                    chain: None,
                });
            }
            Some(head) => {
                let displaced = Link {
                    key: std::mem::replace(&mut head.key, key),
                    value: std::mem::replace(&mut head.value, value),
                    next: head.chain.take(),
                };
                head.chain = Some(Box::new(displaced));
            }
        }
    }

    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        debug!(
            "growing hash table from {} to {new_capacity} buckets",
            self.buckets.len(),
        );

        let old = std::mem::replace(
            &mut self.buckets,
            (0..new_capacity).map(|_| None).collect(),
        );

        for bucket in old.into_iter().flatten() {
            self.push_front(bucket.key, bucket.value);

            let mut cursor = bucket.chain;
            while let Some(link) = cursor {
                let link = *link;
                self.push_front(link.key, link.value);
                cursor = link.next;
            }
        }
    }
}

impl<K: Eq, V> AdaptiveHashTable<K, V> {
    fn contains(&self, key: &K) -> bool {
        let idx = self.index(key);
        let Some(head) = self.buckets.get(idx).and_then(Option::as_ref) else {
            return false;
        };

        if head.key == *key {
            return true;
        }

        let mut cursor = &head.chain;
        while let Some(link) = cursor {
            if link.key == *key {
                return true;
            }
            cursor = &link.next;
        }

        false
    }

    /// Inserts a key-value pair at the head of its bucket.
    ///
    /// Re-inserting a present key is a no-op.
    pub fn insert(&mut self, key: K, value: V) {
        if self.contains(&key) {
            return;
        }

        if (self.len + 1) * 10 > self.buckets.len() * 9 {
            self.grow();
        }

        self.push_front(key, value);
        self.len += 1;
    }

    /// Looks up a key, rotating a hit to the head of its bucket.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = self.index(key);

        // Head hit needs no reshaping
        if self
            .buckets
            .get(idx)
            .and_then(Option::as_ref)
            .is_some_and(|head| head.key == *key)
        {
            return self
                .buckets
                .get(idx)
                .and_then(Option::as_ref)
                .map(|head| &head.value);
        }

        let head = self.buckets.get_mut(idx).and_then(Option::as_mut)?;

        // Unlink the matching chain node
        let mut cursor = &mut head.chain;
        loop {
            match cursor {
                None => return None,
                Some(link) if link.key == *key => break,
                Some(link) => cursor = &mut link.next,
            }
        }
        let mut hit = cursor.take()?;
        *cursor = hit.next.take();

        // Move-to-front: the hit takes over the head slot, the old head
        // becomes the first chain link (reusing the detached allocation)
        std::mem::swap(&mut head.key, &mut hit.key);
        std::mem::swap(&mut head.value, &mut hit.value);
        hit.next = head.chain.take();
        head.chain = Some(hit);

        Some(&head.value)
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.index(key);
        let slot = self.buckets.get_mut(idx)?;

        if slot.as_ref().is_some_and(|head| head.key == *key) {
            let mut head = slot.take().expect("head should exist");
            self.len -= 1;

            // Pull the first chain link up into the head slot
            if let Some(first) = head.chain.take() {
                let first = *first;
                *slot = Some(BucketHead {
                    key: first.key,
                    value: first.value,
                    chain: first.next,
                });
            }

            return Some(head.value);
        }

        let head = slot.as_mut()?;
        let mut cursor = &mut head.chain;
        loop {
            match cursor {
                None => return None,
                Some(link) if link.key == *key => break,
                Some(link) => cursor = &mut link.next,
            }
        }
        let mut hit = cursor.take()?;
        *cursor = hit.next.take();
        self.len -= 1;

        Some(hit.value)
    }

    /// The key currently in the head slot of `key`'s bucket.
    #[doc(hidden)]
    pub fn bucket_head_key(&self, key: &K) -> Option<&K> {
        let idx = self.index(key);
        self.buckets
            .get(idx)
            .and_then(Option::as_ref)
            .map(|head| &head.key)
    }
}

impl<K: Eq, V> Map<K, V> for AdaptiveHashTable<K, V> {
    fn insert(&mut self, key: K, value: V, _weight: Weight) {
        Self::insert(self, key, value);
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
