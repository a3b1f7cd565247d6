// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Weight-biased skip list after Bagchi, Buchsbaum & Goodrich, "Biased
//! Skip Lists" (Algorithmica 42, 2005).
//!
//! A sorted linked list at level 0 with express lanes above it. A node of
//! weight `w` starts at height `floor(log2(max(w, 1))) + 1` and keeps
//! growing while a fair coin shows heads, capped at `max_level`. Heavy
//! keys therefore occupy more levels in expectation and become the
//! way-points the upper lanes travel through, so searching for them takes
//! fewer hops.

use crate::{
    error::{Error, Result},
    map::{Map, Weight},
    rng::RandomSource,
};
use log::trace;

struct SkipNode<K, V> {
    key: K,
    value: V,
    /// Forward link per level; the vector length is the node's height.
    forward: Vec<Option<usize>>,
}

/// Predecessor per level; `None` is the header sentinel.
type Splices = Vec<Option<usize>>;

/// Map whose expected hop count for a key shrinks with its weight.
pub struct BiasedSkipList<K, V> {
    /// Header forward links, one per possible level.
    head: Vec<Option<usize>>,
    slots: Vec<Option<SkipNode<K, V>>>,
    free: Vec<usize>,
    level: usize,
    max_level: usize,
    len: usize,
    rng: RandomSource,
}

impl<K, V> BiasedSkipList<K, V> {
    /// Creates an empty skip list, seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Fails if `max_level` is zero. 15 to 32 levels are reasonable.
    pub fn new(max_level: usize) -> Result<Self> {
        Self::with_rng(max_level, RandomSource::from_entropy())
    }

    /// Creates an empty skip list drawing heights from the given source.
    ///
    /// # Errors
    ///
    /// Fails if `max_level` is zero.
    pub fn with_rng(max_level: usize, rng: RandomSource) -> Result<Self> {
        if max_level == 0 {
            return Err(Error::InvalidParameter("max_level"));
        }

        Ok(Self {
            head: vec![None; max_level],
            slots: Vec::new(),
            free: Vec::new(),
            level: 1,
            max_level,
            len: 0,
            rng,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current list level (highest level any node occupies, at least 1).
    pub fn level(&self) -> usize {
        self.level
    }

    fn node(&self, id: usize) -> &SkipNode<K, V> {
        self.slots
            .get(id)
            .and_then(Option::as_ref)
            .expect("node should exist")
    }

    fn node_mut(&mut self, id: usize) -> &mut SkipNode<K, V> {
        self.slots
            .get_mut(id)
            .and_then(Option::as_mut)
            .expect("node should exist")
    }

    fn next(&self, pred: Option<usize>, level: usize) -> Option<usize> {
        match pred {
            None => *self.head.get(level).expect("level should exist"),
            Some(p) => *self
                .node(p)
                .forward
                .get(level)
                .expect("level should exist"),
        }
    }

    fn set_next(&mut self, pred: Option<usize>, level: usize, to: Option<usize>) {
        let link = match pred {
            None => self.head.get_mut(level).expect("level should exist"),
            Some(p) => self
                .node_mut(p)
                .forward
                .get_mut(level)
                .expect("level should exist"),
        };
        *link = to;
    }

    fn alloc(&mut self, node: SkipNode<K, V>) -> usize {
        self.len += 1;

        if let Some(id) = self.free.pop() {
            let slot = self.slots.get_mut(id).expect("free slot should exist");
            *slot = Some(node);
            id
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    fn release(&mut self, id: usize) -> SkipNode<K, V> {
        let node = self
            .slots
            .get_mut(id)
            .and_then(Option::take)
            .expect("node should exist");

        self.free.push(id);
        self.len -= 1;

        node
    }

    fn random_height(&mut self, weight: Weight) -> usize {
        let base = weight.max(1).ilog2() as usize + 1;

        let mut height = base;
        while height < self.max_level && self.rng.coin() {
            height += 1;
        }

        height.min(self.max_level)
    }

    fn shrink_level(&mut self) {
        while self.level > 1
            && self
                .head
                .get(self.level - 1)
                .expect("level should exist")
                .is_none()
        {
            self.level -= 1;
        }
    }
}

impl<K: Ord, V> BiasedSkipList<K, V> {
    /// Finds the predecessor of `key` at every level, top-down.
    fn seek_splices(&self, key: &K) -> Splices {
        let mut splices: Splices = vec![None; self.max_level];

        let mut pred = None;
        for level in (0..self.level).rev() {
            while let Some(next) = self.next(pred, level) {
                if self.node(next).key < *key {
                    pred = Some(next);
                } else {
                    break;
                }
            }
            *splices.get_mut(level).expect("level should exist") = pred;
        }

        splices
    }

    /// Inserts a key with the given weight.
    ///
    /// Re-inserting a present key is a no-op.
    pub fn insert(&mut self, key: K, value: V, weight: Weight) {
        let splices = self.seek_splices(&key);

        // Already present?
        if let Some(next) = self.next(*splices.first().expect("level 0 should exist"), 0) {
            if self.node(next).key == key {
                return;
            }
        }

        let height = self.random_height(weight);
        if height > self.level {
            trace!("raising skip list level to {height}");
            self.level = height;
        }

        let id = self.alloc(SkipNode {
            key,
            value,
            forward: vec![None; height],
        });

        for level in 0..height {
            let pred = *splices.get(level).expect("level should exist");
            let next = self.next(pred, level);
            *self
                .node_mut(id)
                .forward
                .get_mut(level)
                .expect("level should exist") = next;
            self.set_next(pred, level, Some(id));
        }
    }

    /// Looks up a key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut pred = None;

        for level in (0..self.level).rev() {
            while let Some(next) = self.next(pred, level) {
                match self.node(next).key.cmp(key) {
                    std::cmp::Ordering::Less => pred = Some(next),
                    std::cmp::Ordering::Equal => return Some(&self.node(next).value),
                    std::cmp::Ordering::Greater => break,
                }
            }
        }

        None
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let splices = self.seek_splices(key);

        let target = self.next(*splices.first().expect("level 0 should exist"), 0)?;
        if self.node(target).key != *key {
            return None;
        }

        // Unlink at every level the node occupies, then free it once
        for level in 0..self.node(target).forward.len() {
            let next = *self
                .node(target)
                .forward
                .get(level)
                .expect("level should exist");
            let pred = *splices.get(level).expect("level should exist");
            self.set_next(pred, level, next);
        }

        let node = self.release(target);
        self.shrink_level();

        Some(node.value)
    }

    /// Re-samples the key's height from a new weight.
    ///
    /// A taller draw splices the node into the additional levels; a
    /// shorter one unlinks it from every surplus level. Returns whether
    /// the key was present. The stored value is untouched.
    pub fn reweight(&mut self, key: &K, weight: Weight) -> bool {
        let splices = self.seek_splices(key);

        let Some(target) = self.next(*splices.first().expect("level 0 should exist"), 0) else {
            return false;
        };
        if self.node(target).key != *key {
            return false;
        }

        let old_height = self.node(target).forward.len();
        let new_height = self.random_height(weight);

        if new_height > old_height {
            if new_height > self.level {
                trace!("raising skip list level to {new_height}");
                self.level = new_height;
            }

            for level in old_height..new_height {
                let pred = *splices.get(level).expect("level should exist");
                let next = self.next(pred, level);
                self.node_mut(target).forward.push(next);
                self.set_next(pred, level, Some(target));
            }
        } else if new_height < old_height {
            for level in new_height..old_height {
                let next = *self
                    .node(target)
                    .forward
                    .get(level)
                    .expect("level should exist");
                let pred = *splices.get(level).expect("level should exist");
                self.set_next(pred, level, next);
            }

            self.node_mut(target).forward.truncate(new_height);
            self.shrink_level();
        }

        true
    }

    /// Checks per-level key ordering, the level-prefix property and the
    /// level bookkeeping across the whole list.
    #[doc(hidden)]
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        use std::collections::HashSet;

        // Levels above the recorded list level must be empty
        for level in self.level..self.max_level {
            if self.head.get(level).is_some_and(Option::is_some) {
                return false;
            }
        }

        let mut below: Option<HashSet<usize>> = None;
        for level in (0..self.level).rev() {
            let mut seen = HashSet::new();
            let mut pred = None;

            while let Some(next) = self.next(pred, level) {
                // Strictly ascending keys, no cycles
                if !seen.insert(next) {
                    return false;
                }
                if let Some(p) = pred {
                    if self.node(p).key >= self.node(next).key {
                        return false;
                    }
                }
                if self.node(next).forward.len() <= level {
                    return false;
                }
                pred = Some(next);
            }

            // A node at level i + 1 must appear at level i as well
            if let Some(above) = &below {
                if !above.is_subset(&seen) {
                    return false;
                }
            }
            below = Some(seen);
        }

        below.unwrap_or_default().len() == self.len
    }
}

impl<K: Ord, V> Map<K, V> for BiasedSkipList<K, V> {
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
