// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Weight-biased treap after Seidel & Aragon, "Randomized Search Trees"
//! (Algorithmica 16, 1996).
//!
//! A binary search tree on keys that is simultaneously a max-heap on
//! floating-point priorities. The priority for a node of weight `w` is
//! drawn as `U^(1/w)` with `U` uniform in (0,1]: the larger the weight,
//! the closer the draw skews toward 1, which pulls heavy keys toward the
//! root where searches find them in fewer comparisons.

use crate::{
    arena::TreeArena,
    map::{Map, Weight},
    rng::RandomSource,
};
use log::trace;

struct TreapEntry<K, V> {
    key: K,
    value: V,
    priority: f64,
}

/// Map whose expected search depth for a key shrinks with its weight.
///
/// With `adapt_weights` enabled, every successful lookup gets a chance to
/// promote the hit node, turning the explicit weight bias into a
/// frequency-adaptive one.
pub struct BiasedTreap<K, V> {
    arena: TreeArena<TreapEntry<K, V>>,
    rng: RandomSource,
    adapt_weights: bool,
}

impl<K, V> BiasedTreap<K, V> {
    /// Creates an empty treap, seeded from the operating system.
    #[must_use]
    pub fn new(adapt_weights: bool) -> Self {
        Self::with_rng(adapt_weights, RandomSource::from_entropy())
    }

    /// Creates an empty treap drawing priorities from the given source.
    #[must_use]
    pub fn with_rng(adapt_weights: bool, rng: RandomSource) -> Self {
        Self {
            arena: TreeArena::new(),
            rng,
            adapt_weights,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the treap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// The key currently at the root.
    #[doc(hidden)]
    pub fn root_key(&self) -> Option<&K> {
        self.arena.root().map(|id| &self.arena.node(id).item.key)
    }

    fn priority(&self, id: usize) -> f64 {
        self.arena.node(id).item.priority
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw_priority(&mut self, weight: Weight) -> f64 {
        let w = weight.max(1);
        self.rng.open_unit().powf(1.0 / w as f64)
    }

    /// Rotates `id` upward while its parent has a strictly smaller priority.
    fn bubble_up(&mut self, id: usize) {
        while let Some(parent) = self.arena.node(id).parent {
            if self.priority(parent) >= self.priority(id) {
                break;
            }
            if self.arena.is_left_child(id) {
                self.arena.rotate_right(parent);
            } else {
                self.arena.rotate_left(parent);
            }
        }
    }

    /// Rotates the heavier-priority child above `id` until the heap
    /// property holds again below it.
    fn sift_down(&mut self, id: usize) {
        loop {
            let node = self.arena.node(id);
            let left = node.left.map(|l| self.priority(l));
            let right = node.right.map(|r| self.priority(r));

            match (left, right) {
                (Some(lp), rp) if lp >= rp.unwrap_or(f64::NEG_INFINITY) && lp > self.priority(id) => {
                    self.arena.rotate_right(id);
                }
                (_, Some(rp)) if rp > self.priority(id) => {
                    self.arena.rotate_left(id);
                }
                _ => break,
            }
        }
    }
}

impl<K: Ord, V> BiasedTreap<K, V> {
    fn find(&self, key: &K) -> Option<usize> {
        let mut cursor = self.arena.root();

        while let Some(id) = cursor {
            cursor = match key.cmp(&self.arena.node(id).item.key) {
                std::cmp::Ordering::Less => self.arena.node(id).left,
                std::cmp::Ordering::Greater => self.arena.node(id).right,
                std::cmp::Ordering::Equal => return Some(id),
            };
        }

        None
    }

    /// Inserts a key with the given weight.
    ///
    /// Re-inserting a present key is a no-op.
    pub fn insert(&mut self, key: K, value: V, weight: Weight) {
        let priority = self.draw_priority(weight);

        let Some(root) = self.arena.root() else {
            let id = self.arena.alloc(
                TreapEntry {
                    key,
                    value,
                    priority,
                },
                None,
            );
            self.arena.set_root(Some(id));
            return;
        };

        // Descend to the leaf position for the key
        let mut cursor = root;
        let id = loop {
            match key.cmp(&self.arena.node(cursor).item.key) {
                std::cmp::Ordering::Less => {
                    if let Some(left) = self.arena.node(cursor).left {
                        cursor = left;
                    } else {
                        let id = self.arena.alloc(
                            TreapEntry {
                                key,
                                value,
                                priority,
                            },
                            Some(cursor),
                        );
                        self.arena.node_mut(cursor).left = Some(id);
                        break id;
                    }
                }
                std::cmp::Ordering::Greater => {
                    if let Some(right) = self.arena.node(cursor).right {
                        cursor = right;
                    } else {
                        let id = self.arena.alloc(
                            TreapEntry {
                                key,
                                value,
                                priority,
                            },
                            Some(cursor),
                        );
                        self.arena.node_mut(cursor).right = Some(id);
                        break id;
                    }
                }
                // Already present, keep the stored value and weight
                std::cmp::Ordering::Equal => return,
            }
        };

        self.bubble_up(id);
    }

    /// Looks up a key.
    ///
    /// In adaptive mode a hit may promote the node: a fresh uniform draw
    /// that exceeds the stored priority replaces it and the node bubbles
    /// toward the root.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.find(key)?;

        if self.adapt_weights {
            let t = self.rng.open_unit();
            if t > self.priority(id) {
                trace!("promoting node to priority {t}");
                self.arena.node_mut(id).item.priority = t;
                self.bubble_up(id);
            }
        }

        Some(&self.arena.node(id).item.value)
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.find(key)?;

        // Rotate the victim down to a leaf, always lifting the
        // heavier-priority child so the heap stays intact above it
        loop {
            let node = self.arena.node(id);
            match (node.left, node.right) {
                (None, None) => break,
                (Some(_), None) => self.arena.rotate_right(id),
                (None, Some(_)) => self.arena.rotate_left(id),
                (Some(left), Some(right)) => {
                    if self.priority(left) > self.priority(right) {
                        self.arena.rotate_right(id);
                    } else {
                        self.arena.rotate_left(id);
                    }
                }
            }
        }

        self.arena.splice(id, None);
        let entry = self.arena.release(id);
        Some(entry.value)
    }

    /// Redraws the key's priority from a new weight.
    ///
    /// A higher draw bubbles the node up, a lower one sifts it down.
    /// Returns whether the key was present. The stored value is untouched.
    pub fn reweight(&mut self, key: &K, weight: Weight) -> bool {
        let Some(id) = self.find(key) else {
            return false;
        };

        let fresh = self.draw_priority(weight);
        let current = self.priority(id);
        self.arena.node_mut(id).item.priority = fresh;

        if fresh > current {
            self.bubble_up(id);
        } else {
            self.sift_down(id);
        }

        true
    }

    /// Checks the BST order, the max-heap property and parent-link
    /// consistency across the whole tree.
    #[doc(hidden)]
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        if let Some(root) = self.arena.root() {
            if self.arena.node(root).parent.is_some() {
                return false;
            }
        }

        let order = self.arena.in_order();
        for pair in order.windows(2) {
            if let [a, b] = *pair {
                if self.arena.node(a).item.key >= self.arena.node(b).item.key {
                    return false;
                }
            }
        }

        for &id in &order {
            let node = self.arena.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                if self.priority(child) > self.priority(id) {
                    return false;
                }
                if self.arena.node(child).parent != Some(id) {
                    return false;
                }
            }
        }

        true
    }
}

impl<K: Ord, V> Map<K, V> for BiasedTreap<K, V> {
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
