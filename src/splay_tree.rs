// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Splay tree after Sleator & Tarjan, "Self-Adjusting Binary Search
//! Trees" (JACM 32, 1985).
//!
//! A plain BST with no balance metadata: every insert and every
//! successful lookup finishes by splaying the touched node to the root
//! through zig, zig-zig and zig-zag rotations. Frequently accessed keys
//! settle near the top, which amortizes their cost without any explicit
//! weight.

use crate::{
    arena::TreeArena,
    map::{Map, Weight},
};

struct SplayEntry<K, V> {
    key: K,
    value: V,
}

/// Map whose shape adapts to the access pattern; the most recently
/// accessed key is always at the root.
pub struct SplayTree<K, V> {
    arena: TreeArena<SplayEntry<K, V>>,
}

impl<K, V> SplayTree<K, V> {
    /// Creates an empty splay tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: TreeArena::new(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// The key currently at the root.
    #[doc(hidden)]
    pub fn root_key(&self) -> Option<&K> {
        self.arena.root().map(|id| &self.arena.node(id).item.key)
    }

    /// Rotates `id` to the root.
    fn splay(&mut self, id: usize) {
        while let Some(parent) = self.arena.node(id).parent {
            let Some(grand) = self.arena.node(parent).parent else {
                // zig
                if self.arena.is_left_child(id) {
                    self.arena.rotate_right(parent);
                } else {
                    self.arena.rotate_left(parent);
                }
                continue;
            };

            match (self.arena.is_left_child(id), self.arena.is_left_child(parent)) {
                // zig-zig: rotate the grandparent first, then the parent
                (true, true) => {
                    self.arena.rotate_right(grand);
                    self.arena.rotate_right(parent);
                }
                (false, false) => {
                    self.arena.rotate_left(grand);
                    self.arena.rotate_left(parent);
                }
                // zig-zag
                (true, false) => {
                    self.arena.rotate_right(parent);
                    self.arena.rotate_left(grand);
                }
                (false, true) => {
                    self.arena.rotate_left(parent);
                    self.arena.rotate_right(grand);
                }
            }
        }
    }
}

impl<K: Ord, V> SplayTree<K, V> {
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

    /// Inserts a key-value pair and splays it to the root.
    ///
    /// Re-inserting a present key keeps the stored value but still splays
    /// the node; it was accessed.
    pub fn insert(&mut self, key: K, value: V) {
        let Some(root) = self.arena.root() else {
            let id = self.arena.alloc(SplayEntry { key, value }, None);
            self.arena.set_root(Some(id));
            return;
        };

        let mut cursor = root;
        let id = loop {
            match key.cmp(&self.arena.node(cursor).item.key) {
                std::cmp::Ordering::Less => {
                    if let Some(left) = self.arena.node(cursor).left {
                        cursor = left;
                    } else {
                        let id = self.arena.alloc(SplayEntry { key, value }, Some(cursor));
                        self.arena.node_mut(cursor).left = Some(id);
                        break id;
                    }
                }
                std::cmp::Ordering::Greater => {
                    if let Some(right) = self.arena.node(cursor).right {
                        cursor = right;
                    } else {
                        let id = self.arena.alloc(SplayEntry { key, value }, Some(cursor));
                        self.arena.node_mut(cursor).right = Some(id);
                        break id;
                    }
                }
                std::cmp::Ordering::Equal => break cursor,
            }
        };

        self.splay(id);
    }

    /// Looks up a key; a hit is splayed to the root.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.find(key)?;
        self.splay(id);
        Some(&self.arena.node(id).item.value)
    }

    /// Removes a key, returning its value; the removed node's former
    /// parent is splayed to the root.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.find(key)?;

        // With two children, trade places with the in-order predecessor,
        // which has at most a left child, and unlink that node instead
        let node = self.arena.node(id);
        let target = if let (Some(left), Some(_)) = (node.left, node.right) {
            let mut pred = left;
            while let Some(right) = self.arena.node(pred).right {
                pred = right;
            }
            self.arena.swap_items(id, pred);
            pred
        } else {
            id
        };

        let child = {
            let node = self.arena.node(target);
            node.left.or(node.right)
        };
        let parent = self.arena.node(target).parent;

        self.arena.splice(target, child);
        let entry = self.arena.release(target);

        if let Some(p) = parent {
            self.splay(p);
        }

        Some(entry.value)
    }

    /// Checks the BST order and parent-link consistency.
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
                if self.arena.node(child).parent != Some(id) {
                    return false;
                }
            }
        }

        true
    }
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Map<K, V> for SplayTree<K, V> {
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
