// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    map::{Map, Weight},
    AdaptiveHashTable, BiasedHashTable, BiasedSkipList, BiasedTreap, SplayTree,
};
use std::collections::BTreeMap;

/// Statically dispatches the map contract over every engine.
///
/// Lets drivers and differential tests pick an engine at runtime without
/// boxing. The `Ordered` variant wraps a [`BTreeMap`] as the reference
/// semantics, `Nop` discards everything and serves as a control.
pub enum AnyMap<K, V> {
    /// Weight-biased treap
    Treap(BiasedTreap<K, V>),
    /// Weight-biased skip list
    SkipList(BiasedSkipList<K, V>),
    /// Open-addressed, weight-biased hash table
    OpenTable(BiasedHashTable<K, V>),
    /// Chained, move-to-front hash table
    ChainedTable(AdaptiveHashTable<K, V>),
    /// Splay tree
    Splay(SplayTree<K, V>),
    /// `BTreeMap` reference semantics
    Ordered(BTreeMap<K, V>),
    /// Discards all operations
    Nop,
}

impl<K: Ord, V> Map<K, V> for AnyMap<K, V> {
    fn insert(&mut self, key: K, value: V, weight: Weight) {
        match self {
            Self::Treap(map) => map.insert(key, value, weight),
            Self::SkipList(map) => map.insert(key, value, weight),
            Self::OpenTable(map) => map.insert(key, value, weight),
            Self::ChainedTable(map) => map.insert(key, value),
            Self::Splay(map) => map.insert(key, value),
            Self::Ordered(map) => {
                // Duplicate inserts are no-ops on every engine
                map.entry(key).or_insert(value);
            }
            Self::Nop => {}
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match self {
            Self::Treap(map) => map.get(key),
            Self::SkipList(map) => map.get(key),
            Self::OpenTable(map) => map.get(key),
            Self::ChainedTable(map) => map.get(key),
            Self::Splay(map) => map.get(key),
            Self::Ordered(map) => map.get(key),
            Self::Nop => None,
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        match self {
            Self::Treap(map) => map.remove(key),
            Self::SkipList(map) => map.remove(key),
            Self::OpenTable(map) => map.remove(key),
            Self::ChainedTable(map) => map.remove(key),
            Self::Splay(map) => map.remove(key),
            Self::Ordered(map) => map.remove(key),
            Self::Nop => None,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Treap(map) => map.len(),
            Self::SkipList(map) => map.len(),
            Self::OpenTable(map) => map.len(),
            Self::ChainedTable(map) => map.len(),
            Self::Splay(map) => map.len(),
            Self::Ordered(map) => map.len(),
            Self::Nop => 0,
        }
    }
}
