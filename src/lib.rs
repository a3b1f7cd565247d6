// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Biased (weight-aware) associative containers.
//!
//! ##### About
//!
//! Four map engines over one contract, each shaped so that heavier or
//! more frequently accessed keys are cheaper to locate:
//!
//! - [`BiasedTreap`] — randomized BST whose heap priorities are drawn
//!   from per-key weights, optionally self-adjusting on access
//! - [`BiasedSkipList`] — skip list whose node heights grow with weight
//! - [`BiasedHashTable`] — open addressing that places heavy keys early
//!   in their probe sequence, plus [`AdaptiveHashTable`], a chained
//!   variant with a move-to-front discipline
//! - [`SplayTree`] — self-adjusting BST, no weights at all
//!
//! All engines are in-memory and single-threaded; randomized engines
//! take an injectable, seedable [`RandomSource`] so shapes are
//! reproducible in tests.
//!
//! # Example usage
//!
//! ```
//! use biased_search::{BiasedTreap, Map};
//!
//! let mut map = BiasedTreap::new(false);
//!
//! // Heavier keys end up closer to the root
//! map.insert("rare", 1, 1);
//! map.insert("hot", 2, 1_000);
//!
//! assert_eq!(Some(&2), map.get(&"hot"));
//!
//! assert_eq!(Some(1), map.remove(&"rare"));
//! assert_eq!(None, map.get(&"rare"));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]

mod any_map;
mod arena;
mod error;
mod hash;
mod hash_table;
mod map;
mod rng;
mod skip_list;
mod splay_tree;
mod treap;

pub use any_map::AnyMap;
pub use error::{Error, Result};
pub use hash::{default_hash, hash64};
pub use hash_table::{AdaptiveHashTable, BiasedHashTable};
pub use map::{Map, Weight};
pub use rng::RandomSource;
pub use skip_list::BiasedSkipList;
pub use splay_tree::SplayTree;
pub use treap::BiasedTreap;
