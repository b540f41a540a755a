#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bit_array;

/// Key hashing: the default avalanche mix and the hash fixup applied to
/// every stored hash.
pub mod hash;

/// A `u32`-keyed hash table using robin-hood hashing with tombstone
/// deletion.
///
/// This module provides [`HashTable`] along with its iterators and sizing
/// constants.
pub mod hash_table;

#[cfg(any(test, feature = "stats"))]
pub mod stats;

pub use hash::KeyMix;
pub use hash_table::HashTable;

/// A [`HashTable`] hashing keys with [`hash::FoldState`].
#[cfg(feature = "foldhash")]
pub type FoldHashTable<V> = HashTable<V, hash::FoldState>;
