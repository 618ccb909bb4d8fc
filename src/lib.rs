//! # Open Hash Map
//!
//! A Rust implementation of a hash table using open addressing with
//! linear probing.
//!
//! Collisions are resolved by scanning forward through a single
//! contiguous slot array instead of chaining into per-bucket lists.
//! Erased entries leave tombstones behind so probe chains stay
//! reachable; tombstones are reclaimed by later inserts and swept out
//! by a compacting rehash. Chain-length diagnostics expose how far
//! probing has degraded, so callers can tune the load factor limit
//! against their workload.
//!
//! Unlike `std::collections::HashMap`, `insert` never overwrites an
//! existing value: it returns the existing entry together with an
//! `inserted` flag, and `insert_or_assign` provides the overwriting
//! form.
//!
//! ## Basic Usage
//!
//! ```rust
//! use openmap::OpenHashMap;
//!
//! // Create a new hash map
//! let mut map = OpenHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // A second insert of an existing key keeps the stored value
//! let (value, inserted) = map.insert("apple".to_string(), 10);
//! assert!(!inserted);
//! assert_eq!(*value, 1);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Tombstones and Compaction
//!
//! ```rust
//! use openmap::OpenHashMap;
//!
//! let mut map = OpenHashMap::with_capacity(32);
//! for i in 0..20 {
//!     map.insert(i, i * i);
//! }
//! for i in 0..18 {
//!     map.remove(&i);
//! }
//!
//! // Removals leave tombstones in place; compress sweeps them out
//! // and shrinks the table to fit the two survivors
//! map.compress();
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.capacity(), 3);
//! assert_eq!(map.get(&19), Some(&361));
//! ```

/// Error handling for checked map access
mod error;
/// Module implementing the open-addressing hash map
mod open_hashmap;
/// Tri-state slot cells making up the table's storage
mod slot;
/// Utility functions and traits for the hash map
mod utils;

pub use error::AccessError;
pub use open_hashmap::{IntoIter, Iter, IterMut, OpenHashMap};
pub use utils::MapExtensions;
