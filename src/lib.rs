//! Fixed-capacity, open-addressed hash maps with oldest/newest key queries.
//!
//! The `histmap` crate provides [`HistMap`], a table sized once for a known,
//! bounded universe of short string keys (such as the words of a dictionary).
//! Keys are stored inline in the slots, collisions are resolved by scanning
//! forward slot by slot, and removals leave tombstones so collision chains
//! stay intact. An insertion history lets [`HistMap::get_first`] and [`HistMap::get_last`]
//! return the oldest and newest live keys in amortized constant time without
//! scanning the table.
//!
//! The hash function is injected at construction as any
//! [`BuildHasher`](std::hash::BuildHasher). [`HistMapBuilder`] builds one
//! from a serializable [`HistMapHashConfig`]: seeded `foldhash` by default, or
//! a constant function that puts every key on one collision chain.
//!
//! ```
//! use histmap::HistMapBuilder;
//!
//! # fn main() -> Result<(), histmap::HistMapError> {
//! let mut map = HistMapBuilder::default()
//!     .with_expected_keys(4)
//!     .build::<i64>()?;
//! map.insert("apple", 1)?;
//! map.insert("banana", 2)?;
//! map.insert("cherry", 3)?;
//! map.remove("apple");
//!
//! assert_eq!(map.get("banana"), Some(2));
//! assert_eq!(map.get_first()?.0, "banana");
//! assert_eq!(map.get_last()?.0, "cherry");
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::HistMapError;

mod key;
pub use key::{HistMapKey, MAX_KEY_LEN};

mod slot;

mod history;

mod hasher;
pub use hasher::{HistMapHashConfig, HistMapHashState, HistMapHasher};

mod meta;
pub use meta::HistMapInfo;

mod histmap;
pub use histmap::{DEFAULT_SCALING_FACTOR, HistMap, HistMapIter};

mod builder;
pub use builder::{DEFAULT_EXPECTED_KEYS, HistMapBuilder};
