//! Hash function selection.
//!
//! A [`HistMapHashConfig`] names the function that places keys in the slot
//! array and is resolved into a [`HistMapHashState`] when the table is built.
//! Besides the seeded foldhash default, a constant function is available: it
//! sends every key to the same slot, so the whole table becomes one linear
//! collision chain. That is the worst case for collisions and tombstones, and is
//! useful for checking that lookups stay correct under it.

use std::hash::{BuildHasher, Hasher};

use foldhash::fast::FixedState;
use serde::{Deserialize, Serialize};

use crate::HistMapError;

/// Serializable choice of hash function, tagged by `kind` in JSON.
///
/// ```
/// use histmap::HistMapHashConfig;
///
/// let config = HistMapHashConfig::from_json(r#"{"kind": "constant", "value": 1}"#).unwrap();
/// assert_eq!(config, HistMapHashConfig::Constant { value: 1 });
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistMapHashConfig {
    /// `foldhash` fast hashing with a fixed seed, so placement is reproducible.
    Foldhash { seed: u64 },
    /// Every key hashes to `value`.
    Constant { value: u64 },
}

impl Default for HistMapHashConfig {
    fn default() -> Self {
        HistMapHashConfig::Foldhash { seed: 0 }
    }
}

impl HistMapHashConfig {
    /// Parses a configuration such as `{"kind": "foldhash", "seed": 7}`.
    ///
    /// # Errors
    ///
    /// Returns [`HistMapError::HashConfig`] for unknown kinds or missing fields.
    pub fn from_json(json: &str) -> Result<Self, HistMapError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn build_hasher(&self) -> HistMapHashState {
        match *self {
            HistMapHashConfig::Foldhash { seed } => {
                HistMapHashState::Foldhash(FixedState::with_seed(seed))
            }
            HistMapHashConfig::Constant { value } => HistMapHashState::Constant(value),
        }
    }
}

/// [`BuildHasher`] produced from a [`HistMapHashConfig`].
#[derive(Debug, Clone, Copy)]
pub enum HistMapHashState {
    Foldhash(FixedState),
    Constant(u64),
}

impl BuildHasher for HistMapHashState {
    type Hasher = HistMapHasher;

    fn build_hasher(&self) -> HistMapHasher {
        match self {
            HistMapHashState::Foldhash(state) => HistMapHasher::Foldhash(state.build_hasher()),
            HistMapHashState::Constant(value) => HistMapHasher::Constant(*value),
        }
    }
}

/// Hasher state for one key.
pub enum HistMapHasher {
    Foldhash(<FixedState as BuildHasher>::Hasher),
    Constant(u64),
}

impl Hasher for HistMapHasher {
    fn finish(&self) -> u64 {
        match self {
            HistMapHasher::Foldhash(hasher) => hasher.finish(),
            HistMapHasher::Constant(value) => *value,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        if let HistMapHasher::Foldhash(hasher) = self {
            hasher.write(bytes);
        }
    }

    fn write_u8(&mut self, i: u8) {
        if let HistMapHasher::Foldhash(hasher) = self {
            hasher.write_u8(i);
        }
    }

    fn write_u64(&mut self, i: u64) {
        if let HistMapHasher::Foldhash(hasher) = self {
            hasher.write_u64(i);
        }
    }

    fn write_usize(&mut self, i: usize) {
        if let HistMapHasher::Foldhash(hasher) = self {
            hasher.write_usize(i);
        }
    }
}
