use std::hash::BuildHasher;

use crate::{DEFAULT_SCALING_FACTOR, HistMap, HistMapError, HistMapHashConfig, HistMapHashState};

/// Number of words in the target dictionary; the default expected key count.
pub const DEFAULT_EXPECTED_KEYS: usize = 19878;

/// Builder type for sizing and hashing a [`HistMap`].
///
/// The builder owns the expected key count, the scaling factor applied to it,
/// and the [`HistMapHashConfig`] that picks the hash function. Use
/// [`build`](Self::build) to hash with the configured function, or
/// [`build_with_hasher`](Self::build_with_hasher) to supply any other
/// [`BuildHasher`].
#[derive(Debug, Clone)]
pub struct HistMapBuilder {
    hash_config: HistMapHashConfig,
    expected_keys: usize,
    scaling_factor: usize,
}

impl Default for HistMapBuilder {
    fn default() -> Self {
        Self {
            hash_config: HistMapHashConfig::default(),
            expected_keys: DEFAULT_EXPECTED_KEYS,
            scaling_factor: DEFAULT_SCALING_FACTOR,
        }
    }
}

impl HistMapBuilder {
    /// Replaces the entire hash configuration.
    pub fn with_hash_config(mut self, config: HistMapHashConfig) -> Self {
        self.hash_config = config;
        self
    }

    /// Hashes with seeded foldhash, replacing any other configured function.
    pub fn with_hash_seed(mut self, seed: u64) -> Self {
        self.hash_config = HistMapHashConfig::Foldhash { seed };
        self
    }

    /// Sets the number of distinct keys the table is sized for.
    pub fn with_expected_keys(mut self, count: usize) -> Self {
        self.expected_keys = count;
        self
    }

    /// Sets the number of slots allocated per expected key.
    ///
    /// A larger factor shortens collision chains at the cost of memory.
    pub fn with_scaling_factor(mut self, factor: usize) -> Self {
        self.scaling_factor = factor;
        self
    }

    pub fn hash_config(&self) -> &HistMapHashConfig {
        &self.hash_config
    }

    /// Consumes the builder and allocates a table hashed by the configured function.
    ///
    /// # Errors
    ///
    /// Returns [`HistMapError::InvalidCapacity`] if the scaling factor is zero
    /// or the slot count overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use histmap::HistMapBuilder;
    ///
    /// # fn main() -> Result<(), histmap::HistMapError> {
    /// let mut map = HistMapBuilder::default()
    ///     .with_expected_keys(16)
    ///     .with_hash_seed(7)
    ///     .build::<u32>()?;
    /// map.insert("it", 1)?;
    /// map.insert("works", 2)?;
    /// assert_eq!(map.capacity(), 32);
    /// assert_eq!(map.get_last()?.1, 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build<V: Copy>(self) -> Result<HistMap<V, HistMapHashState>, HistMapError> {
        let hash_builder = self.hash_config.build_hasher();
        self.build_with_hasher(hash_builder)
    }

    /// Consumes the builder and allocates a table using `hash_builder`,
    /// ignoring the hash configuration.
    pub fn build_with_hasher<V, S>(self, hash_builder: S) -> Result<HistMap<V, S>, HistMapError>
    where
        V: Copy,
        S: BuildHasher,
    {
        HistMap::with_scaling_factor(self.expected_keys, self.scaling_factor, hash_builder)
    }
}
