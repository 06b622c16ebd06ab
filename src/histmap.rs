use std::fmt;
use std::hash::BuildHasher;

use foldhash::fast::FixedState;
use log::{debug, warn};

use crate::history::InsertHistory;
use crate::slot::{Placement, Slot, SlotArray};
use crate::{HistMapError, HistMapInfo, HistMapKey, MAX_KEY_LEN};

/// Slots allocated per expected key unless configured otherwise.
pub const DEFAULT_SCALING_FACTOR: usize = 2;

/// Fixed-capacity, open-addressed hash map with oldest/newest key queries.
///
/// The slot array is sized once from an expected key count and never grows.
/// Collisions are resolved by scanning forward one slot at a time and
/// removals leave tombstones, so lookups stay correct without moving entries. An insertion history answers
/// [`get_first`](Self::get_first) and [`get_last`](Self::get_last) in
/// amortized constant time.
///
/// # Type Parameters
/// - `V`: value type; copied out on lookup.
/// - `S`: hash builder used to place keys, fixed at construction.
pub struct HistMap<V = i64, S = FixedState> {
    slots: SlotArray<V>,
    history: InsertHistory,
    hash_builder: S,
    scaling_factor: Option<usize>,
}

impl<V: Copy, S: BuildHasher> HistMap<V, S> {
    /// Creates a table with room for `expected_keys` times
    /// [`DEFAULT_SCALING_FACTOR`] slots.
    ///
    /// # Panics
    ///
    /// Panics if the slot array cannot be allocated.
    pub fn new(expected_keys: usize, hash_builder: S) -> Self {
        let capacity = expected_keys.saturating_mul(DEFAULT_SCALING_FACTOR);
        Self::from_parts(capacity, Some(DEFAULT_SCALING_FACTOR), hash_builder)
    }

    /// Creates a table with `expected_keys * scaling_factor` slots.
    ///
    /// # Errors
    ///
    /// Returns [`HistMapError::InvalidCapacity`] when `scaling_factor` is zero
    /// or the product overflows.
    pub fn with_scaling_factor(
        expected_keys: usize,
        scaling_factor: usize,
        hash_builder: S,
    ) -> Result<Self, HistMapError> {
        let capacity = match expected_keys.checked_mul(scaling_factor) {
            Some(capacity) if scaling_factor > 0 => capacity,
            _ => {
                return Err(HistMapError::InvalidCapacity {
                    expected: expected_keys,
                    scaling_factor,
                })
            }
        };
        Ok(Self::from_parts(capacity, Some(scaling_factor), hash_builder))
    }

    /// Creates a table with exactly `capacity` slots.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_parts(capacity, None, hash_builder)
    }

    fn from_parts(capacity: usize, scaling_factor: Option<usize>, hash_builder: S) -> Self {
        debug!("allocating histmap with {capacity} slots (scaling factor {scaling_factor:?})");
        HistMap {
            slots: SlotArray::new(capacity),
            history: InsertHistory::new(),
            hash_builder,
            scaling_factor,
        }
    }

    /// Inserts `key` with `value`, overwriting the value if the key is live.
    ///
    /// Both new keys and updates are recorded as the newest entry for
    /// [`get_last`](Self::get_last).
    ///
    /// # Errors
    ///
    /// - [`HistMapError::KeyTooLong`] if `key` exceeds [`MAX_KEY_LEN`] bytes.
    /// - [`HistMapError::CapacityExceeded`] if the key is absent and every
    ///   slot on its search sequence is live.
    ///
    /// The table is left untouched on error.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), HistMapError> {
        let stored = HistMapKey::new(key)?;
        let hash = self.hash_builder.hash_one(key);
        match self.slots.locate(key, hash) {
            Some(Placement::Occupied(index)) => self.slots.update(index, value),
            Some(Placement::Vacant(index)) => self.slots.occupy(index, stored, value),
            None => {
                let capacity = self.slots.capacity();
                warn!("histmap full: cannot insert {key:?} into {capacity} slots");
                return Err(HistMapError::CapacityExceeded { capacity });
            }
        }
        self.history.record(stored);
        Ok(())
    }

    /// Returns the value stored for `key`.
    ///
    /// Keys longer than [`MAX_KEY_LEN`] are never stored and report `None`.
    pub fn get(&self, key: &str) -> Option<V> {
        lookup(&self.slots, &self.hash_builder, key)
    }

    /// Returns `true` if `key` has a live entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot.
    ///
    /// Returns the removed value, or `None` if the key was absent.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        if key.len() > MAX_KEY_LEN {
            return None;
        }
        let hash = self.hash_builder.hash_one(key);
        let index = self.slots.find(key, hash)?;
        self.slots.bury(index)
    }

    /// Returns the oldest live key and its current value.
    ///
    /// Stale history entries at the front are discarded along the way.
    ///
    /// # Errors
    ///
    /// Returns [`HistMapError::Empty`] when no live key remains.
    pub fn get_first(&mut self) -> Result<(HistMapKey, V), HistMapError> {
        let slots = &self.slots;
        let hash_builder = &self.hash_builder;
        self.history
            .first_live(|key| lookup(slots, hash_builder, key))
            .ok_or(HistMapError::Empty)
    }

    /// Returns the most recently inserted or updated live key and its value.
    ///
    /// # Errors
    ///
    /// Returns [`HistMapError::Empty`] when no live key remains.
    pub fn get_last(&mut self) -> Result<(HistMapKey, V), HistMapError> {
        let slots = &self.slots;
        let hash_builder = &self.hash_builder;
        self.history
            .last_live(|key| lookup(slots, hash_builder, key))
            .ok_or(HistMapError::Empty)
    }
}

impl<V, S> HistMap<V, S> {
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.slots.live()
    }

    /// Returns `true` if no live entries remain.
    pub fn is_empty(&self) -> bool {
        self.slots.live() == 0
    }

    /// Returns the number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of slots holding a tombstone.
    pub fn tombstones(&self) -> usize {
        self.slots.tombstones()
    }

    /// Returns the number of history entries, including ones not yet pruned.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the hash builder that places keys.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Iterates live entries in slot order.
    pub fn iter(&self) -> HistMapIter<'_, V> {
        HistMapIter {
            slots: self.slots.slots().iter(),
        }
    }

    /// Returns an occupancy summary of the table.
    pub fn info(&self) -> HistMapInfo {
        let capacity = self.capacity();
        let live_entries = self.len();
        let tombstones = self.tombstones();
        HistMapInfo {
            capacity,
            scaling_factor: self.scaling_factor,
            live_entries,
            tombstones,
            empty_slots: capacity - live_entries - tombstones,
            history_length: self.history_len(),
            load_factor: if capacity == 0 {
                0.0
            } else {
                live_entries as f64 / capacity as f64
            },
            max_key_length: MAX_KEY_LEN,
        }
    }
}

impl<V, S> fmt::Debug for HistMap<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistMap")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("tombstones", &self.tombstones())
            .field("history_len", &self.history_len())
            .finish()
    }
}

impl<'a, V: Copy, S> IntoIterator for &'a HistMap<V, S> {
    type Item = (&'a str, V);
    type IntoIter = HistMapIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn lookup<V, S>(slots: &SlotArray<V>, hash_builder: &S, key: &str) -> Option<V>
where
    V: Copy,
    S: BuildHasher,
{
    if key.len() > MAX_KEY_LEN {
        return None;
    }
    let index = slots.find(key, hash_builder.hash_one(key))?;
    slots.value(index).copied()
}

/// Iterator over the live entries of a [`HistMap`], in slot order.
pub struct HistMapIter<'a, V> {
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V: Copy> Iterator for HistMapIter<'a, V> {
    type Item = (&'a str, V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Live { key, value } = slot {
                return Some((key.as_str(), *value));
            }
        }
        None
    }
}
