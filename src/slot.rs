//! Open-addressed slot array with forward scanning and tombstone deletion.
//!
//! # Invariants
//! - The array length (capacity) never changes after construction.
//! - A search sequence starts at `hash % capacity`, steps by one and wraps,
//!   visiting each slot at most once.
//! - Inserts always land on the first empty-or-tombstoned slot of their search
//!   sequence, so an [`Slot::Empty`] slot proves that no matching key lies
//!   further along the sequence. Tombstones give no such guarantee and are
//!   skipped by lookups.

use crate::HistMapKey;

/// A single cell of the slot buffer.
#[derive(Clone, Debug)]
pub(crate) enum Slot<V> {
    /// Never written.
    Empty,
    /// Held an entry that has since been removed.
    Tombstone,
    Live { key: HistMapKey, value: V },
}

/// Outcome of a fused lookup/free-slot search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The key is live at this index.
    Occupied(usize),
    /// The key is absent; this is the first writable index on its search sequence.
    Vacant(usize),
}

#[derive(Debug)]
pub(crate) struct SlotArray<V> {
    slots: Box<[Slot<V>]>,
    live: usize,
    tombstones: usize,
}

impl<V> SlotArray<V> {
    pub fn new(capacity: usize) -> Self {
        let slots: Vec<Slot<V>> = (0..capacity).map(|_| Slot::Empty).collect();
        SlotArray {
            slots: slots.into_boxed_slice(),
            live: 0,
            tombstones: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live(&self) -> usize {
        self.live
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Indices visited for `hash`, in search order.
    #[inline]
    fn walk(&self, hash: u64) -> impl Iterator<Item = usize> {
        let capacity = self.slots.len();
        let start = if capacity == 0 {
            0
        } else {
            (hash % capacity as u64) as usize
        };
        (0..capacity).map(move |step| (start + step) % capacity)
    }

    /// Returns the index holding `key`, if it is live.
    pub fn find(&self, key: &str, hash: u64) -> Option<usize> {
        for index in self.walk(hash) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Live { key: stored, .. } if stored.as_str() == key => return Some(index),
                // Tombstone or a different key: keep walking.
                _ => {}
            }
        }
        None
    }

    /// Single pass combining the key lookup with the search for a writable slot.
    ///
    /// Returns `None` when the key is absent and every slot on the search
    /// sequence is live.
    pub fn locate(&self, key: &str, hash: u64) -> Option<Placement> {
        let mut first_tombstone = None;
        for index in self.walk(hash) {
            match &self.slots[index] {
                Slot::Empty => return Some(Placement::Vacant(first_tombstone.unwrap_or(index))),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Live { key: stored, .. } => {
                    if stored.as_str() == key {
                        return Some(Placement::Occupied(index));
                    }
                }
            }
        }
        first_tombstone.map(Placement::Vacant)
    }

    pub fn value(&self, index: usize) -> Option<&V> {
        match &self.slots[index] {
            Slot::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Overwrites the value of the live slot at `index`.
    pub fn update(&mut self, index: usize, new_value: V) {
        if let Slot::Live { value, .. } = &mut self.slots[index] {
            *value = new_value;
        }
    }

    /// Writes a new entry into the empty or tombstoned slot at `index`.
    pub fn occupy(&mut self, index: usize, key: HistMapKey, value: V) {
        let previous = std::mem::replace(&mut self.slots[index], Slot::Live { key, value });
        debug_assert!(!matches!(previous, Slot::Live { .. }));
        if let Slot::Tombstone = previous {
            self.tombstones -= 1;
        }
        self.live += 1;
    }

    /// Tombstones the live slot at `index`, dropping its key and returning its value.
    pub fn bury(&mut self, index: usize) -> Option<V> {
        match std::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Live { value, .. } => {
                self.live -= 1;
                self.tombstones += 1;
                Some(value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    pub fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> HistMapKey {
        HistMapKey::new(s).unwrap()
    }

    fn insert(slots: &mut SlotArray<i64>, k: &str, v: i64, hash: u64) -> Option<usize> {
        match slots.locate(k, hash)? {
            Placement::Occupied(index) => {
                slots.update(index, v);
                Some(index)
            }
            Placement::Vacant(index) => {
                slots.occupy(index, key(k), v);
                Some(index)
            }
        }
    }

    #[test]
    fn test_walk_wraps_around() {
        let slots = SlotArray::<i64>::new(4);
        let order: Vec<_> = slots.walk(6).collect();
        assert_eq!(order, vec![2, 3, 0, 1]);

        let empty = SlotArray::<i64>::new(0);
        assert_eq!(empty.walk(42).count(), 0);
        assert_eq!(empty.locate("a", 42), None);
        assert_eq!(empty.find("a", 42), None);
    }

    #[test]
    fn test_linear_collision_chain() {
        let mut slots = SlotArray::new(4);
        assert_eq!(insert(&mut slots, "a", 1, 3), Some(3));
        assert_eq!(insert(&mut slots, "b", 2, 3), Some(0));
        assert_eq!(insert(&mut slots, "c", 3, 3), Some(1));
        assert_eq!(slots.find("c", 3), Some(1));
        assert_eq!(slots.find("d", 3), None);
        assert_eq!(slots.live(), 3);
    }

    #[test]
    fn test_tombstone_keeps_chain() {
        let mut slots = SlotArray::new(8);
        for (i, k) in ["a", "b", "c"].iter().enumerate() {
            insert(&mut slots, k, i as i64, 0);
        }
        assert_eq!(slots.bury(1), Some(1));
        assert!(matches!(slots.slots()[1], Slot::Tombstone));
        assert_eq!(slots.tombstones(), 1);
        assert_eq!(slots.live(), 2);

        // "c" sits past the tombstone and must still be found.
        assert_eq!(slots.find("c", 0), Some(2));
        assert_eq!(slots.find("b", 0), None);

        // Burying a tombstone is a no-op.
        assert_eq!(slots.bury(1), None);
        assert_eq!(slots.tombstones(), 1);
    }

    #[test]
    fn test_locate_prefers_first_tombstone() {
        let mut slots = SlotArray::new(8);
        for (i, k) in ["a", "b", "c", "d"].iter().enumerate() {
            insert(&mut slots, k, i as i64, 0);
        }
        slots.bury(1);
        slots.bury(2);
        assert_eq!(slots.locate("e", 0), Some(Placement::Vacant(1)));
        // Existing keys past the tombstones still resolve to their slot.
        assert_eq!(slots.locate("d", 0), Some(Placement::Occupied(3)));

        insert(&mut slots, "e", 4, 0);
        assert_eq!(slots.tombstones(), 1);
        assert_eq!(slots.value(1), Some(&4));
    }

    #[test]
    fn test_full_array() {
        let mut slots = SlotArray::new(2);
        insert(&mut slots, "a", 1, 0);
        insert(&mut slots, "b", 2, 0);
        assert_eq!(slots.locate("c", 0), None);
        assert_eq!(slots.locate("b", 0), Some(Placement::Occupied(1)));

        // Tombstones count as writable once every empty slot is gone.
        slots.bury(0);
        assert_eq!(slots.locate("c", 1), Some(Placement::Vacant(0)));
        assert_eq!(slots.find("b", 1), Some(1));
    }

    #[test]
    fn test_counts_track_transitions() {
        let mut slots = SlotArray::new(4);
        insert(&mut slots, "a", 1, 0);
        insert(&mut slots, "b", 2, 0);
        insert(&mut slots, "a", 3, 0);
        assert_eq!((slots.live(), slots.tombstones()), (2, 0));
        assert_eq!(slots.value(0), Some(&3));

        slots.bury(0);
        assert_eq!((slots.live(), slots.tombstones()), (1, 1));
        assert_eq!(slots.value(0), None);

        insert(&mut slots, "c", 4, 0);
        assert_eq!((slots.live(), slots.tombstones()), (2, 0));
        assert_eq!(slots.capacity(), 4);
    }
}
