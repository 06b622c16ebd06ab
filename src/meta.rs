use serde::Serialize;

/// Occupancy summary returned by [`HistMap::info`](crate::HistMap::info).
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct HistMapInfo {
    /// Number of slots, fixed at construction.
    pub capacity: usize,
    /// Multiplier applied to the expected key count, when known.
    pub scaling_factor: Option<usize>,
    /// Slots holding a live entry.
    pub live_entries: usize,
    /// Slots holding a tombstone.
    pub tombstones: usize,
    /// Slots never written.
    pub empty_slots: usize,
    /// Entries in the insertion history, stale ones included.
    pub history_length: usize,
    /// `live_entries / capacity`, or 0 for a zero-capacity table.
    pub load_factor: f64,
    /// Longest key accepted, in bytes.
    pub max_key_length: usize,
}
