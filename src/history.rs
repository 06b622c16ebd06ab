use std::collections::VecDeque;

use log::trace;

use crate::HistMapKey;

/// Insertion history backing oldest/newest queries.
///
/// One key copy is appended per insert, including value updates, so the queue
/// is a superset of the live keys. Entries are never synchronized with
/// removals; a stale entry is dropped only once it reaches an end of the queue
/// during [`first_live`](Self::first_live) or [`last_live`](Self::last_live).
/// Each entry is popped at most once, which bounds the total pruning work by
/// the number of inserts.
#[derive(Debug, Default)]
pub(crate) struct InsertHistory {
    keys: VecDeque<HistMapKey>,
}

impl InsertHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: HistMapKey) {
        self.keys.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns the oldest entry for which `resolve` yields a value, popping
    /// stale entries off the front on the way.
    pub fn first_live<V, F>(&mut self, resolve: F) -> Option<(HistMapKey, V)>
    where
        F: Fn(&HistMapKey) -> Option<V>,
    {
        while let Some(key) = self.keys.front() {
            if let Some(value) = resolve(key) {
                return Some((*key, value));
            }
            trace!("pruning stale history entry {key:?} from the front");
            self.keys.pop_front();
        }
        None
    }

    /// Mirror of [`first_live`](Self::first_live) working from the back.
    pub fn last_live<V, F>(&mut self, resolve: F) -> Option<(HistMapKey, V)>
    where
        F: Fn(&HistMapKey) -> Option<V>,
    {
        while let Some(key) = self.keys.back() {
            if let Some(value) = resolve(key) {
                return Some((*key, value));
            }
            trace!("pruning stale history entry {key:?} from the back");
            self.keys.pop_back();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn history_of(keys: &[&str]) -> InsertHistory {
        let mut history = InsertHistory::new();
        for k in keys {
            history.record(HistMapKey::new(k).unwrap());
        }
        history
    }

    #[test]
    fn test_first_and_last_without_pruning() {
        let mut history = history_of(&["a", "b", "c"]);
        let resolve = |k: &HistMapKey| Some(k.len());

        let (key, _) = history.first_live(resolve).unwrap();
        assert_eq!(key, "a");
        let (key, _) = history.last_live(resolve).unwrap();
        assert_eq!(key, "c");
        // Hits do not consume entries.
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_prunes_only_the_ends() {
        let mut history = history_of(&["a", "b", "c", "d", "e"]);
        let live: HashMap<&str, i32> = [("c", 3), ("e", 5)].into_iter().collect();
        let resolve = |k: &HistMapKey| live.get(k.as_str()).copied();

        let (key, value) = history.first_live(resolve).unwrap();
        assert_eq!((key.as_str(), value), ("c", 3));
        assert_eq!(history.len(), 3);

        // "d" is stale but sits in the middle; it survives until it reaches an end.
        assert_eq!(history.last_live(resolve).map(|(_, v)| v), Some(5));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_exhausted() {
        let mut history = history_of(&["a", "b"]);
        assert!(history.first_live(|_| None::<i32>).is_none());
        assert_eq!(history.len(), 0);

        let mut history = history_of(&["a", "b"]);
        assert!(history.last_live(|_| None::<i32>).is_none());
        assert_eq!(history.len(), 0);

        let mut empty = InsertHistory::new();
        assert!(empty.first_live(|_| Some(1)).is_none());
    }

    #[test]
    fn test_duplicate_entries() {
        // An updated key appears twice; either copy resolves to the current value.
        let mut history = history_of(&["a", "b", "a"]);
        let resolve = |k: &HistMapKey| if k == "a" { Some(7) } else { None };
        let (key, value) = history.last_live(resolve).unwrap();
        assert_eq!((key.as_str(), value), ("a", 7));
        let (key, value) = history.first_live(resolve).unwrap();
        assert_eq!((key.as_str(), value), ("a", 7));
        assert_eq!(history.len(), 3);
    }
}
