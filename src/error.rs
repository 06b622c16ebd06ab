use std::io::{self, ErrorKind};

use thiserror::Error;

/// Errors surfaced by [`HistMap`](crate::HistMap) and [`HistMapBuilder`](crate::HistMapBuilder).
#[derive(Error, Debug)]
pub enum HistMapError {
    /// No empty or tombstoned slot exists along the search sequence.
    #[error("capacity of {capacity} slots exceeded")]
    CapacityExceeded { capacity: usize },

    /// Returned by `get_first`/`get_last` when no live key remains.
    #[error("container is empty")]
    Empty,

    #[error("key of {len} bytes exceeds the maximum of {max}")]
    KeyTooLong { len: usize, max: usize },

    #[error("cannot size table for {expected} keys with scaling factor {scaling_factor}")]
    InvalidCapacity {
        expected: usize,
        scaling_factor: usize,
    },

    #[error("invalid hash configuration: {0}")]
    HashConfig(#[from] serde_json::Error),
}

impl From<HistMapError> for io::Error {
    fn from(err: HistMapError) -> Self {
        let kind = match &err {
            HistMapError::HashConfig(_) => ErrorKind::InvalidData,
            HistMapError::CapacityExceeded { .. } => ErrorKind::OutOfMemory,
            HistMapError::Empty => ErrorKind::NotFound,
            HistMapError::KeyTooLong { .. } | HistMapError::InvalidCapacity { .. } => {
                ErrorKind::InvalidInput
            }
        };
        io::Error::new(kind, err)
    }
}
