use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::HistMapError;

/// Maximum key length in bytes, matching the longest word of the target dictionary.
pub const MAX_KEY_LEN: usize = 17;

/// Fixed-capacity key stored inline in a slot.
///
/// The bytes live inside the slot itself rather than behind a heap pointer, so
/// a search sequence walks contiguous memory. Construction fails for strings
/// longer than [`MAX_KEY_LEN`] bytes; keys are never truncated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistMapKey {
    bytes: [u8; MAX_KEY_LEN],
    len: u8,
}

impl HistMapKey {
    /// Copies `key` into an inline buffer.
    ///
    /// # Errors
    ///
    /// Returns [`HistMapError::KeyTooLong`] when `key` exceeds [`MAX_KEY_LEN`] bytes.
    pub fn new(key: &str) -> Result<Self, HistMapError> {
        let len = key.len();
        if len > MAX_KEY_LEN {
            return Err(HistMapError::KeyTooLong {
                len,
                max: MAX_KEY_LEN,
            });
        }
        let mut bytes = [0u8; MAX_KEY_LEN];
        bytes[..len].copy_from_slice(key.as_bytes());
        Ok(HistMapKey {
            bytes,
            len: len as u8,
        })
    }

    pub fn as_str(&self) -> &str {
        // The prefix is always a copy of a whole `&str`, so this never falls back.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for HistMapKey {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for HistMapKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for HistMapKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for HistMapKey {
    type Error = HistMapError;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        HistMapKey::new(key)
    }
}

impl PartialEq<str> for HistMapKey {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HistMapKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for HistMapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for HistMapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_basic() {
        let key = HistMapKey::new("apple").unwrap();
        assert_eq!(key.as_str(), "apple");
        assert_eq!(key.len(), 5);
        assert!(!key.is_empty());
        assert_eq!(key, "apple");
        assert_eq!(format!("{key}"), "apple");
        assert_eq!(format!("{key:?}"), "\"apple\"");

        let empty = HistMapKey::new("").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    fn test_key_length_limit() {
        let longest = "a".repeat(MAX_KEY_LEN);
        let key = HistMapKey::new(&longest).unwrap();
        assert_eq!(key.as_str(), longest);

        let too_long = "a".repeat(MAX_KEY_LEN + 1);
        match HistMapKey::new(&too_long).unwrap_err() {
            HistMapError::KeyTooLong { len, max } => {
                assert_eq!(len, MAX_KEY_LEN + 1);
                assert_eq!(max, MAX_KEY_LEN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_key_multibyte() {
        // 8 two-byte characters: 16 bytes, fits.
        let key = HistMapKey::new("éééééééé").unwrap();
        assert_eq!(key.len(), 16);
        assert_eq!(&*key, "éééééééé");

        // 9 two-byte characters: 18 bytes, rejected although only 9 chars.
        HistMapKey::try_from("ééééééééé").unwrap_err();
    }

    #[test]
    fn test_key_equality_ignores_padding() {
        let a = HistMapKey::new("ab").unwrap();
        let b = HistMapKey::try_from("ab").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, HistMapKey::new("abc").unwrap());
    }
}
