//! Key type and key-adjacency operations.
//!
//! A `Key` is an opaque token ordered lexicographically by bytes. The merge
//! engine splits ranges at arbitrary key boundaries, which requires exact
//! adjacency: `successor` and `predecessor` produce the nearest keys on
//! either side of a given key, with `predecessor(successor(k)) == k`.
//!
//! Two bytes are reserved for boundary bookkeeping:
//!
//! - `0x00` is the successor suffix: `successor(k)` is `k` + `0x00`, the
//!   smallest key that sorts strictly after `k`.
//! - `0xFF` is the terminal filler: `predecessor(k)` for a `k` not ending in
//!   `0x00` decrements the final byte and appends `0xFF`. A single `0xFF`
//!   byte is the end-of-namespace sentinel, sorting above every application
//!   key. Application keys must not begin with `0xFF`.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Terminal filler byte, also the end-of-namespace sentinel.
const TERMINAL: u8 = 0xff;

/// An opaque key, ordered lexicographically by bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Key(Vec<u8>);

impl Key {
    /// Creates a key from raw bytes.
    #[inline]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The empty key, minimum of the key order.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// The end-of-namespace sentinel, sorting above every application key.
    #[inline]
    pub fn namespace_end() -> Self {
        Self(alloc::vec![TERMINAL])
    }

    /// Returns the raw bytes of this key.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if this is the empty root key.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The smallest key sorting strictly after this one.
    ///
    /// No key can sort strictly between a key and its successor.
    pub fn successor(&self) -> Key {
        let mut bytes = Vec::with_capacity(self.0.len() + 1);
        bytes.extend_from_slice(&self.0);
        bytes.push(0);
        Key(bytes)
    }

    /// The nearest representable key sorting strictly before this one.
    ///
    /// Exact inverse of [`successor`](Key::successor): a key ending in
    /// `0x00` maps back to its base. For other keys the final byte is
    /// decremented and the terminal filler appended.
    ///
    /// # Panics
    ///
    /// Panics when called on the root key, which has no predecessor.
    pub fn predecessor(&self) -> Key {
        let mut bytes = self.0.clone();
        match bytes.pop() {
            Some(0) => Key(bytes),
            Some(last) => {
                bytes.push(last - 1);
                bytes.push(TERMINAL);
                Key(bytes)
            }
            None => panic!("the root key has no predecessor"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(\"")?;
        for &byte in &self.0 {
            if (0x20..0x7f).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        write!(f, "\")")
    }
}
