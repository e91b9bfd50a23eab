//! Byte buffer used for derived secrets and provider output.
//!
//! [`Buf`] wraps `Vec<u8>` and wipes its contents when dropped or cleared, so
//! key-schedule secrets and PSK values do not linger in freed memory.

use std::fmt;
use std::ops::{Deref, DerefMut};

use zeroize::Zeroize;

/// Growable byte buffer that zeroizes on drop.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Buf(Vec<u8>);

impl Buf {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new buffer from a slice.
    pub fn from_slice(data: &[u8]) -> Self {
        Buf(data.to_vec())
    }

    /// Wipe and clear the buffer.
    pub fn clear(&mut self) {
        self.0.zeroize();
    }

    /// Extend the buffer with a slice of bytes.
    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.0.extend_from_slice(other);
    }

    /// Push a single byte onto the buffer.
    pub fn push(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Truncate the buffer to the specified length.
    pub fn truncate(&mut self, len: usize) {
        if len < self.0.len() {
            self.0[len..].zeroize();
            self.0.truncate(len);
        }
    }

    /// Copy the contents out as a plain `Vec<u8>`.
    ///
    /// The copy is not wiped on drop.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl Drop for Buf {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Deref for Buf {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Buf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<[u8]> for Buf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Buf {
    fn from(value: Vec<u8>) -> Self {
        Buf(value)
    }
}

impl fmt::Debug for Buf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buf").field("len", &self.0.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_contents() {
        let buf = Buf::from_slice(&[0xde, 0xad]);
        assert_eq!(format!("{:?}", buf), "Buf { len: 2 }");
    }

    #[test]
    fn truncate_and_clear() {
        let mut buf = Buf::from_slice(&[1, 2, 3, 4]);
        buf.truncate(2);
        assert_eq!(&*buf, &[1, 2]);
        buf.truncate(10);
        assert_eq!(buf.len(), 2);
        buf.clear();
        assert!(buf.is_empty());
    }
}
