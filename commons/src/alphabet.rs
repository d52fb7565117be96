use tinyvec::ArrayVec;

use crate::error::{RainbowError, RainbowResult};

/// The maximum number of distinct characters a charset may declare.
pub const MAX_CHARSET_LENGTH: usize = 126;

/// The default charset, matching the reference tool this engine is modeled on.
pub const DEFAULT_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._";

/// An ordered, duplicate-free set of bytes used both as the password alphabet
/// and as the output range of the reduction function.
#[derive(Clone, Copy, Debug)]
pub struct Charset(ArrayVec<[u8; MAX_CHARSET_LENGTH]>);

impl Charset {
    /// Builds a charset from raw bytes, rejecting duplicates.
    pub fn new(bytes: &[u8]) -> RainbowResult<Self> {
        for (i, &a) in bytes.iter().enumerate() {
            if bytes[..i].contains(&a) {
                return Err(RainbowError::DuplicateCharset);
            }
        }

        let inner: ArrayVec<[u8; MAX_CHARSET_LENGTH]> = bytes
            .try_into()
            .map_err(|_| RainbowError::DuplicateCharset)?;

        Ok(Self(inner))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Converts an index into the charset to its ASCII character.
    #[inline]
    pub fn to_ascii(&self, n: usize) -> u8 {
        self.0[n]
    }

    /// Converts an ASCII character back to its index in the charset.
    #[inline]
    pub fn to_index(&self, c: u8) -> Option<usize> {
        self.0.iter().position(|&x| x == c)
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::new(DEFAULT_CHARSET).expect("the default charset has no duplicates")
    }
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Charset {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_characters() {
        assert!(matches!(
            Charset::new(b"aab"),
            Err(RainbowError::DuplicateCharset)
        ));
    }

    #[test]
    fn round_trips_indices() {
        let charset = Charset::new(b"abc").unwrap();
        assert_eq!(charset.to_ascii(0), b'a');
        assert_eq!(charset.to_index(b'c'), Some(2));
        assert_eq!(charset.to_index(b'z'), None);
    }

    #[test]
    fn default_charset_has_no_duplicates() {
        let charset = Charset::default();
        assert_eq!(charset.len(), DEFAULT_CHARSET.len());
    }
}
