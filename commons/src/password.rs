use std::{
    fmt::{Debug, Display},
    ops::{Deref, DerefMut},
};

use tinyvec::ArrayVec;

/// The largest password length this engine will ever allocate stack space for.
pub const MAX_PASSWORD_LENGTH: usize = 32;

/// A password drawn from a table's charset, stored inline on the stack.
///
/// Chain computation touches one of these per hash/reduce step, so keeping it
/// a fixed-size value (no heap allocation) matters for throughput.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Password(ArrayVec<[u8; MAX_PASSWORD_LENGTH]>);

impl Password {
    /// Builds a password from raw bytes. Panics if `bytes` is longer than
    /// [`MAX_PASSWORD_LENGTH`] -- callers validate `password_length` against
    /// that bound once, at context-construction time.
    pub fn new(bytes: &[u8]) -> Self {
        Password(bytes.try_into().expect("password exceeds MAX_PASSWORD_LENGTH"))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Password {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Password {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Password {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_ascii() {
        let p = Password::new(b"abc");
        assert_eq!(p.to_string(), "abc");
    }
}
