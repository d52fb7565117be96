use blake2::Blake2b512;
use digest::Digest as _;
use sha1::Sha1;
use sha2::Sha256;
use tinyvec::ArrayVec;

use crate::{error::RainbowError, password::Password};

/// The widest digest this engine supports (BLAKE2b-512).
pub const MAX_DIGEST_LENGTH: usize = 64;

/// A hash digest stored inline, sized to the widest supported hash function.
pub type DigestBytes = ArrayVec<[u8; MAX_DIGEST_LENGTH]>;

/// The hash functions the engine knows how to adapt. Each variant is a thin
/// wrapper around a RustCrypto digest implementation; the engine itself never
/// touches the underlying compression function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashKind {
    Sha1,
    Sha256,
    Blake2b512,
}

impl HashKind {
    /// Hashes a password, returning a digest exactly [`Self::output_width`] bytes long.
    #[inline]
    pub fn hash(&self, password: &Password) -> DigestBytes {
        match self {
            HashKind::Sha1 => Sha1::digest(password.as_ref()).as_slice().try_into().unwrap(),
            HashKind::Sha256 => Sha256::digest(password.as_ref())
                .as_slice()
                .try_into()
                .unwrap(),
            HashKind::Blake2b512 => Blake2b512::digest(password.as_ref())
                .as_slice()
                .try_into()
                .unwrap(),
        }
    }

    /// The digest width in bytes, `W` in the spec.
    #[inline]
    pub const fn output_width(&self) -> usize {
        match self {
            HashKind::Sha1 => 20,
            HashKind::Sha256 => 32,
            HashKind::Blake2b512 => 64,
        }
    }

    /// The on-disk binary identifier (`hash id` in the binary codec).
    #[inline]
    pub const fn id(&self) -> u32 {
        match self {
            HashKind::Sha1 => 1,
            HashKind::Sha256 => 2,
            HashKind::Blake2b512 => 3,
        }
    }

    /// Recovers a `HashKind` from its on-disk binary identifier.
    pub fn from_id(id: u32) -> Result<Self, RainbowError> {
        match id {
            1 => Ok(HashKind::Sha1),
            2 => Ok(HashKind::Sha256),
            3 => Ok(HashKind::Blake2b512),
            other => Err(RainbowError::UnknownHash(other)),
        }
    }

    /// The on-disk text identifier (the second line of a `RTXT` file).
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            HashKind::Sha1 => "SHA1",
            HashKind::Sha256 => "SHA256",
            HashKind::Blake2b512 => "BLAKE512",
        }
    }

    /// Recovers a `HashKind` from its on-disk text identifier.
    pub fn from_name(name: &str) -> Result<Self, RainbowError> {
        match name {
            "SHA1" => Ok(HashKind::Sha1),
            "SHA256" => Ok(HashKind::Sha256),
            "BLAKE512" => Ok(HashKind::Blake2b512),
            other => Err(RainbowError::UnknownHashName(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_width_matches_rustcrypto() {
        let p = Password::new(b"abc");
        assert_eq!(HashKind::Sha1.hash(&p).len(), HashKind::Sha1.output_width());
        assert_eq!(
            HashKind::Sha256.hash(&p).len(),
            HashKind::Sha256.output_width()
        );
        assert_eq!(
            HashKind::Blake2b512.hash(&p).len(),
            HashKind::Blake2b512.output_width()
        );
    }

    #[test]
    fn id_and_name_round_trip() {
        for kind in [HashKind::Sha1, HashKind::Sha256, HashKind::Blake2b512] {
            assert_eq!(HashKind::from_id(kind.id()).unwrap(), kind);
            assert_eq!(HashKind::from_name(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let p = Password::new(b"hunter2");
        assert_eq!(HashKind::Sha256.hash(&p), HashKind::Sha256.hash(&p));
    }
}
