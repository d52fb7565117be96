use crate::{alphabet::Charset, hash::DigestBytes, password::Password};

/// Cantor's pairing function, used to turn a `(row_salt, step)` pair into a
/// single salt that is unique per (row, step) across the whole table.
/// Without this, two different rows would apply the exact same reduction at
/// the same step and their chains would merge.
#[inline]
pub fn cantor(x: u64, y: u64) -> u64 {
    let sum = x + y;
    (sum * (sum + 1)) / 2 + y
}

/// The two reduction variants the engine supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReductionKind {
    /// Folds five spread-out windows of the digest together with the salt.
    /// This is the default: it mixes more of the digest into each output
    /// character, which is what makes per-step salting effective at all.
    Salted,
    /// Ignores the salt entirely and folds only the first `L` digest bytes.
    /// Kept for parity with the reference tool; chains built with it are
    /// more prone to merging across rows.
    Simple,
}

impl ReductionKind {
    /// Reduces a digest to a password of `length` characters drawn from `charset`.
    ///
    /// `salt` is expected to already be the per-step salt (i.e. the caller
    /// applies [`cantor`] beforehand); this function is otherwise pure.
    pub fn reduce(&self, salt: u64, length: usize, charset: &Charset, hash: &DigestBytes) -> Password {
        let w = hash.len();
        let mut out = [0u8; crate::password::MAX_PASSWORD_LENGTH];

        match self {
            ReductionKind::Simple => {
                for (i, slot) in out.iter_mut().take(length).enumerate() {
                    let idx = hash[i] as usize % charset.len();
                    *slot = charset.to_ascii(idx);
                }
            }
            ReductionKind::Salted => {
                for (i, slot) in out.iter_mut().take(length).enumerate() {
                    let mut sum: u64 = salt;
                    for k in 0..5u64 {
                        let offset = (i + (k as usize) * length) % w;
                        sum += hash[offset] as u64;
                    }
                    let idx = (sum % charset.len() as u64) as usize;
                    *slot = charset.to_ascii(idx);
                }
            }
        }

        Password::new(&out[..length])
    }
}
