use crate::{alphabet::Charset, hash::HashKind, reduction::ReductionKind};

/// The default chain length (`C`), matching the reference tool.
pub const DEFAULT_CHAIN_LENGTH: u32 = 2_000;

/// The default password length (`L`).
pub const DEFAULT_PASSWORD_LENGTH: usize = 6;

/// The immutable parameter block shared by every row of a table.
///
/// Constructed once (via `raintable_cpu::RainbowTableCtxBuilder`) and then
/// passed by reference to every chain computation, build worker and finder
/// worker; nothing here ever changes after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RainbowTableCtx {
    /// The hash function used to digest passwords.
    pub hash: HashKind,
    /// The reduction variant used to fold digests back into passwords.
    pub reduction: ReductionKind,
    /// The alphabet passwords and reduction outputs are drawn from.
    pub charset: Charset,
    /// Vertical size: the number of rows the table was built to hold (`N`).
    pub vertical: u64,
    /// Horizontal size: the number of reduction steps per chain (`C`).
    pub chain_length: u32,
    /// Password length in characters (`L`).
    pub password_length: usize,
}

impl RainbowTableCtx {
    /// The digest width in bytes (`W`), determined by `hash`.
    #[inline]
    pub fn digest_width(&self) -> usize {
        self.hash.output_width()
    }
}
