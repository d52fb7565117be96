use raintable_commons::{
    Charset, HashKind, RainbowTableCtx, ReductionKind, DEFAULT_CHAIN_LENGTH, DEFAULT_CHARSET,
    DEFAULT_PASSWORD_LENGTH,
};

use crate::error::{RainbowError, RainbowResult};

/// A builder for a [`RainbowTableCtx`].
#[derive(Clone, Debug)]
pub struct RainbowTableCtxBuilder {
    hash: HashKind,
    reduction: ReductionKind,
    charset: Vec<u8>,
    chain_length: u32,
    password_length: usize,
    vertical: u64,
}

impl Default for RainbowTableCtxBuilder {
    fn default() -> Self {
        Self {
            hash: HashKind::Sha256,
            reduction: ReductionKind::Salted,
            charset: DEFAULT_CHARSET.to_vec(),
            chain_length: DEFAULT_CHAIN_LENGTH,
            password_length: DEFAULT_PASSWORD_LENGTH,
            vertical: 0,
        }
    }
}

impl RainbowTableCtxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hash function of the context.
    pub fn hash(mut self, hash: HashKind) -> Self {
        self.hash = hash;
        self
    }

    /// Sets the reduction variant of the context.
    pub fn reduction(mut self, reduction: ReductionKind) -> Self {
        self.reduction = reduction;
        self
    }

    /// Sets the charset of the context.
    pub fn charset(mut self, charset: &[u8]) -> Self {
        self.charset = charset.to_vec();
        self
    }

    /// Sets the chain length (`C`) of the context.
    pub fn chain_length(mut self, chain_length: u32) -> Self {
        self.chain_length = chain_length;
        self
    }

    /// Sets the password length (`L`) of the context.
    pub fn password_length(mut self, password_length: usize) -> Self {
        self.password_length = password_length;
        self
    }

    /// Sets the vertical size (`N`) of the context.
    pub fn vertical(mut self, vertical: u64) -> Self {
        self.vertical = vertical;
        self
    }

    /// Builds the context, validating every parameter.
    pub fn build(self) -> RainbowResult<RainbowTableCtx> {
        if self.password_length == 0 {
            return Err(RainbowError::EmptyPasswordLength);
        }

        if self.password_length > raintable_commons::MAX_PASSWORD_LENGTH {
            return Err(RainbowError::PasswordTooLong(
                self.password_length,
                raintable_commons::MAX_PASSWORD_LENGTH,
            ));
        }

        let charset = Charset::new(&self.charset)?;

        Ok(RainbowTableCtx {
            hash: self.hash,
            reduction: self.reduction,
            charset,
            vertical: self.vertical,
            chain_length: self.chain_length,
            password_length: self.password_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_successfully() {
        let ctx = RainbowTableCtxBuilder::new().vertical(16).build().unwrap();
        assert_eq!(ctx.password_length, DEFAULT_PASSWORD_LENGTH);
        assert_eq!(ctx.chain_length, DEFAULT_CHAIN_LENGTH);
    }

    #[test]
    fn rejects_zero_password_length() {
        let err = RainbowTableCtxBuilder::new()
            .password_length(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, RainbowError::EmptyPasswordLength));
    }

    #[test]
    fn rejects_duplicate_charset() {
        let err = RainbowTableCtxBuilder::new()
            .charset(b"aab")
            .build()
            .unwrap_err();
        assert!(matches!(err, RainbowError::DuplicateCharset));
    }
}
