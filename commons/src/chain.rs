use crate::{ctx::RainbowTableCtx, hash::DigestBytes, password::Password, reduction::cantor};

/// Runs a full chain forward from `seed`, returning the endpoint digest.
///
/// Pure and thread-safe: it touches only its arguments, which is what lets
/// the builder and finder call it concurrently from many worker threads
/// without any synchronization of their own.
pub fn build_chain(seed: Password, row_salt: u64, ctx: &RainbowTableCtx) -> DigestBytes {
    let mut plain = seed;
    let mut digest = ctx.hash.hash(&plain);

    for step in 0..ctx.chain_length as u64 {
        plain = ctx
            .reduction
            .reduce(cantor(row_salt, step), ctx.password_length, &ctx.charset, &digest);
        digest = ctx.hash.hash(&plain);
    }

    digest
}
