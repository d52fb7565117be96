use std::thread;

use raintable_commons::{DigestBytes, Password};

use crate::table::Table;

/// Caps the number of lookup workers; lookups are embarrassingly parallel
/// across chain offsets but there is no point spawning more workers than
/// there are offsets to search.
fn lookup_threads(requested: usize, chain_length: u32) -> usize {
    requested.max(1).min(chain_length.max(1) as usize)
}

/// Recomputes one step of a chain: hashes `plain`, then reduces using the
/// lookup salt schedule (the raw step index, with no Cantor pairing --
/// see the Finder design note on the row-salt asymmetry at lookup time).
fn step(table: &Table, plain: Password, salt: u64) -> (DigestBytes, Password) {
    let ctx = table.ctx();
    let digest = ctx.hash.hash(&plain);
    let next = ctx
        .reduction
        .reduce(salt, ctx.password_length, &ctx.charset, &digest);
    (digest, next)
}

/// Phase 1: given `target` and a hypothetical position `i`, replays the
/// reductions from `i` to `chain_length - 1` as if `target` were the hash
/// produced at step `i`, and checks whether the resulting synthesized
/// endpoint is a known row. Returns the located endpoint on success.
fn locate_candidate_endpoint(table: &Table, target: &DigestBytes, i: u32) -> Option<DigestBytes> {
    let ctx = table.ctx();
    let mut hash = target.clone();

    for s in i..ctx.chain_length {
        let plain = ctx
            .reduction
            .reduce(s as u64, ctx.password_length, &ctx.charset, &hash);
        hash = ctx.hash.hash(&plain);
    }

    table.rows().contains_key(&hash).then_some(hash)
}

/// Phase 2: replays the candidate chain forward from its stored seed,
/// comparing the hash produced at every step to `target`. Returns the
/// plaintext that actually produced `target`, or `None` if the chain was a
/// false lead (the synthesized endpoint collided with a real one).
fn replay_chain(table: &Table, seed: Password, target: &DigestBytes) -> Option<Password> {
    let ctx = table.ctx();
    let mut plain = seed;

    for s in 0..=ctx.chain_length as u64 {
        let (digest, next) = step(table, plain, s);
        if &digest == target {
            return Some(plain);
        }
        plain = next;
    }

    None
}

/// Searches the table for a plaintext hashing to `target`.
///
/// Returns `Some(password)` only once the preimage has been verified by
/// re-hashing it -- false positives are never returned, but false negatives
/// (coverage gaps inherent to a rainbow table) are expected and are not an
/// error.
pub fn find(table: &Table, target: &DigestBytes, threads: usize) -> Option<Password> {
    if table.is_empty() {
        return None;
    }

    if let Some(seed) = table.seed_for_endpoint(target) {
        if let Some(password) = replay_chain(table, seed, target) {
            return Some(password);
        }
    }

    let chain_length = table.ctx().chain_length;
    if chain_length == 0 {
        return None;
    }

    tracing::debug!(chain_length, threads, "direct endpoint match failed, sweeping chain offsets");
    let threads = lookup_threads(threads, chain_length);

    let results: Vec<Option<Password>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| {
                scope.spawn(move || {
                    let mut i = chain_length as i64 - 1 - worker as i64;
                    while i >= 0 {
                        if let Some(endpoint) = locate_candidate_endpoint(table, target, i as u32) {
                            if let Some(seed) = table.seed_for_endpoint(&endpoint) {
                                if let Some(password) = replay_chain(table, seed, target) {
                                    return Some(password);
                                }
                            }
                        }
                        i -= threads as i64;
                    }
                    None
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    results.into_iter().flatten().next()
}
