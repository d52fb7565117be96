use std::{
    collections::HashSet,
    sync::Mutex,
    thread,
};

use crossbeam_channel::Sender;
use rand::Rng;
use raintable_commons::{build_chain, Password, RainbowTableCtx, MAX_PASSWORD_LENGTH};

use crate::{
    error::{RainbowError, RainbowResult},
    event::Event,
    table::{RowMap, Table},
};

/// Maximum number of times a worker re-rolls a seed after an endpoint
/// collision before giving up on that row entirely.
const MAX_ENDPOINT_RETRIES: u32 = 10;

/// Builds a table in random mode: every seed is freshly generated and
/// deduplicated against every other seed produced by any worker.
pub fn build(
    ctx: RainbowTableCtx,
    threads: usize,
    progress: Option<Sender<Event>>,
) -> RainbowResult<Table> {
    build_inner(ctx, threads, None, progress)
}

/// Builds a table in dictionary mode: rows are produced from a fixed,
/// pre-supplied list of seeds rather than randomly generated ones.
pub fn build_from_seeds(
    ctx: RainbowTableCtx,
    threads: usize,
    seeds: Vec<Password>,
    progress: Option<Sender<Event>>,
) -> RainbowResult<Table> {
    build_inner(ctx, threads, Some(seeds), progress)
}

fn clamp_threads(requested: usize) -> RainbowResult<usize> {
    if requested == 0 {
        return Err(RainbowError::ZeroThreads);
    }

    let available = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    Ok(requested.min(available))
}

fn build_inner(
    ctx: RainbowTableCtx,
    threads: usize,
    seeds: Option<Vec<Password>>,
    progress: Option<Sender<Event>>,
) -> RainbowResult<Table> {
    let threads = clamp_threads(threads)?;
    let dictionary_mode = seeds.is_some();
    let seed_list = seeds.unwrap_or_default();

    let effective_n = if dictionary_mode {
        seed_list.len() as u64
    } else {
        ctx.vertical
    };

    let per_worker = effective_n / threads as u64;
    let rounded_n = per_worker * threads as u64;

    if rounded_n != effective_n {
        tracing::warn!(
            requested = effective_n,
            rounded = rounded_n,
            threads,
            "vertical size is not divisible by the thread count, rounding down"
        );
    }

    let rows = Mutex::new(RowMap::with_capacity(rounded_n as usize));
    let seed_set = Mutex::new(HashSet::with_capacity(rounded_n as usize));

    thread::scope(|scope| {
        for t in 0..threads {
            let rows = &rows;
            let seed_set = &seed_set;
            let ctx = &ctx;
            let seed_list = &seed_list;
            let progress = if t == 0 { progress.clone() } else { None };

            scope.spawn(move || {
                if dictionary_mode {
                    build_dictionary_worker(t as u64, per_worker, seed_list, ctx, rows, seed_set, progress);
                } else {
                    build_random_worker(t as u64, per_worker, ctx, rows, seed_set, progress);
                }
            });
        }
    });

    let rows = rows.into_inner().unwrap();
    let seed_set = seed_set.into_inner().unwrap();

    Ok(Table::from_parts(rows, seed_set, ctx))
}

fn random_password(rng: &mut impl Rng, ctx: &RainbowTableCtx) -> Password {
    let mut buf = [0u8; MAX_PASSWORD_LENGTH];
    for slot in buf.iter_mut().take(ctx.password_length) {
        let idx = rng.gen_range(0..ctx.charset.len());
        *slot = ctx.charset.to_ascii(idx);
    }
    Password::new(&buf[..ctx.password_length])
}

/// Emits a progress event roughly every 1% of `total`, floored at 200 rows,
/// matching the reference tool's progress cadence.
fn maybe_report(progress: &Option<Sender<Event>>, done: u64, total: u64) {
    if total == 0 {
        return;
    }

    let step = (total / 100).max(200).min(total);
    if done % step == 0 || done == total {
        tracing::info!(done, total, "build progress");
        if let Some(sender) = progress {
            let _ = sender.send(Event::Progress { done, total });
        }
    }
}

fn build_random_worker(
    thread_index: u64,
    per_worker: u64,
    ctx: &RainbowTableCtx,
    rows: &Mutex<RowMap>,
    seed_set: &Mutex<HashSet<Password>>,
    progress: Option<Sender<Event>>,
) {
    let mut rng = rand::thread_rng();

    for i in 0..per_worker {
        let row_salt = thread_index * per_worker + (per_worker - 1 - i);
        let mut attempts = 0;

        loop {
            let seed = loop {
                let candidate = random_password(&mut rng, ctx);
                if seed_set.lock().unwrap().insert(candidate) {
                    break candidate;
                }
            };

            let endpoint = build_chain(seed, row_salt, ctx);
            let mut guard = rows.lock().unwrap();

            if !guard.contains_key(&endpoint) {
                guard.insert(endpoint, seed);
                break;
            }
            drop(guard);

            attempts += 1;
            if attempts >= MAX_ENDPOINT_RETRIES {
                tracing::warn!(row_salt, "giving up on row after repeated endpoint collisions");
                break;
            }
        }

        maybe_report(&progress, i + 1, per_worker);
    }
}

fn build_dictionary_worker(
    thread_index: u64,
    per_worker: u64,
    seed_list: &[Password],
    ctx: &RainbowTableCtx,
    rows: &Mutex<RowMap>,
    seed_set: &Mutex<HashSet<Password>>,
    progress: Option<Sender<Event>>,
) {
    let start = thread_index * per_worker;

    for i in 0..per_worker {
        let seed = seed_list[(start + i) as usize];
        seed_set.lock().unwrap().insert(seed);

        let row_salt = i;
        let endpoint = build_chain(seed, row_salt, ctx);

        let mut guard = rows.lock().unwrap();
        if !guard.contains_key(&endpoint) {
            guard.insert(endpoint, seed);
        } else {
            tracing::warn!(row_salt, "discarding row with colliding endpoint");
        }
        drop(guard);

        maybe_report(&progress, i + 1, per_worker);
    }
}
