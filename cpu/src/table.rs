use std::collections::HashSet;

use indexmap::IndexMap;
use raintable_commons::{DigestBytes, Password, RainbowTableCtx};

/// Endpoint hash -> seed password. Keyed by the raw digest bytes (never by
/// a hex string) so that persistence can sort directly on the key and the
/// binary codec never has to round-trip through text.
pub type RowMap = IndexMap<DigestBytes, Password>;

/// A rainbow table: the chains produced by a build, or loaded from disk.
///
/// Mutated only by [`crate::builder::build`] and [`crate::codec`]. Once a
/// lookup via [`crate::finder::find`] begins, the caller must not mutate it
/// further -- the finder assumes a frozen table and takes no lock of its own.
#[derive(Debug)]
pub struct Table {
    rows: RowMap,
    seeds: HashSet<Password>,
    ctx: RainbowTableCtx,
}

impl Table {
    /// Wraps a parameter block with empty row/seed storage.
    pub fn empty(ctx: RainbowTableCtx) -> Self {
        Self {
            rows: RowMap::new(),
            seeds: HashSet::new(),
            ctx,
        }
    }

    /// Assembles a table from its parts, typically after a build or a load.
    pub fn from_parts(rows: RowMap, seeds: HashSet<Password>, ctx: RainbowTableCtx) -> Self {
        Self { rows, seeds, ctx }
    }

    pub fn ctx(&self) -> &RainbowTableCtx {
        &self.ctx
    }

    pub fn rows(&self) -> &RowMap {
        &self.rows
    }

    pub fn seeds(&self) -> &HashSet<Password> {
        &self.seeds
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the seed whose chain produced the given endpoint, if any.
    pub fn seed_for_endpoint(&self, endpoint: &DigestBytes) -> Option<Password> {
        self.rows.get(endpoint).copied()
    }

    /// Returns the rows sorted lexicographically by endpoint hash, the
    /// deterministic order the codec persists in.
    pub fn sorted_rows(&self) -> Vec<(&DigestBytes, &Password)> {
        let mut rows: Vec<_> = self.rows.iter().collect();
        rows.sort_unstable_by(|a, b| a.0.as_slice().cmp(b.0.as_slice()));
        rows
    }
}
