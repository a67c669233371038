//! Deterministic per-dimension listing of live cells.
//!
//! The incidence arenas iterate in arbitrary order, so every operation that
//! emits or replays cells (index buffers, spatial-index rebuilds, export, the
//! point-location fallback scan) goes through a [`ChartCache`]: the live ids
//! of every dimension sorted ascending. Ids are monotonic, so the sorted
//! chart doubles as creation order. The cache is computed lazily and dropped
//! on any structural mutation.

use crate::topology::cell::CellId;
use crate::topology::incidence::IncidenceStore;
use itertools::Itertools;

/// Anything that caches data derived from the incidence graph.
pub trait InvalidateCache {
    /// Drop all derived caches so future queries recompute them.
    fn invalidate_cache(&mut self);
}

/// Sorted listing of live cells, one chart per dimension.
#[derive(Clone, Debug, Default)]
pub struct ChartCache {
    per_dim: Vec<Vec<CellId>>,
}

impl ChartCache {
    /// Live cells of `dim` in ascending id order. Empty past the maximum
    /// dimension.
    #[inline]
    pub fn dim(&self, dim: usize) -> &[CellId] {
        self.per_dim.get(dim).map_or(&[], Vec::as_slice)
    }

    /// All live cells, dimension-major, ascending ids within each dimension.
    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.per_dim.iter().flatten().copied()
    }

    /// Total number of live cells across all dimensions.
    pub fn len(&self) -> usize {
        self.per_dim.iter().map(Vec::len).sum()
    }

    /// Whether the complex has no live cells at all.
    pub fn is_empty(&self) -> bool {
        self.per_dim.iter().all(Vec::is_empty)
    }
}

pub(crate) fn compute_chart(store: &IncidenceStore) -> ChartCache {
    let mut per_dim = Vec::with_capacity(store.max_dim() + 1);
    per_dim.push(store.vertex_ids().map(CellId::vertex).sorted().collect());
    for dim in 1..=store.max_dim() {
        per_dim.push(
            store
                .cell_ids(dim)
                .map(|id| CellId::from_parts(dim, id))
                .sorted()
                .collect(),
        );
    }
    ChartCache { per_dim }
}
