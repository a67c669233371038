//! Incidence records and the per-dimension cell arena.
//!
//! The incidence graph stores, for every cell of dimension `k >= 1`, an
//! ordered boundary of `k + 1` labeled incidences and an unordered coboundary
//! of incidences one dimension up. Vertices (dimension 0) carry a dense slot
//! into the vertex buffer instead of a boundary. Boundary and coboundary
//! entries are mutual mirrors held as identity indices, never references;
//! reciprocity is a checked invariant, not a memory-management guarantee.

use crate::topology::cell::{CellId, VertexId};
use hashbrown::HashMap;
use std::num::NonZeroU64;

/// A labeled edge of the incidence graph.
///
/// Pairs the related cell (one dimension away from the owner of the record)
/// with the vertex distinguishing this incidence from its siblings: for a
/// boundary entry, the vertex omitted to obtain the facet; for a coboundary
/// entry, the vertex the containing cell adds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IncidenceRecord {
    /// Vertex label distinguishing this incidence.
    pub vert: VertexId,
    /// Raw id of the related cell. Its dimension is implied by which list the
    /// record sits in: one below for boundaries, one above for coboundaries.
    pub(crate) cell: NonZeroU64,
}

impl IncidenceRecord {
    #[inline]
    pub(crate) fn new(vert: VertexId, cell: NonZeroU64) -> Self {
        Self { vert, cell }
    }

    /// Raw id of the related cell.
    #[inline]
    pub fn cell_id(&self) -> u64 {
        self.cell.get()
    }
}

/// Record for a cell of dimension >= 1.
#[derive(Clone, Debug, Default)]
pub struct CellRecord {
    /// Ordered boundary: entry `i` is the facet obtained by omitting the
    /// `i`-th defining vertex. Always exactly `dim + 1` entries.
    pub boundary: Vec<IncidenceRecord>,
    /// Unordered coboundary: every cell one dimension up containing this
    /// cell as a facet.
    pub coboundary: Vec<IncidenceRecord>,
}

/// Record for a vertex (dimension 0).
#[derive(Clone, Debug)]
pub struct VertexRecord {
    /// Dense index into the vertex buffer.
    pub slot: usize,
    /// Incident 1-cells.
    pub coboundary: Vec<IncidenceRecord>,
}

/// Per-dimension arena of live cell records with monotonic id allocation.
///
/// Arena iteration order is not stable and is never load-bearing; anything
/// order-sensitive goes through the sorted chart
/// (see [`crate::topology::chart`]).
#[derive(Clone, Debug)]
pub struct IncidenceStore {
    max_dim: usize,
    verts: HashMap<VertexId, VertexRecord>,
    /// `cells[k]` holds the records of dimension `k + 1`.
    cells: Vec<HashMap<NonZeroU64, CellRecord>>,
    /// Next id per dimension `0..=max_dim`; strictly increasing, never
    /// reused.
    next_id: Vec<NonZeroU64>,
}

impl IncidenceStore {
    /// Creates an empty store for dimensions `0..=max_dim`.
    pub fn new(max_dim: usize) -> Self {
        Self {
            max_dim,
            verts: HashMap::new(),
            cells: (0..max_dim).map(|_| HashMap::new()).collect(),
            next_id: vec![NonZeroU64::MIN; max_dim + 1],
        }
    }

    /// Maximum cell dimension the store accepts.
    #[inline]
    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    /// Allocates the next id for `dim`. Ids strictly increase and are never
    /// reused, so removal leaves holes.
    pub fn alloc_id(&mut self, dim: usize) -> NonZeroU64 {
        debug_assert!(dim <= self.max_dim, "alloc_id past configured dimension");
        let id = self.next_id[dim];
        self.next_id[dim] = id.saturating_add(1);
        id
    }

    /// Number of live cells of `dim`; 0 for dimensions past the maximum.
    pub fn count(&self, dim: usize) -> usize {
        if dim == 0 {
            self.verts.len()
        } else {
            self.cells.get(dim - 1).map_or(0, |stratum| stratum.len())
        }
    }

    /// Whether `cell` is live.
    pub fn contains(&self, cell: CellId) -> bool {
        if cell.dim() == 0 {
            self.verts.contains_key(&VertexId::from_nonzero(cell.raw()))
        } else {
            self.cells
                .get(cell.dim() - 1)
                .is_some_and(|stratum| stratum.contains_key(&cell.raw()))
        }
    }

    /// Whether vertex `v` is live.
    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.verts.contains_key(&v)
    }

    #[inline]
    pub fn vertex(&self, v: VertexId) -> Option<&VertexRecord> {
        self.verts.get(&v)
    }

    #[inline]
    pub fn vertex_mut(&mut self, v: VertexId) -> Option<&mut VertexRecord> {
        self.verts.get_mut(&v)
    }

    /// Record of the `dim`-cell with raw id `id`.
    #[inline]
    pub fn cell(&self, dim: usize, id: NonZeroU64) -> Option<&CellRecord> {
        self.cells.get(dim.checked_sub(1)?)?.get(&id)
    }

    #[inline]
    pub fn cell_mut(&mut self, dim: usize, id: NonZeroU64) -> Option<&mut CellRecord> {
        self.cells.get_mut(dim.checked_sub(1)?)?.get_mut(&id)
    }

    /// Registers a vertex record. The id must come from [`alloc_id`](Self::alloc_id).
    pub fn insert_vertex(&mut self, v: VertexId, slot: usize) {
        let prior = self.verts.insert(
            v,
            VertexRecord {
                slot,
                coboundary: Vec::new(),
            },
        );
        debug_assert!(prior.is_none(), "vertex id {v} reused");
    }

    /// Registers a cell record. The id must come from [`alloc_id`](Self::alloc_id).
    pub fn insert_cell(&mut self, dim: usize, id: NonZeroU64, rec: CellRecord) {
        debug_assert!((1..=self.max_dim).contains(&dim));
        debug_assert_eq!(rec.boundary.len(), dim + 1, "boundary arity mismatch");
        let prior = self.cells[dim - 1].insert(id, rec);
        debug_assert!(prior.is_none(), "cell id {id} reused at dimension {dim}");
    }

    /// Unregisters a vertex, returning its record.
    pub fn remove_vertex(&mut self, v: VertexId) -> Option<VertexRecord> {
        self.verts.remove(&v)
    }

    /// Unregisters a cell, returning its record.
    pub fn remove_cell(&mut self, dim: usize, id: NonZeroU64) -> Option<CellRecord> {
        self.cells.get_mut(dim.checked_sub(1)?)?.remove(&id)
    }

    /// Coboundary incidences of the `dim`-cell `id`.
    pub fn coboundary(&self, dim: usize, id: NonZeroU64) -> Option<&[IncidenceRecord]> {
        if dim == 0 {
            self.verts
                .get(&VertexId::from_nonzero(id))
                .map(|r| r.coboundary.as_slice())
        } else {
            self.cell(dim, id).map(|r| r.coboundary.as_slice())
        }
    }

    /// Appends a coboundary incidence to the `dim`-cell `id`.
    pub fn push_coboundary(&mut self, dim: usize, id: NonZeroU64, rec: IncidenceRecord) {
        let pushed = if dim == 0 {
            self.verts
                .get_mut(&VertexId::from_nonzero(id))
                .map(|r| r.coboundary.push(rec))
        } else {
            self.cell_mut(dim, id).map(|r| r.coboundary.push(rec))
        };
        debug_assert!(pushed.is_some(), "coboundary push onto dead cell {dim}:{id}");
    }

    /// Removes the first coboundary incidence of `dim`-cell `id` that points
    /// at `upper`. Order within the coboundary is not preserved.
    pub fn unlink_coboundary(&mut self, dim: usize, id: NonZeroU64, upper: NonZeroU64) {
        let cob = if dim == 0 {
            self.verts
                .get_mut(&VertexId::from_nonzero(id))
                .map(|r| &mut r.coboundary)
        } else {
            self.cell_mut(dim, id).map(|r| &mut r.coboundary)
        };
        if let Some(cob) = cob
            && let Some(pos) = cob.iter().position(|rec| rec.cell == upper)
        {
            cob.swap_remove(pos);
        }
    }

    /// Iterator over live vertex ids (arbitrary order).
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.verts.keys().copied()
    }

    /// Iterator over live raw ids of `dim` (arbitrary order). Empty for
    /// dimension 0 and dimensions past the maximum.
    pub fn cell_ids(&self, dim: usize) -> impl Iterator<Item = NonZeroU64> + '_ {
        dim.checked_sub(1)
            .and_then(|k| self.cells.get(k))
            .into_iter()
            .flat_map(|stratum| stratum.keys().copied())
    }
}
