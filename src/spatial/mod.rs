//! Pluggable spatial index interface.
//!
//! An index is owned exclusively by the complex and notified synchronously of
//! every structural change: each newly created cell (including facets built
//! on demand) arrives through [`SpatialIndex::add_cell`], and every destroyed
//! cell is announced through [`SpatialIndex::remove_cell`] before it is
//! unlinked. There is no rollback if an index update misbehaves; callers
//! recover by re-attaching, which always performs a full replay of the live
//! complex.

use crate::topology::cell::{CellId, VertexId};
use hashbrown::HashMap;

/// Receiver of structural notifications and point-location queries.
pub trait SpatialIndex {
    /// Called when the index is bound to a complex, before the replay.
    fn attach(&mut self) {}

    /// Called when the index is unbound.
    fn detach(&mut self) {}

    /// A cell was created or replayed; `tuple` lists its defining vertices.
    fn add_cell(&mut self, tuple: &[VertexId], cell: CellId);

    /// `cell` is about to be unlinked from the complex.
    fn remove_cell(&mut self, cell: CellId);

    /// Point-location query; `None` when the index cannot resolve the point.
    fn locate_point(&self, coord: &[f32]) -> Option<CellId>;
}

/// Index stub that records registrations and never resolves a point.
///
/// Stands in where no real spatial index is available and doubles as a probe
/// for notification traffic in tests.
#[derive(Clone, Debug, Default)]
pub struct NullIndex {
    cells: HashMap<CellId, Vec<VertexId>>,
    attached: bool,
}

impl NullIndex {
    /// Creates an empty, detached stub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells are registered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the stub is currently bound to a complex.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Registered tuple of `cell`, if any.
    pub fn tuple(&self, cell: CellId) -> Option<&[VertexId]> {
        self.cells.get(&cell).map(Vec::as_slice)
    }
}

impl SpatialIndex for NullIndex {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.cells.clear();
    }

    fn add_cell(&mut self, tuple: &[VertexId], cell: CellId) {
        self.cells.insert(cell, tuple.to_vec());
    }

    fn remove_cell(&mut self, cell: CellId) {
        self.cells.remove(&cell);
    }

    fn locate_point(&self, _coord: &[f32]) -> Option<CellId> {
        None
    }
}
