//! The cell-tuple complex.
//!
//! [`CellComplex`] orchestrates the incidence arena and the dense vertex
//! buffer across dimensions `0..=max_dim`, owns the per-dimension id
//! counters, and exposes every public mutation and query operation. Cells
//! are identified by ordered vertex tuples; a cell of dimension `k` has
//! `k + 1` facets, each obtained by omitting one defining vertex, and the
//! incidence graph keeps boundary and coboundary mirrored at all times.
//!
//! Mutation cascades run on explicit work lists rather than the call stack:
//! `remove_cell` destroys the star above a cell top-down, `split_cell` and
//! `collapse_cell` drive breadth-first queues. The only remaining recursion
//! is `add_cell`'s facet construction, whose depth is bounded by the
//! configured maximum dimension.
//!
//! An optional [`SpatialIndex`] is notified synchronously of every structural
//! change; index failures are not rolled back, and callers recover by
//! re-attaching (a full replay).

use crate::data::vertex_buffer::VertexBuffer;
use crate::data::vertex_format::VertexFormat;
use crate::debug_invariants::DebugInvariants;
use crate::error::CellComplexError;
use crate::geometry::BoundingBox;
use crate::geometry::predicate::{AabbPredicate, PointInCell};
use crate::spatial::SpatialIndex;
use crate::topology::cell::{CellId, VertexId};
use crate::topology::chart::{ChartCache, InvalidateCache, compute_chart};
use crate::topology::incidence::{CellRecord, IncidenceRecord, IncidenceStore};
use hashbrown::HashSet;
use once_cell::sync::OnceCell;
use std::collections::VecDeque;
use std::fmt;

/// A topological cell complex over vertices carrying dense attribute data.
pub struct CellComplex {
    store: IncidenceStore,
    buffer: VertexBuffer,
    format: VertexFormat,
    position_attribute: String,
    position_offset: usize,
    position_size: usize,
    spatial_index: Option<Box<dyn SpatialIndex>>,
    predicate: Box<dyn PointInCell>,
    chart: OnceCell<ChartCache>,
}

impl fmt::Debug for CellComplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellComplex")
            .field("max_dim", &self.store.max_dim())
            .field("counts", &self.counts())
            .field("position_attribute", &self.position_attribute)
            .finish_non_exhaustive()
    }
}

impl CellComplex {
    /// Creates an empty complex for cells of dimension `0..=max_dim`.
    ///
    /// `position_attribute` names the attribute of `format` holding vertex
    /// coordinates; geometric queries slice it out of the vertex buffer.
    ///
    /// # Errors
    /// Returns [`CellComplexError::MissingAttribute`] if the format does not
    /// declare `position_attribute`.
    pub fn new(
        max_dim: usize,
        format: VertexFormat,
        position_attribute: &str,
    ) -> Result<Self, CellComplexError> {
        let attr = format
            .attribute(position_attribute)
            .ok_or_else(|| CellComplexError::MissingAttribute(position_attribute.to_string()))?;
        let (position_offset, position_size) = (attr.offset, attr.size);
        let buffer = VertexBuffer::new(format.stride());
        Ok(Self {
            store: IncidenceStore::new(max_dim),
            buffer,
            format,
            position_attribute: position_attribute.to_string(),
            position_offset,
            position_size,
            spatial_index: None,
            predicate: Box::new(AabbPredicate),
            chart: OnceCell::new(),
        })
    }

    /// Maximum cell dimension the complex accepts.
    #[inline]
    pub fn max_dim(&self) -> usize {
        self.store.max_dim()
    }

    /// The vertex attribute layout.
    #[inline]
    pub fn format(&self) -> &VertexFormat {
        &self.format
    }

    /// Name of the position attribute.
    #[inline]
    pub fn position_attribute(&self) -> &str {
        &self.position_attribute
    }

    /// Number of live cells of `dim`; 0 past the maximum dimension.
    #[inline]
    pub fn count(&self, dim: usize) -> usize {
        self.store.count(dim)
    }

    /// Live cell counts for every dimension `0..=max_dim`.
    pub fn counts(&self) -> Vec<usize> {
        (0..=self.store.max_dim())
            .map(|dim| self.store.count(dim))
            .collect()
    }

    /// Whether `cell` is live.
    #[inline]
    pub fn contains_cell(&self, cell: CellId) -> bool {
        self.store.contains(cell)
    }

    /// Dense buffer slot of `vert`, if live.
    pub fn vertex_slot(&self, vert: VertexId) -> Option<usize> {
        self.store.vertex(vert).map(|rec| rec.slot)
    }

    /// Sorted per-dimension listing of live cells, computed lazily.
    pub fn chart(&self) -> &ChartCache {
        self.chart.get_or_init(|| compute_chart(&self.store))
    }

    pub(crate) fn store(&self) -> &IncidenceStore {
        &self.store
    }

    pub(crate) fn vertex_buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Resolves a vertex tuple to a cell by walking the incidence graph.
    ///
    /// Starts at the 0-cell `tuple[0]` and, for each subsequent entry,
    /// follows the coboundary incidence labeled with that vertex. Returns
    /// `None` if no incidence matches at any step. Resolution follows the
    /// tuple's order; permutations of a tuple are not guaranteed to resolve,
    /// although the facet scheme used by [`add_cell`](Self::add_cell) makes
    /// the permutations of fully built simplices do so.
    pub fn lookup_cell(&self, tuple: &[VertexId]) -> Option<CellId> {
        let (&first, rest) = tuple.split_first()?;
        if !self.store.contains_vertex(first) {
            return None;
        }
        let mut cur = first.nonzero();
        for (dim, &want) in rest.iter().enumerate() {
            let cob = self.store.coboundary(dim, cur)?;
            cur = cob.iter().find(|rec| rec.vert == want)?.cell;
        }
        Some(CellId::from_parts(tuple.len() - 1, cur))
    }

    /// Ordered defining vertices of `cell`; `None` if the cell is not live.
    pub fn get_tuple(&self, cell: CellId) -> Option<Vec<VertexId>> {
        if cell.dim() == 0 {
            let v = VertexId::from_nonzero(cell.raw());
            return self.store.contains_vertex(v).then(|| vec![v]);
        }
        let rec = self.store.cell(cell.dim(), cell.raw())?;
        Some(rec.boundary.iter().map(|inc| inc.vert).collect())
    }

    /// Facets of `cell`, in boundary order. Empty for vertices.
    pub fn boundary(&self, cell: CellId) -> Option<Vec<CellId>> {
        if cell.dim() == 0 {
            return self.store.contains(cell).then(Vec::new);
        }
        let rec = self.store.cell(cell.dim(), cell.raw())?;
        Some(
            rec.boundary
                .iter()
                .map(|inc| CellId::from_parts(cell.dim() - 1, inc.cell))
                .collect(),
        )
    }

    /// Cells one dimension up containing `cell` as a facet.
    pub fn coboundary(&self, cell: CellId) -> Option<Vec<CellId>> {
        let cob = self.store.coboundary(cell.dim(), cell.raw())?;
        Some(
            cob.iter()
                .map(|inc| CellId::from_parts(cell.dim() + 1, inc.cell))
                .collect(),
        )
    }

    /// Attribute data of `vert`, sized to the format stride.
    pub fn get_vert_data(&self, vert: VertexId) -> Option<&[f32]> {
        let rec = self.store.vertex(vert)?;
        self.buffer.get(rec.slot)
    }

    /// The dense vertex attribute buffer, stride lanes per live vertex in
    /// slot order.
    #[inline]
    pub fn get_vert_buffer(&self) -> &[f32] {
        self.buffer.as_slice()
    }

    /// Flat vertex-index sequence for the live cells of `dim`: per cell, its
    /// `dim + 1` dense vertex slots in tuple order (one slot per vertex for
    /// `dim == 0`), ascending cell-id order.
    ///
    /// With `surface_only`, restricts to cells whose coboundary size is at
    /// most 1, i.e. the complex's exposed surface.
    ///
    /// # Errors
    /// Returns [`CellComplexError::DimensionOutOfRange`] past the maximum.
    pub fn get_index_buffer(
        &self,
        dim: usize,
        surface_only: bool,
    ) -> Result<Vec<u32>, CellComplexError> {
        if dim > self.store.max_dim() {
            return Err(CellComplexError::DimensionOutOfRange {
                dim,
                max: self.store.max_dim(),
            });
        }
        let mut indices = Vec::new();
        for &cell in self.chart().dim(dim) {
            if dim == 0 {
                let Some(v) = cell.as_vertex() else { continue };
                if let Some(rec) = self.store.vertex(v) {
                    indices.push(rec.slot as u32);
                }
                continue;
            }
            let Some(rec) = self.store.cell(dim, cell.raw()) else {
                continue;
            };
            if surface_only && rec.coboundary.len() > 1 {
                continue;
            }
            for inc in &rec.boundary {
                if let Some(vrec) = self.store.vertex(inc.vert) {
                    indices.push(vrec.slot as u32);
                }
            }
        }
        Ok(indices)
    }

    /// Position rows of `cell`'s defining vertices, in tuple order.
    pub fn get_coordinates(&self, cell: CellId) -> Option<Vec<Vec<f32>>> {
        let tuple = self.get_tuple(cell)?;
        let mut coords = Vec::with_capacity(tuple.len());
        for v in tuple {
            let data = self.get_vert_data(v)?;
            coords.push(data[self.position_offset..self.position_offset + self.position_size].to_vec());
        }
        Some(coords)
    }

    /// Axis-aligned bounds of `cell`'s vertex positions.
    pub fn cell_bounds(&self, cell: CellId) -> Option<BoundingBox> {
        BoundingBox::enclosing(&self.get_coordinates(cell)?)
    }

    /// Locates the cell containing `coord`.
    ///
    /// Delegates to the attached spatial index when present; otherwise falls
    /// back to a linear scan over every live cell using the installed
    /// point-in-cell predicate.
    pub fn locate_point(&self, coord: &[f32]) -> Option<CellId> {
        if let Some(index) = &self.spatial_index {
            return index.locate_point(coord);
        }
        for cell in self.chart().iter() {
            if let Some(coords) = self.get_coordinates(cell)
                && self.predicate.contains(coord, &coords)
            {
                return Some(cell);
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Appends a vertex with the given attribute data, returning its id.
    ///
    /// # Errors
    /// Returns [`CellComplexError::AttributeSizeMismatch`] if `data` is not
    /// exactly one stride worth of lanes.
    pub fn add_vert(&mut self, data: &[f32]) -> Result<VertexId, CellComplexError> {
        if data.len() != self.buffer.stride() {
            return Err(CellComplexError::AttributeSizeMismatch {
                expected: self.buffer.stride(),
                found: data.len(),
            });
        }
        let id = VertexId::from_nonzero(self.store.alloc_id(0));
        let slot = self.buffer.push(id, data)?;
        self.store.insert_vertex(id, slot);
        self.invalidate_cache();
        if let Some(index) = self.spatial_index.as_mut() {
            index.add_cell(&[id], CellId::vertex(id));
        }
        self.debug_assert_invariants();
        Ok(id)
    }

    /// Idempotent cell insertion from an ordered vertex tuple.
    ///
    /// If the tuple already resolves, the existing id is returned without
    /// mutation. Otherwise the facet for each tuple position is constructed
    /// (or reused) by substituting the last entry into that position and
    /// dropping the tail, one dimension down, recursively bottoming out at
    /// the vertices; reciprocal coboundary incidences are installed as each
    /// facet is linked.
    ///
    /// All validation happens before the first mutation, so a returned error
    /// means the complex is untouched.
    ///
    /// # Errors
    /// [`CellComplexError::EmptyTuple`] for an empty tuple,
    /// [`CellComplexError::DimensionOutOfRange`] when the tuple is longer
    /// than `max_dim + 1`, and [`CellComplexError::InvalidVertex`] when any
    /// referenced vertex is absent.
    ///
    /// # Example
    /// ```rust
    /// use cell_complex::prelude::*;
    /// let fmt = VertexFormat::from_attributes([("position", 2)])?;
    /// let mut cx = CellComplex::new(2, fmt, "position")?;
    /// let a = cx.add_vert(&[0.0, 0.0])?;
    /// let b = cx.add_vert(&[1.0, 0.0])?;
    /// let c = cx.add_vert(&[0.0, 1.0])?;
    /// let tri = cx.add_cell(&[a, b, c])?;
    /// // The two edges and the third vertex incidences came along for free.
    /// assert_eq!(cx.counts(), vec![3, 3, 1]);
    /// assert_eq!(cx.add_cell(&[a, b, c])?, tri);
    /// # Ok::<(), CellComplexError>(())
    /// ```
    pub fn add_cell(&mut self, tuple: &[VertexId]) -> Result<CellId, CellComplexError> {
        if tuple.is_empty() {
            return Err(CellComplexError::EmptyTuple);
        }
        let dim = tuple.len() - 1;
        if dim > self.store.max_dim() {
            return Err(CellComplexError::DimensionOutOfRange {
                dim,
                max: self.store.max_dim(),
            });
        }
        for &v in tuple {
            if !self.store.contains_vertex(v) {
                return Err(CellComplexError::InvalidVertex(v));
            }
        }
        let mut scratch = tuple.to_vec();
        let cell = self.insert_cell_rec(&mut scratch);
        self.invalidate_cache();
        self.debug_assert_invariants();
        Ok(cell)
    }

    /// Facet-recursive insertion. Depth is bounded by the tuple length, i.e.
    /// the configured maximum dimension. `tup` is restored to its incoming
    /// state before returning.
    fn insert_cell_rec(&mut self, tup: &mut Vec<VertexId>) -> CellId {
        if let [only] = tup.as_slice() {
            return CellId::vertex(*only);
        }
        if let Some(existing) = self.lookup_cell(tup) {
            return existing;
        }
        let d = tup.len() - 1;
        let raw = self.store.alloc_id(d);
        let last = tup[d];
        let mut boundary = Vec::with_capacity(d + 1);
        for i in 0..=d {
            let v = tup[i];
            tup[i] = last;
            tup.pop();
            let facet = self.insert_cell_rec(tup);
            tup.push(last);
            tup[i] = v;
            boundary.push(IncidenceRecord::new(v, facet.raw()));
            self.store
                .push_coboundary(d - 1, facet.raw(), IncidenceRecord::new(v, raw));
        }
        self.store.insert_cell(
            d,
            raw,
            CellRecord {
                boundary,
                coboundary: Vec::new(),
            },
        );
        let cell = CellId::from_parts(d, raw);
        if let Some(index) = self.spatial_index.as_mut() {
            index.add_cell(tup, cell);
        }
        cell
    }

    /// Removes `cell` and every cell transitively containing it.
    ///
    /// No-op if the cell does not exist. The star above the cell is
    /// collected with an explicit work list and destroyed top-down, so no
    /// cell is ever unlinked while a surviving cell still references it.
    /// Each destroyed cell is announced to the spatial index before its own
    /// unlinking; removing a vertex compacts the vertex buffer.
    pub fn remove_cell(&mut self, cell: CellId) {
        if !self.store.contains(cell) {
            return;
        }
        let star = self.collect_star(cell);
        log::trace!("remove_cell {cell}: destroying a star of {} cells", star.len());
        for member in star {
            self.destroy_cell(member);
        }
        self.invalidate_cache();
        self.debug_assert_invariants();
    }

    /// Upward closure of `cell`, sorted dimension-descending (then by id) so
    /// destruction can proceed top-down.
    fn collect_star(&self, cell: CellId) -> Vec<CellId> {
        let mut star = Vec::new();
        let mut seen: HashSet<CellId> = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(cell);
        queue.push_back(cell);
        while let Some(c) = queue.pop_front() {
            star.push(c);
            if let Some(cob) = self.store.coboundary(c.dim(), c.raw()) {
                for rec in cob {
                    let up = CellId::from_parts(c.dim() + 1, rec.cell);
                    if seen.insert(up) {
                        queue.push_back(up);
                    }
                }
            }
        }
        star.sort_by(|a, b| b.dim().cmp(&a.dim()).then(a.get().cmp(&b.get())));
        star
    }

    /// Destroys a single cell whose entire star has already been destroyed.
    fn destroy_cell(&mut self, cell: CellId) {
        if let Some(index) = self.spatial_index.as_mut() {
            index.remove_cell(cell);
        }
        if cell.dim() == 0 {
            let v = VertexId::from_nonzero(cell.raw());
            let Some(rec) = self.store.remove_vertex(v) else {
                return;
            };
            debug_assert!(rec.coboundary.is_empty(), "vertex destroyed below a live star");
            if let Some(moved) = self.buffer.swap_remove(rec.slot)
                && let Some(moved_rec) = self.store.vertex_mut(moved)
            {
                moved_rec.slot = rec.slot;
            }
        } else {
            let Some(rec) = self.store.remove_cell(cell.dim(), cell.raw()) else {
                return;
            };
            debug_assert!(rec.coboundary.is_empty(), "cell destroyed below a live star");
            for inc in rec.boundary {
                self.store
                    .unlink_coboundary(cell.dim() - 1, inc.cell, cell.raw());
            }
        }
    }

    /// Subdivides `cell` (and its entire star) around a fresh vertex.
    ///
    /// For each position of the cell's tuple, a replacement cell with
    /// `vertex` substituted at that position is built; the same substitution
    /// is applied breadth-first to every cell of the star so that
    /// higher-dimensional neighbors stay consistent with the subdivision.
    /// The original cell is removed last, cascading away the replaced star.
    ///
    /// # Errors
    /// [`CellComplexError::InvalidCell`] or [`CellComplexError::InvalidVertex`]
    /// for missing arguments, [`CellComplexError::VertexNotIsolated`] when
    /// `vertex` already has incident cells. Nothing is mutated on error.
    pub fn split_cell(&mut self, cell: CellId, vertex: VertexId) -> Result<(), CellComplexError> {
        self.check_isolated(cell, vertex)?;
        let mut queue = VecDeque::new();
        let mut seen: HashSet<CellId> = HashSet::new();
        seen.insert(cell);
        queue.push_back(cell);
        while let Some(c) = queue.pop_front() {
            let Some(mut tuple) = self.get_tuple(c) else {
                continue;
            };
            for i in 0..tuple.len() {
                let original = tuple[i];
                tuple[i] = vertex;
                self.add_cell(&tuple)?;
                tuple[i] = original;
            }
            for up in self.coboundary(c).unwrap_or_default() {
                if seen.insert(up) {
                    queue.push_back(up);
                }
            }
        }
        self.remove_cell(cell);
        Ok(())
    }

    /// Collapses `cell` down to a single fresh vertex.
    ///
    /// Every immediate coboundary neighbor seeds a 1-cell from `vertex` to
    /// the neighbor's distinguishing label; a breadth-first traversal then
    /// extends each built tuple by the labels found one dimension further up
    /// the original star, re-attaching the whole star onto `vertex`.
    /// Finally the original defining vertices are removed; their cascades
    /// destroy the old structure, including `cell` itself.
    ///
    /// # Errors
    /// Same conditions as [`split_cell`](Self::split_cell); nothing is
    /// mutated on error.
    pub fn collapse_cell(&mut self, cell: CellId, vertex: VertexId) -> Result<(), CellComplexError> {
        self.check_isolated(cell, vertex)?;
        let boundary_verts = self.get_tuple(cell).unwrap_or_default();

        let mut queue: VecDeque<(Vec<VertexId>, CellId)> = VecDeque::new();
        let seeds: Vec<IncidenceRecord> = self
            .store
            .coboundary(cell.dim(), cell.raw())
            .map(<[_]>::to_vec)
            .unwrap_or_default();
        for rec in seeds {
            let tuple = vec![vertex, rec.vert];
            self.add_cell(&tuple)?;
            queue.push_back((tuple, CellId::from_parts(cell.dim() + 1, rec.cell)));
        }
        while let Some((tuple, original)) = queue.pop_front() {
            let ups: Vec<IncidenceRecord> = self
                .store
                .coboundary(original.dim(), original.raw())
                .map(<[_]>::to_vec)
                .unwrap_or_default();
            for rec in ups {
                let mut extended = tuple.clone();
                extended.push(rec.vert);
                self.add_cell(&extended)?;
                queue.push_back((extended, CellId::from_parts(original.dim() + 1, rec.cell)));
            }
        }
        for v in boundary_verts {
            self.remove_cell(CellId::vertex(v));
        }
        Ok(())
    }

    fn check_isolated(&self, cell: CellId, vertex: VertexId) -> Result<(), CellComplexError> {
        if !self.store.contains(cell) {
            return Err(CellComplexError::InvalidCell(cell));
        }
        let vrec = self
            .store
            .vertex(vertex)
            .ok_or(CellComplexError::InvalidVertex(vertex))?;
        if !vrec.coboundary.is_empty() {
            return Err(CellComplexError::VertexNotIsolated(vertex));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Spatial index and point predicate
    // ------------------------------------------------------------------

    /// Binds `index`, detaching any previous one, and replays every live
    /// cell across all dimensions into it. Always a full rebuild, never an
    /// incremental diff.
    pub fn attach_spatial_index(&mut self, mut index: Box<dyn SpatialIndex>) {
        if let Some(mut old) = self.spatial_index.take() {
            old.detach();
        }
        index.attach();
        let cells: Vec<CellId> = self.chart().iter().collect();
        log::debug!("spatial index attached: replaying {} live cells", cells.len());
        for cell in cells {
            if let Some(tuple) = self.get_tuple(cell) {
                index.add_cell(&tuple, cell);
            }
        }
        self.spatial_index = Some(index);
    }

    /// Unbinds and returns the current spatial index, if any.
    pub fn detach_spatial_index(&mut self) -> Option<Box<dyn SpatialIndex>> {
        let mut index = self.spatial_index.take();
        if let Some(i) = index.as_mut() {
            i.detach();
        }
        index
    }

    /// Installs the point-in-cell strategy used by the point-location
    /// fallback scan.
    pub fn set_point_predicate(&mut self, predicate: Box<dyn PointInCell>) {
        self.predicate = predicate;
    }
}

impl InvalidateCache for CellComplex {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.chart.take();
    }
}
