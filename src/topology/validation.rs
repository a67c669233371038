//! Structural invariant validation for the complex.
//!
//! Checks, for the whole complex:
//! 1. every k-cell (k >= 1) holds exactly `k + 1` boundary incidences, each
//!    pointing at a live facet, and appears exactly once in the coboundary
//!    of each of its facets;
//! 2. every coboundary incidence mirrors a boundary incidence one dimension
//!    up, with a matching vertex label;
//! 3. vertex slots form the dense range `0..count(0)` and the reverse map
//!    round-trips;
//! 4. boundary labels name live vertices.
//!
//! Violations are logged before being returned so corrupted complexes leave
//! a trace even when the caller swallows the error.

use crate::debug_invariants::DebugInvariants;
use crate::error::CellComplexError;
use crate::topology::cell::CellId;
use crate::topology::complex::CellComplex;

impl DebugInvariants for CellComplex {
    fn debug_assert_invariants(&self) {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] cell complex corrupted: {e}");
        }
    }

    fn validate_invariants(&self) -> Result<(), CellComplexError> {
        validate_complex(self).inspect_err(|e| log::warn!("invariant violation: {e}"))
    }
}

fn validate_complex(complex: &CellComplex) -> Result<(), CellComplexError> {
    let store = complex.store();
    let buffer = complex.vertex_buffer();

    // Dense slot bijection.
    if buffer.len() != store.count(0) {
        return Err(CellComplexError::CorruptIncidence(format!(
            "vertex buffer holds {} slots but {} vertices are live",
            buffer.len(),
            store.count(0)
        )));
    }
    for v in store.vertex_ids() {
        let rec = store
            .vertex(v)
            .ok_or_else(|| CellComplexError::InvalidVertex(v))?;
        if buffer.id_at(rec.slot) != Some(v) {
            return Err(CellComplexError::CorruptIncidence(format!(
                "slot {} of vertex {v} does not round-trip through the reverse map",
                rec.slot
            )));
        }
    }

    for dim in 1..=store.max_dim() {
        for id in store.cell_ids(dim) {
            let cell = CellId::from_parts(dim, id);
            let rec = store
                .cell(dim, id)
                .ok_or_else(|| CellComplexError::InvalidCell(cell))?;

            // Boundary arity and reciprocity downward.
            if rec.boundary.len() != dim + 1 {
                return Err(CellComplexError::CorruptIncidence(format!(
                    "cell {cell} has {} boundary facets, expected {}",
                    rec.boundary.len(),
                    dim + 1
                )));
            }
            for inc in &rec.boundary {
                if !store.contains_vertex(inc.vert) {
                    return Err(CellComplexError::InvalidVertex(inc.vert));
                }
                let facet = CellId::from_parts(dim - 1, inc.cell);
                let Some(facet_cob) = store.coboundary(dim - 1, inc.cell) else {
                    return Err(CellComplexError::InvalidCell(facet));
                };
                let mirrors = facet_cob.iter().filter(|up| up.cell == id).count();
                let expected = rec.boundary.iter().filter(|b| b.cell == inc.cell).count();
                if mirrors != expected {
                    return Err(CellComplexError::MissingCoboundaryMirror { cell, facet });
                }
            }

            // Reciprocity upward: every coboundary entry names a live cell
            // one dimension up whose boundary points back with the same label.
            for inc in &rec.coboundary {
                let upper = CellId::from_parts(dim + 1, inc.cell);
                let Some(upper_rec) = store.cell(dim + 1, inc.cell) else {
                    return Err(CellComplexError::InvalidCell(upper));
                };
                let mirrored = upper_rec
                    .boundary
                    .iter()
                    .any(|b| b.cell == id && b.vert == inc.vert);
                if !mirrored {
                    return Err(CellComplexError::CorruptIncidence(format!(
                        "coboundary of {cell} names {upper} (label {}) without a boundary mirror",
                        inc.vert
                    )));
                }
            }
        }
    }

    // Vertex coboundaries mirror edge boundaries.
    for v in store.vertex_ids() {
        let rec = store
            .vertex(v)
            .ok_or_else(|| CellComplexError::InvalidVertex(v))?;
        for inc in &rec.coboundary {
            let edge = CellId::from_parts(1, inc.cell);
            let Some(edge_rec) = store.cell(1, inc.cell) else {
                return Err(CellComplexError::InvalidCell(edge));
            };
            let mirrored = edge_rec
                .boundary
                .iter()
                .any(|b| b.cell == v.nonzero() && b.vert == inc.vert);
            if !mirrored {
                return Err(CellComplexError::CorruptIncidence(format!(
                    "coboundary of vertex {v} names {edge} (label {}) without a boundary mirror",
                    inc.vert
                )));
            }
        }
    }
    Ok(())
}
