//! Flattened, serializable image of a complex.
//!
//! A [`ComplexSnapshot`] stores the vertex format, the position attribute
//! name, the dense vertex attribute array, and per-dimension boundary tuples
//! encoded as dense slot indices (stable across export/import, unlike raw
//! ids). Import replays `add_vert` and then `add_cell` in ascending
//! dimension order.

use crate::data::vertex_format::VertexFormat;
use crate::error::CellComplexError;
use crate::topology::cell::VertexId;
use crate::topology::complex::CellComplex;
use serde::{Deserialize, Serialize};

/// Serializable flattening of a [`CellComplex`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplexSnapshot {
    /// Vertex attribute layout.
    pub format: VertexFormat,
    /// Name of the position attribute within `format`.
    pub position_attribute: String,
    /// Maximum cell dimension of the source complex.
    pub max_dim: usize,
    /// Dense vertex attribute data, `format.stride()` lanes per vertex in
    /// slot order.
    pub vertices: Vec<f32>,
    /// `cells[k]` holds the tuples of dimension `k + 1`, each a list of
    /// dense vertex slots in tuple order, ascending cell-id order.
    pub cells: Vec<Vec<Vec<u32>>>,
}

impl CellComplex {
    /// Flattens the complex into a snapshot.
    pub fn export(&self) -> ComplexSnapshot {
        let mut cells = Vec::with_capacity(self.max_dim());
        for dim in 1..=self.max_dim() {
            let mut tuples = Vec::with_capacity(self.count(dim));
            for &cell in self.chart().dim(dim) {
                let Some(tuple) = self.get_tuple(cell) else {
                    continue;
                };
                tuples.push(
                    tuple
                        .iter()
                        .filter_map(|&v| self.vertex_slot(v))
                        .map(|slot| slot as u32)
                        .collect(),
                );
            }
            cells.push(tuples);
        }
        ComplexSnapshot {
            format: self.format().clone(),
            position_attribute: self.position_attribute().to_string(),
            max_dim: self.max_dim(),
            vertices: self.get_vert_buffer().to_vec(),
            cells,
        }
    }

    /// Reconstructs a complex isomorphic to the snapshotted one by replaying
    /// `add_vert` and `add_cell` for every stored tuple in ascending
    /// dimension order.
    ///
    /// # Errors
    /// [`CellComplexError::SnapshotMalformed`] when the attribute array or a
    /// tuple is inconsistent with the declared layout, plus any error the
    /// replayed operations raise.
    pub fn from_snapshot(snapshot: &ComplexSnapshot) -> Result<Self, CellComplexError> {
        let mut complex = CellComplex::new(
            snapshot.max_dim,
            snapshot.format.clone(),
            &snapshot.position_attribute,
        )?;
        let stride = snapshot.format.stride();
        if snapshot.vertices.len() % stride != 0 {
            return Err(CellComplexError::SnapshotMalformed(format!(
                "attribute array of {} lanes is not a multiple of the stride {stride}",
                snapshot.vertices.len()
            )));
        }
        if snapshot.cells.len() > snapshot.max_dim {
            return Err(CellComplexError::SnapshotMalformed(format!(
                "{} tuple dimensions exceed the maximum dimension {}",
                snapshot.cells.len(),
                snapshot.max_dim
            )));
        }

        let mut ids: Vec<VertexId> = Vec::with_capacity(snapshot.vertices.len() / stride);
        for chunk in snapshot.vertices.chunks(stride) {
            ids.push(complex.add_vert(chunk)?);
        }

        let mut tuple = Vec::new();
        for (k, tuples) in snapshot.cells.iter().enumerate() {
            let dim = k + 1;
            for slots in tuples {
                if slots.len() != dim + 1 {
                    return Err(CellComplexError::SnapshotMalformed(format!(
                        "dimension-{dim} tuple has {} entries, expected {}",
                        slots.len(),
                        dim + 1
                    )));
                }
                tuple.clear();
                for &slot in slots {
                    let id = ids.get(slot as usize).copied().ok_or_else(|| {
                        CellComplexError::SnapshotMalformed(format!(
                            "tuple references slot {slot} but only {} vertices are stored",
                            ids.len()
                        ))
                    })?;
                    tuple.push(id);
                }
                complex.add_cell(&tuple)?;
            }
        }
        Ok(complex)
    }
}
