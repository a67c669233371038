//! CellComplexError: unified error type for cell-complex public APIs.
//!
//! Every fallible public operation returns this type. Query operations that
//! can merely miss (`lookup_cell`, `get_tuple`, `get_vert_data`) return
//! `Option` instead; an `Err` always means the caller handed us something
//! invalid or the structure itself is corrupted.

use crate::topology::cell::{CellId, VertexId};
use thiserror::Error;

/// Unified error type for cell-complex operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellComplexError {
    /// Attempted to construct an id with a zero value.
    #[error("ids must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidId,
    /// A referenced vertex is not part of the complex.
    #[error("vertex `{0}` is not part of the complex")]
    InvalidVertex(VertexId),
    /// A referenced cell is not part of the complex.
    #[error("cell `{0}` is not part of the complex")]
    InvalidCell(CellId),
    /// Split/collapse target vertex already has incident cells.
    #[error("vertex `{0}` is not isolated: it already has incident cells")]
    VertexNotIsolated(VertexId),
    /// A requested dimension exceeds the configured maximum.
    #[error("dimension {dim} exceeds the configured maximum {max}")]
    DimensionOutOfRange { dim: usize, max: usize },
    /// Vertex attribute data does not match the format stride.
    #[error("vertex data length {found} does not match the format stride {expected}")]
    AttributeSizeMismatch { expected: usize, found: usize },
    /// A named attribute is missing from the vertex format.
    #[error("attribute `{0}` is not declared by the vertex format")]
    MissingAttribute(String),
    /// An attribute name was declared twice in a vertex format.
    #[error("attribute `{0}` is declared twice in the vertex format")]
    DuplicateAttribute(String),
    /// Attributes must occupy at least one lane.
    #[error("attribute `{0}` must have a non-zero size")]
    ZeroSizeAttribute(String),
    /// An empty tuple identifies no cell.
    #[error("empty vertex tuples do not identify a cell")]
    EmptyTuple,
    /// A snapshot could not be replayed into a complex.
    #[error("snapshot is malformed: {0}")]
    SnapshotMalformed(String),
    /// Reciprocity breakage: a cell is missing from a facet's coboundary.
    #[error("incidence corruption: cell `{cell}` missing from coboundary of facet `{facet}`")]
    MissingCoboundaryMirror { cell: CellId, facet: CellId },
    /// Catch-all for structural corruption surfaced by validation.
    #[error("incidence corruption: {0}")]
    CorruptIncidence(String),
}
