//! # cell-complex
//!
//! cell-complex is an in-memory topological cell-complex engine for meshes of
//! arbitrary dimension. A complex stores vertices, edges, faces, and higher
//! cells up to a configured maximum dimension through explicit
//! boundary/coboundary incidence relations, supports structural mutation
//! (insertion, cascading deletion, subdivision, collapse) while keeping the
//! incidence graph consistent, and answers geometric queries (bounding boxes,
//! point location) from dense per-vertex attribute data.
//!
//! ## Features
//! - Cell-tuple topology: cells identified by ordered vertex tuples, resolved
//!   through incidence-graph traversal
//! - Dense, compacting vertex attribute buffer with a user-declared layout
//! - Explicit work-list mutation, so cascade depth is bounded by the complex,
//!   not the call stack
//! - Pluggable spatial index and point-in-cell predicate seams
//! - Serde-based snapshot export/import that round-trips structure up to id
//!   relabeling
//!
//! ## Determinism
//! Arena iteration order is never load-bearing: anything that emits or
//! replays cells goes through a per-dimension chart sorted by id, and ids are
//! allocated monotonically per dimension.
//!
//! ## Concurrency
//! The complex is single-threaded and single-writer; every operation
//! completes synchronously before returning. Callers must not interleave
//! structural mutation with an in-flight traversal.

pub mod data;
pub mod debug_invariants;
pub mod error;
pub mod geometry;
pub mod io;
pub mod spatial;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use error::CellComplexError;
pub use topology::complex::CellComplex;

/// A convenient prelude importing the most-used traits and types.
pub mod prelude {
    pub use crate::data::vertex_buffer::{DEFAULT_VERTEX_CAPACITY, VertexBuffer};
    pub use crate::data::vertex_format::{VertexAttribute, VertexFormat};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::error::CellComplexError;
    pub use crate::geometry::BoundingBox;
    pub use crate::geometry::predicate::{AabbPredicate, NullPredicate, PointInCell};
    pub use crate::io::ComplexSnapshot;
    pub use crate::spatial::{NullIndex, SpatialIndex};
    pub use crate::topology::cell::{CellId, VertexId};
    pub use crate::topology::chart::{ChartCache, InvalidateCache};
    pub use crate::topology::complex::CellComplex;
}
