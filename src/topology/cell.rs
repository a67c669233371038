//! Strong handles for the elements of a cell complex.
//!
//! Every topological element is identified by `(dimension, id)`. Ids are
//! allocated per dimension from a monotonically increasing counter and never
//! reused, so holes are permitted after deletion. [`VertexId`] wraps a
//! nonzero `u64` to enforce at compile- and runtime that 0 stays reserved as
//! an invalid/sentinel value; [`CellId`] pairs such an id with its dimension.
//!
//! Both handles implement ordering, hashing, and serde so they can be used in
//! maps, sorted charts, and snapshots directly.

use crate::error::CellComplexError;
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU64};

/// Identifier of a 0-cell (vertex).
///
/// # Memory layout
/// `repr(transparent)` over `NonZeroU64`: same size and alignment as a `u64`,
/// and `Option<VertexId>` is pointer-sized.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VertexId(NonZeroU64);

impl VertexId {
    /// Creates a `VertexId` from a raw `u64`.
    ///
    /// # Errors
    /// Returns [`CellComplexError::InvalidId`] if `raw == 0`.
    #[inline]
    pub fn new(raw: u64) -> Result<Self, CellComplexError> {
        NonZeroU64::new(raw)
            .map(Self)
            .ok_or(CellComplexError::InvalidId)
    }

    #[inline]
    pub(crate) const fn from_nonzero(raw: NonZeroU64) -> Self {
        Self(raw)
    }

    /// Returns the raw `u64` value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub(crate) const fn nonzero(self) -> NonZeroU64 {
        self.0
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.get()).finish()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Identifier of a cell of any dimension.
///
/// Ordering is dimension-major, then id: sorting a mixed list groups vertices
/// first, then edges, and so on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    dim: usize,
    id: NonZeroU64,
}

impl CellId {
    /// Creates a `CellId` from a dimension and a raw id.
    ///
    /// # Errors
    /// Returns [`CellComplexError::InvalidId`] if `raw == 0`.
    #[inline]
    pub fn new(dim: usize, raw: u64) -> Result<Self, CellComplexError> {
        NonZeroU64::new(raw)
            .map(|id| Self { dim, id })
            .ok_or(CellComplexError::InvalidId)
    }

    #[inline]
    pub(crate) const fn from_parts(dim: usize, id: NonZeroU64) -> Self {
        Self { dim, id }
    }

    /// The 0-cell handle for a vertex.
    #[inline]
    pub const fn vertex(v: VertexId) -> Self {
        Self {
            dim: 0,
            id: v.nonzero(),
        }
    }

    /// Dimension of the cell.
    #[inline]
    pub const fn dim(self) -> usize {
        self.dim
    }

    /// Raw id within the cell's dimension.
    #[inline]
    pub const fn get(self) -> u64 {
        self.id.get()
    }

    #[inline]
    pub(crate) const fn raw(self) -> NonZeroU64 {
        self.id
    }

    /// The vertex handle, if this is a 0-cell.
    #[inline]
    pub fn as_vertex(self) -> Option<VertexId> {
        (self.dim == 0).then(|| VertexId(self.id))
    }
}

impl From<VertexId> for CellId {
    #[inline]
    fn from(v: VertexId) -> Self {
        CellId::vertex(v)
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellId")
            .field(&self.dim)
            .field(&self.get())
            .finish()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.dim, self.get())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ids_are_rejected() {
        assert_eq!(VertexId::new(0), Err(CellComplexError::InvalidId));
        assert_eq!(CellId::new(2, 0), Err(CellComplexError::InvalidId));
    }

    #[test]
    fn new_and_get() {
        let v = VertexId::new(42).unwrap();
        assert_eq!(v.get(), 42);
        let c = CellId::new(2, 7).unwrap();
        assert_eq!((c.dim(), c.get()), (2, 7));
    }

    #[test]
    fn vertex_cell_conversion() {
        let v = VertexId::new(5).unwrap();
        let c = CellId::vertex(v);
        assert_eq!(c.dim(), 0);
        assert_eq!(c.as_vertex(), Some(v));
        assert_eq!(CellId::new(1, 5).unwrap().as_vertex(), None);
    }

    #[test]
    fn debug_and_display() {
        let v = VertexId::new(7).unwrap();
        assert_eq!(format!("{v:?}"), "VertexId(7)");
        assert_eq!(format!("{v}"), "7");
        let c = CellId::new(2, 9).unwrap();
        assert_eq!(format!("{c:?}"), "CellId(2, 9)");
        assert_eq!(format!("{c}"), "2:9");
    }

    #[test]
    fn ordering_is_dimension_major() {
        let e = CellId::new(1, 1).unwrap();
        let t = CellId::new(2, 1).unwrap();
        let t2 = CellId::new(2, 4).unwrap();
        assert!(e < t && t < t2);
    }

    #[test]
    fn hash_set_membership() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(CellId::new(1, 1).unwrap());
        set.insert(CellId::new(2, 1).unwrap());
        assert_eq!(set.len(), 2);
    }
}
