//! Dense vertex attribute storage with swap-with-last compaction.
//!
//! Attribute data lives in one contiguous `Vec<f32>` with a fixed stride per
//! vertex; live vertices occupy slots `0..len` with no gaps. Removing a slot
//! moves the last slot's data into the hole and reports which vertex moved so
//! its record can be fixed up. `slot_to_id` is the reverse map that makes the
//! fix-up possible.

use crate::error::CellComplexError;
use crate::topology::cell::VertexId;

/// Initial vertex capacity of a fresh buffer; storage grows by doubling once
/// exceeded.
pub const DEFAULT_VERTEX_CAPACITY: usize = 1024;

/// Growable, dense, contiguous store of per-vertex attribute data.
#[derive(Clone, Debug)]
pub struct VertexBuffer {
    stride: usize,
    data: Vec<f32>,
    slot_to_id: Vec<VertexId>,
}

impl VertexBuffer {
    /// Creates a buffer for `stride` lanes per vertex with the default
    /// capacity.
    pub fn new(stride: usize) -> Self {
        Self::with_capacity(stride, DEFAULT_VERTEX_CAPACITY)
    }

    /// Creates a buffer with room for `verts` vertices before reallocation.
    pub fn with_capacity(stride: usize, verts: usize) -> Self {
        Self {
            stride,
            data: Vec::with_capacity(stride * verts),
            slot_to_id: Vec::with_capacity(verts),
        }
    }

    /// Lanes per vertex.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of live vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.slot_to_id.len()
    }

    /// Whether the buffer holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot_to_id.is_empty()
    }

    /// Appends `data` for vertex `id` at the next dense slot, returning the
    /// slot.
    ///
    /// # Errors
    /// Returns [`CellComplexError::AttributeSizeMismatch`] if `data` is not
    /// exactly `stride` lanes.
    pub fn push(&mut self, id: VertexId, data: &[f32]) -> Result<usize, CellComplexError> {
        if data.len() != self.stride {
            return Err(CellComplexError::AttributeSizeMismatch {
                expected: self.stride,
                found: data.len(),
            });
        }
        let slot = self.slot_to_id.len();
        self.data.extend_from_slice(data);
        self.slot_to_id.push(id);
        Ok(slot)
    }

    /// Removes `slot` by swapping the last slot's content into it, then
    /// shrinking the live count.
    ///
    /// Returns the id of the vertex that moved into `slot`, or `None` when
    /// `slot` was the last one (or out of range) and nothing moved. The
    /// caller owns fixing the moved vertex's record.
    pub fn swap_remove(&mut self, slot: usize) -> Option<VertexId> {
        let last = self.slot_to_id.len().checked_sub(1)?;
        if slot > last {
            return None;
        }
        let moved = if slot < last {
            self.data
                .copy_within(last * self.stride..(last + 1) * self.stride, slot * self.stride);
            self.slot_to_id[slot] = self.slot_to_id[last];
            Some(self.slot_to_id[slot])
        } else {
            None
        };
        self.slot_to_id.pop();
        self.data.truncate(last * self.stride);
        moved
    }

    /// Read-only view of the attribute data at `slot`, sized to the stride.
    pub fn get(&self, slot: usize) -> Option<&[f32]> {
        if slot >= self.slot_to_id.len() {
            return None;
        }
        Some(&self.data[slot * self.stride..(slot + 1) * self.stride])
    }

    /// Vertex occupying `slot`.
    pub fn id_at(&self, slot: usize) -> Option<VertexId> {
        self.slot_to_id.get(slot).copied()
    }

    /// The dense live region, `stride` lanes per vertex in slot order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(raw: u64) -> VertexId {
        VertexId::new(raw).unwrap()
    }

    #[test]
    fn push_assigns_dense_slots() {
        let mut buf = VertexBuffer::with_capacity(2, 4);
        assert_eq!(buf.push(vid(1), &[1.0, 2.0]).unwrap(), 0);
        assert_eq!(buf.push(vid(2), &[3.0, 4.0]).unwrap(), 1);
        assert_eq!(buf.get(0).unwrap(), &[1.0, 2.0]);
        assert_eq!(buf.get(1).unwrap(), &[3.0, 4.0]);
        assert_eq!(buf.id_at(1), Some(vid(2)));
        assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn stride_mismatch_is_rejected() {
        let mut buf = VertexBuffer::new(3);
        assert_eq!(
            buf.push(vid(1), &[0.0; 2]),
            Err(CellComplexError::AttributeSizeMismatch {
                expected: 3,
                found: 2
            })
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn swap_remove_moves_last_into_hole() {
        let mut buf = VertexBuffer::new(1);
        buf.push(vid(1), &[1.0]).unwrap();
        buf.push(vid(2), &[2.0]).unwrap();
        buf.push(vid(3), &[3.0]).unwrap();
        // Removing the middle slot moves vertex 3 into it.
        assert_eq!(buf.swap_remove(1), Some(vid(3)));
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(1).unwrap(), &[3.0]);
        assert_eq!(buf.id_at(1), Some(vid(3)));
        // Removing the last slot moves nothing.
        assert_eq!(buf.swap_remove(1), None);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.as_slice(), &[1.0]);
    }

    #[test]
    fn swap_remove_out_of_range_is_none() {
        let mut buf = VertexBuffer::new(1);
        assert_eq!(buf.swap_remove(0), None);
        buf.push(vid(1), &[1.0]).unwrap();
        assert_eq!(buf.swap_remove(5), None);
        assert_eq!(buf.len(), 1);
    }
}
