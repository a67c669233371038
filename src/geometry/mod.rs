//! Geometric queries derived from vertex positions.
//!
//! Geometry is attribute data: the complex reads the configured position
//! attribute out of the vertex buffer and derives bounding boxes and
//! point-location answers from it. The membership predicate itself is
//! pluggable (see [`predicate`]).

pub mod predicate;

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with per-axis low/high coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Per-axis minima.
    pub lo: Vec<f32>,
    /// Per-axis maxima.
    pub hi: Vec<f32>,
}

impl BoundingBox {
    /// Smallest box enclosing `points`; `None` when `points` is empty.
    ///
    /// All points are expected to have the same arity as the first; shorter
    /// points contribute to their leading axes only.
    pub fn enclosing(points: &[Vec<f32>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut lo = first.clone();
        let mut hi = first.clone();
        for p in rest {
            for (axis, &x) in p.iter().enumerate().take(lo.len()) {
                if x < lo[axis] {
                    lo[axis] = x;
                }
                if x > hi[axis] {
                    hi[axis] = x;
                }
            }
        }
        Some(Self { lo, hi })
    }

    /// Whether `coord` lies inside the box (boundary inclusive).
    ///
    /// `coord` must cover every axis of the box; excess trailing axes are
    /// ignored.
    pub fn contains(&self, coord: &[f32]) -> bool {
        if coord.len() < self.lo.len() {
            return false;
        }
        self.lo
            .iter()
            .zip(&self.hi)
            .zip(coord)
            .all(|((&lo, &hi), &x)| lo <= x && x <= hi)
    }
}
