// src/grid/index.rs
//! Integer cell indices and inclusive index rectangles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed (x, y) cell index. `x` runs with longitude, `y` with latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridIndex {
    pub x: i64,
    pub y: i64,
}

impl GridIndex {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for GridIndex {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive rectangle of indices, `x1..=x2` by `y1..=y2`.
///
/// Indices are produced lazily by [`IndexRange::indices`]; the range itself
/// never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub x1: i64,
    pub x2: i64,
    pub y1: i64,
    pub y2: i64,
}

impl IndexRange {
    /// Build a range from two corners in any order.
    pub fn new(a: GridIndex, b: GridIndex) -> Self {
        Self {
            x1: a.x.min(b.x),
            x2: a.x.max(b.x),
            y1: a.y.min(b.y),
            y2: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> u128 {
        (self.x2 as i128 - self.x1 as i128 + 1) as u128
    }

    pub fn height(&self) -> u128 {
        (self.y2 as i128 - self.y1 as i128 + 1) as u128
    }

    /// Number of cells in the rectangle. Computed in 128 bits so that
    /// absurd ranges can be rejected before anything is enumerated.
    pub fn cell_count(&self) -> u128 {
        self.width().saturating_mul(self.height())
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        (self.x1..=self.x2).contains(&index.x) && (self.y1..=self.y2).contains(&index.y)
    }

    /// Column-major walk over every index in the rectangle.
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        (self.x1..=self.x2).flat_map(move |x| (self.y1..=self.y2).map(move |y| GridIndex::new(x, y)))
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x {}..={}, y {}..={}", self.x1, self.x2, self.y1, self.y2)
    }
}
