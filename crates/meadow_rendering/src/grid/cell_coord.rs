//! Logical cell coordinates.

use crate::culling::{cell_index, CellBounds};

/// Integer index of a world cell: cell `(x, z)` covers
/// `[x·size, (x+1)·size) × [z·size, (z+1)·size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellCoord {
    /// X index.
    pub x: i32,
    /// Z index.
    pub z: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing the world point `(x, z)`.
    #[inline]
    #[must_use]
    pub fn containing(x: f64, z: f64, cell_size: f64) -> Self {
        Self::new(cell_index(x, cell_size), cell_index(z, cell_size))
    }

    /// World-space square covered by this cell.
    #[inline]
    #[must_use]
    pub fn bounds(self, cell_size: f64) -> CellBounds {
        CellBounds::for_cell(self.x, self.z, cell_size)
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}
