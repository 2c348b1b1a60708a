//! Conversion between continuous world positions and grid cells.

use crate::geom::{Cell, WorldPoint};

/// Default side length of one cell, in world units.
pub const CELL_SIZE: i32 = 8;

/// Fixed-size quantization of world space into cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMapping {
    cell_size: i32,
}

impl Default for CellMapping {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
        }
    }
}

impl CellMapping {
    /// Create a mapping with the given cell size.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not positive.
    pub fn new(cell_size: i32) -> Self {
        assert!(cell_size > 0, "cell size must be positive, got {cell_size}");
        Self { cell_size }
    }

    #[inline]
    pub fn cell_size(self) -> i32 {
        self.cell_size
    }

    /// The cell containing `p`. The vertical axis selects the row and the
    /// horizontal axis the column.
    #[inline]
    pub fn to_cell(self, p: WorldPoint) -> Cell {
        Cell::new(
            (p.y.floor() as i32).div_euclid(self.cell_size),
            (p.x.floor() as i32).div_euclid(self.cell_size),
        )
    }

    /// The centre of `c` in world space.
    ///
    /// Sub-cell offsets are lost by [`to_cell`](Self::to_cell), so only
    /// `to_cell(to_world(c)) == c` holds in general.
    #[inline]
    pub fn to_world(self, c: Cell) -> WorldPoint {
        let half = self.cell_size as f32 / 2.0;
        WorldPoint::new(
            (c.col * self.cell_size) as f32 + half,
            (c.row * self.cell_size) as f32 + half,
        )
    }
}

/// [`CellMapping::to_cell`] with the default cell size.
#[inline]
pub fn to_cell(p: WorldPoint) -> Cell {
    CellMapping::default().to_cell(p)
}

/// [`CellMapping::to_world`] with the default cell size.
#[inline]
pub fn to_world(c: Cell) -> WorldPoint {
    CellMapping::default().to_world(c)
}
