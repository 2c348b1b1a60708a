//! Grid configuration: extent and cell size in one place.

use std::fmt;

use crate::geom::Extent;
use crate::mapping::{CELL_SIZE, CellMapping};

/// Size of the pathing grid and the world-space size of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of grid rows.
    pub rows: i32,
    /// Number of grid columns.
    pub cols: i32,
    /// Side length of one cell in world units.
    pub cell_size: i32,
}

impl Default for GridConfig {
    /// A 960x1060 window quantized into 8-unit cells.
    fn default() -> Self {
        Self::for_window(960, 1060, CELL_SIZE)
    }
}

impl GridConfig {
    /// Grid covering a `width` x `height` world area. Partial cells at the
    /// right and bottom edges are dropped.
    pub fn for_window(width: i32, height: i32, cell_size: i32) -> Self {
        let size = cell_size.max(1);
        Self {
            rows: height / size,
            cols: width / size,
            cell_size,
        }
    }

    /// Check that the grid is non-empty and the cell size positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if self.rows <= 0 || self.cols <= 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        Extent::new(self.rows, self.cols)
    }

    /// The world/cell mapping for this grid.
    ///
    /// # Panics
    ///
    /// Panics if the cell size is not positive; call
    /// [`validate`](Self::validate) first for untrusted input.
    pub fn mapping(&self) -> CellMapping {
        CellMapping::new(self.cell_size)
    }
}

/// Rejected [`GridConfig`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Cell size was zero or negative.
    CellSize(i32),
    /// One of the grid dimensions was zero or negative.
    EmptyGrid { rows: i32, cols: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellSize(size) => write!(f, "cell size must be positive, got {size}"),
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one cell, got {rows}x{cols}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
