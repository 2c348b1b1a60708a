use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use repair_core::{Cell, Extent, GridConfig};

/// Fill weight marking a cell that no search may enter.
pub const IMPASSABLE: i32 = -1;

/// Read view of the stored fill weights.
///
/// Handed to [`Strategy::post_process`](crate::Strategy::post_process)
/// while the map lock is held.
#[derive(Debug, Default)]
pub struct TileWeights {
    tiles: HashMap<Cell, i32>,
}

impl TileWeights {
    /// Stored weight of `c`, or 0 if none was recorded.
    #[inline]
    pub fn get(&self, c: Cell) -> i32 {
        self.tiles.get(&c).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_impassable(&self, c: Cell) -> bool {
        self.get(c) == IMPASSABLE
    }

    /// Number of cells with a recorded weight.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Recorded cells and weights, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, i32)> + '_ {
        self.tiles.iter().map(|(&c, &w)| (c, w))
    }
}

/// A sparse, thread-safe map from cell to traversal cost.
///
/// Every operation takes the single internal lock for its own duration
/// only. Searches read through the same lock one cell at a time, so a
/// concurrent edit may or may not be observed by a search already in
/// flight.
#[derive(Debug)]
pub struct WeightedMap {
    extent: Extent,
    tiles: Mutex<TileWeights>,
}

impl WeightedMap {
    /// Create an empty map over `rows` x `cols` cells.
    ///
    /// The extent only bounds neighbour expansion; no storage is reserved.
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            extent: Extent::new(rows, cols),
            tiles: Mutex::new(TileWeights::default()),
        }
    }

    /// Create an empty map sized by `cfg`.
    pub fn from_config(cfg: &GridConfig) -> Self {
        Self::new(cfg.rows, cfg.cols)
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Set the weight of `c`, replacing any previous value. [`IMPASSABLE`]
    /// blocks the cell until it is cleared.
    pub fn fill_tile(&self, c: Cell, weight: i32) {
        log::trace!("fill tile {c} with weight {weight}");
        self.lock().tiles.insert(c, weight);
    }

    /// Set the same weight on every cell of `cells` under one lock and
    /// return how many cells were written.
    pub fn fill_tiles(&self, cells: impl IntoIterator<Item = Cell>, weight: i32) -> usize {
        let mut tiles = self.lock();
        let mut n = 0;
        for c in cells {
            tiles.tiles.insert(c, weight);
            n += 1;
        }
        log::trace!("fill {n} tiles with weight {weight}");
        n
    }

    /// Remove any weight stored for `c`, restoring the default of 0.
    pub fn clear_tile(&self, c: Cell) {
        log::trace!("clear tile {c}");
        self.lock().tiles.remove(&c);
    }

    /// Remove every stored weight, returning how many were dropped.
    pub fn clear_all(&self) -> usize {
        let mut tiles = self.lock();
        let n = tiles.len();
        tiles.tiles.clear();
        log::trace!("clear all {n} tiles");
        n
    }

    /// Current weight of `c` (0 if never filled).
    pub fn weight(&self, c: Cell) -> i32 {
        self.lock().get(c)
    }

    /// Number of cells with a stored weight.
    pub fn filled_len(&self) -> usize {
        self.lock().len()
    }

    /// Acquire the tile lock.
    ///
    /// A holder that panicked cannot leave the map half-written (every
    /// critical section is a single map operation), so poisoning is ignored.
    pub(crate) fn lock(&self) -> MutexGuard<'_, TileWeights> {
        self.tiles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
