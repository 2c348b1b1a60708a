use repair_core::{Cell, Extent};

/// Cached neighbour computation helper.
///
/// Enumerates the orthogonal neighbours of a cell that fall inside an
/// [`Extent`], reusing one buffer across calls.
pub struct Neighbors {
    buf: Vec<Cell>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the up/down/left/right neighbours of `c` inside `extent`.
    pub fn orthogonal(&mut self, c: Cell, extent: Extent) -> &[Cell] {
        self.buf.clear();
        for n in c.neighbors_4() {
            if extent.contains(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
