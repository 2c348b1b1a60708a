use repair_core::Cell;

/// Manhattan (L1) distance between two cells.
///
/// Movement is orthogonal only, so this is the exact step count on an open
/// grid.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
