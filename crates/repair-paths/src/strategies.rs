//! Built-in strategies.
//!
//! Every built-in weighs a node as `fill_weight + dist_traveled + h`, where
//! `h` is the strategy's estimate of the remaining distance, and refuses
//! [`IMPASSABLE`] cells.

use repair_core::{Cell, Extent};

use crate::distance::manhattan;
use crate::node::PathNode;
use crate::strategy::{Goals, PostProcess, Strategy};
use crate::tiles::{IMPASSABLE, TileWeights};

#[inline]
fn accumulated(node: &PathNode) -> i64 {
    node.fill_weight + node.dist_traveled
}

// ---------------------------------------------------------------------------
// PointToPoint
// ---------------------------------------------------------------------------

/// Route to exactly one goal cell using the Manhattan estimate.
///
/// Panics if the search is given anything other than one goal cell.
#[derive(Copy, Clone, Debug, Default)]
pub struct PointToPoint;

impl Strategy for PointToPoint {
    fn compute_weight(&self, node: &mut PathNode, fill_weight: i32, goals: &Goals<'_>) -> bool {
        let goal = goals.single(self.name());
        if fill_weight == IMPASSABLE {
            return false;
        }
        node.weight = accumulated(node) + i64::from(manhattan(node.cell, goal));
        true
    }

    fn is_goal(&self, cell: Cell, goals: &Goals<'_>) -> bool {
        cell == goals.single(self.name())
    }

    fn name(&self) -> &'static str {
        "point-to-point"
    }
}

// ---------------------------------------------------------------------------
// RowToRow
// ---------------------------------------------------------------------------

/// Route to any cell sharing the goal's column index; the row is ignored
/// both when estimating and when testing for the goal.
///
/// Panics if the search is given anything other than one goal cell.
#[derive(Copy, Clone, Debug, Default)]
pub struct RowToRow;

impl Strategy for RowToRow {
    fn compute_weight(&self, node: &mut PathNode, fill_weight: i32, goals: &Goals<'_>) -> bool {
        let goal = goals.single(self.name());
        if fill_weight == IMPASSABLE {
            return false;
        }
        node.weight = accumulated(node) + i64::from((node.cell.col - goal.col).abs());
        true
    }

    fn is_goal(&self, cell: Cell, goals: &Goals<'_>) -> bool {
        cell.col == goals.single(self.name()).col
    }

    fn name(&self) -> &'static str {
        "row-to-row"
    }
}

// ---------------------------------------------------------------------------
// ListToPoint
// ---------------------------------------------------------------------------

/// Route to whichever of several goal cells is cheapest.
///
/// The estimate for goal `i` of `n` is its Manhattan distance plus `n - i`,
/// so on ties the search prefers goals later in the list. With `reverse`
/// set, the finished chain is inverted before it is returned.
#[derive(Copy, Clone, Debug, Default)]
pub struct ListToPoint {
    reverse: bool,
}

impl ListToPoint {
    pub fn new(reverse: bool) -> Self {
        Self { reverse }
    }

    fn post(&self) -> PostProcess {
        if self.reverse {
            PostProcess::Reverse
        } else {
            PostProcess::Identity
        }
    }

    fn estimate(cell: Cell, goals: &[Cell]) -> Option<i64> {
        let n = goals.len() as i64;
        goals
            .iter()
            .enumerate()
            .map(|(i, &g)| i64::from(manhattan(cell, g)) + (n - i as i64))
            .min()
    }
}

impl Strategy for ListToPoint {
    fn compute_weight(&self, node: &mut PathNode, fill_weight: i32, goals: &Goals<'_>) -> bool {
        if fill_weight == IMPASSABLE {
            return false;
        }
        // With no goals nothing can terminate the search; the estimate
        // collapses to zero and the open set is simply exhausted.
        let h = Self::estimate(node.cell, goals.cells()).unwrap_or(0);
        node.weight = accumulated(node) + h;
        true
    }

    fn is_goal(&self, cell: Cell, goals: &Goals<'_>) -> bool {
        goals.contains(cell)
    }

    fn post_process(
        &self,
        node: Option<PathNode>,
        _extent: Extent,
        _tiles: &TileWeights,
    ) -> Option<PathNode> {
        self.post().apply(node)
    }

    fn name(&self) -> &'static str {
        if self.reverse {
            "list-to-point-reverse"
        } else {
            "list-to-point"
        }
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

pub fn point_to_point() -> PointToPoint {
    PointToPoint
}

pub fn row_to_row() -> RowToRow {
    RowToRow
}

pub fn list_to_point(reverse: bool) -> ListToPoint {
    ListToPoint::new(reverse)
}

/// Names a built-in strategy, e.g. in configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    PointToPoint,
    RowToRow,
    ListToPoint { reverse: bool },
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            Self::PointToPoint => Box::new(PointToPoint),
            Self::RowToRow => Box::new(RowToRow),
            Self::ListToPoint { reverse } => Box::new(ListToPoint::new(reverse)),
        }
    }
}
