use std::collections::HashSet;

use repair_core::{Cell, Extent};

use crate::node::PathNode;
use crate::tiles::TileWeights;

/// The cells a search terminates on: the ordered list plus a hash index.
///
/// The search expands from its `target` argument toward its `source`
/// argument, so `Goals` is built from `source`.
#[derive(Debug, Clone)]
pub struct Goals<'a> {
    cells: &'a [Cell],
    index: HashSet<Cell>,
}

impl<'a> Goals<'a> {
    pub fn new(cells: &'a [Cell]) -> Self {
        Self {
            cells,
            index: cells.iter().copied().collect(),
        }
    }

    /// Goal cells in caller order.
    #[inline]
    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.index.contains(&c)
    }

    /// The single goal of a one-goal search.
    ///
    /// # Panics
    ///
    /// Panics unless there is exactly one goal cell; single-goal strategies
    /// cannot route to anything else.
    pub fn single(&self, strategy: &str) -> Cell {
        assert!(
            self.cells.len() == 1,
            "{strategy} requires exactly one goal cell, got {}",
            self.cells.len()
        );
        self.cells[0]
    }
}

/// Cost, termination and post-processing policy for a search.
///
/// | Method | Called |
/// |---|---|
/// | [`compute_weight`](Self::compute_weight) | for every candidate node, under the tile lock |
/// | [`is_goal`](Self::is_goal) | for every node selected from the open set |
/// | [`post_process`](Self::post_process) | once, on the final node, under the tile lock |
///
/// Implementations are shared between concurrent searches and must not
/// rely on interior state.
pub trait Strategy: Send + Sync {
    /// Set `node.weight` and report whether the node may be entered at all.
    ///
    /// `node.fill_weight` and `node.dist_traveled` are already accumulated;
    /// `fill_weight` is the stored weight of `node.cell` alone. Must return
    /// `false` for [`IMPASSABLE`](crate::IMPASSABLE) cells.
    fn compute_weight(&self, node: &mut PathNode, fill_weight: i32, goals: &Goals<'_>) -> bool;

    /// Whether the search stops at `cell`.
    fn is_goal(&self, cell: Cell, goals: &Goals<'_>) -> bool;

    /// Transform the finished chain before it is returned.
    fn post_process(
        &self,
        node: Option<PathNode>,
        _extent: Extent,
        _tiles: &TileWeights,
    ) -> Option<PathNode> {
        node
    }

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Reusable post-processing steps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PostProcess {
    /// Return the chain unchanged.
    #[default]
    Identity,
    /// Invert the chain so the head becomes the tail.
    Reverse,
}

impl PostProcess {
    pub fn apply(self, node: Option<PathNode>) -> Option<PathNode> {
        match self {
            Self::Identity => node,
            Self::Reverse => node.map(PathNode::reversed),
        }
    }
}
