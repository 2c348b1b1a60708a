//! Strategy-driven A* search over a shared weighted tile map.
//!
//! The pieces fit together like this:
//!
//! - [`WeightedMap`] holds per-cell fill weights behind a single lock and can
//!   be shared between threads; [`IMPASSABLE`] blocks a cell.
//! - A [`Strategy`] decides how nodes are weighed, when the search stops and
//!   how the finished chain is post-processed. The built-ins are
//!   [`PointToPoint`], [`RowToRow`] and [`ListToPoint`].
//! - [`find_path`] (or [`search`] for options and counters) runs the search
//!   and hands back an owned [`PathNode`] chain, or `None` when no route
//!   exists.
//!
//! # Direction
//!
//! Expansion starts at the `target` cells and stops on a `source` cell. The
//! returned head is therefore in `source`, and walking
//! [`PathNode::predecessor`] leads to `target`. `ListToPoint::new(true)`
//! reverses the chain.
//!
//! # Built-in strategies
//!
//! | Strategy | Goal cells | Stops at |
//! |---|---|---|
//! | [`PointToPoint`] | exactly one | that cell |
//! | [`RowToRow`] | exactly one | any cell with the goal's column |
//! | [`ListToPoint`] | one or more | any goal cell, ties favour later goals |

mod astar;
mod distance;
mod neighbors;
mod node;
mod strategies;
mod strategy;
mod tiles;

pub use astar::{RelinkPolicy, SearchOptions, SearchResult, SearchStats, find_path, search};
pub use distance::manhattan;
pub use neighbors::Neighbors;
pub use node::{PathIter, PathNode};
pub use strategies::{
    ListToPoint, PointToPoint, RowToRow, StrategyKind, list_to_point, point_to_point, row_to_row,
};
pub use strategy::{Goals, PostProcess, Strategy};
pub use tiles::{IMPASSABLE, TileWeights, WeightedMap};
