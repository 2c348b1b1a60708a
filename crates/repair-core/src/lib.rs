//! **repair-core** — grid primitives shared by the pathing crates.
//!
//! This crate provides the discrete [`Cell`] coordinate, continuous
//! [`WorldPoint`] positions, the [`Extent`] that bounds a grid, the fixed-size
//! [`CellMapping`] between the two spaces, and [`GridConfig`].

pub mod config;
pub mod geom;
pub mod mapping;

pub use config::{ConfigError, GridConfig};
pub use geom::{Cell, Extent, ExtentIter, WorldPoint};
pub use mapping::{CELL_SIZE, CellMapping, to_cell, to_world};
