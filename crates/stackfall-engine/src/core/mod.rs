//! Occupancy grid and shape primitives.
//!
//! - [`Board`] - fixed-size filled/empty grid with collision and line clearing
//! - [`ShapeDefinition`] - immutable occupancy pattern shared between spawns
//! - [`Shape`] - a definition at a position on the board
//! - [`ShapeCatalog`] - the ordered set of definitions a game draws from

pub use self::{board::*, catalog::*, shape::*};

pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod shape;
