//! Grid-related functionality.
//!
//! This module provides the grid configuration and the coordinate types
//! used to move between screen pixels and grid cells.

pub mod model;
pub mod point_types;

pub use model::GridConfig;
pub use point_types::{CellCoord, CellPoint, PixelPoint};
