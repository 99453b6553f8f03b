#![warn(missing_docs)]
#![doc = "Grid geometry for tabletop battle maps."]
#![doc = ""]
#![doc = "This crate converts between screen pixels and grid cells, rasterizes"]
#![doc = "area-of-effect templates onto the grid, measures distances in half-cell"]
#![doc = "steps and places tokens. Every function is pure: callers pass a"]
#![doc = "[`GridConfig`] and positions in, and draw whatever comes back."]

pub mod aoe;
pub mod error;
pub mod grid;
pub mod measure;
pub mod numeric;
pub mod token;

pub use aoe::{AoeFootprint, AoeShape, AoeSpec, DEFAULT_UNIT_SUFFIX, rasterize};
pub use error::GeometryError;
pub use grid::{CellCoord, CellPoint, GridConfig, PixelPoint};
pub use measure::{Measurement, distance_in_cells, measure_cells, measure_pixels};
pub use token::{DragPreview, Token, drag_preview, drop_position, spawn_position, token_at};
