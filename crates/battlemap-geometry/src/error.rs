//! This module defines the error types used by the `battlemap-geometry` crate.

use thiserror::Error;

/// Error type for grid and template construction.
///
/// Only the validating constructors return these. Rasterization and
/// measurement are total over their inputs and never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Returned when grid width or height is zero.
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(&'static str),
    /// Returned when the pixel size of a cell is not a positive finite number.
    #[error("Invalid cell size: {0}")]
    InvalidCellSize(&'static str),
    /// Returned when the world units per cell is not a positive finite number.
    #[error("Invalid unit scale: {0}")]
    InvalidUnitScale(&'static str),
    /// Returned when an area-of-effect template or token has a size of zero cells.
    #[error("Invalid size: {0}")]
    InvalidSize(&'static str),
}
