//! Coordinate types for cells, pixels and fractional cell positions.

use std::fmt;

/// Represents a cell in grid coordinates (column and row indices).
///
/// Signed so that rasterizers can step past the board edge; callers filter
/// with [`GridConfig::contains`](super::GridConfig::contains) or clamp with
/// [`GridConfig::clamp_to_grid`](super::GridConfig::clamp_to_grid).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// The x-coordinate (column index) in the grid.
    pub x: i32,
    /// The y-coordinate (row index) in the grid.
    pub y: i32,
}

impl CellCoord {
    /// Creates a new `CellCoord`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this cell shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Represents a point in screen space (pixels).
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    /// The x-coordinate in pixels.
    pub x: f64,
    /// The y-coordinate in pixels.
    pub y: f64,
}

impl PixelPoint {
    /// Creates a new `PixelPoint`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Represents a point in fractional cell space (pixels divided by the cell size).
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct CellPoint {
    /// The x-coordinate in cells.
    pub x: f64,
    /// The y-coordinate in cells.
    pub y: f64,
}

impl CellPoint {
    /// Creates a new `CellPoint`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<CellCoord> for CellPoint {
    fn from(cell: CellCoord) -> Self {
        Self::new(cell.x as f64, cell.y as f64)
    }
}
