//! Grid configuration and pixel/cell coordinate conversion.
//!
//! Every conversion between screen pixels and grid cells goes through
//! [`GridConfig`]; the template and measurement code works purely in cell
//! space.

#![warn(missing_docs)]

use super::{CellCoord, CellPoint, PixelPoint};
use crate::error::GeometryError;
use crate::numeric::{round_half_away_from_zero, to_cell_index};

/// Immutable description of a battle map grid.
///
/// A new value is built whenever the user changes a grid control; the
/// engine never mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGridConfig"))]
pub struct GridConfig {
    /// Width of the grid in cells
    width: u32,
    /// Height of the grid in cells
    height: u32,
    /// Edge length of one cell in pixels
    cell_size_px: f64,
    /// World distance (feet, meters, ...) represented by one cell
    units_per_cell: f64,
}

/// Unchecked field set; deserialized values go through [`GridConfig::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGridConfig {
    width: u32,
    height: u32,
    cell_size_px: f64,
    units_per_cell: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGridConfig> for GridConfig {
    type Error = GeometryError;

    fn try_from(raw: RawGridConfig) -> Result<Self, Self::Error> {
        GridConfig::new(raw.width, raw.height, raw.cell_size_px, raw.units_per_cell)
    }
}

impl GridConfig {
    /// Creates a new GridConfig.
    ///
    /// # Arguments
    /// * `width` - Width of the grid in cells
    /// * `height` - Height of the grid in cells
    /// * `cell_size_px` - Edge length of one cell in pixels
    /// * `units_per_cell` - World units covered by one cell
    ///
    /// # Returns
    /// * `Result<Self, GeometryError>` - The config or an error if any field is not positive
    pub fn new(
        width: u32,
        height: u32,
        cell_size_px: f64,
        units_per_cell: f64,
    ) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidDimensions(
                "Width and height must be non-zero",
            ));
        }
        if !(cell_size_px.is_finite() && cell_size_px > 0.0) {
            return Err(GeometryError::InvalidCellSize(
                "Cell size must be positive",
            ));
        }
        if !(units_per_cell.is_finite() && units_per_cell > 0.0) {
            return Err(GeometryError::InvalidUnitScale(
                "Units per cell must be positive",
            ));
        }

        Ok(GridConfig {
            width,
            height,
            cell_size_px,
            units_per_cell,
        })
    }

    /// Gets the width of the grid in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Gets the height of the grid in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gets the edge length of one cell in pixels.
    pub fn cell_size_px(&self) -> f64 {
        self.cell_size_px
    }

    /// Gets the world units represented by one cell.
    pub fn units_per_cell(&self) -> f64 {
        self.units_per_cell
    }

    /// Gets the size of the whole board in pixels as `(width, height)`.
    pub fn pixel_extent(&self) -> (f64, f64) {
        (
            self.width as f64 * self.cell_size_px,
            self.height as f64 * self.cell_size_px,
        )
    }

    /// Returns true if `cell` addresses a cell of this grid.
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as i64) < self.width as i64
            && (cell.y as i64) < self.height as i64
    }

    /// Converts a pixel position to the cell that contains it.
    ///
    /// Floors each axis, so `(44, 44)` with 45 px cells is cell `(0, 0)`.
    /// Positions off the board produce cells off the board.
    pub fn cell_from_pixel(&self, p: PixelPoint) -> CellCoord {
        CellCoord::new(
            to_cell_index((p.x / self.cell_size_px).floor()),
            to_cell_index((p.y / self.cell_size_px).floor()),
        )
    }

    /// Converts a pixel position to the nearest cell corner index.
    ///
    /// Rounds half away from zero. Token dragging snaps this way, unlike
    /// click-to-measure which uses [`cell_from_pixel`](Self::cell_from_pixel).
    pub fn cell_from_pixel_rounded(&self, p: PixelPoint) -> CellCoord {
        CellCoord::new(
            to_cell_index(round_half_away_from_zero(p.x / self.cell_size_px)),
            to_cell_index(round_half_away_from_zero(p.y / self.cell_size_px)),
        )
    }

    /// Gets the pixel position of the center of `cell`.
    pub fn cell_center_pixel(&self, cell: CellCoord) -> PixelPoint {
        let half = self.cell_size_px / 2.0;
        PixelPoint::new(
            cell.x as f64 * self.cell_size_px + half,
            cell.y as f64 * self.cell_size_px + half,
        )
    }

    /// Gets the pixel position of the top-left corner of `cell`.
    pub fn cell_origin_pixel(&self, cell: CellCoord) -> PixelPoint {
        PixelPoint::new(
            cell.x as f64 * self.cell_size_px,
            cell.y as f64 * self.cell_size_px,
        )
    }

    /// Converts a pixel position to fractional cell space.
    pub fn to_cell_space(&self, p: PixelPoint) -> CellPoint {
        CellPoint::new(p.x / self.cell_size_px, p.y / self.cell_size_px)
    }

    /// Clamps `cell` onto the grid.
    ///
    /// x is limited to `[0, width - 1]` and y to `[0, height - 1]`. A grid
    /// with a zero dimension clamps that axis to 0.
    pub fn clamp_to_grid(&self, cell: CellCoord) -> CellCoord {
        let max_x = (self.width as i64 - 1).max(0);
        let max_y = (self.height as i64 - 1).max(0);
        CellCoord::new(
            (cell.x as i64).min(max_x).max(0) as i32,
            (cell.y as i64).min(max_y).max(0) as i32,
        )
    }
}

impl std::fmt::Display for GridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid ({}x{}, cell: {}px, scale: {} units/cell)",
            self.width, self.height, self.cell_size_px, self.units_per_cell
        )
    }
}
