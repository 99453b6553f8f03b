//! Straight-line distance measurement between two points on the board.
//!
//! Distances are reported the way a tabletop ruler reads them: in half-cell
//! steps, converted to world units.

#![warn(missing_docs)]

use std::fmt;

use tracing::trace;

use crate::aoe::DEFAULT_UNIT_SUFFIX;
use crate::grid::{CellCoord, CellPoint, GridConfig, PixelPoint};
use crate::numeric::round_to_half_step;

/// A measured segment ready for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Segment start in pixels.
    pub start: PixelPoint,
    /// Segment end in pixels.
    pub end: PixelPoint,
    /// Distance in cells, rounded to the nearest half step.
    pub distance_cells: f64,
    /// Distance in world units (`distance_cells * units_per_cell`).
    pub distance_world: f64,
}

impl Measurement {
    /// Ruler label such as `"7.5 ft"`.
    pub fn label(&self, unit: &str) -> String {
        format!("{} {}", self.distance_world, unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(DEFAULT_UNIT_SUFFIX))
    }
}

/// Euclidean distance between two cell-space points, unrounded.
pub fn distance_in_cells(a: CellPoint, b: CellPoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Measures between two pixel positions.
pub fn measure_pixels(start: PixelPoint, end: PixelPoint, config: &GridConfig) -> Measurement {
    let raw = distance_in_cells(config.to_cell_space(start), config.to_cell_space(end));
    let distance_cells = round_to_half_step(raw);
    trace!(raw, distance_cells, "Measured segment");
    Measurement {
        start,
        end,
        distance_cells,
        distance_world: distance_cells * config.units_per_cell(),
    }
}

/// Measures between the centers of two cells.
pub fn measure_cells(from: CellCoord, to: CellCoord, config: &GridConfig) -> Measurement {
    measure_pixels(
        config.cell_center_pixel(from),
        config.cell_center_pixel(to),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn grid(units_per_cell: f64) -> GridConfig {
        GridConfig::new(20, 15, 45.0, units_per_cell).unwrap()
    }

    #[test]
    fn test_three_four_five() {
        let d = distance_in_cells(CellPoint::new(0.0, 0.0), CellPoint::new(3.0, 4.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_distance_is_symmetric_and_non_negative() {
        let a = CellPoint::new(7.25, -1.0);
        let b = CellPoint::new(-2.0, 3.5);
        let d = distance_in_cells(a, b);
        assert!(d > 0.0);
        assert!((d - distance_in_cells(b, a)).abs() < EPSILON);
        assert_eq!(distance_in_cells(a, a), 0.0);
    }

    #[test]
    fn test_measure_cells_uses_centers() {
        let config = grid(5.0);
        let m = measure_cells(CellCoord::new(0, 0), CellCoord::new(3, 4), &config);
        assert!((m.start.x - 22.5).abs() < EPSILON);
        assert!((m.end.y - 202.5).abs() < EPSILON);
        assert!((m.distance_cells - 5.0).abs() < EPSILON);
        assert!((m.distance_world - 25.0).abs() < EPSILON);
        assert_eq!(m.label("ft"), "25 ft");
    }

    #[test]
    fn test_measure_rounds_to_half_steps() {
        let config = grid(1.5);
        // 1 cell right, 1 cell down: sqrt(2) = 1.414 -> 1.5 cells -> 2.25 units
        let m = measure_cells(CellCoord::new(2, 2), CellCoord::new(3, 3), &config);
        assert!((m.distance_cells - 1.5).abs() < EPSILON);
        assert!((m.distance_world - 2.25).abs() < EPSILON);

        // 5.24 cells along x rounds down to 5.0
        let m = measure_pixels(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(5.24 * 45.0, 0.0),
            &config,
        );
        assert!((m.distance_cells - 5.0).abs() < EPSILON);

        // 5.3 cells rounds up to 5.5
        let m = measure_pixels(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(0.0, 5.3 * 45.0),
            &config,
        );
        assert!((m.distance_cells - 5.5).abs() < EPSILON);
    }

    #[test]
    fn test_measure_same_point_is_zero() {
        let config = grid(5.0);
        let p = PixelPoint::new(100.0, 100.0);
        let m = measure_pixels(p, p, &config);
        assert_eq!(m.distance_world, 0.0);
        assert_eq!(format!("{}", m), "0 ft");
    }

    #[test]
    fn test_label_keeps_fraction() {
        let config = grid(5.0);
        let m = measure_pixels(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(67.5, 0.0),
            &config,
        );
        assert_eq!(m.label("ft"), "7.5 ft");
    }
}
