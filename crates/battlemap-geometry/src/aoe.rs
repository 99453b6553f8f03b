//! Area-of-effect template rasterization.
//!
//! Turns a template (circle, square, cone or line) anchored on a cell into
//! the list of grid cells it covers, plus the magnitude shown next to the
//! overlay ("15ft radius"). Every rasterizer works in cell space on offsets
//! from the origin and the result is clipped to the grid.

#![warn(missing_docs)]

use std::collections::HashSet;
use std::fmt;

use tracing::trace;

use crate::error::GeometryError;
use crate::grid::{CellCoord, GridConfig};
use crate::numeric::round_half_up;

/// Unit suffix used when no other is configured.
pub const DEFAULT_UNIT_SUFFIX: &str = "ft";

/// Shape of an area-of-effect template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AoeShape {
    /// Closed disk of radius `size` cells.
    Circle,
    /// Square of side `2 * size + 1` cells centered on the origin.
    Square,
    /// Triangular cone widening away from the origin toward the target.
    Cone,
    /// Straight line from the origin to the target.
    Line,
}

impl AoeShape {
    /// All shapes, in tool-selection order.
    pub const ALL: [AoeShape; 4] = [
        AoeShape::Circle,
        AoeShape::Square,
        AoeShape::Cone,
        AoeShape::Line,
    ];

    /// Noun used in the overlay label.
    pub fn noun(self) -> &'static str {
        match self {
            AoeShape::Circle => "radius",
            AoeShape::Square => "cube",
            AoeShape::Cone => "cone",
            AoeShape::Line => "line",
        }
    }

    /// Returns true if the shape needs a target cell to pick its direction.
    pub fn is_directional(self) -> bool {
        matches!(self, AoeShape::Cone | AoeShape::Line)
    }
}

impl fmt::Display for AoeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AoeShape::Circle => write!(f, "Circle"),
            AoeShape::Square => write!(f, "Square"),
            AoeShape::Cone => write!(f, "Cone"),
            AoeShape::Line => write!(f, "Line"),
        }
    }
}

/// Placement of an area-of-effect template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AoeSpec {
    /// Template shape.
    pub shape: AoeShape,
    /// Anchor cell (center for circle and square, apex for cone, start for line).
    pub origin: CellCoord,
    /// Aim cell for cone and line. Ignored by circle and square.
    pub target: Option<CellCoord>,
    /// Template size in cells, at least 1.
    pub size: u32,
}

impl AoeSpec {
    /// Creates a template without a target.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::InvalidSize)` if `size` is zero.
    pub fn new(shape: AoeShape, origin: CellCoord, size: u32) -> Result<Self, GeometryError> {
        if size == 0 {
            return Err(GeometryError::InvalidSize("Template size must be at least 1"));
        }
        Ok(AoeSpec {
            shape,
            origin,
            target: None,
            size,
        })
    }

    /// Returns the same template aimed at `target`.
    #[must_use]
    pub fn with_target(mut self, target: CellCoord) -> Self {
        self.target = Some(target);
        self
    }

    /// Returns the target if it defines a usable direction.
    fn direction_target(&self) -> Option<CellCoord> {
        self.target.filter(|t| *t != self.origin)
    }
}

/// Cells covered by a template, already clipped to the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AoeFootprint {
    /// Shape that produced the footprint.
    pub shape: AoeShape,
    /// Covered cells in rasterization order. May contain repeats for cones.
    pub cells: Vec<CellCoord>,
    /// Template size in world units (`size * units_per_cell`).
    pub magnitude: f64,
}

impl AoeFootprint {
    /// Returns true when nothing is covered, e.g. a cone with no direction yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Covered cells without repeats, in first-occurrence order.
    pub fn distinct_cells(&self) -> Vec<CellCoord> {
        let mut seen = HashSet::with_capacity(self.cells.len());
        self.cells
            .iter()
            .copied()
            .filter(|cell| seen.insert(*cell))
            .collect()
    }

    /// Overlay label such as `"15ft radius"`.
    pub fn label(&self, unit: &str) -> String {
        format!("{}{} {}", self.magnitude, unit, self.shape.noun())
    }
}

impl fmt::Display for AoeFootprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(DEFAULT_UNIT_SUFFIX))
    }
}

/// Rasterizes `spec` on `config`.
///
/// Cone and line templates without a target, or aimed at their own
/// origin, produce an empty footprint: that is the normal state while the
/// user has picked a shape but not yet a direction.
///
/// Offsets are computed in `i64` and only the part of the template that can
/// reach the board is visited, so the cost is bounded by the grid rather
/// than by `size` or by how far away the origin and target are.
pub fn rasterize(spec: &AoeSpec, config: &GridConfig) -> AoeFootprint {
    let origin = (spec.origin.x as i64, spec.origin.y as i64);
    let size = spec.size as i64;
    let cells: Vec<CellCoord> = match spec.shape {
        AoeShape::Circle => {
            let r2 = size as i128 * size as i128;
            clipped_square(origin, size, config)
                .filter(|&(dx, dy)| (dx as i128).pow(2) + (dy as i128).pow(2) <= r2)
                .filter_map(|(dx, dy)| grid_cell(config, origin.0 + dx, origin.1 + dy))
                .collect()
        }
        AoeShape::Square => clipped_square(origin, size, config)
            .filter_map(|(dx, dy)| grid_cell(config, origin.0 + dx, origin.1 + dy))
            .collect(),
        AoeShape::Cone => match spec.direction_target() {
            Some(target) => cone_cells(origin, target, size, config),
            None => Vec::new(),
        },
        AoeShape::Line => match spec.direction_target() {
            Some(target) => line_cells(origin, target, config),
            None => Vec::new(),
        },
    };

    trace!(
        shape = %spec.shape,
        origin = %spec.origin,
        size = spec.size,
        kept = cells.len(),
        "Rasterized template"
    );

    AoeFootprint {
        shape: spec.shape,
        cells,
        magnitude: spec.size as f64 * config.units_per_cell(),
    }
}

/// The cell at `(x, y)` if it lies on the grid.
fn grid_cell(config: &GridConfig, x: i64, y: i64) -> Option<CellCoord> {
    let on_grid = (0..config.width() as i64).contains(&x) && (0..config.height() as i64).contains(&y);
    on_grid.then(|| CellCoord::new(x as i32, y as i32))
}

/// Offsets in `[-size, size]` on one axis that land in `0..extent`.
fn clip_axis(origin: i64, size: i64, extent: u32) -> (i64, i64) {
    ((-size).max(-origin), size.min(extent as i64 - 1 - origin))
}

/// Offsets with `|dx| <= size` and `|dy| <= size` that land on the grid,
/// ascending x then y.
fn clipped_square(
    origin: (i64, i64),
    size: i64,
    config: &GridConfig,
) -> impl Iterator<Item = (i64, i64)> {
    let (lo_x, hi_x) = clip_axis(origin.0, size, config.width());
    let (lo_y, hi_y) = clip_axis(origin.1, size, config.height());
    (lo_x..=hi_x).flat_map(move |dx| (lo_y..=hi_y).map(move |dy| (dx, dy)))
}

/// Distance from `origin` to the farthest cell of the grid.
fn farthest_grid_distance(origin: (i64, i64), config: &GridConfig) -> f64 {
    let xs = [-origin.0, config.width() as i64 - 1 - origin.0];
    let ys = [-origin.1, config.height() as i64 - 1 - origin.1];
    xs.iter()
        .flat_map(|&x| ys.iter().map(move |&y| (x as f64).hypot(y as f64)))
        .fold(0.0, f64::max)
}

/// Grid offset of lattice point `(r, a)`: `r` steps along `dir`, `a` across it.
fn lattice_offset(dir: (f64, f64), r: i64, a: i64) -> (i64, i64) {
    let (rf, af) = (r as f64, a as f64);
    (
        round_half_up(rf * dir.0 - af * dir.1) as i64,
        round_half_up(rf * dir.1 + af * dir.0) as i64,
    )
}

/// Stamps a triangular lattice along the origin-to-target direction.
///
/// For each range step `r` the lateral offset `a` spans `-r..=r`, so the
/// cone widens by one cell on each side per step. The lattice is rotated
/// onto the aim direction and rounded back onto the grid. Cells come out
/// ordered by `r`, then `a`.
fn cone_cells(
    origin: (i64, i64),
    target: CellCoord,
    size: i64,
    config: &GridConfig,
) -> Vec<CellCoord> {
    let dx = (target.x as i64 - origin.0) as f64;
    let dy = (target.y as i64 - origin.1) as f64;
    let len = dx.hypot(dy);
    let dir = (dx / len, dy / len);

    // A lattice point at range r is at least r - 1 cells from its cell
    let reach = (farthest_grid_distance(origin, config).ceil() as i64).saturating_add(2);
    let steps = size.min(reach);
    let grid_cells = config.width() as i128 * config.height() as i128;
    if (steps as i128 + 1).pow(2) > 4 * grid_cells + 64 {
        return cone_cells_from_grid(origin, dir, size, config);
    }

    let mut cells = Vec::new();
    for r in 0..=steps {
        for a in -r..=r {
            let (ox, oy) = lattice_offset(dir, r, a);
            if let Some(cell) = grid_cell(config, origin.0 + ox, origin.1 + oy) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Same result as the forward sweep, found by projecting each grid cell
/// back onto the lattice. Used when the origin is far off the board.
fn cone_cells_from_grid(
    origin: (i64, i64),
    dir: (f64, f64),
    size: i64,
    config: &GridConfig,
) -> Vec<CellCoord> {
    let mut hits: Vec<(i64, i64, CellCoord)> = Vec::new();
    for gx in 0..config.width() as i64 {
        for gy in 0..config.height() as i64 {
            let offset = (gx - origin.0, gy - origin.1);
            let (ex, ey) = (offset.0 as f64, offset.1 as f64);
            let along = ex * dir.0 + ey * dir.1;
            let across = ey * dir.0 - ex * dir.1;

            // Rounding moves a lattice point by at most 0.71 cells
            let r_lo = ((along - 1.0).floor() as i64).max(0);
            let r_hi = ((along + 1.0).ceil() as i64).min(size);
            for r in r_lo..=r_hi {
                let a_lo = ((across - 1.0).floor() as i64).max(-r);
                let a_hi = ((across + 1.0).ceil() as i64).min(r);
                for a in a_lo..=a_hi {
                    if lattice_offset(dir, r, a) == offset {
                        hits.push((r, a, CellCoord::new(gx as i32, gy as i32)));
                    }
                }
            }
        }
    }
    hits.sort_unstable_by_key(|&(r, a, _)| (r, a));
    hits.into_iter().map(|(_, _, cell)| cell).collect()
}

/// Step indices `i` of a walk whose coordinate on one axis can land in
/// `0..extent`, or `None` if it never does.
fn walk_window(origin: i64, delta: i64, steps: i64, extent: u32) -> Option<(i64, i64)> {
    let extent = extent as i64;
    if delta == 0 {
        return (0..extent).contains(&origin).then_some((0, steps));
    }
    let scale = steps as f64 / delta as f64;
    let a = (-0.5 - origin as f64) * scale;
    let b = (extent as f64 - 0.5 - origin as f64) * scale;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Some((
        (lo.floor() as i64).saturating_sub(1).max(0),
        (hi.ceil() as i64).saturating_add(1).min(steps),
    ))
}

/// Walks from origin to target, one cell per step along the major axis.
fn line_cells(origin: (i64, i64), target: CellCoord, config: &GridConfig) -> Vec<CellCoord> {
    let dx = target.x as i64 - origin.0;
    let dy = target.y as i64 - origin.1;
    let steps = dx.abs().max(dy.abs());

    let windows = (
        walk_window(origin.0, dx, steps, config.width()),
        walk_window(origin.1, dy, steps, config.height()),
    );
    let ((lo_x, hi_x), (lo_y, hi_y)) = match windows {
        (Some(x), Some(y)) => (x, y),
        _ => return Vec::new(),
    };

    (lo_x.max(lo_y)..=hi_x.min(hi_y))
        .filter_map(|i| {
            let t = i as f64 / steps as f64;
            grid_cell(
                config,
                origin.0 + round_half_up(dx as f64 * t) as i64,
                origin.1 + round_half_up(dy as f64 * t) as i64,
            )
        })
        .collect()
}
