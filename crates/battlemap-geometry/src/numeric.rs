//! Rounding helpers shared by the grid, template and measurement code.
//!
//! Two tie-break conventions coexist on the battle map: half-up (ties go
//! toward positive infinity) for distances and rasterized offsets, and
//! half-away-from-zero for token snapping. Keeping them in one place makes
//! the choice explicit at every call site.

/// Rounds to the nearest integer, ties toward positive infinity.
///
/// `2.5 -> 3.0`, `-2.5 -> -2.0`. The fraction is compared against one half
/// directly; adding 0.5 first would round `0.49999999999999994` up to 1.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Rounds to the nearest integer, ties away from zero.
///
/// `2.5 -> 3.0`, `-2.5 -> -3.0`.
pub fn round_half_away_from_zero(value: f64) -> f64 {
    value.round()
}

/// Rounds a distance to the nearest half step (`x.0` or `x.5`), ties up.
pub fn round_to_half_step(value: f64) -> f64 {
    round_half_up(value * 2.0) / 2.0
}

/// Converts an already-rounded float to a cell index.
///
/// The `as` cast saturates at the `i32` bounds and maps NaN to zero, so a
/// degenerate grid (zero cell size) never panics here.
pub(crate) fn to_cell_index(value: f64) -> i32 {
    value as i32
}
