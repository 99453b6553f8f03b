//! Token placement on the grid.
//!
//! Tokens are anchored by their top-left cell and cover `size x size`
//! cells. This module covers where new tokens spawn, the live distance
//! readout while a token is dragged, and snapping on drop.

use tracing::debug;

use crate::error::GeometryError;
use crate::grid::{CellCoord, GridConfig, PixelPoint};
use crate::measure::{Measurement, measure_pixels};

/// A creature or object standing on the battle map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Display name, also used to identify the token.
    pub name: String,
    /// Top-left cell covered by the token.
    pub position: CellCoord,
    /// Edge length in cells (1 for medium creatures, 2 for large, ...).
    pub size: u32,
}

impl Token {
    /// Creates a token.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::InvalidSize)` if `size` is zero.
    pub fn new(
        name: impl Into<String>,
        position: CellCoord,
        size: u32,
    ) -> Result<Self, GeometryError> {
        if size == 0 {
            return Err(GeometryError::InvalidSize("Token size must be at least 1"));
        }
        Ok(Token {
            name: name.into(),
            position,
            size,
        })
    }

    /// Returns true if the token covers `cell`.
    pub fn occupies(&self, cell: CellCoord) -> bool {
        let size = self.size as i64;
        let (dx, dy) = (
            cell.x as i64 - self.position.x as i64,
            cell.y as i64 - self.position.y as i64,
        );
        (0..size).contains(&dx) && (0..size).contains(&dy)
    }

    /// All cells covered by the token, row by row.
    pub fn footprint(&self) -> Vec<CellCoord> {
        let size = self.size as i32;
        (0..size)
            .flat_map(|dy| (0..size).map(move |dx| self.position.offset(dx, dy)))
            .collect()
    }

    /// Pixel position of the token's center.
    pub fn center_pixel(&self, config: &GridConfig) -> PixelPoint {
        let corner = config.cell_origin_pixel(self.position);
        let half = self.size as f64 * config.cell_size_px() / 2.0;
        PixelPoint::new(corner.x + half, corner.y + half)
    }
}

/// Where a freshly created token of `size` cells is placed: the grid center.
pub fn spawn_position(config: &GridConfig, size: u32) -> CellCoord {
    let free_x = config.width() as i64 - size as i64;
    let free_y = config.height() as i64 - size as i64;
    CellCoord::new(free_x.div_euclid(2) as i32, free_y.div_euclid(2) as i32)
}

/// Live readout while a token is being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPreview {
    /// Cell the token was picked up from.
    pub from: CellCoord,
    /// Cell under the pointer, snapped by rounding.
    pub to: CellCoord,
    /// Distance from the token center to the pointer.
    pub measurement: Measurement,
}

/// Computes the drag readout for `token` with the pointer at `pointer`.
pub fn drag_preview(token: &Token, pointer: PixelPoint, config: &GridConfig) -> DragPreview {
    DragPreview {
        from: token.position,
        to: config.cell_from_pixel_rounded(pointer),
        measurement: measure_pixels(token.center_pixel(config), pointer, config),
    }
}

/// Snaps a dropped token to the grid.
///
/// `top_left` is the pixel position of the token's top-left corner at
/// release. The result is rounded to the nearest cell and kept on the board.
pub fn drop_position(token: &Token, top_left: PixelPoint, config: &GridConfig) -> CellCoord {
    let snapped = config.clamp_to_grid(config.cell_from_pixel_rounded(top_left));
    debug!(token = %token.name, from = %token.position, to = %snapped, "Token dropped");
    snapped
}

/// Topmost token covering `cell`. Later tokens draw above earlier ones.
pub fn token_at(tokens: &[Token], cell: CellCoord) -> Option<usize> {
    tokens.iter().rposition(|t| t.occupies(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn grid() -> GridConfig {
        GridConfig::new(20, 15, 45.0, 5.0).unwrap()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Token::new("Ghost", CellCoord::new(0, 0), 0),
            Err(GeometryError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_spawn_position_centers_token() {
        let config = grid();
        assert_eq!(spawn_position(&config, 1), CellCoord::new(9, 7));
        assert_eq!(spawn_position(&config, 2), CellCoord::new(9, 6));
        // Token larger than the board floors toward negative
        let small = GridConfig::new(2, 2, 45.0, 5.0).unwrap();
        assert_eq!(spawn_position(&small, 5), CellCoord::new(-2, -2));
    }

    #[test]
    fn test_footprint_and_occupancy() {
        let token = Token::new("Dragon", CellCoord::new(3, 4), 2).unwrap();
        assert_eq!(
            token.footprint(),
            vec![
                CellCoord::new(3, 4),
                CellCoord::new(4, 4),
                CellCoord::new(3, 5),
                CellCoord::new(4, 5),
            ]
        );
        assert!(token.occupies(CellCoord::new(4, 5)));
        assert!(!token.occupies(CellCoord::new(5, 5)));
        assert!(!token.occupies(CellCoord::new(2, 4)));
    }

    #[test]
    fn test_center_pixel_accounts_for_size() {
        let config = grid();
        let medium = Token::new("Ranger", CellCoord::new(1, 1), 1).unwrap();
        let large = Token::new("Golem", CellCoord::new(1, 1), 2).unwrap();
        assert_eq!(medium.center_pixel(&config), PixelPoint::new(67.5, 67.5));
        assert_eq!(large.center_pixel(&config), PixelPoint::new(90.0, 90.0));
    }

    #[test]
    fn test_drag_preview() {
        let config = grid();
        let token = Token::new("Warrior", CellCoord::new(0, 0), 1).unwrap();
        // Center is (22.5, 22.5); pointer three cells right
        let preview = drag_preview(&token, PixelPoint::new(157.5, 22.5), &config);
        assert_eq!(preview.from, CellCoord::new(0, 0));
        assert_eq!(preview.to, CellCoord::new(4, 1));
        assert!((preview.measurement.distance_cells - 3.0).abs() < EPSILON);
        assert!((preview.measurement.distance_world - 15.0).abs() < EPSILON);
        assert_eq!(preview.measurement.label("ft"), "15 ft");
    }

    #[test]
    fn test_drop_position_rounds_and_clamps() {
        let config = grid();
        let token = Token::new("Warrior", CellCoord::new(0, 0), 1).unwrap();
        assert_eq!(
            drop_position(&token, PixelPoint::new(100.0, 30.0), &config),
            CellCoord::new(2, 1)
        );
        assert_eq!(
            drop_position(&token, PixelPoint::new(-80.0, 5000.0), &config),
            CellCoord::new(0, 14)
        );
    }

    #[test]
    fn test_token_at_prefers_topmost() {
        let tokens = vec![
            Token::new("Golem", CellCoord::new(2, 2), 2).unwrap(),
            Token::new("Ranger", CellCoord::new(3, 3), 1).unwrap(),
        ];
        assert_eq!(token_at(&tokens, CellCoord::new(3, 3)), Some(1));
        assert_eq!(token_at(&tokens, CellCoord::new(2, 3)), Some(0));
        assert_eq!(token_at(&tokens, CellCoord::new(9, 9)), None);
    }
}
