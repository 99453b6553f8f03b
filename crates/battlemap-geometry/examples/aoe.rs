use battlemap_geometry::{AoeShape, AoeSpec, CellCoord, GridConfig, rasterize};

fn main() {
    // A 16x12 board with 45px cells where each cell is 5ft
    let config = GridConfig::new(16, 12, 45.0, 5.0).unwrap();
    println!("{}", config);

    let origin = CellCoord::new(5, 5);
    let target = CellCoord::new(12, 8);

    for shape in AoeShape::ALL {
        let mut spec = AoeSpec::new(shape, origin, 3).unwrap();
        if shape.is_directional() {
            spec = spec.with_target(target);
        }

        let footprint = rasterize(&spec, &config);
        let cells = footprint.distinct_cells();
        println!(
            "\n{} at {} -> {} ({} cells)",
            shape,
            origin,
            footprint,
            cells.len()
        );

        // '@' marks the origin, '+' the target, '#' covered cells
        for y in 0..config.height() as i32 {
            for x in 0..config.width() as i32 {
                let cell = CellCoord::new(x, y);
                let glyph = if cell == origin {
                    '@'
                } else if shape.is_directional() && cell == target {
                    '+'
                } else if cells.contains(&cell) {
                    '#'
                } else {
                    '.'
                };
                print!("{} ", glyph);
            }
            println!();
        }
    }

    // A cone without a direction covers nothing yet
    let pending = AoeSpec::new(AoeShape::Cone, origin, 3).unwrap();
    let footprint = rasterize(&pending, &config);
    println!("\nCone with no target: {} cells", footprint.cells.len());
}
