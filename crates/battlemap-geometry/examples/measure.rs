use battlemap_geometry::{
    CellCoord, GridConfig, PixelPoint, Token, drag_preview, drop_position, measure_cells,
    measure_pixels, spawn_position,
};

fn main() {
    // Same defaults as the battle map: 20x15 cells of 45px, 1.5 units per cell
    let config = GridConfig::new(20, 15, 45.0, 1.5).unwrap();

    // Click-to-measure snaps both clicks to cell centers
    let clicks = [PixelPoint::new(10.0, 12.0), PixelPoint::new(200.0, 150.0)];
    let a = config.cell_from_pixel(clicks[0]);
    let b = config.cell_from_pixel(clicks[1]);
    let m = measure_cells(a, b, &config);
    println!(
        "Clicked {:?} and {:?} -> cells {} and {} -> {} ({} cells)",
        (clicks[0].x, clicks[0].y),
        (clicks[1].x, clicks[1].y),
        a,
        b,
        m,
        m.distance_cells
    );

    // Raw pixel measurement rounds to half cells
    for end_x in [225.0, 236.0, 238.5, 258.75] {
        let m = measure_pixels(PixelPoint::new(0.0, 0.0), PixelPoint::new(end_x, 0.0), &config);
        println!(
            "0px -> {:>6.2}px = {:.3} cells raw, {} cells rounded, {}",
            end_x,
            end_x / config.cell_size_px(),
            m.distance_cells,
            m.label("m")
        );
    }

    // Drag a token across the board
    let spawn = spawn_position(&config, 2);
    let token = Token::new("Golem", spawn, 2).unwrap();
    println!("\n{} spawns at {}", token.name, token.position);

    let pointer = PixelPoint::new(700.0, 120.0);
    let preview = drag_preview(&token, pointer, &config);
    println!(
        "Dragging to {:?}: {} -> {} ({})",
        (pointer.x, pointer.y),
        preview.from,
        preview.to,
        preview.measurement
    );

    let landed = drop_position(&token, PixelPoint::new(655.0, 98.0), &config);
    let moved = measure_cells(token.position, landed, &config);
    println!("Dropped at {} after moving {}", landed, moved);

    // Off-board drops are kept on the board
    let clamped = drop_position(&token, PixelPoint::new(-500.0, 9000.0), &config);
    println!("Off-board drop lands at {}", clamped);
    assert_eq!(clamped, CellCoord::new(0, 14));
}
