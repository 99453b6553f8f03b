use macroquad::prelude::*;
use tracing::info;

use battlemap_geometry::{AoeShape, CellCoord, GridConfig, PixelPoint};
use battlemap_table::Die;

use crate::session::{GridControl, MeasurePhase, Session, Tool};

const MARGIN: f32 = 20.0;
const PANEL_WIDTH: f32 = 300.0;
const TEXT_SIZE: f32 = 20.0;
const LINE_HEIGHT: f32 = 22.0;

const GRID_LINE: Color = Color::new(0.55, 0.55, 0.55, 1.0);
const AOE_FILL: Color = Color::new(0.9, 0.2, 0.1, 0.35);
const AOE_ORIGIN: Color = Color::new(0.9, 0.2, 0.1, 0.8);
const TOKEN_FILL: Color = Color::new(0.2, 0.4, 0.8, 0.85);
const DRAG_GHOST: Color = Color::new(0.2, 0.4, 0.8, 0.4);

const SHAPE_KEYS: [(KeyCode, AoeShape); 4] = [
    (KeyCode::Q, AoeShape::Circle),
    (KeyCode::W, AoeShape::Square),
    (KeyCode::E, AoeShape::Cone),
    (KeyCode::R, AoeShape::Line),
];

const GRID_KEYS: [(KeyCode, GridControl); 8] = [
    (KeyCode::Left, GridControl::Width(-1)),
    (KeyCode::Right, GridControl::Width(1)),
    (KeyCode::Up, GridControl::Height(-1)),
    (KeyCode::Down, GridControl::Height(1)),
    (KeyCode::LeftBracket, GridControl::CellSize(-5.0)),
    (KeyCode::RightBracket, GridControl::CellSize(5.0)),
    (KeyCode::Comma, GridControl::UnitsPerCell(-0.5)),
    (KeyCode::Period, GridControl::UnitsPerCell(0.5)),
];

const DIE_KEYS: [(KeyCode, Die); 6] = [
    (KeyCode::Key1, Die::D4),
    (KeyCode::Key2, Die::D6),
    (KeyCode::Key3, Die::D8),
    (KeyCode::Key4, Die::D10),
    (KeyCode::Key5, Die::D12),
    (KeyCode::Key6, Die::D20),
];

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Battle Map".to_string(),
        window_width: 1280,
        window_height: 760,
        high_dpi: true,
        ..Default::default()
    }
}

/// Window size that fits the board and the side panel.
fn fit_window(grid: &GridConfig) -> (f32, f32) {
    let (w, h) = grid.pixel_extent();
    let width = w as f32 + PANEL_WIDTH + 3.0 * MARGIN;
    let height = (h as f32 + 2.0 * MARGIN).max(480.0);
    (width, height)
}

fn board_point(screen: (f32, f32)) -> PixelPoint {
    PixelPoint::new((screen.0 - MARGIN) as f64, (screen.1 - MARGIN) as f64)
}

fn to_screen(p: PixelPoint) -> Vec2 {
    vec2(p.x as f32 + MARGIN, p.y as f32 + MARGIN)
}

pub async fn run(mut session: Session) {
    let (width, height) = fit_window(session.grid());
    request_new_screen_size(width, height);
    info!("Battle map loop starting");

    let mut rng = ::rand::rng();
    loop {
        handle_input(&mut session, &mut rng);

        clear_background(Color::new(0.93, 0.91, 0.86, 1.0));
        draw_board(&session);
        draw_aoe(&session);
        draw_tokens(&session);
        draw_measurement(&session);
        draw_panel(&session);

        next_frame().await
    }
}

fn handle_input<R: ::rand::Rng + ?Sized>(session: &mut Session, rng: &mut R) {
    let pointer = board_point(mouse_position());
    if is_mouse_button_pressed(MouseButton::Left) {
        session.pointer_pressed(pointer);
    }
    session.pointer_moved(pointer);
    if is_mouse_button_released(MouseButton::Left) {
        session.pointer_released(pointer);
    }

    if is_key_pressed(KeyCode::S) {
        session.set_tool(Tool::Select);
    }
    if is_key_pressed(KeyCode::M) {
        session.set_tool(Tool::Measure);
    }
    if is_key_pressed(KeyCode::A) {
        session.set_tool(Tool::Aoe);
    }
    for (key, shape) in SHAPE_KEYS {
        if is_key_pressed(key) {
            session.set_tool(Tool::Aoe);
            session.set_aoe_shape(shape);
        }
    }
    if is_key_pressed(KeyCode::Equal) {
        session.grow_aoe();
    }
    if is_key_pressed(KeyCode::Minus) {
        session.shrink_aoe();
    }

    for (key, die) in DIE_KEYS {
        if is_key_pressed(key) {
            session.add_die(die);
        }
    }
    if is_key_pressed(KeyCode::Space) {
        session.roll_dice(rng);
    }
    if is_key_pressed(KeyCode::C) {
        session.clear_dice();
    }

    if is_key_pressed(KeyCode::N) {
        session.next_turn();
    }
    if is_key_pressed(KeyCode::I) {
        session.roll_initiative(rng);
    }
    if is_key_pressed(KeyCode::O) {
        session.order_initiative();
    }
    if is_key_pressed(KeyCode::Z) {
        session.reset_initiative();
    }
    if is_key_pressed(KeyCode::PageUp) {
        session.shift_current(-1);
    }
    if is_key_pressed(KeyCode::PageDown) {
        session.shift_current(1);
    }
    if is_key_pressed(KeyCode::T) {
        let name = format!("Token {}", session.tokens().len() + 1);
        session.spawn_token(name, 1);
    }
    if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
        session.remove_token_at(pointer);
    }

    for (key, control) in GRID_KEYS {
        if is_key_pressed(key) && session.adjust_grid(control) {
            let (width, height) = fit_window(session.grid());
            request_new_screen_size(width, height);
        }
    }
}

fn draw_board(session: &Session) {
    let grid = session.grid();
    let cell = grid.cell_size_px() as f32;
    let (w, h) = grid.pixel_extent();
    let (w, h) = (w as f32, h as f32);

    draw_rectangle(MARGIN, MARGIN, w, h, WHITE);
    for x in 0..=grid.width() {
        let sx = MARGIN + x as f32 * cell;
        draw_line(sx, MARGIN, sx, MARGIN + h, 1.0, GRID_LINE);
    }
    for y in 0..=grid.height() {
        let sy = MARGIN + y as f32 * cell;
        draw_line(MARGIN, sy, MARGIN + w, sy, 1.0, GRID_LINE);
    }
}

fn fill_cell(grid: &GridConfig, cell: CellCoord, color: Color) {
    let corner = to_screen(grid.cell_origin_pixel(cell));
    let size = grid.cell_size_px() as f32;
    draw_rectangle(corner.x, corner.y, size, size, color);
}

fn draw_aoe(session: &Session) {
    let Some(footprint) = session.aoe_footprint() else {
        return;
    };
    let grid = session.grid();
    for cell in footprint.distinct_cells() {
        fill_cell(grid, cell, AOE_FILL);
    }
    if let Some(origin) = session.aoe_origin() {
        let c = to_screen(grid.cell_center_pixel(origin));
        draw_circle(c.x, c.y, 4.0, AOE_ORIGIN);
        if !footprint.is_empty() {
            draw_text(
                &footprint.label(session.unit()),
                c.x + 8.0,
                c.y - 8.0,
                TEXT_SIZE,
                BLACK,
            );
        }
    }
}

fn draw_token_at(name: &str, top_left: Vec2, side: f32, color: Color) {
    draw_rectangle(top_left.x + 2.0, top_left.y + 2.0, side - 4.0, side - 4.0, color);
    draw_rectangle_lines(top_left.x + 2.0, top_left.y + 2.0, side - 4.0, side - 4.0, 2.0, DARKBLUE);
    let initial: String = name.chars().take(2).collect();
    draw_text(&initial, top_left.x + 6.0, top_left.y + side / 2.0 + 6.0, TEXT_SIZE, WHITE);
}

fn draw_tokens(session: &Session) {
    let grid = session.grid();
    let cell = grid.cell_size_px() as f32;
    for token in session.tokens() {
        let corner = to_screen(grid.cell_origin_pixel(token.position));
        draw_token_at(&token.name, corner, token.size as f32 * cell, TOKEN_FILL);
    }

    if let Some((token, top_left, preview)) = session.drag() {
        let side = token.size as f32 * cell;
        draw_token_at(&token.name, to_screen(top_left), side, DRAG_GHOST);

        let m = &preview.measurement;
        let (a, b) = (to_screen(m.start), to_screen(m.end));
        draw_line(a.x, a.y, b.x, b.y, 2.0, DARKGREEN);
        draw_text(
            &format!("{} -> {}  {}", preview.from, preview.to, m.label(session.unit())),
            b.x + 10.0,
            b.y,
            TEXT_SIZE,
            BLACK,
        );
    }
}

fn draw_measurement(session: &Session) {
    match session.measure_phase() {
        MeasurePhase::Idle => {}
        MeasurePhase::Anchored(start) => {
            let s = to_screen(start);
            draw_circle(s.x, s.y, 5.0, MAROON);
        }
        MeasurePhase::Complete(m) => {
            let (a, b) = (to_screen(m.start), to_screen(m.end));
            draw_circle(a.x, a.y, 5.0, MAROON);
            draw_circle(b.x, b.y, 5.0, MAROON);
            draw_line(a.x, a.y, b.x, b.y, 3.0, MAROON);
            let mid = (a + b) / 2.0;
            draw_text(&m.label(session.unit()), mid.x + 6.0, mid.y - 6.0, TEXT_SIZE + 4.0, BLACK);
        }
    }
}

fn draw_panel(session: &Session) {
    let (w, _) = session.grid().pixel_extent();
    let x = MARGIN * 2.0 + w as f32;
    let mut y = MARGIN + TEXT_SIZE;
    let mut line = |text: &str, color: Color| {
        draw_text(text, x, y, TEXT_SIZE, color);
        y += LINE_HEIGHT;
    };

    line(&format!("{}", session.grid()), DARKGRAY);
    line(&format!("Tool: {}", session.tool().name()), BLACK);
    line(
        &format!("Area: {} size {}", session.aoe_shape(), session.aoe_size()),
        BLACK,
    );
    line("", BLACK);

    line(&format!("Dice: {}", session.dice()), BLACK);
    if let Some(roll) = session.last_roll() {
        line(&format!("{}", roll), DARKGREEN);
    }
    line("", BLACK);

    line("Initiative", BLACK);
    let tracker = session.initiative();
    for (i, c) in tracker.entries().iter().enumerate() {
        let marker = if i == tracker.current_index() { ">" } else { " " };
        let color = if i == tracker.current_index() { MAROON } else { BLACK };
        line(&format!("{} {:>3}  {}", marker, c.initiative, c.name), color);
    }
    line("", BLACK);

    for help in [
        "S select  M measure  A area",
        "Q/W/E/R shape  +/- size",
        "1-6 add die  Space roll  C clear",
        "I roll init  O order  N next",
        "PgUp/PgDn move  Z reset  T token",
        "Del remove token under pointer",
        "Arrows size  [ ] cell px  , . scale",
    ] {
        line(help, GRAY);
    }
}
