//! Interactive state of one battle map session.
//!
//! Everything the frame loop needs lives here, free of any rendering so it
//! can be driven from tests with synthetic pointer events.

use rand::Rng;
use tracing::{debug, info, warn};

use battlemap_geometry::{
    AoeFootprint, AoeShape, AoeSpec, CellCoord, DragPreview, GridConfig, Measurement, PixelPoint,
    Token, drag_preview, drop_position, measure_pixels, rasterize, spawn_position, token_at,
};
use battlemap_table::{Combatant, DicePool, Die, InitiativeTracker, RollOutcome};

pub const MIN_AOE_SIZE: u32 = 1;
pub const MAX_AOE_SIZE: u32 = 12;

/// Range of the width and height controls, in cells.
pub const GRID_CELLS_RANGE: (i64, i64) = (5, 40);
/// Range of the cell size control, in pixels.
pub const CELL_SIZE_RANGE: (f64, f64) = (30.0, 100.0);

/// Initiative id of the combatant that goes with a token.
pub fn combatant_id(name: &str) -> String {
    name.to_lowercase()
}

/// A step on one of the grid controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridControl {
    Width(i32),
    Height(i32),
    CellSize(f64),
    UnitsPerCell(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Select,
    Measure,
    Aoe,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Measure => "measure",
            Tool::Aoe => "area",
        }
    }
}

/// Progress of a two-click measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurePhase {
    Idle,
    Anchored(PixelPoint),
    Complete(Measurement),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TokenDrag {
    index: usize,
    // Pointer position relative to the token's top-left corner
    grab_dx: f64,
    grab_dy: f64,
    pointer: PixelPoint,
    preview: DragPreview,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AoeTemplate {
    shape: AoeShape,
    size: u32,
    origin: Option<CellCoord>,
    target: Option<CellCoord>,
    aiming: bool,
}

pub struct Session {
    grid: GridConfig,
    unit: String,
    tokens: Vec<Token>,
    tool: Tool,
    measure: MeasurePhase,
    aoe: AoeTemplate,
    drag: Option<TokenDrag>,
    dice: DicePool,
    last_roll: Option<RollOutcome>,
    initiative: InitiativeTracker,
}

impl Session {
    pub fn new(
        grid: GridConfig,
        unit: impl Into<String>,
        tokens: Vec<Token>,
        initiative: InitiativeTracker,
    ) -> Self {
        info!(%grid, tokens = tokens.len(), "Session created");
        Session {
            grid,
            unit: unit.into(),
            tokens,
            tool: Tool::Select,
            measure: MeasurePhase::Idle,
            aoe: AoeTemplate {
                shape: AoeShape::Circle,
                size: 3,
                origin: None,
                target: None,
                aiming: false,
            },
            drag: None,
            dice: DicePool::new(),
            last_roll: None,
            initiative,
        }
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches tools, dropping any half-finished interaction.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }
        debug!(from = self.tool.name(), to = tool.name(), "Tool changed");
        self.tool = tool;
        self.measure = MeasurePhase::Idle;
        self.drag = None;
        self.aoe.origin = None;
        self.aoe.target = None;
        self.aoe.aiming = false;
    }

    /// Replaces the grid wholesale.
    ///
    /// Tokens are pushed back so they lie fully on the new board, and any
    /// measurement, template or drag in progress is dropped.
    pub fn set_grid(&mut self, grid: GridConfig) {
        info!(%grid, "Grid replaced");
        self.grid = grid;
        for token in &mut self.tokens {
            token.position = fit_on_board(&self.grid, token);
        }
        self.measure = MeasurePhase::Idle;
        self.drag = None;
        self.aoe.origin = None;
        self.aoe.target = None;
        self.aoe.aiming = false;
    }

    /// Applies one grid control step, returning true if the grid changed.
    ///
    /// Width, height and cell size are held to their control ranges. Values
    /// the grid refuses (a non-positive scale) are logged and ignored.
    pub fn adjust_grid(&mut self, control: GridControl) -> bool {
        let g = self.grid;
        let (mut width, mut height) = (g.width() as i64, g.height() as i64);
        let (mut cell, mut units) = (g.cell_size_px(), g.units_per_cell());
        let (min_cells, max_cells) = GRID_CELLS_RANGE;
        match control {
            GridControl::Width(d) => width = (width + d as i64).clamp(min_cells, max_cells),
            GridControl::Height(d) => height = (height + d as i64).clamp(min_cells, max_cells),
            GridControl::CellSize(d) => cell = (cell + d).clamp(CELL_SIZE_RANGE.0, CELL_SIZE_RANGE.1),
            GridControl::UnitsPerCell(d) => units += d,
        }

        match GridConfig::new(width as u32, height as u32, cell, units) {
            Ok(grid) if grid != g => {
                self.set_grid(grid);
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!(?control, "Rejected grid change: {}", e);
                false
            }
        }
    }

    pub fn measure_phase(&self) -> MeasurePhase {
        self.measure
    }

    pub fn aoe_shape(&self) -> AoeShape {
        self.aoe.shape
    }

    pub fn aoe_size(&self) -> u32 {
        self.aoe.size
    }

    pub fn set_aoe_shape(&mut self, shape: AoeShape) {
        if self.aoe.shape != shape {
            self.aoe.shape = shape;
            self.aoe.origin = None;
            self.aoe.target = None;
            self.aoe.aiming = false;
        }
    }

    pub fn grow_aoe(&mut self) {
        self.aoe.size = (self.aoe.size + 1).min(MAX_AOE_SIZE);
    }

    pub fn shrink_aoe(&mut self) {
        self.aoe.size = self.aoe.size.saturating_sub(1).max(MIN_AOE_SIZE);
    }

    /// Cell the current area template is anchored on.
    pub fn aoe_origin(&self) -> Option<CellCoord> {
        self.aoe.origin
    }

    /// Footprint of the area template, when one is placed.
    pub fn aoe_footprint(&self) -> Option<AoeFootprint> {
        if self.tool != Tool::Aoe {
            return None;
        }
        let origin = self.aoe.origin?;
        let mut spec = AoeSpec::new(self.aoe.shape, origin, self.aoe.size).ok()?;
        if let Some(target) = self.aoe.target {
            spec = spec.with_target(target);
        }
        Some(rasterize(&spec, &self.grid))
    }

    /// Token being dragged with its current top-left pixel and readout.
    pub fn drag(&self) -> Option<(&Token, PixelPoint, &DragPreview)> {
        let drag = self.drag.as_ref()?;
        let token = self.tokens.get(drag.index)?;
        let top_left = PixelPoint::new(drag.pointer.x - drag.grab_dx, drag.pointer.y - drag.grab_dy);
        Some((token, top_left, &drag.preview))
    }

    pub fn pointer_pressed(&mut self, p: PixelPoint) {
        match self.tool {
            Tool::Select => self.begin_drag(p),
            Tool::Measure => self.measure_click(p),
            Tool::Aoe => {
                if self.aoe.shape.is_directional() {
                    let cell = self.grid.cell_from_pixel(p);
                    if !self.grid.contains(cell) {
                        return;
                    }
                    self.aoe.origin = Some(cell);
                    self.aoe.target = None;
                    self.aoe.aiming = true;
                    debug!(shape = %self.aoe.shape, origin = %cell, "Aiming area");
                }
            }
        }
    }

    pub fn pointer_moved(&mut self, p: PixelPoint) {
        match self.tool {
            Tool::Select => {
                if let Some(drag) = self.drag.as_mut() {
                    if let Some(token) = self.tokens.get(drag.index) {
                        drag.pointer = p;
                        drag.preview = drag_preview(token, p, &self.grid);
                    }
                }
            }
            Tool::Measure => {}
            Tool::Aoe => {
                if self.aoe.shape.is_directional() {
                    if self.aoe.aiming {
                        self.aoe.target = Some(self.grid.cell_from_pixel(p));
                    }
                } else {
                    let cell = self.grid.cell_from_pixel_rounded(p);
                    self.aoe.origin = Some(self.grid.clamp_to_grid(cell));
                }
            }
        }
    }

    pub fn pointer_released(&mut self, p: PixelPoint) {
        match self.tool {
            Tool::Select => self.end_drag(p),
            Tool::Measure => {}
            Tool::Aoe => {
                if self.aoe.aiming {
                    self.aoe.target = Some(self.grid.cell_from_pixel(p));
                    self.aoe.aiming = false;
                }
            }
        }
    }

    fn measure_click(&mut self, p: PixelPoint) {
        let cell = self.grid.cell_from_pixel(p);
        if !self.grid.contains(cell) {
            warn!(cell = %cell, "Measurement click outside the grid");
            return;
        }
        let snapped = self.grid.cell_center_pixel(cell);
        self.measure = match self.measure {
            MeasurePhase::Anchored(start) => {
                let m = measure_pixels(start, snapped, &self.grid);
                debug!(distance = m.distance_world, "Measurement complete");
                MeasurePhase::Complete(m)
            }
            MeasurePhase::Idle | MeasurePhase::Complete(_) => MeasurePhase::Anchored(snapped),
        };
    }

    fn begin_drag(&mut self, p: PixelPoint) {
        let Some(index) = token_at(&self.tokens, self.grid.cell_from_pixel(p)) else {
            return;
        };
        let token = &self.tokens[index];
        let corner = self.grid.cell_origin_pixel(token.position);
        debug!(token = %token.name, "Drag started");
        self.drag = Some(TokenDrag {
            index,
            grab_dx: p.x - corner.x,
            grab_dy: p.y - corner.y,
            pointer: p,
            preview: drag_preview(token, p, &self.grid),
        });
    }

    fn end_drag(&mut self, p: PixelPoint) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let top_left = PixelPoint::new(p.x - drag.grab_dx, p.y - drag.grab_dy);
        if let Some(token) = self.tokens.get_mut(drag.index) {
            token.position = drop_position(token, top_left, &self.grid);
        }
    }

    /// Places a new token at the center of the board and adds it to the
    /// initiative order.
    pub fn spawn_token(&mut self, name: impl Into<String>, size: u32) {
        let position = spawn_position(&self.grid, size);
        match Token::new(name, position, size) {
            Ok(token) => {
                info!(token = %token.name, position = %position, "Token spawned");
                self.initiative
                    .add(Combatant::new(combatant_id(&token.name), token.name.clone(), 0));
                self.tokens.push(token);
            }
            Err(e) => warn!("Rejected token: {}", e),
        }
    }

    /// Deletes the token at `index` along with its initiative entry.
    pub fn remove_token(&mut self, index: usize) -> Option<Token> {
        if index >= self.tokens.len() {
            return None;
        }
        self.drag = None;
        let token = self.tokens.remove(index);
        if let Err(e) = self.initiative.remove(&combatant_id(&token.name)) {
            debug!("No initiative entry for removed token: {}", e);
        }
        info!(token = %token.name, "Token removed");
        Some(token)
    }

    /// Deletes the topmost token under `p`.
    pub fn remove_token_at(&mut self, p: PixelPoint) -> Option<Token> {
        let index = token_at(&self.tokens, self.grid.cell_from_pixel(p))?;
        self.remove_token(index)
    }

    pub fn dice(&self) -> &DicePool {
        &self.dice
    }

    pub fn last_roll(&self) -> Option<&RollOutcome> {
        self.last_roll.as_ref()
    }

    pub fn add_die(&mut self, die: Die) {
        self.dice.add(die);
    }

    pub fn clear_dice(&mut self) {
        self.dice.clear();
        self.last_roll = None;
    }

    /// Rolls the pool; an empty pool leaves the previous result in place.
    pub fn roll_dice<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(outcome) = self.dice.roll(rng) {
            info!("Rolled {}", outcome);
            self.last_roll = Some(outcome);
        }
    }

    pub fn initiative(&self) -> &InitiativeTracker {
        &self.initiative
    }

    pub fn next_turn(&mut self) {
        self.initiative.next_turn();
        if let Some(c) = self.initiative.current() {
            info!(combatant = %c.name, "Next turn");
        }
    }

    pub fn order_initiative(&mut self) {
        self.initiative.order_by_initiative();
    }

    /// Rolls a d20 for every combatant and sorts the order.
    pub fn roll_initiative<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let ids: Vec<String> = self.initiative.entries().iter().map(|c| c.id.clone()).collect();
        for id in ids {
            let roll = Die::D20.roll(rng) as i32;
            if let Err(e) = self.initiative.set_initiative(&id, roll) {
                warn!("Initiative roll skipped: {}", e);
            }
        }
        self.initiative.order_by_initiative();
    }

    pub fn reset_initiative(&mut self) {
        self.initiative.reset();
    }

    /// Moves the acting combatant one place up (`-1`) or down (`1`).
    pub fn shift_current(&mut self, delta: isize) {
        let from = self.initiative.current_index();
        let Some(to) = from.checked_add_signed(delta) else {
            return;
        };
        if let Err(e) = self.initiative.move_entry(from, to) {
            debug!("Reorder ignored: {}", e);
        }
    }
}

/// Position of `token` moved just far enough to lie fully on `grid`.
fn fit_on_board(grid: &GridConfig, token: &Token) -> CellCoord {
    let max_x = (grid.width() as i64 - token.size as i64).max(0);
    let max_y = (grid.height() as i64 - token.size as i64).max(0);
    CellCoord::new(
        (token.position.x as i64).clamp(0, max_x) as i32,
        (token.position.y as i64).clamp(0, max_y) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPSILON: f64 = 1e-9;

    fn session() -> Session {
        let grid = GridConfig::new(20, 15, 45.0, 1.5).unwrap();
        let tokens = vec![
            Token::new("Warrior", CellCoord::new(2, 2), 1).unwrap(),
            Token::new("Dragon", CellCoord::new(10, 5), 3).unwrap(),
        ];
        let tracker = InitiativeTracker::with_combatants(vec![
            Combatant::new("warrior", "Warrior", 0),
            Combatant::new("dragon", "Dragon", 0),
        ]);
        Session::new(grid, "ft", tokens, tracker)
    }

    #[test]
    fn test_measure_phases() {
        let mut s = session();
        s.set_tool(Tool::Measure);
        assert_eq!(s.measure_phase(), MeasurePhase::Idle);

        s.pointer_pressed(PixelPoint::new(10.0, 40.0));
        assert_eq!(
            s.measure_phase(),
            MeasurePhase::Anchored(PixelPoint::new(22.5, 22.5))
        );

        // Four cells east of cell (0,0)
        s.pointer_pressed(PixelPoint::new(4.0 * 45.0 + 1.0, 3.0));
        match s.measure_phase() {
            MeasurePhase::Complete(m) => {
                assert!((m.distance_cells - 4.0).abs() < EPSILON);
                assert_eq!(m.label(s.unit()), "6 ft");
            }
            other => panic!("expected complete measurement, got {:?}", other),
        }

        s.pointer_pressed(PixelPoint::new(100.0, 100.0));
        assert!(matches!(s.measure_phase(), MeasurePhase::Anchored(_)));
    }

    #[test]
    fn test_measure_ignores_clicks_off_grid() {
        let mut s = session();
        s.set_tool(Tool::Measure);
        s.pointer_pressed(PixelPoint::new(-5.0, 10.0));
        s.pointer_pressed(PixelPoint::new(20.0 * 45.0 + 1.0, 10.0));
        assert_eq!(s.measure_phase(), MeasurePhase::Idle);
    }

    #[test]
    fn test_circle_follows_pointer_with_rounding() {
        let mut s = session();
        assert!(s.aoe_footprint().is_none());
        s.set_tool(Tool::Aoe);
        s.pointer_moved(PixelPoint::new(5.6 * 45.0, 4.4 * 45.0));
        assert_eq!(s.aoe_origin(), Some(CellCoord::new(6, 4)));

        let fp = s.aoe_footprint().unwrap();
        assert_eq!(fp.shape, AoeShape::Circle);
        assert!(fp.cells.contains(&CellCoord::new(6, 4)));
        assert_eq!(fp.label(s.unit()), "4.5ft radius");
    }

    #[test]
    fn test_line_aims_from_press_to_release() {
        let mut s = session();
        s.set_tool(Tool::Aoe);
        s.set_aoe_shape(AoeShape::Line);

        // Hovering without a press places nothing
        s.pointer_moved(PixelPoint::new(100.0, 100.0));
        assert!(s.aoe_footprint().is_none());

        s.pointer_pressed(PixelPoint::new(10.0, 10.0));
        s.pointer_moved(PixelPoint::new(3.0 * 45.0 + 10.0, 10.0));
        s.pointer_released(PixelPoint::new(3.0 * 45.0 + 10.0, 10.0));
        let fp = s.aoe_footprint().unwrap();
        assert_eq!(
            fp.cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(3, 0)
            ]
        );

        // Template stays after release
        s.pointer_moved(PixelPoint::new(400.0, 400.0));
        assert_eq!(s.aoe_footprint().unwrap().cells.len(), 4);
    }

    #[test]
    fn test_aoe_size_limits() {
        let mut s = session();
        for _ in 0..20 {
            s.shrink_aoe();
        }
        assert_eq!(s.aoe_size(), MIN_AOE_SIZE);
        for _ in 0..20 {
            s.grow_aoe();
        }
        assert_eq!(s.aoe_size(), MAX_AOE_SIZE);
    }

    #[test]
    fn test_token_drag_snaps_on_release() {
        let mut s = session();
        // Grab the warrior near its top-left corner
        s.pointer_pressed(PixelPoint::new(2.0 * 45.0 + 5.0, 2.0 * 45.0 + 5.0));
        s.pointer_moved(PixelPoint::new(6.0 * 45.0 + 30.0, 2.0 * 45.0 + 5.0));

        let (token, top_left, preview) = s.drag().unwrap();
        assert_eq!(token.name, "Warrior");
        assert!((top_left.x - (6.0 * 45.0 + 25.0)).abs() < EPSILON);
        assert_eq!(preview.from, CellCoord::new(2, 2));

        s.pointer_released(PixelPoint::new(6.0 * 45.0 + 30.0, 2.0 * 45.0 + 5.0));
        assert!(s.drag().is_none());
        // 6.55 cells rounds to 7
        assert_eq!(s.tokens()[0].position, CellCoord::new(7, 2));
    }

    #[test]
    fn test_drag_picks_large_token_and_clamps() {
        let mut s = session();
        s.pointer_pressed(PixelPoint::new(12.0 * 45.0 + 1.0, 7.0 * 45.0 + 1.0));
        assert_eq!(s.drag().unwrap().0.name, "Dragon");
        s.pointer_released(PixelPoint::new(5000.0, 5000.0));
        assert_eq!(s.tokens()[1].position, CellCoord::new(19, 14));
    }

    #[test]
    fn test_press_on_empty_cell_does_not_drag() {
        let mut s = session();
        s.pointer_pressed(PixelPoint::new(0.0, 0.0));
        assert!(s.drag().is_none());
        s.pointer_released(PixelPoint::new(100.0, 100.0));
        assert_eq!(s.tokens()[0].position, CellCoord::new(2, 2));
    }

    #[test]
    fn test_tool_switch_clears_interaction() {
        let mut s = session();
        s.set_tool(Tool::Measure);
        s.pointer_pressed(PixelPoint::new(10.0, 10.0));
        s.set_tool(Tool::Aoe);
        s.set_tool(Tool::Measure);
        assert_eq!(s.measure_phase(), MeasurePhase::Idle);
    }

    #[test]
    fn test_spawn_token_at_center() {
        let mut s = session();
        s.spawn_token("Golem", 2);
        assert_eq!(s.tokens()[2].position, CellCoord::new(9, 6));
        s.spawn_token("Ghost", 0);
        assert_eq!(s.tokens().len(), 3);
    }

    #[test]
    fn test_dice_and_initiative() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(3);

        s.roll_dice(&mut rng);
        assert!(s.last_roll().is_none());

        s.add_die(Die::D20);
        s.add_die(Die::D4);
        s.roll_dice(&mut rng);
        let total = s.last_roll().unwrap().total;
        assert!((2..=24).contains(&total));
        s.clear_dice();
        assert!(s.dice().is_empty());
        assert!(s.last_roll().is_none());

        s.roll_initiative(&mut rng);
        let entries = s.initiative().entries();
        assert!(entries[0].initiative >= entries[1].initiative);
        assert!(entries.iter().all(|c| (1..=20).contains(&c.initiative)));

        let first = entries[0].id.clone();
        s.shift_current(1);
        assert_eq!(s.initiative().current().unwrap().id, first);
        assert_eq!(s.initiative().current_index(), 1);
        s.shift_current(1);
        assert_eq!(s.initiative().current_index(), 1);

        s.next_turn();
        assert_eq!(s.initiative().current_index(), 0);
        s.reset_initiative();
        assert!(s.initiative().entries().iter().all(|c| c.initiative == 0));
    }

    #[test]
    fn test_shrinking_grid_keeps_tokens_on_board() {
        let mut s = session();
        s.set_grid(GridConfig::new(8, 6, 45.0, 1.5).unwrap());
        assert_eq!(s.tokens()[0].position, CellCoord::new(2, 2));
        // The 3x3 dragon at (10,5) is pushed back inside
        assert_eq!(s.tokens()[1].position, CellCoord::new(5, 3));

        s.set_grid(GridConfig::new(2, 2, 45.0, 1.5).unwrap());
        assert_eq!(s.tokens()[1].position, CellCoord::new(0, 0));
    }

    #[test]
    fn test_set_grid_drops_interactions() {
        let mut s = session();
        s.set_tool(Tool::Measure);
        s.pointer_pressed(PixelPoint::new(10.0, 10.0));
        s.set_grid(GridConfig::new(10, 10, 60.0, 5.0).unwrap());
        assert_eq!(s.measure_phase(), MeasurePhase::Idle);

        s.set_tool(Tool::Aoe);
        s.pointer_moved(PixelPoint::new(100.0, 100.0));
        assert!(s.aoe_origin().is_some());
        s.set_grid(GridConfig::new(12, 12, 60.0, 5.0).unwrap());
        assert!(s.aoe_origin().is_none());
        assert!(s.aoe_footprint().is_none());

        s.set_tool(Tool::Select);
        s.pointer_pressed(PixelPoint::new(2.0 * 60.0 + 5.0, 2.0 * 60.0 + 5.0));
        assert!(s.drag().is_some());
        s.set_grid(GridConfig::new(12, 12, 45.0, 5.0).unwrap());
        assert!(s.drag().is_none());
        // Releasing after the reset does not move anything
        s.pointer_released(PixelPoint::new(400.0, 400.0));
        assert_eq!(s.tokens()[0].position, CellCoord::new(2, 2));
    }

    #[test]
    fn test_grid_controls() {
        let mut s = session();
        assert!(s.adjust_grid(GridControl::Width(-100)));
        assert_eq!(s.grid().width(), 5);
        assert!(!s.adjust_grid(GridControl::Width(-1)));

        assert!(s.adjust_grid(GridControl::Height(100)));
        assert_eq!(s.grid().height(), 40);

        assert!(s.adjust_grid(GridControl::CellSize(1000.0)));
        assert_eq!(s.grid().cell_size_px(), 100.0);

        assert!(s.adjust_grid(GridControl::UnitsPerCell(0.5)));
        assert_eq!(s.grid().units_per_cell(), 2.0);

        // A zero scale is refused and the grid stays as it was
        let before = *s.grid();
        assert!(!s.adjust_grid(GridControl::UnitsPerCell(-2.0)));
        assert_eq!(*s.grid(), before);

        // The dragon was clamped to the narrow board
        assert_eq!(s.tokens()[1].position, CellCoord::new(2, 5));
    }

    #[test]
    fn test_remove_token_and_initiative_entry() {
        let mut s = session();
        s.spawn_token("Golem", 2);
        assert_eq!(s.initiative().entries().len(), 3);

        let removed = s.remove_token(0).unwrap();
        assert_eq!(removed.name, "Warrior");
        assert_eq!(s.tokens().len(), 2);
        assert!(s.initiative().entries().iter().all(|c| c.id != "warrior"));
        assert!(s.remove_token(5).is_none());

        // The golem sits at (9,6); pick it from its lower-right cell
        let removed = s.remove_token_at(PixelPoint::new(10.0 * 45.0 + 1.0, 7.0 * 45.0 + 1.0));
        assert_eq!(removed.unwrap().name, "Golem");
        assert_eq!(s.initiative().entries().len(), 1);
        assert!(s.remove_token_at(PixelPoint::new(1.0, 1.0)).is_none());
    }
}
