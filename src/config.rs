use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{error, info};

use battlemap_geometry::{CellCoord, DEFAULT_UNIT_SUFFIX, GridConfig, Token, spawn_position};
use battlemap_table::{Combatant, InitiativeTracker};

use crate::session::combatant_id;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const CONFIG_PATH_VAR: &str = "BATTLEMAP_CONFIG";

/// Grid controls as typed by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub width: u32,
    pub height: u32,
    pub cell_size_px: f64,
    pub units_per_cell: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings {
            width: 20,
            height: 15,
            cell_size_px: 45.0,
            units_per_cell: 1.5,
        }
    }
}

/// A token placed on the map at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub name: String,
    #[serde(default = "default_token_size")]
    pub size: u32,
    /// Top-left cell; tokens without one spawn at the grid center.
    pub position: Option<CellCoord>,
    #[serde(default)]
    pub initiative: i32,
}

fn default_token_size() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridSettings,
    pub unit_suffix: String,
    pub tokens: Vec<TokenSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            grid: GridSettings::default(),
            unit_suffix: DEFAULT_UNIT_SUFFIX.to_string(),
            tokens: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn grid_config(&self) -> anyhow::Result<GridConfig> {
        let g = &self.grid;
        GridConfig::new(g.width, g.height, g.cell_size_px, g.units_per_cell)
            .context("grid settings")
    }

    pub fn build_tokens(&self, grid: &GridConfig) -> anyhow::Result<Vec<Token>> {
        self.tokens
            .iter()
            .map(|t| {
                let position = t
                    .position
                    .map(|p| grid.clamp_to_grid(p))
                    .unwrap_or_else(|| spawn_position(grid, t.size));
                Token::new(t.name.clone(), position, t.size)
                    .with_context(|| format!("token {:?}", t.name))
            })
            .collect()
    }

    pub fn build_initiative(&self) -> InitiativeTracker {
        InitiativeTracker::with_combatants(
            self.tokens
                .iter()
                .map(|t| Combatant::new(combatant_id(&t.name), t.name.clone(), t.initiative))
                .collect(),
        )
    }
}

/// Loads settings from the TOML file (if present) and `BATTLEMAP__*` variables.
///
/// The file path can be overridden with `BATTLEMAP_CONFIG`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(&path, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("BATTLEMAP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e).with_context(|| format!("read config {}", path));
        }
    };

    let app: AppConfig = settings
        .try_deserialize()
        .with_context(|| format!("parse config {}", path))?;
    info!(
        width = app.grid.width,
        height = app.grid.height,
        tokens = app.tokens.len(),
        "Configuration loaded"
    );
    Ok(app)
}
