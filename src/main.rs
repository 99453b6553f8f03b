mod config;
mod graphics;
mod session;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::graphics::window_conf;
use crate::session::Session;

fn build_session() -> anyhow::Result<Session> {
    let app = config::load_config()?;
    let grid = app.grid_config()?;
    let tokens = app.build_tokens(&grid).context("place tokens")?;
    let initiative = app.build_initiative();
    Ok(Session::new(grid, app.unit_suffix, tokens, initiative))
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Battle map starting");

    let session = match build_session() {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start battle map: {:?}", e);
            return;
        }
    };

    graphics::run(session).await;
}
