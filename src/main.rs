use anyhow::Result;
use log::warn;

mod app;
mod config;
mod game;
mod leaderboard;
mod logging;
mod session;
mod ui;

pub use config::{
    Settings, ViewKind, BOARD_H, BOARD_W, CELL_W, LEADERBOARD_SIZE, MAX_NAME_LEN, MIN_VIEW_H,
    MIN_VIEW_W, PANEL_W, SPRINT_SECONDS,
};

fn main() -> Result<()> {
    let settings = Settings::from_env();
    if let Err(err) = logging::init(&settings.log_path()) {
        eprintln!("tuffy-tetris: logging disabled: {err:#}");
    }
    if let Some(raw) = &settings.rejected_view {
        warn!("unknown TUFFY_TETRIS_VIEW {raw:?}, using the graphical view");
    }
    app::run(&settings)
}
