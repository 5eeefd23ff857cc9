pub mod render;
pub mod screens;
pub mod text;

use anyhow::Result;
use log::{log, Level};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::game::Snapshot;
use crate::ViewKind;

pub use render::BoardGeometry;

const LAYOUT_LOG_LEVEL: Level = Level::Info;

/// Everything one game frame shows.
#[derive(Debug, Clone)]
pub struct Scene {
    pub snapshot: Snapshot,
    pub game_over: bool,
    pub paused: bool,
    pub countdown: Option<String>,
}

/// Draws game frames. Built once per process; the layout diagnostics are
/// logged on the first frame only.
pub struct Renderer {
    view: ViewKind,
    layout_logged: bool,
}

impl Renderer {
    pub fn new(view: ViewKind) -> Self {
        Self {
            view,
            layout_logged: false,
        }
    }

    pub fn max_fps(&self) -> u32 {
        self.view.max_fps()
    }

    pub fn render_frame<B: Backend>(&mut self, terminal: &mut Terminal<B>, scene: &Scene) -> Result<()> {
        let view = self.view;
        if view == ViewKind::Text {
            terminal.clear()?;
        }
        let mut geometry = None;
        let mut viewport = Rect::default();
        terminal.draw(|frame| {
            viewport = frame.size();
            geometry = Some(match view {
                ViewKind::Graphical => render::draw_game(frame, scene),
                ViewKind::Text => text::draw_game(frame, scene),
            });
        })?;

        if let Some(geometry) = geometry {
            self.log_layout_once(scene, viewport, geometry);
        }
        Ok(())
    }

    fn log_layout_once(&mut self, scene: &Scene, viewport: Rect, geometry: BoardGeometry) {
        if self.layout_logged {
            return;
        }
        self.layout_logged = true;
        log!(
            LAYOUT_LOG_LEVEL,
            "layout: view={:?} board={}x{} viewport={}x{} scale={} cell={}x{} origin=({}, {})",
            self.view,
            scene.snapshot.width,
            scene.snapshot.height,
            viewport.width,
            viewport.height,
            geometry.scale,
            geometry.cell_w,
            geometry.cell_h,
            geometry.x,
            geometry.y,
        );
    }
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
