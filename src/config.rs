use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

// Shared game UI/constants.
pub const BOARD_W: usize = 10;
pub const BOARD_H: usize = 20;
pub const CELL_W: usize = 2; // a cell is two terminal columns wide per unit of scale
pub const PLAY_W: usize = BOARD_W * CELL_W + 2; // text view: inner width plus side walls
pub const PLAY_H: usize = BOARD_H + 2; // text view: inner height plus ceiling/floor
pub const PANEL_W: u16 = 12; // score/level/hold column left of the board
// Smallest terminal that fits the panel plus the board at scale 1.
pub const MIN_VIEW_W: u16 = PANEL_W + PLAY_W as u16;
pub const MIN_VIEW_H: u16 = PLAY_H as u16;
pub const GRAPHICAL_FPS: u32 = 50;
pub const TEXT_FPS: u32 = 5;
pub const SPRINT_SECONDS: u32 = 60;
pub const LEADERBOARD_SIZE: usize = 5;
pub const MAX_NAME_LEN: usize = 12;
pub const DATA_DIR_NAME: &str = "tuffy-tetris";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const LOG_FILE: &str = "tuffy-tetris.log";

/// How the board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Graphical,
    Text,
}

impl ViewKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "graphical" | "gfx" => Some(Self::Graphical),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn max_fps(self) -> u32 {
        match self {
            Self::Graphical => GRAPHICAL_FPS,
            Self::Text => TEXT_FPS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub view: ViewKind,
    pub data_dir: PathBuf,
    /// A `TUFFY_TETRIS_VIEW` value that was not understood; reported once logging is up.
    pub rejected_view: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::resolve(|key| env::var_os(key))
    }

    pub fn resolve(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let data_dir = if let Some(explicit) = lookup("TUFFY_TETRIS_DIR") {
            PathBuf::from(explicit)
        } else {
            let mut base = lookup("XDG_DATA_HOME")
                .map(PathBuf::from)
                .or_else(|| {
                    lookup("HOME").map(|home| {
                        let mut p = PathBuf::from(home);
                        p.push(".local");
                        p.push("share");
                        p
                    })
                })
                .unwrap_or_else(|| PathBuf::from("."));
            base.push(DATA_DIR_NAME);
            base
        };

        let raw_view = lookup("TUFFY_TETRIS_VIEW").map(|v| v.to_string_lossy().into_owned());
        let (view, rejected_view) = match raw_view {
            None => (ViewKind::Graphical, None),
            Some(raw) => match ViewKind::parse(&raw) {
                Some(kind) => (kind, None),
                None => (ViewKind::Graphical, Some(raw)),
            },
        };

        Self {
            view,
            data_dir,
            rejected_view,
        }
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join(LEADERBOARD_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}
