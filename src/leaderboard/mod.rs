pub mod flow;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::GameMode;
use crate::LEADERBOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Highest score first, at most `LEADERBOARD_SIZE` long.
pub type Leaderboard = Vec<LeaderboardEntry>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboards {
    #[serde(default)]
    pub survival: Leaderboard,
    #[serde(default)]
    pub sprint: Leaderboard,
}

impl Leaderboards {
    fn table_mut(&mut self, mode: GameMode) -> &mut Leaderboard {
        match mode {
            GameMode::Survival => &mut self.survival,
            GameMode::Sprint => &mut self.sprint,
        }
    }

    pub fn table(&self, mode: GameMode) -> &[LeaderboardEntry] {
        match mode {
            GameMode::Survival => &self.survival,
            GameMode::Sprint => &self.sprint,
        }
    }

    /// Re-establishes the ranking after loading a hand-edited file.
    fn sanitized(mut self) -> Self {
        for table in [&mut self.survival, &mut self.sprint] {
            table.sort_by(|a, b| b.score.cmp(&a.score));
            table.truncate(LEADERBOARD_SIZE);
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("leaderboard file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Per-mode top tables, optionally backed by a JSON file.
#[derive(Debug)]
pub struct LeaderboardStore {
    path: Option<PathBuf>,
    boards: Leaderboards,
}

impl LeaderboardStore {
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            boards: Leaderboards::default(),
        }
    }

    /// Opens the file at `path`. A missing file starts empty; an unreadable
    /// or corrupt one is logged and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let boards = match load(&path) {
            Ok(Some(boards)) => boards.sanitized(),
            Ok(None) => Leaderboards::default(),
            Err(err) => {
                warn!("{err}; starting with empty leaderboards");
                Leaderboards::default()
            }
        };
        Self {
            path: Some(path),
            boards,
        }
    }

    pub fn entries(&self, mode: GameMode) -> &[LeaderboardEntry] {
        self.boards.table(mode)
    }

    /// Ranks `entry` into the mode's table and returns the updated table.
    /// Ties keep earlier entries ahead.
    pub fn record(&mut self, mode: GameMode, entry: LeaderboardEntry) -> Leaderboard {
        let table = self.boards.table_mut(mode);
        let pos = table
            .iter()
            .position(|existing| existing.score < entry.score)
            .unwrap_or(table.len());
        table.insert(pos, entry);
        table.truncate(LEADERBOARD_SIZE);
        table.clone()
    }

    pub fn save(&self) -> Result<(), LeaderboardError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| LeaderboardError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let text = serde_json::to_string_pretty(&self.boards)?;
        fs::write(path, text).map_err(|source| LeaderboardError::Io {
            path: path.clone(),
            source,
        })
    }
}

fn load(path: &Path) -> Result<Option<Leaderboards>, LeaderboardError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LeaderboardError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| LeaderboardError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
