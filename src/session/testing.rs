//! Scripted stand-ins for the terminal and the board.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use crate::game::{Engine, Snapshot};
use crate::session::events::{EventSource, GameEvent};

/// Hands out one scripted batch per `drain`; once the script is used up
/// every drain reports `Quit` so a runaway loop still ends.
pub struct ScriptedEvents {
    batches: VecDeque<Vec<GameEvent>>,
    pub intervals: Vec<Option<Duration>>,
    drains: usize,
}

impl ScriptedEvents {
    pub fn new(batches: Vec<Vec<GameEvent>>) -> Self {
        Self {
            batches: batches.into(),
            intervals: Vec::new(),
            drains: 0,
        }
    }

    pub fn drains(&self) -> usize {
        self.drains
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl EventSource for ScriptedEvents {
    fn drain(&mut self) -> Result<Vec<GameEvent>> {
        self.drains += 1;
        Ok(self.batches.pop_front().unwrap_or_else(|| vec![GameEvent::Quit]))
    }

    fn set_drop_interval(&mut self, interval: Option<Duration>) {
        self.intervals.push(interval);
    }

    fn pace(&mut self, _fps: u32) {}
}

/// Board double that records calls and reports what the test configures.
pub struct RecordingEngine {
    pub calls: Vec<String>,
    pub drops: usize,
    pub game_over: bool,
    /// Report game over once this many gravity drops have happened.
    pub game_over_after_drops: Option<usize>,
    /// `(drops, level)`: switch to `level` once `drops` gravity drops have happened.
    pub level_schedule: Vec<(usize, u32)>,
    pub level: u32,
    pub score: u64,
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            drops: 0,
            game_over: false,
            game_over_after_drops: None,
            level_schedule: Vec::new(),
            level: 1,
            score: 0,
        }
    }
}

impl Engine for RecordingEngine {
    fn generate_piece(&mut self) {
        self.calls.push("generate".to_string());
    }

    fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        self.calls.push(format!("move({dx},{dy})"));
        true
    }

    fn rotate_piece(&mut self, clockwise: bool) -> bool {
        self.calls
            .push(if clockwise { "rotate(cw)" } else { "rotate(ccw)" }.to_string());
        true
    }

    fn drop_piece(&mut self) {
        self.calls.push("drop".to_string());
        self.drops += 1;
        if self.game_over_after_drops.is_some_and(|n| self.drops >= n) {
            self.game_over = true;
        }
        for &(at, level) in &self.level_schedule {
            if self.drops == at {
                self.level = level;
            }
        }
    }

    fn full_drop_piece(&mut self) {
        self.calls.push("full_drop".to_string());
    }

    fn hold_piece(&mut self) {
        self.calls.push("hold".to_string());
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::empty(10, 20);
        snapshot.score = self.score;
        snapshot.level = self.level;
        snapshot
    }
}
