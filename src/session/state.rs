use crate::SPRINT_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
    GameOverPending,
    LeaderboardEntry,
    LeaderboardDisplay,
    Exited,
}

/// A flag that goes from false to true once and stays there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch(bool);

impl Latch {
    /// Returns true only on the call that flips the latch.
    pub fn set(&mut self) -> bool {
        let fresh = !self.0;
        self.0 = true;
        fresh
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

/// Remembers the last level seen and reports each change once.
#[derive(Debug, Clone, Copy)]
pub struct LevelWatch {
    last: u32,
}

impl LevelWatch {
    pub fn new(level: u32) -> Self {
        Self { last: level }
    }

    pub fn observe(&mut self, level: u32) -> Option<u32> {
        if level == self.last {
            return None;
        }
        self.last = level;
        Some(level)
    }
}

/// Sprint clock, counted down in drop ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn sprint() -> Self {
        Self {
            remaining: SPRINT_SECONDS,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Counts one tick. Returns true once the clock has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    pub fn label(&self) -> String {
        let secs = self.remaining();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
