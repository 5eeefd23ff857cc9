use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Most ticks one drain may emit. After a longer stall the period restarts.
const MAX_CATCH_UP_TICKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Quit,
    Key(KeyCode),
    DropTick,
}

/// Where the loops get their events from, and how they keep cadence.
pub trait EventSource {
    /// Everything pending right now, in arrival order. Never blocks.
    fn drain(&mut self) -> Result<Vec<GameEvent>>;
    /// Arms the periodic drop tick, restarting its period. `None` disarms it.
    fn set_drop_interval(&mut self, interval: Option<Duration>);
    /// Sleeps out the remainder of the current frame.
    fn pace(&mut self, fps: u32);
}

pub struct TerminalEvents {
    drop_interval: Option<Duration>,
    next_drop: Option<Instant>,
    frame_start: Instant,
}

impl TerminalEvents {
    pub fn new() -> Self {
        Self {
            drop_interval: None,
            next_drop: None,
            frame_start: Instant::now(),
        }
    }

    fn arm(&mut self, interval: Option<Duration>, now: Instant) {
        self.drop_interval = interval;
        self.next_drop = interval.map(|period| now + period);
    }

    /// Drop ticks due at `now`, one per elapsed interval.
    fn due_ticks(&mut self, now: Instant) -> usize {
        let (Some(interval), Some(next)) = (self.drop_interval, self.next_drop.as_mut()) else {
            return 0;
        };
        let mut ticks = 0;
        while *next <= now && ticks < MAX_CATCH_UP_TICKS {
            ticks += 1;
            *next += interval;
        }
        if *next <= now {
            *next = now + interval;
        }
        ticks
    }
}

impl EventSource for TerminalEvents {
    fn drain(&mut self) -> Result<Vec<GameEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                // Releases and auto-repeat are not one-shot presses.
                if key.kind == KeyEventKind::Press {
                    events.push(translate_key(key));
                }
            }
        }

        let ticks = self.due_ticks(Instant::now());
        events.extend(std::iter::repeat(GameEvent::DropTick).take(ticks));
        Ok(events)
    }

    fn set_drop_interval(&mut self, interval: Option<Duration>) {
        self.arm(interval, Instant::now());
    }

    fn pace(&mut self, fps: u32) {
        let frame = Duration::from_secs(1) / fps.max(1);
        let elapsed = self.frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

fn translate_key(key: KeyEvent) -> GameEvent {
    match key.code {
        KeyCode::Esc => GameEvent::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => GameEvent::Quit,
        code => GameEvent::Key(code),
    }
}
