pub mod events;
pub mod input;
pub mod speed;
pub mod state;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use anyhow::Result;
use log::{debug, info, warn};
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::game::Engine;
use crate::leaderboard::flow::{self, NameEntry};
use crate::leaderboard::{LeaderboardEntry, LeaderboardStore};
use crate::ui::{Renderer, Scene};
use events::{EventSource, GameEvent};
use input::Command;
use speed::speed;
use state::{Countdown, Latch, LevelWatch, LoopState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Survival,
    /// Timed run that ends after sixty drop ticks.
    Sprint,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Survival => "SURVIVAL",
            GameMode::Sprint => "SPRINT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeOutcome {
    /// Leaderboard dismissed; back to the menu.
    Finished,
    /// Quit requested; the process should exit.
    Quit,
}

/// What the loop has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Pause,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeReport {
    pub outcome: ModeOutcome,
    pub transitions: Vec<LoopState>,
}

/// One mode invocation: the board plus the loop-local clocks and flags.
pub struct Session<E: Engine> {
    mode: GameMode,
    engine: E,
    state: LoopState,
    transitions: Vec<LoopState>,
    game_over: Latch,
    countdown: Option<Countdown>,
    levels: LevelWatch,
    drop_interval: Duration,
}

impl<E: Engine> Session<E> {
    pub fn new(mode: GameMode, mut engine: E) -> Self {
        engine.generate_piece();
        let level = engine.level();
        Self {
            mode,
            engine,
            state: LoopState::Running,
            transitions: vec![LoopState::Running],
            game_over: Latch::default(),
            countdown: match mode {
                GameMode::Sprint => Some(Countdown::sprint()),
                GameMode::Survival => None,
            },
            levels: LevelWatch::new(level),
            drop_interval: speed(level),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    pub fn score(&self) -> u64 {
        self.engine.score()
    }

    fn enter(&mut self, state: LoopState) {
        if self.state != state {
            debug!("{}: {:?} -> {:?}", self.mode.label(), self.state, state);
            self.state = state;
            self.transitions.push(state);
        }
    }

    pub fn handle(&mut self, event: GameEvent) -> Control {
        match event {
            GameEvent::Quit => {
                self.enter(LoopState::Exited);
                Control::Quit
            }
            GameEvent::Key(code) => match input::dispatch(&mut self.engine, code) {
                Some(Command::TogglePause) => Control::Pause,
                _ => Control::Continue,
            },
            GameEvent::DropTick => {
                self.drop_tick();
                Control::Continue
            }
        }
    }

    fn drop_tick(&mut self) {
        if let Some(clock) = self.countdown.as_mut() {
            if clock.tick() {
                info!("sprint clock ran out");
                self.latch_game_over();
                return;
            }
        }
        self.engine.drop_piece();
    }

    /// Compares the board level with the last one seen. On a change, returns
    /// the new drop interval the timer must be re-armed with.
    pub fn poll_level_up(&mut self) -> Option<Duration> {
        let level = self.levels.observe(self.engine.level())?;
        self.drop_interval = speed(level);
        info!("level {level}: drop interval {:?}", self.drop_interval);
        Some(self.drop_interval)
    }

    /// Latches the board's terminal flag.
    pub fn check_board(&mut self) {
        if self.engine.is_game_over() {
            self.latch_game_over();
        }
    }

    fn latch_game_over(&mut self) {
        if self.game_over.set() {
            info!("{} game over at score {}", self.mode.label(), self.engine.score());
            self.enter(LoopState::GameOverPending);
        }
    }

    pub fn scene(&self) -> Scene {
        Scene {
            snapshot: self.engine.snapshot(),
            game_over: self.game_over.is_set(),
            paused: self.state == LoopState::Paused,
            countdown: self.countdown.map(|clock| clock.label()),
        }
    }
}

/// Runs one game of `mode` to completion: play, name entry, leaderboard.
pub fn run_mode<B, S, E>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    renderer: &mut Renderer,
    store: &mut LeaderboardStore,
    mode: GameMode,
    engine: E,
) -> Result<ModeReport>
where
    B: Backend,
    S: EventSource,
    E: Engine,
{
    let mut session = Session::new(mode, engine);
    info!("starting {} mode", mode.label());
    events.set_drop_interval(Some(session.drop_interval()));

    while session.is_running() {
        for event in events.drain()? {
            match session.handle(event) {
                Control::Continue => {}
                Control::Pause => {
                    if !pause(terminal, events, renderer, &mut session)? {
                        return Ok(report(session, ModeOutcome::Quit));
                    }
                }
                Control::Quit => return Ok(report(session, ModeOutcome::Quit)),
            }
            if let Some(interval) = session.poll_level_up() {
                events.set_drop_interval(Some(interval));
            }
            if !session.is_running() {
                break;
            }
        }
        session.check_board();
        renderer.render_frame(terminal, &session.scene())?;
        if session.is_running() {
            events.pace(renderer.max_fps());
        }
    }

    events.set_drop_interval(None);
    let outcome = finish(terminal, events, renderer, store, &mut session)?;
    Ok(report(session, outcome))
}

fn report<E: Engine>(mut session: Session<E>, outcome: ModeOutcome) -> ModeReport {
    session.enter(LoopState::Exited);
    ModeReport {
        outcome,
        transitions: session.transitions,
    }
}

/// Blocks until `p` comes again. Everything else drained meanwhile,
/// drop ticks included, is discarded. Returns false on quit.
fn pause<B, S, E>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    renderer: &mut Renderer,
    session: &mut Session<E>,
) -> Result<bool>
where
    B: Backend,
    S: EventSource,
    E: Engine,
{
    session.enter(LoopState::Paused);
    info!("paused");
    renderer.render_frame(terminal, &session.scene())?;
    loop {
        for event in events.drain()? {
            match event {
                GameEvent::Quit => return Ok(false),
                GameEvent::Key(code) if input::command_for(code) == Some(Command::TogglePause) => {
                    session.enter(LoopState::Running);
                    info!("resumed");
                    return Ok(true);
                }
                _ => {}
            }
        }
        events.pace(renderer.max_fps());
    }
}

fn finish<B, S, E>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    renderer: &mut Renderer,
    store: &mut LeaderboardStore,
    session: &mut Session<E>,
) -> Result<ModeOutcome>
where
    B: Backend,
    S: EventSource,
    E: Engine,
{
    let mode = session.mode;
    let score = session.score();
    let fps = renderer.max_fps();

    session.enter(LoopState::LeaderboardEntry);
    let name = match flow::enter_name(terminal, events, fps, score)? {
        NameEntry::Confirmed(name) => name,
        NameEntry::Aborted => return Ok(ModeOutcome::Quit),
    };

    let board = store.record(mode, LeaderboardEntry::new(name, score));
    if let Err(err) = store.save() {
        warn!("could not save leaderboard: {err}");
    }

    session.enter(LoopState::LeaderboardDisplay);
    flow::show_leaderboard(terminal, events, fps, mode, &board)
}
