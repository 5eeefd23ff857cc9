use std::io::{stdout, Stdout};

use anyhow::Result;
use crossterm::event::KeyCode;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, info};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use crate::config::Settings;
use crate::game::Game;
use crate::leaderboard::LeaderboardStore;
use crate::session::events::{EventSource, GameEvent, TerminalEvents};
use crate::session::{run_mode, GameMode, ModeOutcome};
use crate::ui::{screens, Renderer};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(settings: &Settings) -> Result<()> {
    let mut store = LeaderboardStore::open(settings.leaderboard_path());
    info!(
        "leaderboards from {}: {} survival, {} sprint",
        settings.leaderboard_path().display(),
        store.entries(GameMode::Survival).len(),
        store.entries(GameMode::Sprint).len()
    );
    let mut renderer = Renderer::new(settings.view);
    let mut events = TerminalEvents::new();

    let mut tui = TuiGuard::new()?;
    let result = run_menu(tui.terminal_mut(), &mut events, &mut renderer, &mut store);
    info!("exiting");
    result
}

/// Menu loop: pick a mode, play it, come back. Returns when the player quits.
pub fn run_menu<B: Backend, S: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    renderer: &mut Renderer,
    store: &mut LeaderboardStore,
) -> Result<()> {
    loop {
        let Some(mode) = choose_mode(terminal, events, renderer.max_fps())? else {
            return Ok(());
        };
        let report = run_mode(terminal, events, renderer, store, mode, Game::new())?;
        debug!("{} transitions: {:?}", mode.label(), report.transitions);
        if report.outcome == ModeOutcome::Quit {
            return Ok(());
        }
    }
}

fn choose_mode<B: Backend, S: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    fps: u32,
) -> Result<Option<GameMode>> {
    loop {
        terminal.draw(|frame| screens::draw_menu(frame))?;
        for event in events.drain()? {
            match event {
                GameEvent::Quit => return Ok(None),
                GameEvent::Key(KeyCode::Char('1')) => return Ok(Some(GameMode::Survival)),
                GameEvent::Key(KeyCode::Char('2')) => return Ok(Some(GameMode::Sprint)),
                _ => {}
            }
        }
        events.pace(fps);
    }
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::ScriptedEvents;
    use crate::ui::tests::buffer_text;
    use crate::ViewKind;
    use ratatui::backend::TestBackend;

    fn rig() -> (Terminal<TestBackend>, Renderer, LeaderboardStore) {
        (
            Terminal::new(TestBackend::new(80, 24)).unwrap(),
            Renderer::new(ViewKind::Graphical),
            LeaderboardStore::in_memory(),
        )
    }

    #[test]
    fn menu_ignores_other_keys_and_quits() {
        let (mut terminal, mut renderer, mut store) = rig();
        let mut events = ScriptedEvents::new(vec![
            vec![GameEvent::Key(KeyCode::Char('x'))],
            vec![GameEvent::Quit],
        ]);
        run_menu(&mut terminal, &mut events, &mut renderer, &mut store).unwrap();
        assert_eq!(events.drains(), 2);
        assert!(buffer_text(terminal.backend().buffer()).contains("[2] Sprint"));
    }

    #[test]
    fn survival_game_with_real_board_returns_to_menu() {
        let (mut terminal, mut renderer, mut store) = rig();
        // Every spawn lands in columns 3..=6, so stacking hard drops overflows
        // within twenty pieces without clearing a line.
        let slams = vec![GameEvent::Key(KeyCode::Char(' ')); 40];
        let mut events = ScriptedEvents::new(vec![
            vec![GameEvent::Key(KeyCode::Char('1'))],
            slams,
            vec![GameEvent::Key(KeyCode::Char('Z')), GameEvent::Key(KeyCode::Enter)],
            vec![GameEvent::Key(KeyCode::Enter)],
            vec![GameEvent::Quit],
        ]);

        run_menu(&mut terminal, &mut events, &mut renderer, &mut store).unwrap();

        let board = store.entries(GameMode::Survival);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].name, "Z");
        assert_eq!(board[0].score, 0);
        assert!(buffer_text(terminal.backend().buffer()).contains("TUFFY TETRIS"));
    }

    #[test]
    fn quitting_a_mode_leaves_the_menu() {
        let (mut terminal, mut renderer, mut store) = rig();
        let mut events = ScriptedEvents::new(vec![
            vec![GameEvent::Key(KeyCode::Char('2'))],
            vec![GameEvent::DropTick],
            vec![GameEvent::Quit],
            vec![GameEvent::Key(KeyCode::Char('1'))],
        ]);
        run_menu(&mut terminal, &mut events, &mut renderer, &mut store).unwrap();
        assert_eq!(events.remaining(), 1);
        assert!(store.entries(GameMode::Sprint).is_empty());
    }
}
