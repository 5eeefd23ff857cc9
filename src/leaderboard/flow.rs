use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::leaderboard::LeaderboardEntry;
use crate::session::events::{EventSource, GameEvent};
use crate::session::{GameMode, ModeOutcome};
use crate::ui::screens;
use crate::MAX_NAME_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntry {
    Confirmed(String),
    Aborted,
}

/// Player name as it is typed: letters only, backspace deletes.
#[derive(Debug, Default, Clone)]
pub struct NameBuffer {
    name: String,
}

impl NameBuffer {
    /// Feeds one key. Returns true when the key confirms the name.
    pub fn key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) if c.is_alphabetic() => {
                if self.name.chars().count() < MAX_NAME_LEN {
                    self.name.push(c);
                }
            }
            KeyCode::Backspace => {
                self.name.pop();
            }
            KeyCode::Enter => return true,
            _ => {}
        }
        false
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

pub fn enter_name<B: Backend, S: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    fps: u32,
    score: u64,
) -> Result<NameEntry> {
    let mut buffer = NameBuffer::default();
    loop {
        for event in events.drain()? {
            match event {
                GameEvent::Quit => return Ok(NameEntry::Aborted),
                GameEvent::Key(code) => {
                    if buffer.key(code) {
                        return Ok(NameEntry::Confirmed(buffer.into_name()));
                    }
                }
                GameEvent::DropTick => {}
            }
        }
        terminal.draw(|frame| screens::draw_name_entry(frame, buffer.as_str(), score))?;
        events.pace(fps);
    }
}

pub fn show_leaderboard<B: Backend, S: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut S,
    fps: u32,
    mode: GameMode,
    entries: &[LeaderboardEntry],
) -> Result<ModeOutcome> {
    loop {
        terminal.draw(|frame| screens::draw_leaderboard(frame, mode, entries))?;
        for event in events.drain()? {
            match event {
                GameEvent::Quit => return Ok(ModeOutcome::Quit),
                GameEvent::Key(KeyCode::Enter) => return Ok(ModeOutcome::Finished),
                _ => {}
            }
        }
        events.pace(fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::ScriptedEvents;
    use crate::ui::tests::buffer_text;
    use ratatui::backend::TestBackend;

    fn keys(codes: &[KeyCode]) -> Vec<GameEvent> {
        codes.iter().map(|c| GameEvent::Key(*c)).collect()
    }

    #[test]
    fn backspace_edits_the_name() {
        let mut buffer = NameBuffer::default();
        for code in [KeyCode::Char('A'), KeyCode::Char('B'), KeyCode::Backspace, KeyCode::Char('C')] {
            assert!(!buffer.key(code));
        }
        assert!(buffer.key(KeyCode::Enter));
        assert_eq!(buffer.into_name(), "AC");
    }

    #[test]
    fn non_letters_are_ignored_and_length_is_capped() {
        let mut buffer = NameBuffer::default();
        for c in "R2-D2".chars() {
            buffer.key(KeyCode::Char(c));
        }
        assert_eq!(buffer.as_str(), "RD");
        for _ in 0..30 {
            buffer.key(KeyCode::Char('z'));
        }
        assert_eq!(buffer.as_str().len(), MAX_NAME_LEN);

        let mut empty = NameBuffer::default();
        empty.key(KeyCode::Backspace);
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    fn name_entry_collects_across_batches() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut events = ScriptedEvents::new(vec![
            keys(&[KeyCode::Char('A'), KeyCode::Char('B')]),
            vec![GameEvent::DropTick],
            keys(&[KeyCode::Backspace, KeyCode::Char('C'), KeyCode::Enter]),
        ]);
        let entry = enter_name(&mut terminal, &mut events, 50, 10).unwrap();
        assert_eq!(entry, NameEntry::Confirmed("AC".to_string()));
        assert!(buffer_text(terminal.backend().buffer()).contains("> AB_"));
    }

    #[test]
    fn empty_name_and_quit() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut events = ScriptedEvents::new(vec![keys(&[KeyCode::Enter])]);
        assert_eq!(
            enter_name(&mut terminal, &mut events, 50, 0).unwrap(),
            NameEntry::Confirmed(String::new())
        );

        let mut events = ScriptedEvents::new(vec![keys(&[KeyCode::Char('X')]), vec![GameEvent::Quit]]);
        assert_eq!(enter_name(&mut terminal, &mut events, 50, 0).unwrap(), NameEntry::Aborted);
    }

    #[test]
    fn leaderboard_waits_for_enter() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let entries = vec![LeaderboardEntry::new("AC", 700)];
        let mut events = ScriptedEvents::new(vec![
            keys(&[KeyCode::Char('x')]),
            vec![GameEvent::DropTick],
            keys(&[KeyCode::Enter]),
        ]);
        let outcome = show_leaderboard(&mut terminal, &mut events, 50, GameMode::Sprint, &entries).unwrap();
        assert_eq!(outcome, ModeOutcome::Finished);
        assert_eq!(events.drains(), 3);
        assert!(buffer_text(terminal.backend().buffer()).contains("1. AC  700"));

        let mut events = ScriptedEvents::new(vec![vec![GameEvent::Quit]]);
        let outcome = show_leaderboard(&mut terminal, &mut events, 50, GameMode::Sprint, &entries).unwrap();
        assert_eq!(outcome, ModeOutcome::Quit);
    }
}
