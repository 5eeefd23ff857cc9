use crossterm::event::KeyCode;

use crate::game::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateClockwise,
    RotateCounterClockwise,
    HardDrop,
    Hold,
    TogglePause,
}

pub fn command_for(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::RotateClockwise,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Command::RotateCounterClockwise,
            's' => Command::RotateClockwise,
            'h' => Command::Hold,
            'p' => Command::TogglePause,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

/// Applies the key to the board. Returns the command for callers that
/// need to react (pause); `None` for unmapped keys.
pub fn dispatch<E: Engine>(engine: &mut E, code: KeyCode) -> Option<Command> {
    let command = command_for(code)?;
    match command {
        Command::MoveLeft => {
            let _ = engine.move_piece(-1, 0);
        }
        Command::MoveRight => {
            let _ = engine.move_piece(1, 0);
        }
        Command::SoftDrop => {
            let _ = engine.move_piece(0, 1);
        }
        Command::RotateClockwise => {
            let _ = engine.rotate_piece(true);
        }
        Command::RotateCounterClockwise => {
            let _ = engine.rotate_piece(false);
        }
        Command::HardDrop => engine.full_drop_piece(),
        Command::Hold => engine.hold_piece(),
        Command::TogglePause => {}
    }
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::RecordingEngine;

    #[test]
    fn keys_map_to_board_calls() {
        let mut engine = RecordingEngine::default();
        for code in [
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Down,
            KeyCode::Up,
            KeyCode::Char('a'),
            KeyCode::Char('S'),
            KeyCode::Char(' '),
            KeyCode::Char('h'),
        ] {
            assert!(dispatch(&mut engine, code).is_some());
        }
        assert_eq!(
            engine.calls,
            vec![
                "move(-1,0)",
                "move(1,0)",
                "move(0,1)",
                "rotate(cw)",
                "rotate(ccw)",
                "rotate(cw)",
                "full_drop",
                "hold",
            ]
        );
    }

    #[test]
    fn pause_and_unmapped_keys_leave_board_alone() {
        let mut engine = RecordingEngine::default();
        assert_eq!(dispatch(&mut engine, KeyCode::Char('p')), Some(Command::TogglePause));
        assert_eq!(dispatch(&mut engine, KeyCode::Char('P')), Some(Command::TogglePause));
        assert_eq!(dispatch(&mut engine, KeyCode::Char('z')), None);
        assert_eq!(dispatch(&mut engine, KeyCode::Tab), None);
        assert!(engine.calls.is_empty());
    }
}
