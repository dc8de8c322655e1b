//! Key mapping from terminal events to game commands.

use crate::types::{Command, KeyState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a keyboard event to a command.
///
/// Terminal auto-repeat events are dropped. Rotation, start and pause act on
/// the press edge only.
pub fn map_key_event(key: KeyEvent) -> Option<Command> {
    let state = match key.kind {
        KeyEventKind::Press => KeyState::Pressed,
        KeyEventKind::Release => KeyState::Released,
        KeyEventKind::Repeat => return None,
    };
    let pressed = state == KeyState::Pressed;

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::MoveLeft(state)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::MoveRight(state)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::SoftDrop(state)),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => pressed.then_some(Command::Rotate),

        // Session
        KeyCode::Enter => pressed.then_some(Command::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => pressed.then_some(Command::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key_event(press(KeyCode::Left)),
            Some(Command::MoveLeft(KeyState::Pressed))
        );
        assert_eq!(
            map_key_event(release(KeyCode::Right)),
            Some(Command::MoveRight(KeyState::Released))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('s'))),
            Some(Command::SoftDrop(KeyState::Pressed))
        );
        assert_eq!(
            map_key_event(release(KeyCode::Char('J'))),
            Some(Command::SoftDrop(KeyState::Released))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('h'))),
            Some(Command::MoveLeft(KeyState::Pressed))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('D'))),
            Some(Command::MoveRight(KeyState::Pressed))
        );
    }

    #[test]
    fn test_rotation_is_press_only() {
        assert_eq!(map_key_event(press(KeyCode::Up)), Some(Command::Rotate));
        assert_eq!(map_key_event(press(KeyCode::Char('w'))), Some(Command::Rotate));
        assert_eq!(map_key_event(press(KeyCode::Char('K'))), Some(Command::Rotate));
        assert_eq!(map_key_event(release(KeyCode::Up)), None);
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(map_key_event(press(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(map_key_event(press(KeyCode::Char('p'))), Some(Command::Pause));
        assert_eq!(map_key_event(release(KeyCode::Char('p'))), None);
        assert_eq!(map_key_event(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_terminal_repeat_is_dropped() {
        let repeat = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(map_key_event(repeat), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(press(KeyCode::Char('q'))));
        assert!(should_quit(press(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(press(KeyCode::Char('c'))));
        assert!(!should_quit(release(KeyCode::Char('q'))));
    }
}
