//! Key mapping from terminal events to the gamepad model.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Logical pad controls: four stick directions, two rotate buttons, two
/// confirm buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadKey {
    Left,
    Right,
    Up,
    Down,
    TurnRight,
    TurnLeft,
    Confirm1,
    Confirm2,
}

/// Map a key code onto a pad control.
pub fn pad_key(code: KeyCode) -> Option<PadKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(PadKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(PadKey::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(PadKey::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(PadKey::Down),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(PadKey::TurnRight)
        }
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(PadKey::TurnLeft)
        }
        KeyCode::Enter => Some(PadKey::Confirm1),
        KeyCode::Char(' ') => Some(PadKey::Confirm2),
        _ => None,
    }
}

/// Check if a key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if a key toggles pause.
pub fn is_pause_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('p') | KeyCode::Char('P'))
}
