//! Key mapping from terminal events to session actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something a key can ask the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Down,
    Rotate,
    Hold,
    Quit,
}

impl Action {
    /// Index into the held-key table; `Quit` is not held
    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            Action::Left => Some(0),
            Action::Right => Some(1),
            Action::Down => Some(2),
            Action::Rotate => Some(3),
            Action::Hold => Some(4),
            Action::Quit => None,
        }
    }
}

/// Map a key event to an action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if should_quit(key) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::Right),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Action::Down),

        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Action::Rotate),

        KeyCode::Up | KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Hold),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Action::Left));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Action::Right));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(Action::Down));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('h'))), Some(Action::Left));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('L'))), Some(Action::Right));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('j'))), Some(Action::Down));
    }

    #[test]
    fn test_rotate_and_hold_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), Some(Action::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('K'))), Some(Action::Rotate));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('w'))), Some(Action::Rotate));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Action::Hold));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('c'))), Some(Action::Hold));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));

        // Ctrl-C quits even though plain 'c' is hold.
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), None);
    }
}
