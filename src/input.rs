//! Key mapping for the game screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use numcrunch::round::types::Operator;
use numcrunch::SessionInput;

/// Result of translating a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Forward to the session.
    Game(SessionInput),
    /// Toggle the help overlay.
    ToggleHelp,
    Quit,
    Ignored,
}

pub fn map_key(key: KeyEvent) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Ignored;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let slot = c as usize - '1' as usize;
            InputResult::Game(SessionInput::SelectNumber(slot))
        }
        KeyCode::Enter | KeyCode::Char('=') => InputResult::Game(SessionInput::Submit),
        KeyCode::Backspace | KeyCode::Char('c') | KeyCode::Char('C') => {
            InputResult::Game(SessionInput::Clear)
        }
        KeyCode::Char('n') | KeyCode::Char('N') => InputResult::Game(SessionInput::NewRound),
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => InputResult::ToggleHelp,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => InputResult::Quit,
        KeyCode::Char(c) => Operator::from_symbol(c)
            .map(|op| InputResult::Game(SessionInput::Operator(op)))
            .unwrap_or(InputResult::Ignored),
        _ => InputResult::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> InputResult {
        map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_digits_select_slots() {
        assert_eq!(
            press(KeyCode::Char('1')),
            InputResult::Game(SessionInput::SelectNumber(0))
        );
        assert_eq!(
            press(KeyCode::Char('6')),
            InputResult::Game(SessionInput::SelectNumber(5))
        );
        assert_eq!(press(KeyCode::Char('0')), InputResult::Ignored);
    }

    #[test]
    fn test_operator_keys() {
        assert_eq!(
            press(KeyCode::Char('+')),
            InputResult::Game(SessionInput::Operator(Operator::Add))
        );
        assert_eq!(
            press(KeyCode::Char('x')),
            InputResult::Game(SessionInput::Operator(Operator::Multiply))
        );
        assert_eq!(
            press(KeyCode::Char('/')),
            InputResult::Game(SessionInput::Operator(Operator::Divide))
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Enter), InputResult::Game(SessionInput::Submit));
        assert_eq!(press(KeyCode::Backspace), InputResult::Game(SessionInput::Clear));
        assert_eq!(press(KeyCode::Char('n')), InputResult::Game(SessionInput::NewRound));
        assert_eq!(press(KeyCode::Char('?')), InputResult::ToggleHelp);
        assert_eq!(press(KeyCode::Esc), InputResult::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputResult::Quit
        );
    }

    #[test]
    fn test_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), InputResult::Ignored);
    }
}
