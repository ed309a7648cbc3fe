use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => steer(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => steer(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => steer(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => steer(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

fn steer(direction: Direction) -> KeyAction {
    KeyAction::GameAction(Action::Move(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
