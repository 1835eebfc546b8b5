/// Translates crossterm key events into one `InputSnapshot` per tick.
///
/// Keyboard-enhancement terminals (kitty protocol) report releases, so keys
/// drop out as soon as they are let go.  Classic terminals only repeat
/// presses; there a key counts as held while its last press or repeat is at
/// most `HOLD_WINDOW` frames old.
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use triangle_adventure::entities::Direction;
use triangle_adventure::input::{InputSnapshot, Key};

/// 8 frames @ 60 FPS ≈ 133 ms.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char('w' | 'W') => Some(Key::MoveUp),
        KeyCode::Char('s' | 'S') => Some(Key::MoveDown),
        KeyCode::Char('a' | 'A') => Some(Key::MoveLeft),
        KeyCode::Char('d' | 'D') => Some(Key::MoveRight),
        KeyCode::Char('r' | 'R') => Some(Key::Restart),
        KeyCode::Up => Some(Key::Fire(Direction::Up)),
        KeyCode::Down => Some(Key::Fire(Direction::Down)),
        KeyCode::Left => Some(Key::Fire(Direction::Left)),
        KeyCode::Right => Some(Key::Fire(Direction::Right)),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<Key, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle(&mut self, event: KeyEvent) -> Option<Command> {
        let KeyEvent { code, kind, modifiers, .. } = event;
        match code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(Command::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Command::Quit);
            }
            _ => {}
        }
        let key = map_key(code)?;
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_frame.insert(key, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key);
            }
        }
        None
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.key_frame
            .iter()
            .filter(|&(_, &last)| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect()
    }
}
