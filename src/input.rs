/// Per-tick keyboard snapshot handed to the world by the frontend.
use std::collections::HashSet;

use crate::entities::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire(Direction),
    Restart,
}

impl Key {
    pub const MOVEMENT: [Key; 4] = [Key::MoveUp, Key::MoveDown, Key::MoveLeft, Key::MoveRight];
}

/// Keys held down during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pressed: HashSet<Key>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    /// True when a movement key held in `previous` is no longer held.
    pub fn released_movement(&self, previous: &InputSnapshot) -> bool {
        Key::MOVEMENT
            .iter()
            .any(|&k| previous.is_pressed(k) && !self.is_pressed(k))
    }
}

impl FromIterator<Key> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self { pressed: iter.into_iter().collect() }
    }
}
