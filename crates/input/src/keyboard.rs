use std::collections::BTreeSet;

use crate::Action;

/// Keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    A,
    D,
    W,
    S,
    Space,
    LeftShift,
    J,
    L,
    I,
    K,
    Q,
}

impl Key {
    pub const ALL: [Key; 11] = [
        Key::A,
        Key::D,
        Key::W,
        Key::S,
        Key::Space,
        Key::LeftShift,
        Key::J,
        Key::L,
        Key::I,
        Key::K,
        Key::Q,
    ];

    /// Parse a single-character key name as used by the CLI.
    /// `' '` is Space and `'^'` is left Shift.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Key::A),
            'D' => Some(Key::D),
            'W' => Some(Key::W),
            'S' => Some(Key::S),
            ' ' => Some(Key::Space),
            '^' => Some(Key::LeftShift),
            'J' => Some(Key::J),
            'L' => Some(Key::L),
            'I' => Some(Key::I),
            'K' => Some(Key::K),
            'Q' => Some(Key::Q),
            _ => None,
        }
    }
}

/// Keys held at one instant. Produced once per frame and passed by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: BTreeSet<Key>,
}

impl InputSnapshot {
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: keys.into_iter().collect(),
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }
}

/// Held-key table fed by window press/release events.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: BTreeSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Pressing `Q` asks the application to quit.
    pub fn handle(&mut self, key: Key, pressed: bool) -> Option<Action> {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
        tracing::trace!(?key, pressed, "key event");

        (key == Key::Q && pressed).then_some(Action::Quit)
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            held: self.held.clone(),
        }
    }
}
