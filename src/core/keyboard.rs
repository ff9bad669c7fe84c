use std::collections::HashSet;

/// Logical input key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyR,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Space,
    Shift,
    Control,
    Escape,
}

/// Tracks which logical keys are held and supports edge-triggered queries.
///
/// Auto-repeat key events must be filtered before they reach this type;
/// the winit adapter drops them.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: HashSet<Key>,
    consumed: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn set_up(&mut self, key: Key) {
        self.down.remove(&key);
        self.consumed.remove(&key);
    }

    /// True iff the key's last reported state was "down". Unknown keys read as up.
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// True at most once per down-transition, no matter how often it is polled
    /// while the key stays held.
    pub fn is_down_once(&mut self, key: Key) -> bool {
        if !self.down.contains(&key) || self.consumed.contains(&key) {
            return false;
        }
        self.consumed.insert(key);
        true
    }
}
