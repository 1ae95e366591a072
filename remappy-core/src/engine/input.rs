//! Input representation for the dispatcher

use std::time::SystemTime;

use crate::types::KeyCode;

/// Key state as reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Released,
    Pressed,
    Repeated,
}

impl KeyState {
    /// Convert a raw key-state value (0 up, 1 down, 2 autorepeat)
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(KeyState::Released),
            1 => Some(KeyState::Pressed),
            2 => Some(KeyState::Repeated),
            _ => None,
        }
    }

    pub fn value(self) -> i32 {
        match self {
            KeyState::Released => 0,
            KeyState::Pressed => 1,
            KeyState::Repeated => 2,
        }
    }
}

/// A raw key event read from an input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub state: KeyState,
    pub timestamp: SystemTime,
}

impl KeyEvent {
    pub fn new(code: KeyCode, state: KeyState, timestamp: SystemTime) -> Self {
        Self { code, state, timestamp }
    }

    /// Creates a press event stamped with the current time
    pub fn pressed(code: KeyCode) -> Self {
        Self::new(code, KeyState::Pressed, SystemTime::now())
    }

    pub fn released(code: KeyCode) -> Self {
        Self::new(code, KeyState::Released, SystemTime::now())
    }

    pub fn repeated(code: KeyCode) -> Self {
        Self::new(code, KeyState::Repeated, SystemTime::now())
    }

    pub fn is_press(&self) -> bool {
        self.state == KeyState::Pressed
    }
}
