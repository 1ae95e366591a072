//! Output representation for the dispatcher

use std::io;

use super::KeyEvent;
use crate::types::{Direction, KeyCode};

/// What reached an output sink, in submission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    /// Key event with its raw state value (0 up, 1 down, 2 repeat)
    Key { code: KeyCode, value: i32 },
    Sync,
}

impl OutputEvent {
    pub fn down(code: KeyCode) -> Self {
        OutputEvent::Key { code, value: Direction::Down.value() }
    }

    pub fn up(code: KeyCode) -> Self {
        OutputEvent::Key { code, value: Direction::Up.value() }
    }
}

/// Destination for synthetic events. Implementations must preserve
/// submission order.
pub trait OutputSink {
    /// Emit a synthetic key press or release
    fn emit_key(&mut self, code: KeyCode, direction: Direction) -> io::Result<()>;

    /// Forward a raw input event unchanged
    fn emit_raw(&mut self, event: &KeyEvent) -> io::Result<()>;

    /// Emit a synchronization marker
    fn sync(&mut self) -> io::Result<()>;
}

/// Recording sink
impl OutputSink for Vec<OutputEvent> {
    fn emit_key(&mut self, code: KeyCode, direction: Direction) -> io::Result<()> {
        self.push(OutputEvent::Key { code, value: direction.value() });
        Ok(())
    }

    fn emit_raw(&mut self, event: &KeyEvent) -> io::Result<()> {
        self.push(OutputEvent::Key { code: event.code, value: event.state.value() });
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        self.push(OutputEvent::Sync);
        Ok(())
    }
}
