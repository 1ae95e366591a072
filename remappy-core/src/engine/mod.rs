//! remappy runtime - layer state and event dispatch
//!
//! This module turns incoming key events into output events according to
//! compiled per-layer action tables.

mod dispatcher;
mod input;
mod layer;
mod output;

pub use dispatcher::{Dispatcher, DispatchPolicy, Outcome, RunStats};
pub use input::{KeyEvent, KeyState};
pub use layer::LayerState;
pub use output::{OutputEvent, OutputSink};

// Re-export error types
pub use crate::error::{Error, Result};
