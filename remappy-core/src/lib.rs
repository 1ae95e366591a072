pub mod types;
pub mod error;
pub mod config;
pub mod engine;

pub use types::*;

// Re-export commonly used types
pub use types::action::{ActionTable, ActionTables, BindingKind, BindingSource, CompiledAction, Direction, LayerControl, PrimitiveOp};
pub use types::errors::CompileError;
pub use types::keys::{KeyCode, ModifierSet};
pub use error::{Error, Result};
pub use config::{Binding, Configuration, ConfigStore};
pub use engine::{Dispatcher, DispatchPolicy, KeyEvent, KeyState, LayerState, OutputEvent, OutputSink};
