//! Configuration model: the persisted set of bindings
//!
//! The configuration is the single source of truth for the remapper. Action
//! tables are derived from it by the compiler and never written back.

mod binding;
mod capture;
mod storage;

pub use binding::{Binding, Configuration};
pub use capture::{capture, CapturePrompt};
pub use storage::{ConfigStore, DEFAULT_CONFIG_PATH};
