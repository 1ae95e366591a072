//! Linux backend for remappy
//!
//! Reads key events from evdev devices, replays compiled actions on a uinput
//! virtual keyboard and drives the interactive capture prompts.

pub mod device;
pub mod prompt;
pub mod runtime;
pub mod sink;

pub use device::{find_by_name, list_devices, DeviceInfo, InputDevice};
pub use prompt::{format_device_table, TerminalPrompt};
pub use runtime::{install_signal_handlers, EventLoop, LoopControl};
pub use sink::UinputSink;
