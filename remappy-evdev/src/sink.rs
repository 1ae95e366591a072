use std::io;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};
use log::info;
use remappy_core::{Direction, KeyCode, KeyEvent, OutputSink};

pub const VIRTUAL_DEVICE_NAME: &str = "remappy virtual keyboard";

/// Output sink on a uinput virtual keyboard.
///
/// Events are buffered until [`OutputSink::sync`], which writes the batch
/// followed by one sync report.
pub struct UinputSink {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
}

impl UinputSink {
    /// Create the virtual keyboard able to emit every code in `keys`
    pub fn new(keys: impl IntoIterator<Item = KeyCode>) -> io::Result<Self> {
        let mut supported = AttributeSet::<Key>::new();
        let mut count = 0usize;
        for code in keys {
            supported.insert(Key::new(code.0));
            count += 1;
        }

        let device = VirtualDeviceBuilder::new()?
            .name(VIRTUAL_DEVICE_NAME)
            .with_keys(&supported)?
            .build()?;
        info!("Created {} ({} key codes)", VIRTUAL_DEVICE_NAME, count);

        Ok(Self {
            device,
            pending: Vec::new(),
        })
    }
}

impl OutputSink for UinputSink {
    fn emit_key(&mut self, code: KeyCode, direction: Direction) -> io::Result<()> {
        self.pending.push(key_event(code, direction.value()));
        Ok(())
    }

    fn emit_raw(&mut self, event: &KeyEvent) -> io::Result<()> {
        self.pending.push(key_event(event.code, event.state.value()));
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        // emit() appends the SYN_REPORT itself
        let result = self.device.emit(&self.pending);
        self.pending.clear();
        result
    }
}

fn key_event(code: KeyCode, value: i32) -> InputEvent {
    InputEvent::new(EventType::KEY, code.0, value)
}
