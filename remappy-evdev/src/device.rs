use std::fmt;
use std::io::{self, ErrorKind, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use evdev::{Device, InputEventKind};
use log::{debug, warn};
use remappy_core::{Error, KeyCode, KeyEvent, KeyState, Result};

/// Identity of an input device as shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub path: PathBuf,
    pub name: String,
    pub phys: String,
    pub uniq: String,
}

impl DeviceInfo {
    fn from_device(path: PathBuf, device: &Device) -> Self {
        Self {
            path,
            name: device.name().unwrap_or_default().to_string(),
            phys: device.physical_path().unwrap_or_default().to_string(),
            uniq: device.unique_name().unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

/// Every readable input device, ordered by event number
pub fn list_devices() -> Vec<DeviceInfo> {
    let mut devices: Vec<DeviceInfo> = evdev::enumerate()
        .map(|(path, device)| DeviceInfo::from_device(path, &device))
        .collect();
    devices.sort_by(|a, b| {
        let key = |info: &DeviceInfo| (device_number(&info.path).unwrap_or(u32::MAX), info.path.clone());
        key(a).cmp(&key(b))
    });
    devices
}

/// Devices whose name is exactly `name`
pub fn find_by_name(name: &str) -> Vec<DeviceInfo> {
    list_devices().into_iter().filter(|info| info.name == name).collect()
}

/// Trailing number of a device node (`/dev/input/event12` -> 12)
pub fn device_number(path: &Path) -> Option<u32> {
    let file_name = path.file_name()?.to_str()?;
    let digits = file_name.len() - file_name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    file_name[file_name.len() - digits..].parse().ok()
}

/// An opened evdev device. A grab is released when the device is dropped.
pub struct InputDevice {
    info: DeviceInfo,
    device: Device,
    grabbed: bool,
}

impl InputDevice {
    pub fn open(path: &Path) -> Result<Self> {
        let device = Device::open(path)
            .map_err(|e| Error::Device(format!("Failed to open {}: {}", path.display(), e)))?;
        set_nonblocking(device.as_raw_fd())
            .map_err(|e| Error::Device(format!("Failed to make {} non-blocking: {}", path.display(), e)))?;

        let info = DeviceInfo::from_device(path.to_path_buf(), &device);
        debug!("Opened {}", info);
        Ok(Self {
            info,
            device,
            grabbed: false,
        })
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Take exclusive access: other readers stop seeing this device's events
    pub fn grab(&mut self) -> Result<()> {
        if !self.grabbed {
            self.device
                .grab()
                .map_err(|e| Error::Device(format!("Failed to grab {}: {}", self.info, e)))?;
            self.grabbed = true;
            debug!("Grabbed {}", self.info);
        }
        Ok(())
    }

    pub fn ungrab(&mut self) -> Result<()> {
        if self.grabbed {
            self.device
                .ungrab()
                .map_err(|e| Error::Device(format!("Failed to release {}: {}", self.info, e)))?;
            self.grabbed = false;
            debug!("Released {}", self.info);
        }
        Ok(())
    }

    /// Key codes the device reports it can produce
    pub fn supported_key_codes(&self) -> Vec<KeyCode> {
        self.device
            .supported_keys()
            .map(|keys| keys.iter().map(|key| KeyCode(key.code())).collect())
            .unwrap_or_default()
    }

    /// Drain the pending key events without blocking.
    ///
    /// Non-key events (sync, misc scan codes, LEDs) are dropped; the output
    /// side generates its own sync reports.
    pub fn fetch_key_events(&mut self) -> io::Result<Vec<KeyEvent>> {
        let events = match self.device.fetch_events() {
            Ok(events) => events,
            Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        Ok(events
            .filter_map(|event| match event.kind() {
                InputEventKind::Key(key) => KeyState::from_value(event.value())
                    .map(|state| KeyEvent::new(KeyCode(key.code()), state, event.timestamp())),
                _ => None,
            })
            .collect())
    }

    /// Print identity, state and capabilities in the style of `evtest`
    pub fn print_capabilities(&self, out: &mut dyn Write) -> io::Result<()> {
        let id = self.device.input_id();
        writeln!(out, "Device name: {}", self.info.name)?;
        writeln!(
            out,
            "Device info: bus {:?}, vendor {:04x}, product {:04x}, version {:04x}",
            id.bus_type(),
            id.vendor(),
            id.product(),
            id.version()
        )?;
        writeln!(out)?;

        if self.device.supported_leds().is_some() {
            let leds = self.device.get_led_state()?;
            let names: Vec<String> = leds.iter().map(|led| format!("{:?}", led)).collect();
            writeln!(out, "Active LEDs: {}", names.join(","))?;
        }

        let active: Vec<String> = self.device.get_key_state()?.iter().map(|key| format!("{:?}", key)).collect();
        writeln!(out, "Active keys: {}", active.join(","))?;
        writeln!(out)?;

        writeln!(out, "Device capabilities:")?;
        for event_type in self.device.supported_events().iter() {
            writeln!(out, "  Type {:?} ({})", event_type, event_type.0)?;
        }
        if let Some(keys) = self.device.supported_keys() {
            writeln!(out, "  Keys:")?;
            for key in keys.iter() {
                writeln!(out, "    Code {:<4} {:?}", key.code(), key)?;
            }
        }
        writeln!(out)?;
        Ok(())
    }
}

impl AsRawFd for InputDevice {
    fn as_raw_fd(&self) -> RawFd {
        self.device.as_raw_fd()
    }
}

impl Drop for InputDevice {
    fn drop(&mut self) {
        if let Err(e) = self.ungrab() {
            warn!("{}", e);
        }
    }
}

fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    // keep the existing flags, add O_NONBLOCK
    let current = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if current < 0 {
        return Err(io::Error::last_os_error());
    }
    if unsafe { libc::fcntl(fd, libc::F_SETFL, current | libc::O_NONBLOCK) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
