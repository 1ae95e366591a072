use std::io;
use std::os::unix::io::AsRawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, error, info};
use remappy_core::{Error, KeyEvent, Result};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

use crate::device::{DeviceInfo, InputDevice};

/// Register SIGINT and SIGTERM onto a shared stop flag.
///
/// The first signal only raises the flag so the loop can shut down cleanly;
/// a second one while the flag is still set terminates the process.
pub fn install_signal_handlers() -> io::Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        flag::register_conditional_shutdown(signal, 1, Arc::clone(&stop))?;
        flag::register(signal, Arc::clone(&stop))?;
    }
    Ok(stop)
}

/// What the event loop does after a batch has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// Throw away whatever queued up on every device while the batch was handled
    DiscardPending,
    Stop,
}

/// Blocks on every device at once and hands each ready device's key events
/// to a handler.
pub struct EventLoop {
    devices: Vec<InputDevice>,
    stop: Arc<AtomicBool>,
}

impl EventLoop {
    pub fn new(devices: Vec<InputDevice>, stop: Arc<AtomicBool>) -> Self {
        Self { devices, stop }
    }

    pub fn devices(&self) -> &[InputDevice] {
        &self.devices
    }

    /// Run until the stop flag is raised, the handler stops, or no device is
    /// left. A failing device is dropped and the others keep running.
    pub fn for_each_batch<F>(&mut self, mut handle: F) -> Result<()>
    where
        F: FnMut(&DeviceInfo, Vec<KeyEvent>) -> LoopControl,
    {
        while !self.stop.load(Ordering::Relaxed) {
            if self.devices.is_empty() {
                return Err(Error::Device("No input devices left".to_string()));
            }

            let mut fds: Vec<libc::pollfd> = self
                .devices
                .iter()
                .map(|device| libc::pollfd {
                    fd: device.as_raw_fd(),
                    events: libc::POLLIN,
                    revents: 0,
                })
                .collect();

            let ready = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
            if ready < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    // a signal arrived; the loop condition decides
                    continue;
                }
                return Err(Error::Io(err));
            }

            let mut failed = Vec::new();
            let mut discard = false;
            for (index, pollfd) in fds.iter().enumerate() {
                if pollfd.revents == 0 {
                    continue;
                }
                let device = &mut self.devices[index];
                if pollfd.revents & (libc::POLLERR | libc::POLLHUP | libc::POLLNVAL) != 0 {
                    error!("{} is no longer available", device.info());
                    failed.push(index);
                    continue;
                }

                let events = match device.fetch_key_events() {
                    Ok(events) => events,
                    Err(e) => {
                        error!("Failed to read from {}: {}", device.info(), e);
                        failed.push(index);
                        continue;
                    }
                };
                if events.is_empty() {
                    continue;
                }

                match handle(device.info(), events) {
                    LoopControl::Continue => {}
                    LoopControl::DiscardPending => discard = true,
                    LoopControl::Stop => {
                        info!("Stopping event loop");
                        return Ok(());
                    }
                }
            }

            for index in failed.into_iter().rev() {
                let device = self.devices.remove(index);
                debug!("Dropped {}", device.info());
            }

            if discard {
                self.discard_pending();
            }
        }

        info!("Interrupted, shutting down");
        Ok(())
    }

    fn discard_pending(&mut self) {
        for device in &mut self.devices {
            match device.fetch_key_events() {
                Ok(events) if !events.is_empty() => debug!("Discarded {} event(s) from {}", events.len(), device.info()),
                Ok(_) => {}
                Err(e) => debug!("Failed to drain {}: {}", device.info(), e),
            }
        }
    }

    /// Release every grab and close the devices
    pub fn shutdown(mut self) {
        for device in &mut self.devices {
            if let Err(e) = device.ungrab() {
                error!("{}", e);
            }
        }
    }
}
