use std::io::{self, BufRead, ErrorKind, Write};

use remappy_core::config::CapturePrompt;
use remappy_core::BindingKind;

use crate::device::DeviceInfo;

/// Device table in the layout of `evtest`
pub fn format_device_table(devices: &[DeviceInfo]) -> String {
    let lines: Vec<String> = devices
        .iter()
        .enumerate()
        .map(|(id, info)| {
            format!(
                "{:<3} {:<20} {:<35} {:<35} {:<4}",
                id,
                info.path.display(),
                info.name,
                info.phys,
                info.uniq
            )
        })
        .collect();
    let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut table = format!("ID  {:<20} {:<35} {:<35} {}\n", "Device", "Name", "Phys", "Uniq");
    table.push_str(&"-".repeat(width));
    table.push('\n');
    for line in lines {
        table.push_str(&line);
        table.push('\n');
    }
    table
}

/// Line-oriented questions on a terminal (or any reader/writer pair)
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one answer line, newline stripped.
    /// End of input is `ErrorKind::UnexpectedEof`.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        let answer_len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(answer_len);
        Ok(line)
    }

    /// Yes/no question; an empty answer counts as yes
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{} [Y/N]? ", question))?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "" | "y" | "yes"))
    }

    /// Show `devices` and let the operator pick by ID. With `multiple`, any
    /// number of space separated IDs is accepted, otherwise only the first
    /// one counts.
    pub fn select_devices(&mut self, devices: &[DeviceInfo], multiple: bool) -> io::Result<Vec<DeviceInfo>> {
        if devices.is_empty() {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                "no input devices found (do you have rw permission on /dev/input/*?)",
            ));
        }

        writeln!(self.output, "{}", format_device_table(devices))?;
        let answer = self.ask(&format!("Select devices [0-{}]: ", devices.len() - 1))?;

        let mut chosen = Vec::new();
        for word in answer.split_whitespace() {
            let device = word.parse::<usize>().ok().and_then(|id| devices.get(id)).ok_or_else(|| {
                io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("invalid device ID {:?}, enter one or more numbers separated by spaces", word),
                )
            })?;
            chosen.push(device.clone());
            if !multiple {
                break;
            }
        }

        if chosen.is_empty() {
            return Err(io::Error::new(ErrorKind::InvalidInput, "no device selected"));
        }
        Ok(chosen)
    }
}

impl<R: BufRead, W: Write> CapturePrompt for TerminalPrompt<R, W> {
    fn layer(&mut self, input: u16) -> io::Result<String> {
        self.ask(&format!("Layer to map scancode {} in? ", input))
    }

    fn kind(&mut self, input: u16) -> io::Result<String> {
        self.ask(&format!("Short, Macro, or Layer for scancode {}? [S/M/L] ", input))
    }

    fn payload(&mut self, kind: BindingKind) -> io::Result<String> {
        let label = match kind {
            BindingKind::Short => "Short",
            BindingKind::Macro => "Macro",
            BindingKind::SetLayer => "Layer",
        };
        self.ask(&format!("{}: ", label))
    }
}
