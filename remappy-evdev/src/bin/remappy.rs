use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{error, info, warn, LevelFilter};
use remappy_compiler::compile_config;
use remappy_core::config::{capture, DEFAULT_CONFIG_PATH};
use remappy_core::engine::RunStats;
use remappy_core::{known_key_codes, ConfigStore, Configuration, DispatchPolicy, Dispatcher, Error, LayerState};
use remappy_evdev::{
    find_by_name, format_device_table, install_signal_handlers, list_devices, DeviceInfo, EventLoop, InputDevice,
    LoopControl, TerminalPrompt, UinputSink,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyboard remapper for Linux evdev devices", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List readable input devices
    List,
    /// Remap a device using a configuration
    Run(RunArgs),
    /// Build a configuration by pressing keys
    Capture(CaptureArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Configuration JSON file
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Input device to remap (repeatable); skips device selection
    #[arg(short, long = "device")]
    devices: Vec<PathBuf>,

    /// Do not take exclusive access to the devices
    #[arg(long)]
    no_grab: bool,

    /// Drop releases and repeats of keys whose press was remapped
    #[arg(long)]
    suppress_remapped: bool,
}

#[derive(Args, Debug)]
struct CaptureArgs {
    /// Input devices to listen on; prompts for a selection if omitted
    devices: Vec<PathBuf>,

    /// Configuration JSON file to update
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Other applications will not receive events from the selected devices
    #[arg(short, long)]
    grab: bool,

    /// List device capabilities and exit
    #[arg(long)]
    capabilities: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    let result = match cli.command {
        Command::List => list(),
        Command::Run(args) => run(args),
        Command::Capture(args) => capture_config(args),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn list() -> Result<()> {
    let devices = list_devices();
    if devices.is_empty() {
        bail!("No input devices found (do you have rw permission on /dev/input/*?)");
    }
    print!("{}", format_device_table(&devices));
    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let store = ConfigStore::new(&args.config);
    let config = store.load_or_default();

    let report = compile_config(&config);
    for diagnostic in &report.diagnostics {
        warn!("{}", diagnostic);
    }
    info!(
        "Compiled {} binding(s) into {} layer(s)",
        config.len(),
        report.tables.layer_count()
    );

    let mut prompt = TerminalPrompt::stdio();
    let targets = if args.devices.is_empty() {
        vec![choose_run_device(&config, &mut prompt)?.path]
    } else {
        args.devices.clone()
    };

    let mut devices = open_devices(&targets)?;
    if !args.no_grab {
        for device in &mut devices {
            device.grab()?;
        }
    }

    // everything the tables emit, plus whatever the sources can pass through
    let mut keys: Vec<_> = known_key_codes().chain(report.tables.output_codes()).collect();
    for device in &devices {
        keys.extend(device.supported_key_codes());
    }
    keys.sort();
    keys.dedup();
    let mut sink = UinputSink::new(keys).context("Failed to create the virtual keyboard")?;

    let policy = if args.suppress_remapped {
        DispatchPolicy::SuppressRemapped
    } else {
        DispatchPolicy::PassThrough
    };
    let layer = LayerState::for_layer_count(report.tables.layer_count());
    let mut dispatcher = Dispatcher::new(report.tables, layer, policy);

    let stop = install_signal_handlers().context("Failed to install signal handlers")?;
    let mut event_loop = EventLoop::new(devices, stop);
    for device in event_loop.devices() {
        info!("Remapping {}", device.info());
    }

    let mut totals = RunStats::default();
    let result = event_loop.for_each_batch(|_, events| {
        let stats = dispatcher.run(events, &mut sink);
        totals.dispatched += stats.dispatched;
        totals.passed_through += stats.passed_through;
        totals.suppressed += stats.suppressed;
        totals.failed += stats.failed;
        LoopControl::Continue
    });
    event_loop.shutdown();

    info!(
        "Dispatched {}, passed through {}, suppressed {}, failed {}",
        totals.dispatched, totals.passed_through, totals.suppressed, totals.failed
    );
    result.context("Event loop failed")
}

/// Use the device named in the configuration if the operator agrees,
/// otherwise ask for one.
fn choose_run_device<R, W>(config: &Configuration, prompt: &mut TerminalPrompt<R, W>) -> Result<DeviceInfo>
where
    R: io::BufRead,
    W: io::Write,
{
    if let Some(name) = config.name() {
        let matches = find_by_name(name);
        let hinted = match matches.len() {
            0 => {
                warn!("No device named {:?}", name);
                None
            }
            1 => matches.into_iter().next(),
            _ => prompt.select_devices(&matches, false)?.into_iter().next(),
        };
        if let Some(device) = hinted {
            if prompt.confirm(&format!("Config uses {}, is this ok", device))? {
                return Ok(device);
            }
        }
    }

    let selected = prompt.select_devices(&list_devices(), false)?;
    selected.into_iter().next().context("No device selected")
}

fn open_devices(paths: &[PathBuf]) -> Result<Vec<InputDevice>> {
    paths
        .iter()
        .map(|path| InputDevice::open(path).map_err(anyhow::Error::from))
        .collect()
}

fn capture_config(args: CaptureArgs) -> Result<()> {
    let mut prompt = TerminalPrompt::stdio();
    let targets: Vec<PathBuf> = if args.devices.is_empty() {
        prompt
            .select_devices(&list_devices(), true)?
            .into_iter()
            .map(|info| info.path)
            .collect()
    } else {
        args.devices.clone()
    };
    let mut devices = open_devices(&targets)?;

    if args.capabilities {
        let mut out = io::stdout().lock();
        for device in &devices {
            device.print_capabilities(&mut out)?;
        }
        return Ok(());
    }

    if args.grab {
        for device in &mut devices {
            device.grab()?;
        }
    }

    // a file that fails to parse is not overwritten
    let store = ConfigStore::new(&args.config);
    let mut config = store
        .load()
        .with_context(|| format!("Refusing to capture into {}", args.config.display()))?;
    if config.name().is_none() {
        if let Some(first) = devices.first() {
            config.set_name(Some(first.info().name.clone()));
        }
    }

    let stop = install_signal_handlers().context("Failed to install signal handlers")?;
    let mut event_loop = EventLoop::new(devices, stop);
    println!("Listening for events, changes saved automatically (press ctrl-c to exit) ...");

    let result = event_loop.for_each_batch(|_, events| {
        let Some(event) = events.iter().find(|event| event.is_press()) else {
            return LoopControl::Continue;
        };
        match capture(&mut config, event.code.0, &mut prompt) {
            Ok(Some(_)) => {
                if let Err(e) = store.save(&config) {
                    error!("Failed to save {}: {}", store.path().display(), e);
                }
            }
            Ok(None) => {}
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => return LoopControl::Stop,
            Err(e) => error!("{}", e),
        }
        // keys typed while answering are not bindings
        LoopControl::DiscardPending
    });
    event_loop.shutdown();

    store
        .save(&config)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;
    info!("Saved {} binding(s) to {}", config.len(), store.path().display());
    result.context("Event loop failed")
}
