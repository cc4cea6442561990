//! Watchdog daemon entry point.
//!
//! Wires a heartbeat source (serial device or simulated link) to the
//! supervisor loop, with signal handling and structured logging.

mod signals;
mod supervisor;

use anyhow::{bail, Context, Result};
use clap::Parser;
use comwatch_common::WatchConfig;
use comwatch_io::{HeartbeatSource, SerialPort, SimulatedSource, SystemClock, CHANNEL_COUNT};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::signals::SignalHandler;
use crate::supervisor::Supervisor;

/// Simulated link cadence: one beat per second at the default 10 ms poll period.
const SIMULATED_BEAT_EVERY: u64 = 100;

/// Watchdog daemon command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "comwatch-daemon",
    about = "Serial heartbeat watchdog - blinks an alarm channel when the link goes quiet",
    version,
    long_about = None
)]
struct Args {
    /// Path to a watchdog configuration file (TOML).
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Serial device to watch (overrides config file).
    #[arg(long, short = 'd', value_name = "DEVICE")]
    device: Option<PathBuf>,

    /// Run with a simulated heartbeat source (no serial device).
    #[arg(long, short = 's')]
    simulated: bool,

    /// Maximum supervision ticks to run (0 = infinite).
    #[arg(long, default_value = "0")]
    max_polls: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting comwatch daemon");

    // Load configuration
    let mut config = load_config(&args)?;

    // Override with command-line arguments
    if let Some(device) = &args.device {
        config.link.device = Some(device.clone());
    }

    config.validate().context("Invalid configuration")?;
    if config.monitor.channel >= CHANNEL_COUNT {
        bail!(
            "alarm channel {} out of range (bank has {} channels)",
            config.monitor.channel,
            CHANNEL_COUNT
        );
    }
    if config.supervisor.poll_period >= config.monitor.blink_interval {
        warn!(
            poll_period = ?config.supervisor.poll_period,
            blink_interval = ?config.monitor.blink_interval,
            "Poll period reaches the blink interval, alarm blinking may be invisible"
        );
    }

    info!(
        ?config.monitor.timeout,
        ?config.monitor.blink_interval,
        channel = config.monitor.channel,
        "Configuration loaded"
    );

    // Set up signal handling
    let signal_handler = SignalHandler::new().context("Failed to set up signal handlers")?;

    // Run the daemon
    run_daemon(&config, &signal_handler, args.simulated, args.max_polls)
}

/// Initialize logging with the specified log level.
fn init_logging(level: &str) {
    let filter = format!(
        "comwatch_daemon={},comwatch_monitor={},comwatch_io={},comwatch_common={}",
        level, level, level, level
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with_target(true)
        .init();
}

/// Load configuration from file or use defaults.
///
/// Resolution priority (first existing file wins):
/// 1. Command-line `--config` argument
/// 2. `COMWATCH_CONFIG` environment variable
/// 3. `/etc/comwatch/config.toml` (system path)
/// 4. `config/default.toml` (local development)
/// 5. Built-in defaults
fn load_config(args: &Args) -> Result<WatchConfig> {
    // 1. Command-line argument (highest priority)
    if let Some(config_path) = &args.config {
        info!(?config_path, "Loading config from command-line argument");
        return WatchConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path));
    }

    // 2. Environment variable
    if let Ok(env_path) = std::env::var("COMWATCH_CONFIG") {
        let config_path = PathBuf::from(&env_path);
        if config_path.exists() {
            info!(?config_path, "Loading config from COMWATCH_CONFIG");
            return WatchConfig::from_file(&config_path).with_context(|| {
                format!("Failed to load config from COMWATCH_CONFIG={:?}", env_path)
            });
        }
        warn!(
            path = %env_path,
            "COMWATCH_CONFIG set but file does not exist, checking other locations"
        );
    }

    // 3. System path
    let system_path = PathBuf::from("/etc/comwatch/config.toml");
    if system_path.exists() {
        info!(?system_path, "Loading config from system path");
        return WatchConfig::from_file(&system_path)
            .with_context(|| format!("Failed to load config from {:?}", system_path));
    }

    // 4. Local development path
    let local_path = PathBuf::from("config/default.toml");
    if local_path.exists() {
        info!(?local_path, "Loading config from local path");
        return WatchConfig::from_file(&local_path)
            .with_context(|| format!("Failed to load config from {:?}", local_path));
    }

    // 5. Built-in defaults
    info!("No config file found, using built-in defaults");
    Ok(WatchConfig::default())
}

/// Select the heartbeat source and hand off to the supervisor.
fn run_daemon(
    config: &WatchConfig,
    signal_handler: &SignalHandler,
    simulated: bool,
    max_polls: u64,
) -> Result<()> {
    if simulated {
        info!("Using simulated heartbeat source");
        let source = SimulatedSource::new(config.link.heartbeat_byte(), SIMULATED_BEAT_EVERY, None);
        return run_supervisor(source, config, signal_handler, max_polls);
    }

    let Some(device) = config.link.device.clone() else {
        bail!("no serial device configured; pass --device, set link.device, or use --simulated");
    };

    let source = SerialPort::open(&device, config.link.baud)
        .with_context(|| format!("Failed to open serial device {}", device.display()))?;

    run_supervisor(source, config, signal_handler, max_polls)
}

/// Build the supervisor around `source` and run it to completion.
fn run_supervisor<S: HeartbeatSource>(
    source: S,
    config: &WatchConfig,
    signal_handler: &SignalHandler,
    max_polls: u64,
) -> Result<()> {
    let mut supervisor = Supervisor::new(source, SystemClock::new(), config);

    supervisor.run(signal_handler, max_polls);

    // Final statistics
    info!(
        polls = supervisor.polls(),
        beats = supervisor.beats(),
        read_errors = supervisor.read_errors(),
        signals = signal_handler.signal_count(),
        final_health = %supervisor.health(),
        "Daemon shutdown complete"
    );

    Ok(())
}
