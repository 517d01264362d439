//! # g19d
//!
//! Drives the G19 keyboard LCD.
//!
//! ```bash
//! # Real hardware (build with --features usb)
//! g19d --config /etc/g19.toml
//!
//! # No hardware
//! g19d --simulate --log-level debug
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use g19::config::DeviceMode;
use g19::{logging, runtime, Config, ShellResult};

#[derive(Parser, Debug)]
#[command(name = "g19d", version, about = "Drives the G19 keyboard LCD")]
struct Args {
    /// TOML config file. Built-in defaults are used without it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Render to the simulator instead of the USB device.
    #[arg(long)]
    simulate: bool,

    /// Log filter, e.g. `debug` or `g19_device=trace`. `RUST_LOG` wins.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn start(args: Args) -> ShellResult<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.simulate {
        config.device.mode = DeviceMode::Simulator;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    logging::init(&config.logging.level)?;
    tracing::info!(mode = ?config.device.mode, config = ?args.config, "g19d starting");
    runtime::run(&config)
}

fn main() -> ExitCode {
    match start(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "g19d failed");
            eprintln!("g19d: {err}");
            ExitCode::FAILURE
        }
    }
}
