//! # Main Loop
//!
//! ```text
//! 1. scheduler + main queue (bounded, ticks dropped when full)
//! 2. key listener: size-1 poll queue ──► reader thread ──► main queue
//! 3. App + demo screens, UPDATE tick scheduled
//! 4. loop: recv ──► App::handle (paint + send frame | key | timer | data)
//! 5. exit request or SIGINT/SIGTERM: stop listener, stop scheduler, reset
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use g19_device::{Lcd, Simulator};
use g19_input::{KeyListener, KeySource};
use g19_scheduler::Scheduler;
use g19_widgets::{App, Command, Message};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use tracing::{error, info, warn};

use crate::config::{Config, DeviceMode};
use crate::demo;
use crate::error::{ShellError, ShellResult};

/// How often the loop wakes without messages to check for a stop request.
const STOP_RECHECK: Duration = Duration::from_millis(100);

/// Opens the configured device and runs until exit or a termination signal.
///
/// # Errors
///
/// Device discovery failure, thread spawn failure, or a fatal frame error.
pub fn run(config: &Config) -> ShellResult<()> {
    let stop = install_signal_flag()?;
    match config.device.mode {
        DeviceMode::Simulator => {
            info!("running against the simulator");
            run_with(config, Arc::new(Simulator::new()), &stop)
        }
        DeviceMode::Usb => run_usb(config, &stop),
    }
}

#[cfg(feature = "usb")]
fn run_usb(config: &Config, stop: &AtomicBool) -> ShellResult<()> {
    use g19_device::{RusbTransport, G19};

    let transport = RusbTransport::open(config.device.reset_on_start)?;
    let device = G19::with_options(
        transport,
        config.device.timeouts.into(),
        config.device.pixel_order.into(),
    );
    if let Some(level) = config.device.brightness {
        device.set_display_brightness(level);
    }
    if let Some([r, g, b]) = config.device.backlight {
        if config.device.persist_backlight {
            device.save_default_bg_color(r, g, b);
        } else {
            device.set_bg_color(r, g, b);
        }
    }
    run_with(config, Arc::new(device), stop)
}

#[cfg(not(feature = "usb"))]
fn run_usb(_config: &Config, _stop: &AtomicBool) -> ShellResult<()> {
    Err(ShellError::UsbUnavailable)
}

/// SIGINT and SIGTERM set the returned flag.
fn install_signal_flag() -> ShellResult<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&stop)).map_err(ShellError::Signal)?;
    }
    Ok(stop)
}

/// Runs the demo app on `device` until a widget asks to exit or `stop` is set.
///
/// # Errors
///
/// An invalid `config`, thread spawn failure or a fatal frame error.
/// Shutdown happens either way once the loop has started.
pub fn run_with<D>(config: &Config, device: Arc<D>, stop: &AtomicBool) -> ShellResult<()>
where
    D: Lcd + KeySource,
{
    config.validate()?;
    let (mailbox, inbox) = bounded::<Message>(config.scheduler.queue_capacity.max(1));
    let scheduler = Scheduler::<Command>::new()?;
    let mut listener = KeyListener::spawn(
        &scheduler,
        config.scheduler.key_poll_interval(),
        Command::KeyPoll,
        Arc::clone(&device),
        mailbox.clone(),
    )?;

    let mut app = App::new(device.image_size(), scheduler, mailbox);
    demo::install(&mut app);
    app.set_screen(demo::CLOCK);
    app.start_updates(config.scheduler.update_interval());

    let result = dispatch(&mut app, &inbox, device.as_ref(), stop);
    if let Err(err) = &result {
        error!(error = %err, "main loop failed");
    }

    // A reader blocked on a full main queue is released by the disconnect.
    drop(inbox);
    listener.stop(app.scheduler());
    app.shutdown();
    if let Err(err) = device.reset() {
        warn!(error = %err, "device reset on exit failed");
    }
    info!("stopped");
    result
}

fn dispatch(app: &mut App, inbox: &Receiver<Message>, lcd: &dyn Lcd, stop: &AtomicBool) -> ShellResult<()> {
    while !app.should_exit() {
        if stop.load(Ordering::Relaxed) {
            info!("termination signal received");
            break;
        }
        match inbox.recv_timeout(STOP_RECHECK) {
            Ok(message) => app.handle(message, lcd)?,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}
