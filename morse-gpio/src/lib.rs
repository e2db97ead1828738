//! Host front end for the Morse engine: sysfs GPIO shim, std delay and CLI plumbing

pub mod cli;
pub mod delay;
pub mod error;
pub mod sysfs;

use morse_core::{with_acquired_pin, DelayNs, MorseConfig, PinLifecycle, TransmitError, TransmitReport, Transmitter};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use cli::{Cli, RejectMode};
pub use delay::StdDelay;
pub use error::{AppError, GpioError, Result};
pub use sysfs::{SysfsGpio, SysfsValue, DEFAULT_SYSFS_ROOT};

/// Initialize logging with tracing; `RUST_LOG` overrides `level`
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// Send `messages` on `pin`, holding it for the whole run
///
/// The pin is acquired once before the first message and released once after
/// the last, including when a write fails or the run aborts on a rejected
/// message. Nothing touches the pin when `messages` is empty.
pub fn transmit_on_pin<L, D, S>(
    lifecycle: &mut L,
    pin: u32,
    config: MorseConfig,
    messages: &[S],
    delay: &mut D,
) -> Result<TransmitReport>
where
    L: PinLifecycle,
    D: DelayNs,
    S: AsRef<str>,
    AppError: From<L::Error>,
{
    if messages.is_empty() {
        return Err(AppError::NoMessages);
    }

    let mut transmitter = Transmitter::new(config);
    let outcome = with_acquired_pin(lifecycle, pin, |sink| {
        match transmitter.transmit_all(messages.iter().map(AsRef::<str>::as_ref), sink, delay) {
            Ok(report) => Ok(Ok(report)),
            Err(TransmitError::Sink(err)) => Err(err),
            Err(rejected) => Ok(Err(rejected)),
        }
    })?;

    outcome.map_err(|err| match err {
        TransmitError::Rejected { index, error } => AppError::Rejected { index, error },
        TransmitError::Sink(err) => AppError::from(err),
    })
}

/// Run the command line: sysfs pin, wall-clock delays
pub fn run(cli: &Cli) -> Result<TransmitReport> {
    let config = cli.config()?;
    info!(
        pin = cli.pin,
        unit_us = config.unit.as_micros(),
        wpm = config.unit.wpm(),
        messages = cli.messages.len(),
        "Starting Morse transmission"
    );

    let mut gpio = SysfsGpio::new(&cli.sysfs_root);
    transmit_on_pin(&mut gpio, cli.pin, config, &cli.messages, &mut StdDelay)
}
