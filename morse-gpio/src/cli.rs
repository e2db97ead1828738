//! Command line definition

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use morse_core::{ConfigError, MorseConfig, RejectPolicy, TimingUnit};

use crate::sysfs::DEFAULT_SYSFS_ROOT;

/// Flash Morse code messages on a sysfs GPIO line
#[derive(Parser, Debug)]
#[command(name = "morse-gpio")]
#[command(version)]
#[command(about = "Send messages as Morse code on a GPIO output (run as root for /sys/class/gpio)")]
pub struct Cli {
    /// Messages to send, one after another (letters only; digits are refused)
    #[arg(required = true, value_name = "MESSAGE")]
    pub messages: Vec<String>,

    /// GPIO number to drive
    #[arg(short, long, default_value_t = 17, env = "MORSE_GPIO_PIN")]
    pub pin: u32,

    /// sysfs GPIO directory
    #[arg(long, default_value = DEFAULT_SYSFS_ROOT, env = "MORSE_GPIO_SYSFS_ROOT")]
    pub sysfs_root: PathBuf,

    /// Base timing unit in microseconds [default: 150000]
    #[arg(long, value_name = "MICROS", conflicts_with = "wpm")]
    pub unit_us: Option<u32>,

    /// Keying speed in words per minute (PARIS), instead of --unit-us
    #[arg(long)]
    pub wpm: Option<u32>,

    /// What to do with a message that contains digits
    #[arg(long, value_enum, default_value_t = RejectMode::Skip)]
    pub on_reject: RejectMode,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Command line spelling of [`RejectPolicy`]
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectMode {
    /// Skip the message, send the rest, exit non-zero at the end
    Skip,
    /// Stop at the first rejected message
    Abort,
}

impl From<RejectMode> for RejectPolicy {
    fn from(mode: RejectMode) -> Self {
        match mode {
            RejectMode::Skip => RejectPolicy::SkipMessage,
            RejectMode::Abort => RejectPolicy::Abort,
        }
    }
}

impl Cli {
    /// Engine configuration described by the flags
    pub fn config(&self) -> Result<MorseConfig, ConfigError> {
        let on_reject = self.on_reject.into();
        match (self.unit_us, self.wpm) {
            (Some(unit_us), _) => MorseConfig::new(unit_us, on_reject),
            (None, Some(wpm)) => MorseConfig::from_wpm(wpm, on_reject),
            (None, None) => Ok(MorseConfig {
                unit: TimingUnit::DEFAULT,
                on_reject,
            }),
        }
    }
}
