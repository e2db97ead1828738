#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! # Morse Core
//!
//! Morse code signal generation for a single digital output line.
//! Messages are validated, expanded letter by letter into timed pulses and
//! played out on an [`OutputSink`] with inter-letter and inter-word gaps.

pub mod types;
pub mod timing;
pub mod validator;
pub mod encoder;
pub mod sequencer;
pub mod transmitter;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use timing::{ConfigError, TimingUnit};
pub use validator::{validate, ValidatedMessage, ValidationError};
pub use encoder::{encode, encode_from, LetterPattern};
pub use sequencer::{message_duration_us, MorseSequencer, Timeline, TimelineStep};
pub use transmitter::{TransmitError, TransmitReport, Transmitter};
pub use hal::{with_acquired_pin, DelayNs, EmbeddedHalSink, HalError, OutputSink, PinLifecycle};

/// Morse core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: 150ms unit, skip messages that fail validation
pub fn default_config() -> MorseConfig {
    MorseConfig {
        unit: TimingUnit::DEFAULT,
        on_reject: RejectPolicy::SkipMessage,
    }
}
