//! Multi-message transmission on a single output line

use core::fmt;

use crate::hal::{DelayNs, OutputSink};
use crate::sequencer::MorseSequencer;
use crate::types::{MorseConfig, RejectPolicy};
use crate::validator::{validate, ValidationError};

/// Why a run stopped early
#[derive(Debug, PartialEq, Eq)]
pub enum TransmitError<E> {
    /// A message failed validation under [`RejectPolicy::Abort`]
    Rejected { index: usize, error: ValidationError },
    /// The sink rejected a write
    Sink(E),
}

impl<E: fmt::Display> fmt::Display for TransmitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransmitError::Rejected { index, error } => write!(f, "message {}: {}", index + 1, error),
            TransmitError::Sink(err) => write!(f, "output failed: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for TransmitError<E> {}

/// Outcome of a completed run
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransmitReport {
    /// Messages emitted in full
    pub sent: usize,
    /// Messages skipped by validation
    pub rejected: usize,
}

impl TransmitReport {
    /// True when every message went out
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Sends messages one after another through validation, encoding and sequencing
pub struct Transmitter {
    config: MorseConfig,
    sequencer: MorseSequencer,
}

impl Transmitter {
    pub fn new(config: MorseConfig) -> Self {
        Self {
            config,
            sequencer: MorseSequencer::new(config.unit),
        }
    }

    pub fn config(&self) -> &MorseConfig {
        &self.config
    }

    pub fn sequencer(&self) -> &MorseSequencer {
        &self.sequencer
    }

    /// Transmit every message in order
    ///
    /// Each message is validated right before it is sent, so a later bad
    /// message does not hold back earlier good ones. Sink errors end the run
    /// regardless of policy.
    pub fn transmit_all<'m, I, S, D>(
        &mut self,
        messages: I,
        sink: &mut S,
        delay: &mut D,
    ) -> Result<TransmitReport, TransmitError<S::Error>>
    where
        I: IntoIterator<Item = &'m str>,
        S: OutputSink,
        D: DelayNs,
    {
        let mut report = TransmitReport::default();

        for (index, raw) in messages.into_iter().enumerate() {
            let message = match validate(raw) {
                Ok(message) => message,
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(index, %error, "message rejected");

                    match self.config.on_reject {
                        RejectPolicy::SkipMessage => {
                            report.rejected += 1;
                            continue;
                        }
                        RejectPolicy::Abort => return Err(TransmitError::Rejected { index, error }),
                    }
                }
            };

            #[cfg(feature = "tracing")]
            tracing::info!(index, chars = message.char_count(), "transmitting message");

            self.sequencer
                .emit(&message, sink, delay)
                .map_err(TransmitError::Sink)?;
            report.sent += 1;
        }

        Ok(report)
    }
}
