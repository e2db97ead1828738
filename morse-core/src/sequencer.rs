//! Message sequencer: stitches letter patterns and gaps into a timed signal

use core::str::Chars;

#[cfg(feature = "tracing")]
use crate::encoder::notation;
use crate::encoder::{encode, LetterPattern};
use crate::hal::{DelayNs, OutputSink};
use crate::timing::TimingUnit;
use crate::types::{Level, SequencerState};
use crate::validator::ValidatedMessage;

/// One step of a message's signal timeline
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimelineStep {
    /// Sequencer phase this step belongs to
    pub phase: SequencerState,
    /// Level written to the sink at the start of the step, if any
    pub write: Option<Level>,
    /// How long the step holds before the next one, in microseconds
    pub hold_us: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    NextChar,
    Pulses(char),
    LetterGap,
    WordGap,
    Finished,
}

/// Lazily generated timeline of one message
///
/// Per character: the letter pattern, then an inactive write held for 3T.
/// After the last character a final 4T hold without a write.
pub struct Timeline<'a> {
    chars: Chars<'a>,
    unit: TimingUnit,
    pattern: LetterPattern,
    next_pulse: usize,
    stage: Stage,
}

impl<'a> Timeline<'a> {
    pub fn new(message: &ValidatedMessage<'a>, unit: TimingUnit) -> Self {
        Self {
            chars: message.chars(),
            unit,
            pattern: LetterPattern::new(),
            next_pulse: 0,
            stage: Stage::NextChar,
        }
    }
}

impl Iterator for Timeline<'_> {
    type Item = TimelineStep;

    fn next(&mut self) -> Option<TimelineStep> {
        loop {
            match self.stage {
                Stage::NextChar => match self.chars.next() {
                    Some(ch) => {
                        self.pattern = encode(ch);
                        self.next_pulse = 0;
                        self.stage = Stage::Pulses(ch);
                    }
                    None => self.stage = Stage::WordGap,
                },
                Stage::Pulses(ch) => {
                    if let Some(pulse) = self.pattern.get(self.next_pulse) {
                        self.next_pulse += 1;
                        return Some(TimelineStep {
                            phase: SequencerState::Emitting(ch),
                            write: Some(pulse.level),
                            hold_us: pulse.duration_us(self.unit),
                        });
                    }
                    self.stage = Stage::LetterGap;
                }
                Stage::LetterGap => {
                    self.stage = Stage::NextChar;
                    return Some(TimelineStep {
                        phase: SequencerState::InterLetterGap,
                        write: Some(Level::Inactive),
                        hold_us: self.unit.inter_letter(),
                    });
                }
                Stage::WordGap => {
                    self.stage = Stage::Finished;
                    return Some(TimelineStep {
                        phase: SequencerState::InterWordGap,
                        write: None,
                        hold_us: self.unit.inter_word_extra(),
                    });
                }
                Stage::Finished => return None,
            }
        }
    }
}

/// Total time a message occupies the line, in microseconds
pub fn message_duration_us(message: &ValidatedMessage<'_>, unit: TimingUnit) -> u64 {
    Timeline::new(message, unit).map(|step| step.hold_us as u64).sum()
}

/// Drives an output sink through the timeline of one message at a time
pub struct MorseSequencer {
    state: SequencerState,
    unit: TimingUnit,
}

impl MorseSequencer {
    /// Create new sequencer keyed at `unit`
    pub fn new(unit: TimingUnit) -> Self {
        Self {
            state: SequencerState::Idle,
            unit,
        }
    }

    /// Get current sequencer state
    pub fn current_state(&self) -> SequencerState {
        self.state
    }

    pub fn unit(&self) -> TimingUnit {
        self.unit
    }

    /// Emit one message on `sink`, blocking on `delay` for every interval
    ///
    /// The level is written before its interval elapses. A failed write stops
    /// emission on the spot: the sequencer enters [`SequencerState::Failed`]
    /// and the line is left wherever the last successful write put it.
    pub fn emit<S, D>(
        &mut self,
        message: &ValidatedMessage<'_>,
        sink: &mut S,
        delay: &mut D,
    ) -> Result<(), S::Error>
    where
        S: OutputSink,
        D: DelayNs,
    {
        self.state = SequencerState::Idle;

        for step in Timeline::new(message, self.unit) {
            #[cfg(feature = "tracing")]
            if let SequencerState::Emitting(ch) = step.phase {
                if self.state != step.phase {
                    let morse = notation(ch);
                    tracing::debug!(char = %ch, morse = morse.as_str(), "emitting character");
                }
            }
            self.state = step.phase;

            if let Some(level) = step.write {
                if let Err(err) = sink.set_level(level) {
                    self.state = SequencerState::Failed;
                    #[cfg(feature = "tracing")]
                    tracing::error!(?level, "sink rejected write, aborting message");
                    return Err(err);
                }
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(phase = ?step.phase, write = ?step.write, hold_us = step.hold_us, "hold");
            delay.delay_us(step.hold_us);
        }

        self.state = SequencerState::Done;
        Ok(())
    }

    /// Reset sequencer to initial state
    pub fn reset(&mut self) {
        self.state = SequencerState::Idle;
    }
}

impl Default for MorseSequencer {
    fn default() -> Self {
        Self::new(TimingUnit::DEFAULT)
    }
}
