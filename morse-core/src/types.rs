//! Core data types for the Morse signal engine

use crate::timing::{ConfigError, TimingUnit};

/// Morse code symbols
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Symbol {
    /// Dit (short element)
    Dit,
    /// Dah (long element)
    Dah,
}

impl Symbol {
    /// Returns the duration of this symbol in units
    pub const fn duration_units(&self) -> u32 {
        match self {
            Symbol::Dit => 1,
            Symbol::Dah => 3,
        }
    }

    /// Conventional written form ('.' or '-')
    pub const fn as_char(&self) -> char {
        match self {
            Symbol::Dit => '.',
            Symbol::Dah => '-',
        }
    }
}

/// Logic level of the output line
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Level {
    /// Key up, line low
    Inactive,
    /// Key down, line high
    Active,
}

impl Level {
    /// Returns the opposite level
    pub const fn toggled(&self) -> Level {
        match self {
            Level::Inactive => Level::Active,
            Level::Active => Level::Inactive,
        }
    }

    /// Returns true if this level keys the output
    pub const fn is_active(&self) -> bool {
        matches!(self, Level::Active)
    }
}

impl From<bool> for Level {
    fn from(active: bool) -> Self {
        if active { Level::Active } else { Level::Inactive }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_active()
    }
}

/// One emitted interval: the level written to the sink and how many units it is held
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Pulse {
    pub level: Level,
    pub units: u32,
}

impl Pulse {
    pub const fn new(level: Level, units: u32) -> Self {
        Self { level, units }
    }

    /// Duration of this pulse in microseconds for the given unit
    pub const fn duration_us(&self, unit: TimingUnit) -> u32 {
        unit.units(self.units)
    }
}

/// Sequencer states
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SequencerState {
    /// Nothing emitted yet
    Idle,
    /// Writing the pulses of a character
    Emitting(char),
    /// Holding the 3T gap after a character
    InterLetterGap,
    /// Holding the extra 4T gap after the message
    InterWordGap,
    /// Message finished
    Done,
    /// The sink rejected a write; emission stopped
    Failed,
}

impl SequencerState {
    /// Returns true once the sequencer has stopped, successfully or not
    pub const fn is_terminal(&self) -> bool {
        matches!(self, SequencerState::Done | SequencerState::Failed)
    }

    /// Returns the character being emitted, if any
    pub const fn current_char(&self) -> Option<char> {
        match self {
            SequencerState::Emitting(ch) => Some(*ch),
            _ => None,
        }
    }
}

/// What a multi-message run does when a message fails validation
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum RejectPolicy {
    /// Skip the rejected message and carry on with the next one
    #[default]
    SkipMessage,
    /// Stop the whole run at the first rejected message
    Abort,
}

/// Engine configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MorseConfig {
    /// Base timing unit (dit duration)
    pub unit: TimingUnit,
    /// Behaviour on rejected messages
    pub on_reject: RejectPolicy,
}

impl Default for MorseConfig {
    fn default() -> Self {
        Self {
            unit: TimingUnit::DEFAULT,
            on_reject: RejectPolicy::SkipMessage,
        }
    }
}

impl MorseConfig {
    /// Create a new configuration with validation
    pub fn new(unit_us: u32, on_reject: RejectPolicy) -> Result<Self, ConfigError> {
        Ok(Self {
            unit: TimingUnit::from_micros(unit_us)?,
            on_reject,
        })
    }

    /// Create a configuration from a keying speed
    pub fn from_wpm(wpm: u32, on_reject: RejectPolicy) -> Result<Self, ConfigError> {
        Ok(Self {
            unit: TimingUnit::from_wpm(wpm)?,
            on_reject,
        })
    }
}
