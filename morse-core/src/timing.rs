//! Base timing unit and its derived multiples

use core::fmt;

/// Largest multiple of the base unit the engine ever holds in one delay call
const MAX_MULTIPLE: u32 = 7;

/// Configuration errors for timing and keying parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Base unit of zero microseconds
    ZeroUnit,
    /// Base unit so large that the 7T word silence overflows a `u32` microsecond count
    UnitTooLarge(u32),
    /// Speed outside the supported range
    InvalidWpm(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroUnit => write!(f, "timing unit must be greater than zero"),
            ConfigError::UnitTooLarge(us) => {
                write!(f, "timing unit of {}us is too large (7 units must fit in u32 microseconds)", us)
            }
            ConfigError::InvalidWpm(wpm) => write!(f, "WPM must be between 1 and 100, got {}", wpm),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// The base duration T all pulses and gaps are built from
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimingUnit {
    micros: u32,
}

impl TimingUnit {
    /// 500 x 300us, the unit the sysfs flasher has always keyed at
    pub const DEFAULT: TimingUnit = TimingUnit { micros: 150_000 };

    /// Create a unit from a microsecond count
    pub const fn from_micros(micros: u32) -> Result<Self, ConfigError> {
        if micros == 0 {
            return Err(ConfigError::ZeroUnit);
        }
        if micros > u32::MAX / MAX_MULTIPLE {
            return Err(ConfigError::UnitTooLarge(micros));
        }
        Ok(Self { micros })
    }

    /// Create a unit from a keying speed (PARIS standard: 50 units per word)
    pub const fn from_wpm(wpm: u32) -> Result<Self, ConfigError> {
        if wpm == 0 || wpm > 100 {
            return Err(ConfigError::InvalidWpm(wpm));
        }
        Self::from_micros(1_200_000 / wpm)
    }

    /// Base unit in microseconds
    pub const fn as_micros(&self) -> u32 {
        self.micros
    }

    /// Approximate keying speed for this unit
    pub const fn wpm(&self) -> u32 {
        let wpm = 1_200_000 / self.micros;
        if wpm == 0 { 1 } else { wpm }
    }

    /// `n` units in microseconds
    ///
    /// Callers inside the engine never ask for more than 7 units, which
    /// construction guarantees will not overflow.
    pub const fn units(&self, n: u32) -> u32 {
        self.micros * n
    }

    /// Silence held after every character
    pub const fn inter_letter(&self) -> u32 {
        self.units(3)
    }

    /// Extra silence held once a whole message is done
    pub const fn inter_word_extra(&self) -> u32 {
        self.units(4)
    }
}

impl Default for TimingUnit {
    fn default() -> Self {
        Self::DEFAULT
    }
}
