//! Character to pulse pattern encoding
//!
//! Every letter is looked up in the standard Morse alphabet and expanded into
//! alternating pulses, two per symbol. The level the pattern starts from is an
//! explicit input, and the level after the last pulse is handed back so a
//! caller can thread it through a sequence of letters.

use heapless::{String, Vec};

use crate::types::{Level, Pulse, Symbol};

/// Longest letter in the table has four symbols
pub const MAX_SYMBOLS: usize = 4;

/// Two pulses per symbol
pub const MAX_PATTERN_PULSES: usize = MAX_SYMBOLS * 2;

/// Pulse sequence for one character
pub type LetterPattern = Vec<Pulse, MAX_PATTERN_PULSES>;

use crate::types::Symbol::{Dah as D, Dit as I};

static MORSE_TABLE: [&[Symbol]; 26] = [
    &[I, D],       // A
    &[D, I, I, I], // B
    &[D, I, D, I], // C
    &[D, I, I],    // D
    &[I],          // E
    &[I, I, D, I], // F
    &[D, D, I],    // G
    &[I, I, I, I], // H
    &[I, I],       // I
    &[I, D, D, D], // J
    &[D, I, D],    // K
    &[I, D, I, I], // L
    &[D, D],       // M
    &[D, I],       // N
    &[D, D, D],    // O
    &[I, D, D, I], // P
    &[D, D, I, D], // Q
    &[I, D, I],    // R
    &[I, I, I],    // S
    &[D],          // T
    &[I, I, D],    // U
    &[I, I, I, D], // V
    &[I, D, D],    // W
    &[D, I, I, D], // X
    &[D, I, D, D], // Y
    &[D, D, I, I], // Z
];

/// Symbols for a character, case-insensitive; `None` outside A-Z
pub fn symbols_for(ch: char) -> Option<&'static [Symbol]> {
    let upper = ch.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some(MORSE_TABLE[(upper as u8 - b'A') as usize])
    } else {
        None
    }
}

/// Dot/dash notation of a character, empty outside A-Z
pub fn notation(ch: char) -> String<MAX_SYMBOLS> {
    let mut out = String::new();
    for symbol in symbols_for(ch).unwrap_or(&[]) {
        out.push(symbol.as_char()).ok();
    }
    out
}

/// Expand a character into pulses starting at `level`
///
/// Levels alternate pulse by pulse. An active pulse carries the duration of
/// the symbol it belongs to (1 unit for a dit, 3 for a dah); an inactive one
/// is the 1 unit space between elements. Returns the pattern together with
/// the level following its last pulse. Characters outside A-Z yield an empty
/// pattern and leave the level untouched.
pub fn encode_from(ch: char, level: Level) -> (LetterPattern, Level) {
    let mut pattern = LetterPattern::new();
    let mut level = level;

    let Some(symbols) = symbols_for(ch) else {
        return (pattern, level);
    };

    for symbol in symbols {
        for _ in 0..2 {
            let units = if level.is_active() { symbol.duration_units() } else { 1 };
            pattern.push(Pulse::new(level, units)).ok();
            level = level.toggled();
        }
    }

    (pattern, level)
}

/// Expand a character the way the sequencer does: each letter starts inactive
///
/// Each symbol becomes `[inactive 1][active 1|3]`, so active pulses sit at odd
/// indices and a letter always ends on an active pulse.
pub fn encode(ch: char) -> LetterPattern {
    encode_from(ch, Level::Inactive).0
}
