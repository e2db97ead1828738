//! Message validation ahead of any output

use core::fmt;

/// Reasons a message is refused before emission
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The message contains a digit, which has no pattern in the letter table
    UnsupportedCharacter { ch: char, position: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnsupportedCharacter { ch, position } => {
                write!(f, "cannot convert numbers: '{}' at position {}", ch, position)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

/// A message that passed validation
///
/// Borrowed from the caller and immutable; only [`validate`] constructs one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValidatedMessage<'a> {
    text: &'a str,
}

impl<'a> ValidatedMessage<'a> {
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn chars(&self) -> core::str::Chars<'a> {
        self.text.chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters, each of which gets its own inter-letter gap
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Check a raw message, rejecting it whole if any digit is present
///
/// Punctuation and whitespace pass; they are silent during encoding.
pub fn validate(message: &str) -> Result<ValidatedMessage<'_>, ValidationError> {
    if let Some((position, ch)) = message.chars().enumerate().find(|(_, ch)| ch.is_ascii_digit()) {
        return Err(ValidationError::UnsupportedCharacter { ch, position });
    }
    Ok(ValidatedMessage { text: message })
}
