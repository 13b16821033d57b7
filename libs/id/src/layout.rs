//! Binary layout of the 16-byte identifier and its structural validator.
//!
//! The identifier is read as eight big-endian 16-bit words:
//!
//! ```text
//! W0 W1 W2 | W3             | W4             | W5 W6 W7
//! unix ms  | 1000 tttt tttt | 10rr rrrr rrrr | random
//!          | version + type | variant + rand |
//! ```

use crate::error::{IdError, Violation};

/// Identifier length in bytes.
pub const ID_LEN: usize = 16;

/// Number of 16-bit words in an identifier.
pub const WORD_COUNT: usize = 8;

/// Largest type code that fits the 11-bit type field.
pub const MAX_TYPE_CODE: u16 = 0x7ff;

/// Version marker (`1000`) in the top nibble of word 3.
pub const VERSION_MARKER: u16 = 0x8000;

/// Variant marker (`10`) in the top two bits of word 4.
pub const VARIANT_MARKER: u16 = 0x8000;

/// Word index carrying the version marker and the type code.
pub(crate) const TYPE_WORD: usize = 3;

/// Word index carrying the variant marker.
pub(crate) const VARIANT_WORD: usize = 4;

/// Splits 16 bytes into eight big-endian words.
pub fn to_words(bytes: &[u8; ID_LEN]) -> [u16; WORD_COUNT] {
    let mut words = [0u16; WORD_COUNT];
    for (word, pair) in words.iter_mut().zip(bytes.chunks_exact(2)) {
        *word = u16::from_be_bytes([pair[0], pair[1]]);
    }
    words
}

/// Joins eight big-endian words into 16 bytes.
pub fn from_words(words: &[u16; WORD_COUNT]) -> [u8; ID_LEN] {
    let mut bytes = [0u8; ID_LEN];
    for (pair, word) in bytes.chunks_exact_mut(2).zip(words) {
        pair.copy_from_slice(&word.to_be_bytes());
    }
    bytes
}

/// Checks every structural invariant of an identifier.
///
/// All checks run; the error lists each one that failed.
pub fn validate(bytes: &[u8]) -> Result<(), IdError> {
    let Ok(bytes) = <&[u8; ID_LEN]>::try_from(bytes) else {
        return Err(IdError::InvalidIdentifier {
            violations: vec![Violation::Length(bytes.len())],
        });
    };

    let violations = violations(&to_words(bytes));
    if violations.is_empty() {
        Ok(())
    } else {
        Err(IdError::InvalidIdentifier { violations })
    }
}

fn violations(words: &[u16; WORD_COUNT]) -> Vec<Violation> {
    let mut found = Vec::new();

    let version = (words[TYPE_WORD] >> 12) as u8;
    if version != 0b1000 {
        found.push(Violation::Version(version));
    }

    let type_field = words[TYPE_WORD] & 0x0fff;
    if type_field > MAX_TYPE_CODE {
        found.push(Violation::TypeRange(type_field));
    }

    let variant = (words[VARIANT_WORD] >> 14) as u8;
    if variant != 0b10 {
        found.push(Violation::Variant(variant));
    }

    found
}
