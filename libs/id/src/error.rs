//! Error types for identifier parsing, encoding, and generation.

use std::fmt;

use thiserror::Error;

/// A structural invariant of the 16-byte layout that a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The value is not exactly 16 bytes long.
    Length(usize),

    /// The top nibble of word 3 is not the version marker `1000`.
    Version(u8),

    /// The 12-bit type field exceeds 2047.
    TypeRange(u16),

    /// The top two bits of word 4 are not the variant marker `10`.
    Variant(u8),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Length(len) => write!(f, "expected 16 bytes, got {}", len),
            Violation::Version(nibble) => write!(f, "version nibble is {:#x}, expected 0x8", nibble),
            Violation::TypeRange(code) => write!(f, "type field {} exceeds 2047", code),
            Violation::Variant(bits) => write!(f, "variant bits are {:#04b}, expected 0b10", bits),
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur when parsing, encoding, or generating identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The 16-byte value fails one or more structural invariants.
    #[error("invalid identifier: {}", join_violations(.violations))]
    InvalidIdentifier { violations: Vec<Violation> },

    /// The requested type code is outside `[0, 2047]`.
    #[error("type must be between 0 and 2047 inclusive, got {0}")]
    OutOfBoundType(i64),

    /// The type code has no registered prefix.
    #[error("type '{0}' does not have a corresponding prefix value")]
    UndefinedType(u16),

    /// The prefix has no registered type code.
    #[error("prefix '{0}' does not have a corresponding type value")]
    UndefinedPrefix(String),

    /// The text is not of the form `<prefix>_<22 base32hex chars>`.
    #[error("invalid prefixed identifier: '{0}'")]
    InvalidPrefixed(String),

    /// The text is not a hyphenated 8-4-4-4-12 hex string.
    #[error("invalid standard identifier: '{0}'")]
    InvalidStandard(String),

    /// The text matches neither textual form.
    #[error("invalid uuid: '{0}'")]
    InvalidUuid(String),

    /// A registry entry's prefix is not a lowercase ASCII word.
    #[error("invalid prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// The registry was configured with no entries.
    #[error("type map cannot be empty")]
    EmptyMap,

    /// The generation instant cannot be carried in a 48-bit millisecond field.
    #[error("timestamp out of range: {0} ms since the Unix epoch")]
    InvalidTimestamp(i64),
}

impl IdError {
    /// Returns true if this error came from malformed text or bytes.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            IdError::InvalidIdentifier { .. }
                | IdError::InvalidPrefixed(_)
                | IdError::InvalidStandard(_)
                | IdError::InvalidUuid(_)
        )
    }

    /// Returns true if this error came from a registry lookup or configuration.
    pub fn is_registry_error(&self) -> bool {
        matches!(
            self,
            IdError::UndefinedType(_)
                | IdError::UndefinedPrefix(_)
                | IdError::InvalidPrefix { .. }
                | IdError::EmptyMap
        )
    }

    /// Returns the violated invariants, if this is a structural failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            IdError::InvalidIdentifier { violations } => violations,
            _ => &[],
        }
    }
}
