//! The identifier value type.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::codec;
use crate::layout::{self, from_words, to_words, ID_LEN, TYPE_WORD, WORD_COUNT};
use crate::IdError;

/// A validated 128-bit time-ordered, type-tagged identifier.
///
/// Every value satisfies the layout invariants: version nibble `8`, type code
/// at most 2047, variant bits `10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier([u8; ID_LEN]);

impl Identifier {
    /// Wraps 16 bytes after validating their layout.
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Result<Self, IdError> {
        layout::validate(&bytes)?;
        Ok(Self(bytes))
    }

    /// Wraps a byte slice after checking its length and layout.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IdError> {
        layout::validate(bytes)?;
        let mut out = [0u8; ID_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// Wraps eight big-endian words after validating their layout.
    pub fn from_words(words: [u16; WORD_COUNT]) -> Result<Self, IdError> {
        Self::from_bytes(from_words(&words))
    }

    /// Returns the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Returns the raw bytes by value.
    pub const fn into_bytes(self) -> [u8; ID_LEN] {
        self.0
    }

    /// Returns the eight big-endian words.
    pub fn words(&self) -> [u16; WORD_COUNT] {
        to_words(&self.0)
    }

    /// Returns the 11-bit type code.
    pub fn type_code(&self) -> u16 {
        self.words()[TYPE_WORD] & 0x0fff
    }

    /// Returns the embedded Unix timestamp in milliseconds.
    pub fn timestamp_ms(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&self.0[..6]);
        u64::from_be_bytes(buf)
    }

    /// Returns the embedded timestamp.
    pub fn datetime(&self) -> DateTime<Utc> {
        // 48-bit millisecond values are always inside chrono's range.
        DateTime::from_timestamp_millis(self.timestamp_ms() as i64).unwrap_or_default()
    }

    /// Formats as the hyphenated 8-4-4-4-12 hex form.
    pub fn to_standard(&self) -> String {
        codec::encode_standard(self)
    }

    /// Returns the value as a [`Uuid`].
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_standard())
    }
}

impl FromStr for Identifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode_standard(s)
    }
}

impl TryFrom<Uuid> for Identifier {
    type Error = IdError;

    fn try_from(uuid: Uuid) -> Result<Self, Self::Error> {
        Self::from_bytes(uuid.into_bytes())
    }
}

impl TryFrom<[u8; ID_LEN]> for Identifier {
    type Error = IdError;

    fn try_from(bytes: [u8; ID_LEN]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<Identifier> for Uuid {
    fn from(id: Identifier) -> Self {
        id.to_uuid()
    }
}

impl From<Identifier> for [u8; ID_LEN] {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl serde::Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_standard())
    }
}

impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        codec::decode_standard(&s).map_err(serde::de::Error::custom)
    }
}
