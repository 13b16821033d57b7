//! # tuid
//!
//! Time-ordered, type-tagged 128-bit identifiers.
//!
//! ## Design Principles
//!
//! - IDs sort chronologically, like a UUIDv7
//! - Every ID carries an 11-bit type code naming the kind of entity
//! - IDs round-trip losslessly between bytes and both textual forms
//! - Malformed or out-of-range input is rejected, never repaired
//!
//! ## ID Format
//!
//! Sixteen bytes, read as eight big-endian words:
//!
//! | Words    | Contents                                       |
//! |----------|------------------------------------------------|
//! | W0-W2    | Unix timestamp, milliseconds                   |
//! | W3       | version marker `1000` + type code (0-2047)     |
//! | W4       | variant marker `10` + 14 random bits           |
//! | W5-W7    | random                                         |
//!
//! Two textual forms:
//! - standard: `018f8f8f-8f8f-8002-9abc-def012345678`
//! - prefixed: `sh_dbpnng28q5cu01hu7ov3sf`, the type code replaced by a
//!   registered prefix and the rest packed into 22 base32hex characters
//!
//! ## Usage
//!
//! ```ignore
//! let codec = Codec::from_map(TypeMap::try_from_iter([(0, "usr"), (1, "ord")])?);
//! let id = codec.generate("usr")?;
//! let text = codec.to_prefixed(&id)?;
//! assert_eq!(codec.parse(&text)?, id);
//! ```

pub mod base32hex;
mod codec;
pub mod compact;
mod error;
mod generator;
mod identifier;
mod layout;
mod macros;
mod registry;
mod types;

pub use codec::{
    decode_prefixed, decode_standard, encode_prefixed, encode_standard, parse, Codec,
    PAYLOAD_LEN, STANDARD_LEN,
};
pub use error::{IdError, Violation};
pub use generator::{generate, stamp, MAX_TIMESTAMP_MS};
pub use identifier::Identifier;
pub use layout::{
    from_words, to_words, validate, ID_LEN, MAX_TYPE_CODE, VARIANT_MARKER, VERSION_MARKER,
    WORD_COUNT,
};
pub use registry::{Registry, TypeMap};
pub use types::{IdType, TypeLike, TypeRef};

/// Re-export uuid for consumers converting to and from [`uuid::Uuid`].
pub use uuid::Uuid;
