//! Text encodings of an identifier.
//!
//! Two forms exist:
//! - standard: `018f8f8f-8f8f-8002-9abc-def012345678`, registry independent
//! - prefixed: `sh_<22 base32hex chars>`, the type code replaced by its prefix
//!
//! The prefixed payload is words `W4 W5 W6 W7 W0 W1 W2` with the variant
//! marker of `W4` removed, compacted to 110 bits (see [`crate::compact`]).

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::base32hex;
use crate::compact::{compact110, expand110, COMPACT_WORDS};
use crate::generator;
use crate::layout::{VARIANT_MARKER, VERSION_MARKER};
use crate::registry::{Registry, TypeMap};
use crate::types::TypeRef;
use crate::{IdError, Identifier};

/// Length of the standard form.
pub const STANDARD_LEN: usize = 36;

/// Length of the base32hex payload of the prefixed form.
pub const PAYLOAD_LEN: usize = 22;

/// Byte offsets of the hyphens in the standard form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Formats an identifier as 8-4-4-4-12 lowercase hex.
pub fn encode_standard(id: &Identifier) -> String {
    let hex = hex::encode(id.as_bytes());
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

/// Parses the 8-4-4-4-12 hex form, either case, and validates the layout.
pub fn decode_standard(text: &str) -> Result<Identifier, IdError> {
    let invalid = || IdError::InvalidStandard(text.to_string());

    let bytes = text.as_bytes();
    if bytes.len() != STANDARD_LEN {
        return Err(invalid());
    }

    let well_formed = bytes.iter().enumerate().all(|(i, b)| {
        if HYPHENS.contains(&i) {
            *b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    });
    if !well_formed {
        return Err(invalid());
    }

    let digits: String = text.chars().filter(|c| *c != '-').collect();
    let mut raw = [0u8; 16];
    hex::decode_to_slice(&digits, &mut raw).map_err(|_| invalid())?;

    Identifier::from_bytes(raw)
}

/// Formats an identifier as `<prefix>_<22 base32hex chars>`.
///
/// Fails with [`IdError::UndefinedType`] if the type code has no prefix.
pub fn encode_prefixed(id: &Identifier, map: &TypeMap) -> Result<String, IdError> {
    let prefix = map.prefix_for(id.type_code())?;

    let w = id.words();
    let compacted = compact110([w[4], w[5], w[6], w[7], w[0], w[1], w[2]]);

    let mut packed = [0u8; COMPACT_WORDS * 2];
    for (pair, word) in packed.chunks_exact_mut(2).zip(compacted) {
        pair.copy_from_slice(&word.to_be_bytes());
    }

    // 112 bits encode to 23 symbols; the last one covers only padding.
    let mut payload = base32hex::encode(&packed);
    payload.truncate(PAYLOAD_LEN);

    Ok(format!("{}_{}", prefix, payload))
}

/// Parses `<prefix>_<22 base32hex chars>` and validates the layout.
pub fn decode_prefixed(text: &str, map: &TypeMap) -> Result<Identifier, IdError> {
    let invalid = || IdError::InvalidPrefixed(text.to_string());

    let (prefix, payload) = split_prefixed(text).ok_or_else(invalid)?;
    let code = map.code_for(prefix)?;

    // A trailing zero symbol restores the two padding bits.
    let mut padded = String::with_capacity(PAYLOAD_LEN + 1);
    padded.push_str(payload);
    padded.push('0');

    let packed = base32hex::decode(&padded).map_err(|_| invalid())?;
    if packed.len() != COMPACT_WORDS * 2 {
        return Err(invalid());
    }

    let mut compacted = [0u16; COMPACT_WORDS];
    for (word, pair) in compacted.iter_mut().zip(packed.chunks_exact(2)) {
        *word = u16::from_be_bytes([pair[0], pair[1]]);
    }

    let o = expand110(compacted);
    Identifier::from_words([
        o[4],
        o[5],
        o[6],
        code | VERSION_MARKER,
        o[0] | VARIANT_MARKER,
        o[1],
        o[2],
        o[3],
    ])
}

/// Splits `^[a-z]+_[0-9a-v]{22}$` into prefix and payload.
fn split_prefixed(text: &str) -> Option<(&str, &str)> {
    let (prefix, payload) = text.split_once('_')?;

    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }

    if payload.len() != PAYLOAD_LEN || !payload.bytes().all(base32hex::is_symbol) {
        return None;
    }

    Some((prefix, payload))
}

/// Parses either textual form, dispatching on shape.
///
/// - 36 characters with a hyphen at offset 8: standard form
/// - longer than 23 characters with an underscore: prefixed form
/// - anything else: [`IdError::InvalidUuid`]
pub fn parse(text: &str, map: &TypeMap) -> Result<Identifier, IdError> {
    let bytes = text.as_bytes();

    if bytes.len() == STANDARD_LEN && bytes[HYPHENS[0]] == b'-' {
        decode_standard(text)
    } else if bytes.len() > PAYLOAD_LEN + 1 && text.contains('_') {
        decode_prefixed(text, map)
    } else {
        Err(IdError::InvalidUuid(text.to_string()))
    }
}

/// Identifier codec bound to one registry.
///
/// Construct one per active registry; clones share the registry.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<Registry>,
}

impl Codec {
    /// Creates a codec over a shared registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Creates a codec over a fresh registry holding `map`.
    pub fn from_map(map: TypeMap) -> Self {
        Self::new(Arc::new(Registry::from_map(map)))
    }

    /// Returns the registry this codec resolves prefixes against.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Generates an identifier for the current time.
    pub fn generate<'a>(&self, ty: impl Into<TypeRef<'a>>) -> Result<Identifier, IdError> {
        let code = self.registry.resolve(ty.into())?;
        generator::generate(i64::from(code), None)
    }

    /// Generates an identifier for the given instant.
    pub fn generate_at<'a>(
        &self,
        ty: impl Into<TypeRef<'a>>,
        at: DateTime<Utc>,
    ) -> Result<Identifier, IdError> {
        let code = self.registry.resolve(ty.into())?;
        generator::generate(i64::from(code), Some(at))
    }

    /// Formats as the standard form.
    pub fn to_standard(&self, id: &Identifier) -> String {
        encode_standard(id)
    }

    /// Formats as the prefixed form.
    pub fn to_prefixed(&self, id: &Identifier) -> Result<String, IdError> {
        encode_prefixed(id, &self.registry.snapshot())
    }

    /// Parses the standard form.
    pub fn from_standard(&self, text: &str) -> Result<Identifier, IdError> {
        decode_standard(text)
    }

    /// Parses the prefixed form.
    pub fn from_prefixed(&self, text: &str) -> Result<Identifier, IdError> {
        decode_prefixed(text, &self.registry.snapshot())
    }

    /// Parses either textual form.
    pub fn parse(&self, text: &str) -> Result<Identifier, IdError> {
        parse(text, &self.registry.snapshot())
    }

    /// Wraps raw bytes after validating them.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Identifier, IdError> {
        Identifier::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map() -> TypeMap {
        TypeMap::try_from_iter([(0, "usr"), (1, "ord"), (2, "sh")]).unwrap()
    }

    fn sample() -> Identifier {
        Identifier::from_bytes([
            0x01, 0x8f, 0x8f, 0x8f, 0x8f, 0x8f, 0x80, 0x02, 0x9a, 0xbc, 0xde, 0xf0, 0x12, 0x34,
            0x56, 0x78,
        ])
        .unwrap()
    }

    #[test]
    fn test_encode_standard() {
        assert_eq!(
            encode_standard(&sample()),
            "018f8f8f-8f8f-8002-9abc-def012345678"
        );
    }

    #[test]
    fn test_decode_standard_accepts_uppercase() {
        let id = decode_standard("018F8F8F-8F8F-8002-9ABC-DEF012345678").unwrap();
        assert_eq!(id, sample());
    }

    #[test]
    fn test_decode_standard_rejects_bad_shape() {
        for text in [
            "",
            "018f8f8f8f8f80029abcdef012345678",
            "018f8f8f-8f8f-8002-9abc-def01234567",
            "018f8f8f-8f8f-8002-9abc-def0123456789",
            "018f8f8f_8f8f-8002-9abc-def012345678",
            "018f8f8f-8f8f-8002-9abc-def01234567g",
        ] {
            assert_eq!(
                decode_standard(text),
                Err(IdError::InvalidStandard(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn test_decode_standard_validates_layout() {
        let err = decode_standard("018f8f8f-8f8f-4002-9abc-def012345678").unwrap_err();
        assert!(matches!(err, IdError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_encode_prefixed_known_value() {
        // Compacted words: 6af3 7bc0 48d1 59e0 063e 3e3e 3e3c
        assert_eq!(
            encode_prefixed(&sample(), &map()).unwrap(),
            "sh_dbpnng28q5cu01hu7ov3sf"
        );
    }

    #[test]
    fn test_decode_prefixed_known_value() {
        assert_eq!(
            decode_prefixed("sh_dbpnng28q5cu01hu7ov3sf", &map()).unwrap(),
            sample()
        );
    }

    #[test]
    fn test_encode_prefixed_undefined_type() {
        let id = Identifier::from_bytes([
            0x01, 0x8f, 0x8f, 0x8f, 0x8f, 0x8f, 0x80, 0x14, 0x9a, 0xbc, 0xde, 0xf0, 0x12, 0x34,
            0x56, 0x78,
        ])
        .unwrap();
        assert_eq!(encode_prefixed(&id, &map()), Err(IdError::UndefinedType(20)));
    }

    #[test]
    fn test_decode_prefixed_undefined_prefix() {
        assert_eq!(
            decode_prefixed("proj_aj81um6u90h7g1h709k02p", &map()),
            Err(IdError::UndefinedPrefix("proj".to_string()))
        );
    }

    #[test]
    fn test_decode_prefixed_rejects_bad_shape() {
        for text in [
            "123",
            "ss_1",
            "abcd_xxx",
            "abcd_abcd_abcd_abcd_abcd_ab",
            "usr_usr_74pl5s7s4q6m01h70c3ttt",
            "usr_000074pl5s7s4q6m01h70c3ttt",
            "_dbpnng28q5cu01hu7ov3sf",
            "SH_dbpnng28q5cu01hu7ov3sf",
            "sh_3BRNNG24Q2MU01HU7OV3SF",
            "sh_dbpnng28q5cu01hu7ov3sw",
        ] {
            assert_eq!(
                decode_prefixed(text, &map()),
                Err(IdError::InvalidPrefixed(text.to_string())),
                "{text}"
            );
        }
    }

    #[test]
    fn test_parse_dispatch() {
        let map = map();
        assert_eq!(
            parse("018f8f8f-8f8f-8002-9abc-def012345678", &map).unwrap(),
            sample()
        );
        assert_eq!(parse("sh_dbpnng28q5cu01hu7ov3sf", &map).unwrap(), sample());

        assert_eq!(parse("123", &map), Err(IdError::InvalidUuid("123".into())));
        assert_eq!(parse("ss_1", &map), Err(IdError::InvalidUuid("ss_1".into())));
        assert_eq!(
            parse("abcd_xxx", &map),
            Err(IdError::InvalidUuid("abcd_xxx".into()))
        );
        assert!(matches!(
            parse("usr_000074pl5s7s4q6m01h70c3ttt", &map),
            Err(IdError::InvalidPrefixed(_))
        ));
    }

    #[test]
    fn test_parse_keeps_standard_errors_once_dispatched() {
        let map = map();

        let bad_digit = "018f8f8f-8f8f-8002-9abc-def01234567g";
        assert_eq!(
            parse(bad_digit, &map),
            Err(IdError::InvalidStandard(bad_digit.into()))
        );

        let misplaced = "018f8f8f-8f8f-8002-9abc-def0-2345678";
        assert_eq!(
            parse(misplaced, &map),
            Err(IdError::InvalidStandard(misplaced.into()))
        );

        assert!(matches!(
            parse("018f8f8f-8f8f-7002-9abc-def012345678", &map),
            Err(IdError::InvalidIdentifier { .. })
        ));

        let no_leading_hyphen = "018f8f8f08f8f-8002-9abc-def012345678";
        assert_eq!(
            parse(no_leading_hyphen, &map),
            Err(IdError::InvalidUuid(no_leading_hyphen.into()))
        );
    }

    #[test]
    fn test_codec_follows_registry_replacement() {
        let codec = Codec::from_map(map());
        let id = sample();
        assert!(codec.to_prefixed(&id).unwrap().starts_with("sh_"));

        codec.registry().set_map([(2, "ship")]).unwrap();
        assert!(codec.to_prefixed(&id).unwrap().starts_with("ship_"));
        assert_eq!(
            codec.from_prefixed("sh_dbpnng28q5cu01hu7ov3sf"),
            Err(IdError::UndefinedPrefix("sh".into()))
        );
    }

    #[test]
    fn test_codec_from_bytes_validates() {
        let codec = Codec::from_map(map());
        assert_eq!(codec.from_bytes(sample().as_bytes()).unwrap(), sample());
        assert!(codec.from_bytes(&[0u8; 16]).is_err());
        assert!(codec.from_bytes(&[0u8; 4]).is_err());
    }

    fn arb_identifier() -> impl Strategy<Value = Identifier> {
        (any::<[u8; 16]>(), 0u16..=2047).prop_map(|(mut bytes, code)| {
            bytes[6] = 0x80 | (code >> 8) as u8;
            bytes[7] = code as u8;
            bytes[8] = (bytes[8] & 0x3f) | 0x80;
            Identifier::from_bytes(bytes).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_standard_roundtrip(id in arb_identifier()) {
            prop_assert_eq!(decode_standard(&encode_standard(&id)).unwrap(), id);
        }

        #[test]
        fn prop_prefixed_roundtrip(id in arb_identifier()) {
            let map = TypeMap::try_from_iter([(id.type_code(), "any")]).unwrap();
            let text = encode_prefixed(&id, &map).unwrap();
            prop_assert_eq!(text.len(), "any_".len() + PAYLOAD_LEN);
            prop_assert_eq!(decode_prefixed(&text, &map).unwrap(), id);
        }

        #[test]
        fn prop_parse_accepts_both_forms(id in arb_identifier()) {
            let map = TypeMap::try_from_iter([(id.type_code(), "t")]).unwrap();
            prop_assert_eq!(parse(&encode_standard(&id), &map).unwrap(), id);
            prop_assert_eq!(parse(&encode_prefixed(&id, &map).unwrap(), &map).unwrap(), id);
        }
    }
}
