//! Fresh identifier generation.
//!
//! A UUIDv7 supplies the time-ordered base: a 48-bit millisecond timestamp
//! in words 0-2, the variant marker in word 4 and random bits elsewhere.
//! Word 3 is then overwritten with the version marker and type code.

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::layout::{to_words, ID_LEN, TYPE_WORD, VERSION_MARKER};
use crate::types::check_code;
use crate::{IdError, Identifier};

/// Largest Unix millisecond timestamp the 48-bit field can carry.
pub const MAX_TIMESTAMP_MS: i64 = (1 << 48) - 1;

/// Generates an identifier with type `code`, timestamped `at` or now.
///
/// Fails with [`IdError::OutOfBoundType`] if `code` is outside `[0, 2047]`.
pub fn generate(code: i64, at: Option<DateTime<Utc>>) -> Result<Identifier, IdError> {
    check_code(code)?;
    let base = time_ordered_base(at)?;
    stamp(base, code)
}

/// Overwrites word 3 of a time-ordered `base` with the version marker and
/// type `code`.
///
/// The other words are kept as-is, so `base` must already carry the variant
/// marker in word 4 (any UUIDv7 does). Fails with
/// [`IdError::OutOfBoundType`] for a code outside `[0, 2047]` and
/// [`IdError::InvalidIdentifier`] if the result breaks the layout.
pub fn stamp(base: [u8; ID_LEN], code: i64) -> Result<Identifier, IdError> {
    let code = check_code(code)?;
    let mut words = to_words(&base);
    words[TYPE_WORD] = code | VERSION_MARKER;
    Identifier::from_words(words)
}

fn time_ordered_base(at: Option<DateTime<Utc>>) -> Result<[u8; ID_LEN], IdError> {
    let uuid = match at {
        None => Uuid::now_v7(),
        Some(at) => {
            let ms = at.timestamp_millis();
            if !(0..=MAX_TIMESTAMP_MS).contains(&ms) {
                return Err(IdError::InvalidTimestamp(ms));
            }
            let ms = ms as u64;
            let ts = Timestamp::from_unix(NoContext, ms / 1000, ((ms % 1000) * 1_000_000) as u32);
            Uuid::new_v7(ts)
        }
    };
    Ok(uuid.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::validate;
    use proptest::prelude::*;

    fn example_instant() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-19T06:35:01.391Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_generate_with_timestamp() {
        let id = generate(0x2bc, Some(example_instant())).unwrap();
        assert!(id.to_standard().starts_with("018f8f8f-8f8f-82bc-"));
        assert_eq!(id.timestamp_ms(), 0x018f_8f8f_8f8f);
        assert_eq!(id.datetime(), example_instant());
    }

    #[test]
    fn test_generate_type_two_example() {
        let id = generate(2, Some(example_instant())).unwrap();
        let text = id.to_standard();
        assert!(text.starts_with("018f8f8f-8f8f-8002-"), "{text}");
        assert_eq!(text.len(), 36);
    }

    #[test]
    fn test_generate_rejects_out_of_bound_types() {
        for code in [-1000, -1, 2048, 4095, 5000, 20000] {
            assert_eq!(generate(code, None), Err(IdError::OutOfBoundType(code)));
        }
    }

    #[test]
    fn test_generate_rejects_unrepresentable_timestamps() {
        let before_epoch = DateTime::parse_from_rfc3339("1969-12-31T23:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            generate(0, Some(before_epoch)),
            Err(IdError::InvalidTimestamp(-1000))
        );

        let beyond = DateTime::from_timestamp_millis(MAX_TIMESTAMP_MS + 1).unwrap();
        assert!(matches!(
            generate(0, Some(beyond)),
            Err(IdError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_stamp_uuid_v7_base() {
        let base = Uuid::now_v7().into_bytes();
        let id = stamp(base, 0x7ff).unwrap();

        assert!(validate(id.as_bytes()).is_ok());
        assert_eq!(id.words()[3], 0x87ff);
        assert_eq!(id.as_bytes()[..6], base[..6]);
        assert_eq!(id.as_bytes()[8..], base[8..]);
    }

    #[test]
    fn test_stamp_rejects_out_of_bound_types() {
        let base = Uuid::now_v7().into_bytes();
        assert_eq!(stamp(base, 2048), Err(IdError::OutOfBoundType(2048)));
        assert_eq!(stamp(base, -1), Err(IdError::OutOfBoundType(-1)));
    }

    #[test]
    fn test_stamp_rejects_base_without_variant() {
        let err = stamp([0xff; ID_LEN], 1).unwrap_err();
        assert_eq!(err.violations(), &[crate::Violation::Variant(0b11)]);
    }

    #[test]
    fn test_generate_now_is_time_ordered() {
        let first = generate(1, None).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = generate(1, None).unwrap();
        assert!(first.timestamp_ms() < second.timestamp_ms());
        assert_ne!(first, second);
    }

    proptest! {
        #[test]
        fn prop_generated_ids_satisfy_layout(
            code in 0i64..=2047,
            ms in 0i64..=MAX_TIMESTAMP_MS,
        ) {
            let at = DateTime::from_timestamp_millis(ms).unwrap();
            let id = generate(code, Some(at)).unwrap();

            prop_assert!(validate(id.as_bytes()).is_ok());
            prop_assert_eq!(id.as_bytes()[6] >> 4, 8);
            prop_assert_eq!(i64::from(id.type_code()), code);
            prop_assert_eq!(id.words()[4] >> 14, 0b10);
            prop_assert_eq!(id.timestamp_ms() as i64, ms);
        }
    }
}
