//! Macros for declaring type tags.

/// Declares a zero-sized type tag with a fixed code and prefix.
///
/// This generates a unit struct with:
/// - `CODE` and `PREFIX` constants
/// - a [`TypeLike`](crate::TypeLike) implementation
/// - `id_type()` returning the owned [`IdType`](crate::IdType)
///
/// The code is range-checked at compile time.
///
/// # Example
///
/// ```ignore
/// define_type!(UserType, 0, "usr");
/// define_type!(OrderType, 1, "ord");
///
/// let map = TypeMap::from_types([UserType::id_type(), OrderType::id_type()])?;
/// let codec = Codec::from_map(map);
/// let id = codec.generate(TypeRef::typed(&UserType))?;
/// ```
#[macro_export]
macro_rules! define_type {
    ($name:ident, $code:literal, $prefix:literal) => {
        /// A type tag for this entity kind.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name;

        impl $name {
            /// The numeric type code.
            pub const CODE: u16 = $code;

            /// The textual prefix.
            pub const PREFIX: &'static str = $prefix;

            /// Returns this tag as an owned registry entry.
            #[must_use]
            pub fn id_type() -> $crate::IdType {
                $crate::IdType::new(Self::CODE, Self::PREFIX)
            }
        }

        const _: () = assert!(
            $name::CODE <= $crate::MAX_TYPE_CODE,
            "type code must be between 0 and 2047 inclusive"
        );

        impl $crate::TypeLike for $name {
            fn code(&self) -> u16 {
                Self::CODE
            }

            fn prefix(&self) -> &str {
                Self::PREFIX
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(Self::PREFIX)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{IdType, TypeLike};

    define_type!(CardType, 0x101, "card");

    #[test]
    fn test_defined_type_constants() {
        assert_eq!(CardType::CODE, 257);
        assert_eq!(CardType::PREFIX, "card");
        assert_eq!(CardType.code(), 257);
        assert_eq!(CardType.prefix(), "card");
    }

    #[test]
    fn test_defined_type_entry() {
        assert_eq!(CardType::id_type(), IdType::new(257, "card"));
        assert_eq!(CardType.to_string(), "card");
    }
}
