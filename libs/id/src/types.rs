//! Type tags: what kind of entity an identifier names.
//!
//! A type is a numeric code (0-2047) paired with a short lowercase prefix.
//! Anything that can report both implements [`TypeLike`]; [`TypeRef`] is the
//! single argument shape accepted wherever a type must be resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::MAX_TYPE_CODE;
use crate::IdError;

/// A value that knows its numeric type code and prefix.
pub trait TypeLike {
    /// The numeric type code.
    fn code(&self) -> u16;

    /// The textual prefix.
    fn prefix(&self) -> &str;
}

impl<T: TypeLike + ?Sized> TypeLike for &T {
    fn code(&self) -> u16 {
        (**self).code()
    }

    fn prefix(&self) -> &str {
        (**self).prefix()
    }
}

/// An owned type entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdType {
    pub code: u16,
    pub prefix: String,
}

impl IdType {
    /// Creates a type entry.
    pub fn new(code: u16, prefix: impl Into<String>) -> Self {
        Self {
            code,
            prefix: prefix.into(),
        }
    }
}

impl TypeLike for IdType {
    fn code(&self) -> u16 {
        self.code
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.prefix, self.code)
    }
}

/// A reference to a type, resolved to a numeric code before generation.
#[derive(Clone, Copy)]
pub enum TypeRef<'a> {
    /// A numeric code, range-checked on resolution.
    Code(i64),
    /// A prefix, looked up in a registry.
    Prefix(&'a str),
    /// A value that reports its own code.
    Typed(&'a dyn TypeLike),
}

impl<'a> TypeRef<'a> {
    /// Wraps any [`TypeLike`] value.
    pub fn typed<T: TypeLike>(value: &'a T) -> Self {
        TypeRef::Typed(value)
    }
}

impl fmt::Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Code(code) => f.debug_tuple("Code").field(code).finish(),
            TypeRef::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            TypeRef::Typed(value) => f
                .debug_struct("Typed")
                .field("code", &value.code())
                .field("prefix", &value.prefix())
                .finish(),
        }
    }
}

impl From<i64> for TypeRef<'_> {
    fn from(code: i64) -> Self {
        TypeRef::Code(code)
    }
}

impl From<i32> for TypeRef<'_> {
    fn from(code: i32) -> Self {
        TypeRef::Code(i64::from(code))
    }
}

impl From<u16> for TypeRef<'_> {
    fn from(code: u16) -> Self {
        TypeRef::Code(i64::from(code))
    }
}

impl<'a> From<&'a str> for TypeRef<'a> {
    fn from(prefix: &'a str) -> Self {
        TypeRef::Prefix(prefix)
    }
}

impl<'a> From<&'a String> for TypeRef<'a> {
    fn from(prefix: &'a String) -> Self {
        TypeRef::Prefix(prefix.as_str())
    }
}

impl<'a> From<&'a IdType> for TypeRef<'a> {
    fn from(value: &'a IdType) -> Self {
        TypeRef::Typed(value)
    }
}

impl<'a> From<&'a dyn TypeLike> for TypeRef<'a> {
    fn from(value: &'a dyn TypeLike) -> Self {
        TypeRef::Typed(value)
    }
}

/// Range-checks a numeric type code.
pub fn check_code(code: i64) -> Result<u16, IdError> {
    u16::try_from(code)
        .ok()
        .filter(|c| *c <= MAX_TYPE_CODE)
        .ok_or(IdError::OutOfBoundType(code))
}

/// Checks that a prefix is a non-empty lowercase ASCII word.
pub fn check_prefix(prefix: &str) -> Result<(), IdError> {
    if prefix.is_empty() {
        return Err(IdError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: "prefix cannot be empty".to_string(),
        });
    }

    if let Some(c) = prefix.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(IdError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: format!("invalid character '{}' in prefix", c),
        });
    }

    Ok(())
}
