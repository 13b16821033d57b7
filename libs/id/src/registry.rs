//! Type registry: the bidirectional code <-> prefix mapping.
//!
//! [`TypeMap`] is an immutable snapshot. [`Registry`] holds the active
//! snapshot and replaces it wholesale:
//! - there is no partial update; each configuration discards the previous map
//! - a rejected configuration leaves the previous map in force
//! - readers always see one complete snapshot, never a mix of two

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use crate::types::{check_code, check_prefix, TypeLike, TypeRef};
use crate::IdError;

/// An immutable code <-> prefix mapping.
///
/// Each code maps to exactly one prefix and each prefix to exactly one code.
/// Building from entries is last-write-wins in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    by_code: BTreeMap<u16, String>,
    by_prefix: HashMap<String, u16>,
}

impl TypeMap {
    /// Builds a map from `(code, prefix)` pairs.
    ///
    /// Fails with [`IdError::EmptyMap`] if there are no pairs.
    pub fn try_from_iter<I, P>(entries: I) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = (u16, P)>,
        P: Into<String>,
    {
        let mut map = Self::default();
        for (code, prefix) in entries {
            map.insert(code, prefix.into())?;
        }

        if map.is_empty() {
            return Err(IdError::EmptyMap);
        }

        Ok(map)
    }

    /// Builds a map from values that report their own code and prefix.
    pub fn from_types<I>(types: I) -> Result<Self, IdError>
    where
        I: IntoIterator,
        I::Item: TypeLike,
    {
        Self::try_from_iter(
            types
                .into_iter()
                .map(|t| (t.code(), t.prefix().to_string())),
        )
    }

    fn insert(&mut self, code: u16, prefix: String) -> Result<(), IdError> {
        check_code(i64::from(code))?;
        check_prefix(&prefix)?;

        if let Some(old_prefix) = self.by_code.insert(code, prefix.clone()) {
            if old_prefix != prefix {
                debug!(code, old_prefix = %old_prefix, new_prefix = %prefix, "Type code remapped");
                self.by_prefix.remove(&old_prefix);
            }
        }

        if let Some(old_code) = self.by_prefix.insert(prefix.clone(), code) {
            if old_code != code {
                debug!(prefix = %prefix, old_code, new_code = code, "Prefix remapped");
                self.by_code.remove(&old_code);
            }
        }

        Ok(())
    }

    /// Returns the prefix registered for `code`.
    pub fn prefix_for(&self, code: u16) -> Result<&str, IdError> {
        self.by_code
            .get(&code)
            .map(String::as_str)
            .ok_or(IdError::UndefinedType(code))
    }

    /// Returns the code registered for `prefix`.
    pub fn code_for(&self, prefix: &str) -> Result<u16, IdError> {
        self.by_prefix
            .get(prefix)
            .copied()
            .ok_or_else(|| IdError::UndefinedPrefix(prefix.to_string()))
    }

    /// Resolves a type reference to a range-checked numeric code.
    ///
    /// Only [`TypeRef::Prefix`] consults the map.
    pub fn resolve(&self, ty: TypeRef<'_>) -> Result<u16, IdError> {
        match ty {
            TypeRef::Code(code) => check_code(code),
            TypeRef::Prefix(prefix) => self.code_for(prefix),
            TypeRef::Typed(value) => check_code(i64::from(value.code())),
        }
    }

    /// Returns the code -> prefix mapping.
    pub fn to_map(&self) -> BTreeMap<u16, String> {
        self.by_code.clone()
    }

    /// Iterates over `(code, prefix)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.by_code.iter().map(|(c, p)| (*c, p.as_str()))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// The active type map, replaceable at runtime.
///
/// Uses ArcSwap so lookups never block and never observe a half-applied
/// configuration.
pub struct Registry {
    snapshot: ArcSwap<TypeMap>,
}

impl Registry {
    /// Creates a registry with no types registered.
    pub fn new() -> Self {
        Self::from_map(TypeMap::default())
    }

    /// Creates a registry holding `map`.
    ///
    /// This sets the initial state only; an empty `map` behaves like
    /// [`Registry::new`]. Later configuration goes through
    /// [`Registry::set_map`], [`Registry::set_types`] or [`Registry::replace`].
    pub fn from_map(map: TypeMap) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(map),
        }
    }

    /// Replaces the registry with `(code, prefix)` pairs.
    pub fn set_map<I, P>(&self, entries: I) -> Result<(), IdError>
    where
        I: IntoIterator<Item = (u16, P)>,
        P: Into<String>,
    {
        let map = TypeMap::try_from_iter(entries).inspect_err(|e| {
            warn!(error = %e, "Rejected type map");
        })?;
        self.replace(map)
    }

    /// Replaces the registry with values that report their own code and prefix.
    pub fn set_types<I>(&self, types: I) -> Result<(), IdError>
    where
        I: IntoIterator,
        I::Item: TypeLike,
    {
        let map = TypeMap::from_types(types).inspect_err(|e| {
            warn!(error = %e, "Rejected type map");
        })?;
        self.replace(map)
    }

    /// Replaces the registry with an already-built map.
    ///
    /// An empty map is rejected with [`IdError::EmptyMap`] and the previous
    /// map stays in force.
    pub fn replace(&self, map: TypeMap) -> Result<(), IdError> {
        if map.is_empty() {
            warn!("Rejected empty type map");
            return Err(IdError::EmptyMap);
        }

        let type_count = map.len();
        self.snapshot.store(Arc::new(map));
        info!(type_count, "Type map replaced");
        Ok(())
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<TypeMap> {
        self.snapshot.load_full()
    }

    /// Returns a copy of the current code -> prefix mapping.
    pub fn get_map(&self) -> BTreeMap<u16, String> {
        self.snapshot.load().to_map()
    }

    /// Returns the prefix registered for `code`.
    pub fn prefix_for(&self, code: u16) -> Result<String, IdError> {
        self.snapshot.load().prefix_for(code).map(str::to_string)
    }

    /// Returns the code registered for `prefix`.
    pub fn code_for(&self, prefix: &str) -> Result<u16, IdError> {
        self.snapshot.load().code_for(prefix)
    }

    /// Resolves a type reference against the current snapshot.
    pub fn resolve(&self, ty: TypeRef<'_>) -> Result<u16, IdError> {
        self.snapshot.load().resolve(ty)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.snapshot.load().by_code)
            .finish()
    }
}
