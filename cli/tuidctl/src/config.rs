//! Registry file loading.
//!
//! The CLI reads its type registry from a TOML file:
//!
//! ```toml
//! [[types]]
//! code = 0
//! prefix = "usr"
//! ```
//!
//! Lookup order: `--registry`, then `TUID_REGISTRY`, then `registry.toml`
//! in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tuid::{IdType, TypeMap};

use crate::error::CliError;

/// Registry file name inside the config directory.
const REGISTRY_FILE: &str = "registry.toml";

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("dev", "tuid", "tuid")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// Default registry file location.
pub fn default_registry_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(REGISTRY_FILE))
}

/// Contents of a registry file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Registered types.
    #[serde(default)]
    pub types: Vec<IdType>,
}

impl RegistryFile {
    /// Parse registry file contents.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse registry file")
    }

    /// Load from an explicit path, which must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::RegistryNotFound(path.to_path_buf()).into());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry from {:?}", path))?;

        let file = Self::parse(&contents)
            .with_context(|| format!("Invalid registry file {:?}", path))?;
        debug!(path = %path.display(), type_count = file.types.len(), "Registry file loaded");
        Ok(file)
    }

    /// Load from `path` if given, else from the default location if present.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let path = default_registry_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No registry file, starting empty");
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Build the type map, or `None` if the file lists no types.
    pub fn to_type_map(&self) -> Result<Option<TypeMap>> {
        if self.types.is_empty() {
            return Ok(None);
        }

        let map = TypeMap::from_types(&self.types).context("Invalid registry entry")?;
        Ok(Some(map))
    }
}
