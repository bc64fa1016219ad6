//! Configuration file loading.
//!
//! A configuration document is YAML with a `vault_path` and an optional
//! `default_context` table mapping context-type names to filter entries.
//! Entries are converted to queries here, at load time, so a malformed
//! entry is a startup failure rather than a per-request surprise.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::{ContextMapping, PropertyValue, Query};
use crate::error::{ConstrueError, Result};

/// Loaded, validated configuration. Immutable once constructed; callers
/// pass it (or its fields) into the scanner and resolver explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub vault_path: PathBuf,
    pub contexts: ContextMapping,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    vault_path: String,
    #[serde(default)]
    default_context: BTreeMap<String, ContextEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ContextEntry {
    #[serde(default)]
    properties: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    tags: Vec<String>,
}

impl ContextEntry {
    fn into_query(self, context: &str) -> Result<Query> {
        let mut query = Query::default();
        for (key, value) in self.properties {
            match PropertyValue::from_yaml(&value) {
                Some(converted) => {
                    query.properties.insert(key, converted);
                }
                None => {
                    return Err(ConstrueError::InvalidContext {
                        context: context.to_string(),
                        message: format!("property '{}' has an unsupported value", key),
                    });
                }
            }
        }
        query.tags = self.tags.into_iter().collect();
        Ok(query)
    }
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// Missing file, YAML syntax errors, a missing `vault_path`, ill-typed
    /// `tags`, and unconvertible context property values are all fatal here.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConstrueError::ConfigNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        let file: ConfigFile =
            serde_yaml::from_str(&raw).map_err(|source| ConstrueError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut contexts = ContextMapping::new();
        for (name, entry) in file.default_context {
            let query = entry.into_query(&name)?;
            contexts.insert(name, query);
        }

        Ok(Self {
            vault_path: expand_tilde(&file.vault_path),
            contexts,
        })
    }
}

/// Check that a vault root exists and is a directory.
///
/// Called before serving MCP requests and before CLI scans, so a process
/// never starts answering queries against an invalid root.
pub fn ensure_vault(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConstrueError::VaultNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ConstrueError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
